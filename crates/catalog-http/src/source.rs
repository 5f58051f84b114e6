use catalog::{Character, CharacterSource, SourceError};
use serde::{Deserialize, Serialize};

use crate::page::PageResponse;

/// First page of the public character list.
pub const DEFAULT_API_URL: &str = "https://rickandmortyapi.com/api/character";

/// Pages fetched in parallel per batch when page numbers are known.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// How the client walks the paginated list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum FetchStrategy {
    /// Follow each page's `next` cursor, one request at a time.
    #[default]
    #[serde(rename = "cursor")]
    FollowCursor,

    /// Read the page count from the first page, then fetch the rest by
    /// `?page=N` in concurrent batches. Falls back to cursor following when
    /// the API does not report a page count.
    #[serde(rename = "pages")]
    PageNumbers,
}

/// Configuration for the HTTP character source.
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    pub base_url: Option<String>,
    pub strategy: FetchStrategy,
    pub concurrency: usize,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            strategy: FetchStrategy::default(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Fetches the full character catalog from a paginated REST endpoint.
pub struct HttpCharacterSource {
    config: HttpSourceConfig,
    client: reqwest::Client,
}

impl HttpCharacterSource {
    pub fn new(config: HttpSourceConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    fn concurrency(&self) -> usize {
        self.config.concurrency.max(1)
    }

    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client.get(url).header("User-Agent", "character-catalog")
    }

    fn page_url(&self, page: u32) -> String {
        let base = self.base_url();
        let separator = if base.contains('?') { '&' } else { '?' };
        format!("{base}{separator}page={page}")
    }

    async fn fetch_page(&self, url: &str) -> Result<PageResponse, SourceError> {
        tracing::debug!(url, "fetching page");

        let response = self
            .build_request(url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::Network(format!(
                "HTTP {} from {url}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("invalid page from {url}: {e}")))
    }

    /// Walk `next` cursors starting after `first` until the API reports none.
    async fn follow_cursor(&self, first: PageResponse) -> Result<Vec<Character>, SourceError> {
        let mut all = first.results;
        let mut next = first.info.next;

        while let Some(url) = next {
            let page = self.fetch_page(&url).await?;
            all.extend(page.results);
            next = page.info.next;
        }

        Ok(all)
    }

    /// Fetch pages `2..=pages` in batches, appending in page order after each batch joins.
    async fn fetch_numbered(
        &self,
        first: PageResponse,
        pages: u32,
    ) -> Result<Vec<Character>, SourceError> {
        let mut all = first.results;
        let remaining: Vec<u32> = (2..=pages).collect();

        for batch in remaining.chunks(self.concurrency()) {
            let fetches = batch.iter().map(|&page| {
                let url = self.page_url(page);
                async move { self.fetch_page(&url).await }
            });

            // try_join_all yields results in input order, not completion order.
            for page in futures::future::try_join_all(fetches).await? {
                all.extend(page.results);
            }
        }

        Ok(all)
    }
}

#[async_trait::async_trait]
impl CharacterSource for HttpCharacterSource {
    fn label(&self) -> &str {
        self.base_url()
    }

    async fn fetch_all(&self) -> Result<Vec<Character>, SourceError> {
        let characters = match self.config.strategy {
            FetchStrategy::FollowCursor => {
                let first = self.fetch_page(self.base_url()).await?;
                self.follow_cursor(first).await?
            }
            FetchStrategy::PageNumbers => {
                let first = self.fetch_page(&self.page_url(1)).await?;
                match first.info.pages {
                    Some(pages) => self.fetch_numbered(first, pages).await?,
                    None => {
                        tracing::warn!("API did not report a page count; following cursors");
                        self.follow_cursor(first).await?
                    }
                }
            }
        };

        tracing::info!(count = characters.len(), source = self.label(), "fetched catalog");
        Ok(characters)
    }
}
