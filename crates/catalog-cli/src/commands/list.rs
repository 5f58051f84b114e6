use anyhow::{Context, Result};
use catalog::{CharacterSource, Dimension, SortDirection, ViewStore};

use super::format;

/// Filters and window settings collected from the command line.
#[derive(Debug, Default)]
pub struct ListOptions {
    pub species: Vec<String>,
    pub gender: Vec<String>,
    pub status: Vec<String>,
    pub search: Option<String>,
    pub sort: Option<SortDirection>,
    /// Number of display pages to show. Values below 1 are treated as 1.
    pub pages: usize,
    pub all: bool,
}

pub async fn run(
    source: &dyn CharacterSource,
    page_size: usize,
    options: ListOptions,
) -> Result<()> {
    let store = build_view(source, page_size, &options).await?;
    print!("{}", format::render_character_table(&store));
    Ok(())
}

/// Fetch the catalog and apply the requested filters, sort and window.
pub async fn build_view(
    source: &dyn CharacterSource,
    page_size: usize,
    options: &ListOptions,
) -> Result<ViewStore> {
    let mut store = ViewStore::with_page_size(page_size);
    store
        .load(source)
        .await
        .with_context(|| format!("failed to fetch characters from {}", source.label()))?;

    for (dimension, values) in [
        (Dimension::Species, &options.species),
        (Dimension::Gender, &options.gender),
        (Dimension::Status, &options.status),
    ] {
        if values.is_empty() {
            continue;
        }
        for value in values {
            if !dimension.known_values().contains(&value.as_str()) {
                tracing::warn!(%dimension, value = %value, "filter value is not a known option");
            }
        }
        store.set_filter(dimension, values.iter().map(String::as_str));
    }

    if let Some(term) = &options.search {
        store.set_search(term.as_str());
    }

    if let Some(direction) = options.sort {
        store.set_sort(direction);
    }

    if options.all {
        while store.has_more() {
            store.load_more();
        }
    } else {
        for _ in 1..options.pages.max(1) {
            if !store.has_more() {
                break;
            }
            store.load_more();
        }
    }

    Ok(store)
}
