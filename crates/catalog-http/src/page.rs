use catalog::Character;
use serde::Deserialize;

/// One page of the character list API.
/// `GET /api/character?page={n}`
#[derive(Debug, Deserialize)]
pub struct PageResponse {
    pub info: PageInfo,
    pub results: Vec<Character>,
}

/// Pagination metadata accompanying each page.
#[derive(Debug, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub count: Option<u64>,
    /// Total number of pages, when the API reports it.
    #[serde(default)]
    pub pages: Option<u32>,
    /// Cursor to the next page; `None` on the last page.
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
}
