pub mod page;
pub mod source;

pub use page::{PageInfo, PageResponse};
pub use source::{
    DEFAULT_API_URL, DEFAULT_CONCURRENCY, FetchStrategy, HttpCharacterSource, HttpSourceConfig,
};
