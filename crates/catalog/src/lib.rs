pub mod character;
pub mod filter;
pub mod paginate;
pub mod sort;
pub mod source;
pub mod view;

pub use character::{Character, Dimension};
pub use filter::FilterSelection;
pub use paginate::{DEFAULT_PAGE_SIZE, Paginator};
pub use sort::{SortDirection, SortKeyError, episode_number, sort_key};
pub use source::{CharacterSource, SourceError};
pub use view::{DisplayState, LoadState, ViewChange, ViewStore};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
