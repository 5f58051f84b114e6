use std::sync::Arc;

use crate::character::Character;

/// Errors that can occur when fetching the catalog from a source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("{0}")]
    Other(String),
}

/// A source of catalog characters.
///
/// Sources aggregate every page their backing store exposes before
/// returning. A failure on any page fails the whole call.
#[async_trait::async_trait]
pub trait CharacterSource: Send + Sync {
    /// Human-readable label identifying this source.
    fn label(&self) -> &str;

    /// Fetch the complete collection, in the source's natural order.
    async fn fetch_all(&self) -> Result<Vec<Character>, SourceError>;
}

#[async_trait::async_trait]
impl<T: CharacterSource + ?Sized> CharacterSource for Arc<T> {
    fn label(&self) -> &str {
        (**self).label()
    }

    async fn fetch_all(&self) -> Result<Vec<Character>, SourceError> {
        (**self).fetch_all().await
    }
}
