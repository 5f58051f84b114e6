use catalog::{Character, SourceError};

/// Commands returned by the app to the event loop for side-effect execution.
#[derive(Debug)]
pub enum AppCommand {
    /// No side effect needed.
    None,
    /// Quit the application.
    Quit,
    /// Fetch the full catalog from the source.
    FetchAll,
}

/// Actions dispatched back into the app from async tasks.
#[derive(Debug)]
pub enum Action {
    /// The catalog fetch finished (or failed).
    CatalogLoaded(Result<Vec<Character>, SourceError>),
}
