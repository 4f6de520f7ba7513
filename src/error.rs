/// Failures surfaced by the trivia service. The caller decides how each one
/// maps onto a response (e.g. 422 for `Validation`, 404 for `NotFound`).
#[derive(Debug, thiserror::Error)]
pub enum TriviaError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Opaque failure from the record store, passed through untouched.
    #[error("storage failure: {0}")]
    Storage(color_eyre::Report),
}

pub type Result<T, E = TriviaError> = std::result::Result<T, E>;

impl From<color_eyre::Report> for TriviaError {
    fn from(report: color_eyre::Report) -> Self {
        TriviaError::Storage(report)
    }
}

pub trait ResultExt<T> {
    /// Logs a store failure with some context and surfaces it as `Storage`.
    fn storage(self, context: &str) -> Result<T>;
}

impl<T> ResultExt<T> for color_eyre::Result<T> {
    fn storage(self, context: &str) -> Result<T> {
        self.map_err(|e| {
            tracing::error!("{context}: {e}");
            TriviaError::Storage(e)
        })
    }
}

pub trait OptionExt<T> {
    fn or_not_found(self, what: impl FnOnce() -> String) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn or_not_found(self, what: impl FnOnce() -> String) -> Result<T> {
        self.ok_or_else(|| {
            let what = what();
            tracing::warn!("{what} not found");
            TriviaError::NotFound(what)
        })
    }
}

pub(crate) fn invalid(message: impl Into<String>) -> TriviaError {
    TriviaError::Validation(message.into())
}
