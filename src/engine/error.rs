use thiserror::Error;

/// Navigation failures that callers have to react to. Stack underflow and
/// out-of-range focus indices are not represented here: those self-heal in
/// place (log-only pop refusal, silent clamp) and never reach a caller.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NavError {
    /// The catalog fetch has not resolved yet; the attempted operation is
    /// dropped and the loading screen stays up.
    #[error("catalog is still loading")]
    DataNotLoaded,

    /// An id (deep link or stack entry) no longer resolves in the catalog.
    /// Recoverable: callers fall back to the root level with a notice.
    #[error("catalog entry \"{0}\" was not found")]
    NodeNotFound(String),
}
