//! Query compilation errors

/// Errors produced by [`try_compile`](crate::query::try_compile).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The action is not one the compiler knows how to render.
    #[error("Unsupported action: '{0}'")]
    UnsupportedAction(String),
}
