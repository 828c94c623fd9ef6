//! Framework error types.

use thiserror::Error;

/// Top-level error type shared by the framework crates.
#[derive(Debug, Error)]
pub enum ToolsError {
    /// A module with the same id was registered twice.
    #[error("module already registered: {0}")]
    DuplicateModule(String),

    /// A required module is not registered.
    #[error("module not registered: {0}")]
    ModuleNotFound(String),

    /// A registry lifecycle step was invoked out of order or twice.
    #[error("module lifecycle error: {0}")]
    ModuleLifecycle(String),

    /// A scene was opened without the context data it depends on.
    #[error("missing context data: {0}")]
    MissingContext(String),

    /// A dialog response does not match the dialog that was shown.
    #[error("dialog response mismatch: {0}")]
    ResponseMismatch(String),

    /// The host failed to present a dialog or deliver a message.
    #[error("presentation error: {0}")]
    Presentation(String),

    /// A property storage read or write failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// A validation error in framework logic.
    #[error("validation error: {0}")]
    Validation(String),
}
