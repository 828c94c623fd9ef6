//! Presenter abstraction implemented by the host.

use async_trait::async_trait;
use edutools_core::error::ToolsError;
use edutools_core::player::PlayerId;

use crate::response::FormResponse;
use crate::view::FormView;

/// Renders dialogs to participants and awaits their answers.
///
/// Presenting is the only suspension point of a session. Between issuing
/// `present` and its completion no other work runs for that session.
#[async_trait]
pub trait FormPresenter: Send + Sync {
    /// Shows `form` to `player` and waits for the response.
    ///
    /// # Errors
    ///
    /// Returns `ToolsError::Presentation` if the host cannot reach the
    /// participant.
    async fn present(&self, player: &PlayerId, form: &FormView)
    -> Result<FormResponse, ToolsError>;

    /// Sends a one-line diagnostic message to `player`.
    ///
    /// # Errors
    ///
    /// Returns `ToolsError::Presentation` if the message cannot be delivered.
    async fn notify(&self, player: &PlayerId, message: &str) -> Result<(), ToolsError>;
}
