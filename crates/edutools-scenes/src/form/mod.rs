//! Dialog abstraction.
//!
//! Every dialog follows the same two phases. It is *built* synchronously by
//! a scene constructor (buttons or fields, each paired with its handler,
//! plus an optional next scene) and handed to the session with `show`. The
//! session later *presents* it: the host renders the [`FormView`], the
//! participant answers, handlers run, then the next scene opens. A canceled
//! dialog runs no handler and opens nothing.

mod action;
mod message;
mod modal;

pub use action::ActionForm;
pub use message::MessageForm;
pub use modal::{DropdownChoice, ModalForm};

use edutools_core::error::ToolsError;
use edutools_ui::{FormPresenter, FormResponse, FormView};

use crate::args::Continuation;
use crate::context::SceneContext;
use crate::manager::SceneManager;

/// Handler of a button, or of a multi-field dialog's submission.
pub type ButtonHandler =
    Box<dyn FnOnce(&SceneManager, &mut SceneContext) -> Result<(), ToolsError> + Send>;

/// Handler of one interactive field of a multi-field dialog.
pub type FieldHandler<T> = Box<dyn FnOnce(&mut SceneContext, T) -> Result<(), ToolsError> + Send>;

/// What happened when a dialog response was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    /// Handlers ran and auto-navigation, if configured, was performed.
    Handled,
    /// The participant dismissed the dialog; nothing ran.
    Canceled,
}

/// A built dialog of any style.
pub enum Dialog {
    /// Choice list.
    Action(ActionForm),
    /// Two-button confirmation.
    Message(MessageForm),
    /// Multi-field form.
    Modal(ModalForm),
}

impl Dialog {
    /// The title translation key.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Action(form) => form.title(),
            Self::Message(form) => form.title(),
            Self::Modal(form) => form.title(),
        }
    }

    /// Render data for the host.
    #[must_use]
    pub fn view(&self) -> FormView {
        match self {
            Self::Action(form) => FormView::Action(form.view()),
            Self::Message(form) => FormView::Message(form.view()),
            Self::Modal(form) => FormView::Modal(form.view()),
        }
    }

    /// Presents the dialog to the context's participant, then dispatches the
    /// response.
    ///
    /// # Errors
    ///
    /// Returns `ToolsError::Presentation` if the host fails, or any error
    /// raised by [`Dialog::dispatch`].
    pub async fn show(
        self,
        presenter: &dyn FormPresenter,
        manager: &SceneManager,
        ctx: &mut SceneContext,
    ) -> Result<DialogOutcome, ToolsError> {
        let view = self.view();
        let response = presenter.present(ctx.source_player(), &view).await?;
        self.dispatch(response, manager, ctx)
    }

    /// Runs the handlers selected by `response`, then opens the configured
    /// next scene.
    ///
    /// # Errors
    ///
    /// Returns `ToolsError::ResponseMismatch` if the response does not fit
    /// the dialog, or any error raised by a handler or by the next scene.
    pub fn dispatch(
        self,
        response: FormResponse,
        manager: &SceneManager,
        ctx: &mut SceneContext,
    ) -> Result<DialogOutcome, ToolsError> {
        if response.is_canceled() {
            tracing::debug!(session_id = %ctx.session_id(), title = self.title(), "dialog canceled");
            return Ok(DialogOutcome::Canceled);
        }
        match self {
            Self::Action(form) => form.dispatch(response, manager, ctx),
            Self::Message(form) => form.dispatch(response, manager, ctx),
            Self::Modal(form) => form.dispatch(response, manager, ctx),
        }?;
        Ok(DialogOutcome::Handled)
    }
}

/// Opens the dialog's configured next scene, if any.
fn follow_next_scene(
    next_scene: Option<Continuation>,
    manager: &SceneManager,
    ctx: &mut SceneContext,
) -> Result<(), ToolsError> {
    if let Some(next) = next_scene {
        manager.open(ctx, &next.name, true, next.args)?;
    }
    Ok(())
}

/// Resolves a button press against the number of buttons shown.
fn selected_index(response: FormResponse, button_count: usize) -> Result<usize, ToolsError> {
    match response {
        FormResponse::Selected(index) if index < button_count => Ok(index),
        FormResponse::Selected(index) => Err(ToolsError::ResponseMismatch(format!(
            "button {index} selected but only {button_count} shown"
        ))),
        other => Err(ToolsError::ResponseMismatch(format!(
            "expected a button selection, got {other:?}"
        ))),
    }
}
