//! Choice-list dialog.

use edutools_core::error::ToolsError;
use edutools_ui::{ActionView, ButtonView, FormResponse, title_key};

use super::{ButtonHandler, Dialog, follow_next_scene, selected_index};
use crate::args::Continuation;
use crate::context::SceneContext;
use crate::manager::SceneManager;

/// An ordered list of buttons, each paired with its handler.
pub struct ActionForm {
    title: String,
    body: Option<String>,
    buttons: Vec<(ButtonView, ButtonHandler)>,
    next_scene: Option<Continuation>,
}

impl ActionForm {
    /// Creates an empty choice list titled after `id`.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            title: title_key(id),
            body: None,
            buttons: Vec::new(),
            next_scene: None,
        }
    }

    /// The title translation key.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Sets the body text.
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = Some(body.into());
    }

    /// Appends a button.
    pub fn add_button<F>(&mut self, label: impl Into<String>, icon: Option<&str>, handler: F)
    where
        F: FnOnce(&SceneManager, &mut SceneContext) -> Result<(), ToolsError> + Send + 'static,
    {
        let view = ButtonView {
            label: label.into(),
            icon: icon.map(str::to_owned),
        };
        self.buttons.push((view, Box::new(handler)));
    }

    /// Number of buttons added so far.
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Opens `next` after any button handler ran.
    pub fn set_next_scene(&mut self, next: Continuation) {
        self.next_scene = Some(next);
    }

    /// Render data for the host.
    #[must_use]
    pub fn view(&self) -> ActionView {
        ActionView {
            title: self.title.clone(),
            body: self.body.clone(),
            buttons: self.buttons.iter().map(|(view, _)| view.clone()).collect(),
        }
    }

    /// Hands the dialog to the session for display.
    pub fn show(self, ctx: &mut SceneContext) {
        ctx.display(Dialog::Action(self));
    }

    pub(super) fn dispatch(
        self,
        response: FormResponse,
        manager: &SceneManager,
        ctx: &mut SceneContext,
    ) -> Result<(), ToolsError> {
        let index = selected_index(response, self.buttons.len())?;
        let Some((_, handler)) = self.buttons.into_iter().nth(index) else {
            return Err(ToolsError::ResponseMismatch(format!("button {index} missing")));
        };
        handler(manager, ctx)?;
        follow_next_scene(self.next_scene, manager, ctx)
    }
}
