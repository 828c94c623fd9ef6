//! Two-button confirmation dialog.

use edutools_core::error::ToolsError;
use edutools_ui::{FormResponse, MessageView, title_key};

use super::{ButtonHandler, Dialog, follow_next_scene, selected_index};
use crate::args::Continuation;
use crate::context::SceneContext;
use crate::manager::SceneManager;

/// Label used for a button that was never configured.
const DEFAULT_BUTTON_LABEL: &str = "edu_tools.ui.buttons.close";

struct MessageButton {
    label: String,
    handler: Option<ButtonHandler>,
}

impl MessageButton {
    fn unset() -> Self {
        Self {
            label: DEFAULT_BUTTON_LABEL.to_owned(),
            handler: None,
        }
    }
}

/// A confirmation dialog: body text and exactly two buttons.
pub struct MessageForm {
    title: String,
    body: String,
    buttons: [MessageButton; 2],
    next_scene: Option<Continuation>,
}

impl MessageForm {
    /// Creates a confirmation dialog titled after `id`.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            title: title_key(id),
            body: String::new(),
            buttons: [MessageButton::unset(), MessageButton::unset()],
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
        self.body = body.into();
    }

    /// Configures the first button (response index 0).
    pub fn set_button1<F>(&mut self, label: impl Into<String>, handler: F)
    where
        F: FnOnce(&SceneManager, &mut SceneContext) -> Result<(), ToolsError> + Send + 'static,
    {
        self.buttons[0] = MessageButton {
            label: label.into(),
            handler: Some(Box::new(handler)),
        };
    }

    /// Configures the second button (response index 1).
    pub fn set_button2<F>(&mut self, label: impl Into<String>, handler: F)
    where
        F: FnOnce(&SceneManager, &mut SceneContext) -> Result<(), ToolsError> + Send + 'static,
    {
        self.buttons[1] = MessageButton {
            label: label.into(),
            handler: Some(Box::new(handler)),
        };
    }

    /// Opens `next` after either button handler ran.
    pub fn set_next_scene(&mut self, next: Continuation) {
        self.next_scene = Some(next);
    }

    /// Render data for the host.
    #[must_use]
    pub fn view(&self) -> MessageView {
        MessageView {
            title: self.title.clone(),
            body: self.body.clone(),
            button1: self.buttons[0].label.clone(),
            button2: self.buttons[1].label.clone(),
        }
    }

    /// Hands the dialog to the session for display.
    pub fn show(self, ctx: &mut SceneContext) {
        ctx.display(Dialog::Message(self));
    }

    pub(super) fn dispatch(
        self,
        response: FormResponse,
        manager: &SceneManager,
        ctx: &mut SceneContext,
    ) -> Result<(), ToolsError> {
        let index = selected_index(response, self.buttons.len())?;
        let [first, second] = self.buttons;
        let pressed = if index == 0 { first } else { second };
        if let Some(handler) = pressed.handler {
            handler(manager, ctx)?;
        }
        follow_next_scene(self.next_scene, manager, ctx)
    }
}
