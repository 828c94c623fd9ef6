//! Configurable confirmation scene.
//!
//! Flows open `confirm` with a [`ConfirmConfig`] as the only argument:
//!
//! ```ignore
//! let config = ConfirmConfig::new("assignment_delete", "edu_tools.ui.assignment_delete.body")
//!     .with_button("edu_tools.ui.buttons.yes", |manager, ctx| manager.go_back(ctx, 2).map(|_| ()))
//!     .with_button("edu_tools.ui.buttons.no", |manager, ctx| manager.go_back(ctx, 1).map(|_| ()));
//! manager.open(ctx, CONFIRM_SCENE, true, vec![config.into_arg()])?;
//! ```

use std::fmt;
use std::sync::Arc;

use edutools_core::error::ToolsError;
use edutools_scenes::{ActionForm, MessageForm, SceneArg, SceneContext, SceneManager};

use crate::module::{MenuHandler, Module};

/// Name of the confirmation scene.
pub const CONFIRM_SCENE: &str = "confirm";

const CONTINUE_LABEL: &str = "edu_tools.ui.buttons.continue";

/// A button of the confirmation scene.
#[derive(Clone)]
pub struct ConfirmButton {
    /// Translation key of the label.
    pub label: String,
    /// Runs when the button is pressed.
    pub handler: MenuHandler,
}

impl fmt::Debug for ConfirmButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmButton")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// What the confirmation scene shows.
#[derive(Debug, Clone, Default)]
pub struct ConfirmConfig {
    /// Title id; the dialog title is `edu_tools.ui.<title>.title`.
    pub title: String,
    /// Translation key of the body.
    pub body: String,
    /// Buttons in display order.
    pub buttons: Vec<ConfirmButton>,
}

impl ConfirmConfig {
    /// Creates a configuration without buttons.
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            buttons: Vec::new(),
        }
    }

    /// Appends a button.
    #[must_use]
    pub fn with_button<F>(mut self, label: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&SceneManager, &mut SceneContext) -> Result<(), ToolsError> + Send + Sync + 'static,
    {
        self.buttons.push(ConfirmButton {
            label: label.into(),
            handler: Arc::new(handler),
        });
        self
    }

    /// Wraps the configuration as the scene's argument.
    #[must_use]
    pub fn into_arg(self) -> SceneArg {
        SceneArg::shared(self)
    }
}

/// Registers the `confirm` scene.
#[derive(Debug, Default)]
pub struct ConfirmModule;

impl ConfirmModule {
    /// Module id.
    pub const ID: &'static str = "confirm";
}

impl Module for ConfirmModule {
    fn id(&self) -> &str {
        Self::ID
    }

    fn register_scenes(&self, scenes: &mut SceneManager) {
        scenes.register_scene(CONFIRM_SCENE, |_, ctx, args| {
            let config = args
                .first()
                .and_then(SceneArg::downcast::<ConfirmConfig>)
                .ok_or_else(|| {
                    ToolsError::MissingContext("confirm scene configuration".to_owned())
                })?;
            show_confirm(&config, ctx);
            Ok(())
        });
    }
}

fn show_confirm(config: &ConfirmConfig, ctx: &mut SceneContext) {
    let title = if config.title.is_empty() {
        CONFIRM_SCENE
    } else {
        config.title.as_str()
    };

    if let [first, second] = config.buttons.as_slice() {
        let mut form = MessageForm::new(title);
        form.set_body(config.body.clone());
        let handler = Arc::clone(&first.handler);
        form.set_button1(first.label.clone(), move |manager, ctx| handler(manager, ctx));
        let handler = Arc::clone(&second.handler);
        form.set_button2(second.label.clone(), move |manager, ctx| handler(manager, ctx));
        form.show(ctx);
        return;
    }

    let mut form = ActionForm::new(title);
    form.set_body(config.body.clone());
    if config.buttons.is_empty() {
        form.add_button(CONTINUE_LABEL, None, |manager, ctx| {
            manager.go_back(ctx, 1).map(|_| ())
        });
    }
    for button in &config.buttons {
        let handler = Arc::clone(&button.handler);
        form.add_button(button.label.clone(), None, move |manager, ctx| {
            handler(manager, ctx)
        });
    }
    form.show(ctx);
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use edutools_core::player::PlayerId;
    use edutools_scenes::Dialog;
    use edutools_ui::{FormResponse, FormView};

    use super::*;

    fn scenes() -> SceneManager {
        let mut scenes = SceneManager::new();
        ConfirmModule.register_scenes(&mut scenes);
        scenes
    }

    fn pending_view(ctx: &SceneContext) -> FormView {
        ctx.pending_dialog().map(Dialog::view).unwrap()
    }

    #[test]
    fn test_two_buttons_render_as_confirmation() {
        // Arrange
        let scenes = scenes();
        let pressed = Arc::new(Mutex::new(Vec::new()));
        let yes = Arc::clone(&pressed);
        let no = Arc::clone(&pressed);
        let config = ConfirmConfig::new("assignment_delete", "edu_tools.ui.assignment_delete.body")
            .with_button("edu_tools.ui.buttons.yes", move |_, _| {
                yes.lock().unwrap().push("yes");
                Ok(())
            })
            .with_button("edu_tools.ui.buttons.no", move |_, _| {
                no.lock().unwrap().push("no");
                Ok(())
            });
        let mut ctx = SceneContext::new(PlayerId::new("teacher"));

        // Act
        scenes
            .open(&mut ctx, CONFIRM_SCENE, true, vec![config.into_arg()])
            .unwrap();
        let view = pending_view(&ctx);
        let dialog = ctx.take_pending_dialog().unwrap();
        dialog
            .dispatch(FormResponse::Selected(1), &scenes, &mut ctx)
            .unwrap();

        // Assert
        match view {
            FormView::Message(message) => {
                assert_eq!(message.title, "edu_tools.ui.assignment_delete.title");
                assert_eq!(message.button2, "edu_tools.ui.buttons.no");
            }
            other => panic!("expected a message view, got {other:?}"),
        }
        assert_eq!(*pressed.lock().unwrap(), ["no"]);
    }

    #[test]
    fn test_three_buttons_render_as_choice_list() {
        let scenes = scenes();
        let config = ConfirmConfig::new("", "body")
            .with_button("a", |_, _| Ok(()))
            .with_button("b", |_, _| Ok(()))
            .with_button("c", |_, _| Ok(()));
        let mut ctx = SceneContext::new(PlayerId::new("teacher"));

        scenes
            .open(&mut ctx, CONFIRM_SCENE, true, vec![config.into_arg()])
            .unwrap();

        match pending_view(&ctx) {
            FormView::Action(action) => {
                assert_eq!(action.title, "edu_tools.ui.confirm.title");
                assert_eq!(action.buttons.len(), 3);
            }
            other => panic!("expected an action view, got {other:?}"),
        }
    }

    #[test]
    fn test_no_buttons_offers_continue_that_goes_back() {
        // Arrange
        let mut scenes = scenes();
        scenes.register_scene("timer", |_, ctx, _| {
            ActionForm::new("timer").show(ctx);
            Ok(())
        });
        let mut ctx = SceneContext::new(PlayerId::new("teacher"));
        ctx.add_to_history("timer");
        scenes
            .open(
                &mut ctx,
                CONFIRM_SCENE,
                true,
                vec![ConfirmConfig::new("timer_done", "body").into_arg()],
            )
            .unwrap();
        let dialog = ctx.take_pending_dialog().unwrap();

        // Act
        dialog
            .dispatch(FormResponse::Selected(0), &scenes, &mut ctx)
            .unwrap();

        // Assert
        assert_eq!(ctx.history(), ["timer"]);
        assert_eq!(
            ctx.pending_dialog().map(Dialog::title),
            Some("edu_tools.ui.timer.title")
        );
    }

    #[test]
    fn test_missing_configuration_is_a_precondition_error() {
        let scenes = scenes();
        let mut ctx = SceneContext::new(PlayerId::new("teacher"));

        let result = scenes.open(&mut ctx, CONFIRM_SCENE, true, vec![SceneArg::Int(3)]);

        match result.unwrap_err() {
            ToolsError::MissingContext(what) => assert_eq!(what, "confirm scene configuration"),
            other => panic!("expected MissingContext, got {other:?}"),
        }
    }
}
