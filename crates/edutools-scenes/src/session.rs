//! Session driver.
//!
//! A session alternates between two phases on one logical thread: a scene
//! constructor leaves a dialog pending in the context, then the driver
//! presents it and dispatches the answer, which usually opens the next scene.
//! The session ends when the participant cancels or when a step finishes
//! without leaving a dialog behind.

use edutools_core::error::ToolsError;
use edutools_ui::FormPresenter;

use crate::context::SceneContext;
use crate::form::DialogOutcome;
use crate::manager::SceneManager;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// No dialog was left to show.
    Closed,
    /// The participant dismissed a dialog.
    Canceled,
}

/// Presents pending dialogs until the session ends.
///
/// On error the participant is notified through the presenter before the
/// error is returned.
///
/// # Errors
///
/// Returns the first error raised by the presenter, a handler, or a scene
/// constructor.
pub async fn run_session(
    manager: &SceneManager,
    presenter: &dyn FormPresenter,
    ctx: &mut SceneContext,
) -> Result<SessionEnd, ToolsError> {
    match drive(manager, presenter, ctx).await {
        Ok(end) => {
            tracing::info!(
                session_id = %ctx.session_id(),
                player = %ctx.source_player(),
                ?end,
                "session ended"
            );
            Ok(end)
        }
        Err(error) => {
            tracing::error!(
                session_id = %ctx.session_id(),
                player = %ctx.source_player(),
                %error,
                "session failed"
            );
            if let Err(notify_error) = presenter
                .notify(ctx.source_player(), &error.to_string())
                .await
            {
                tracing::warn!(%notify_error, "failed to notify participant");
            }
            Err(error)
        }
    }
}

async fn drive(
    manager: &SceneManager,
    presenter: &dyn FormPresenter,
    ctx: &mut SceneContext,
) -> Result<SessionEnd, ToolsError> {
    while let Some(dialog) = ctx.take_pending_dialog() {
        tracing::debug!(
            session_id = %ctx.session_id(),
            scene = ctx.current_scene().unwrap_or_default(),
            title = dialog.title(),
            "presenting dialog"
        );
        if dialog.show(presenter, manager, ctx).await? == DialogOutcome::Canceled {
            return Ok(SessionEnd::Canceled);
        }
    }
    Ok(SessionEnd::Closed)
}

#[cfg(test)]
mod tests {
    use edutools_core::player::PlayerId;
    use edutools_test_support::ScriptedPresenter;
    use edutools_ui::{FormResponse, FormView};

    use super::*;
    use crate::form::{ActionForm, MessageForm};

    fn manager() -> SceneManager {
        let mut manager = SceneManager::new();
        manager.register_scene("main", |_, ctx, _| {
            let mut form = ActionForm::new("main");
            form.add_button("edu_tools.ui.main.buttons.timer", None, |manager, ctx| {
                manager.open_scene(ctx, "timer").map(|_| ())
            });
            form.show(ctx);
            Ok(())
        });
        manager.register_scene("timer", |_, ctx, _| {
            let mut form = MessageForm::new("timer");
            form.set_body("edu_tools.ui.timer.body");
            form.set_button1("edu_tools.ui.buttons.back", |manager, ctx| {
                manager.go_back(ctx, 1).map(|_| ())
            });
            form.show(ctx);
            Ok(())
        });
        manager
    }

    #[tokio::test]
    async fn test_run_session_presents_dialogs_until_cancel() {
        // Arrange
        let manager = manager();
        let presenter = ScriptedPresenter::new(vec![
            FormResponse::Selected(0),
            FormResponse::Selected(0),
            FormResponse::Canceled,
        ]);
        let mut ctx = manager.start(PlayerId::new("teacher")).unwrap();

        // Act
        let end = run_session(&manager, &presenter, &mut ctx).await.unwrap();

        // Assert
        assert_eq!(end, SessionEnd::Canceled);
        let titles: Vec<String> = presenter
            .presented()
            .iter()
            .map(|view| view.title().to_owned())
            .collect();
        assert_eq!(
            titles,
            [
                "edu_tools.ui.main.title",
                "edu_tools.ui.timer.title",
                "edu_tools.ui.main.title"
            ]
        );
        assert_eq!(ctx.history(), ["main"]);
    }

    #[tokio::test]
    async fn test_run_session_closes_when_no_dialog_is_left() {
        let mut manager = SceneManager::new();
        manager.register_scene("main", |_, ctx, _| {
            let mut form = ActionForm::new("main");
            form.add_button("edu_tools.ui.buttons.exit", None, |_, _| Ok(()));
            form.show(ctx);
            Ok(())
        });
        let presenter = ScriptedPresenter::new(vec![FormResponse::Selected(0)]);
        let mut ctx = manager.start(PlayerId::new("teacher")).unwrap();

        let end = run_session(&manager, &presenter, &mut ctx).await.unwrap();

        assert_eq!(end, SessionEnd::Closed);
        assert!(matches!(presenter.presented()[0], FormView::Action(_)));
    }

    #[tokio::test]
    async fn test_run_session_notifies_participant_on_handler_error() {
        // Arrange
        let mut manager = SceneManager::new();
        manager.register_scene("main", |_, ctx, _| {
            let mut form = ActionForm::new("main");
            form.add_button("edu_tools.ui.buttons.teleport", None, |_, _| {
                Err(ToolsError::MissingContext("subject team".into()))
            });
            form.show(ctx);
            Ok(())
        });
        let presenter = ScriptedPresenter::new(vec![FormResponse::Selected(0)]);
        let mut ctx = manager.start(PlayerId::new("teacher")).unwrap();

        // Act
        let result = run_session(&manager, &presenter, &mut ctx).await;

        // Assert
        match result.unwrap_err() {
            ToolsError::MissingContext(what) => assert_eq!(what, "subject team"),
            other => panic!("expected MissingContext, got {other:?}"),
        }
        assert_eq!(presenter.notifications().len(), 1);
    }
}
