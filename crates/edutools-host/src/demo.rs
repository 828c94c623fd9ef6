//! Demo features shipped with the console host.
//!
//! They exercise the framework the way real features do: a multi-field
//! settings dialog persisted through module storage, and a flow built on the
//! shared team picker.

use std::sync::Arc;

use edutools_core::error::ToolsError;
use edutools_core::player::PlayerId;
use edutools_core::storage::{PropertyStorage, StorageExt};
use edutools_modules::builtin::confirm::{CONFIRM_SCENE, ConfirmConfig};
use edutools_modules::builtin::team_select::TEAM_SELECT_SCENE;
use edutools_modules::{MenuEntry, Module, ModuleRegistry};
use edutools_scenes::context::keys;
use edutools_scenes::manager::DEFAULT_ROOT_SCENE;
use edutools_scenes::{ContextData, MessageForm, ModalForm, SceneContext, SceneManager};
use edutools_ui::FieldValue;
use serde::{Deserialize, Serialize};

const SETTINGS_KEY: &str = "settings";
const MINUTES_KEY: &str = "timer_minutes";
const COUNTDOWN_KEY: &str = "timer_show_countdown";
const BACK_TO_MENU_LABEL: &str = "edu_tools.ui.buttons.back_to_menu";

/// Registers the demo features.
///
/// # Errors
///
/// Returns `ToolsError::DuplicateModule` if a demo id is already taken.
pub fn register_demo_modules(registry: &mut ModuleRegistry) -> Result<(), ToolsError> {
    let storage = registry.sub_storage(TimerModule::ID);
    registry.register(TimerModule::new(storage))?;
    registry.register(TeamOverviewModule)?;
    Ok(())
}

fn back_to_menu(manager: &SceneManager, ctx: &mut SceneContext) -> Result<(), ToolsError> {
    manager.go_back_to_scene(ctx, DEFAULT_ROOT_SCENE).map(|_| ())
}

/// Persisted class timer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Timer length.
    pub minutes: u32,
    /// Whether participants see the countdown.
    pub show_countdown: bool,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            minutes: 5,
            show_countdown: false,
        }
    }
}

/// Class timer configured through a multi-field dialog.
#[derive(Debug)]
pub struct TimerModule {
    storage: Arc<dyn PropertyStorage>,
}

impl TimerModule {
    /// Module id.
    pub const ID: &'static str = "timer";

    /// Creates the module over its storage namespace.
    #[must_use]
    pub fn new(storage: Arc<dyn PropertyStorage>) -> Self {
        Self { storage }
    }

    /// The stored settings, or the defaults when none were saved.
    ///
    /// # Errors
    ///
    /// Returns `ToolsError::Storage` if the stored settings are unreadable.
    pub fn settings(&self) -> Result<TimerSettings, ToolsError> {
        load_settings(self.storage.as_ref())
    }
}

fn load_settings(storage: &dyn PropertyStorage) -> Result<TimerSettings, ToolsError> {
    Ok(storage.get_as(SETTINGS_KEY)?.unwrap_or_default())
}

impl Module for TimerModule {
    fn id(&self) -> &str {
        Self::ID
    }

    fn register_scenes(&self, scenes: &mut SceneManager) {
        let storage = Arc::clone(&self.storage);
        scenes.register_scene(Self::ID, move |_, ctx, _| {
            let current = load_settings(storage.as_ref())?;
            let mut form = ModalForm::new(Self::ID);
            form.add_label("edu_tools.ui.timer.body");
            form.add_slider(
                "edu_tools.ui.timer.minutes",
                (1.0, 60.0),
                1.0,
                f64::from(current.minutes),
                |ctx, minutes| {
                    ctx.set_data(MINUTES_KEY, FieldValue::Number(minutes));
                    Ok(())
                },
            );
            form.add_toggle(
                "edu_tools.ui.timer.show_countdown",
                current.show_countdown,
                |ctx, show| {
                    ctx.set_data(COUNTDOWN_KEY, FieldValue::Toggle(show));
                    Ok(())
                },
            );
            let storage = Arc::clone(&storage);
            form.on_submit(move |manager, ctx| {
                let settings = collected_settings(ctx)?;
                storage.set_as(SETTINGS_KEY, &settings)?;
                tracing::info!(
                    session_id = %ctx.session_id(),
                    minutes = settings.minutes,
                    show_countdown = settings.show_countdown,
                    "timer settings saved"
                );
                let config = ConfirmConfig::new("timer_started", "edu_tools.ui.timer_started.body")
                    .with_button(BACK_TO_MENU_LABEL, back_to_menu);
                manager.open(ctx, CONFIRM_SCENE, true, vec![config.into_arg()])?;
                Ok(())
            });
            form.show(ctx);
            Ok(())
        });
    }

    fn menu_entry(&self) -> Option<MenuEntry> {
        let entry = MenuEntry::new("edu_tools.ui.main.buttons.timer", |manager, ctx| {
            manager.open_scene(ctx, Self::ID).map(|_| ())
        });
        Some(
            entry
                .with_icon("textures/edu_tools/ui/icons/main/timer")
                .with_weight(20),
        )
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn collected_settings(ctx: &SceneContext) -> Result<TimerSettings, ToolsError> {
    let minutes = match ctx.data(MINUTES_KEY).and_then(ContextData::as_field) {
        Some(FieldValue::Number(minutes)) => minutes.round() as u32,
        _ => return Err(ToolsError::MissingContext("timer minutes".to_owned())),
    };
    let show_countdown = ctx
        .data(COUNTDOWN_KEY)
        .and_then(ContextData::as_bool)
        .ok_or_else(|| ToolsError::MissingContext("timer countdown flag".to_owned()))?;
    Ok(TimerSettings {
        minutes,
        show_countdown,
    })
}

/// Shows the members of a team picked through the shared team picker.
#[derive(Debug, Default)]
pub struct TeamOverviewModule;

impl TeamOverviewModule {
    /// Module id.
    pub const ID: &'static str = "team_overview";
}

fn pick_team_for_overview(manager: &SceneManager, ctx: &mut SceneContext) -> Result<(), ToolsError> {
    ctx.set_subject_team_required(true);
    ctx.set_data(keys::BODY_KEY, TeamOverviewModule::ID);
    ctx.set_next_scene(TeamOverviewModule::ID, Vec::new());
    manager.open_scene(ctx, TEAM_SELECT_SCENE).map(|_| ())
}

impl Module for TeamOverviewModule {
    fn id(&self) -> &str {
        Self::ID
    }

    fn register_scenes(&self, scenes: &mut SceneManager) {
        scenes.register_scene(Self::ID, |_, ctx, _| {
            let team = ctx
                .subject_team()
                .ok_or_else(|| ToolsError::MissingContext("subject team".to_owned()))?;
            let body = if team.member_ids.is_empty() {
                "edu_tools.ui.team_overview.empty".to_owned()
            } else {
                let members: Vec<&str> = team.member_ids.iter().map(PlayerId::as_str).collect();
                format!("{}: {}", team.name, members.join(", "))
            };

            let mut form = MessageForm::new(Self::ID);
            form.set_body(body);
            form.set_button1(BACK_TO_MENU_LABEL, back_to_menu);
            form.set_button2("edu_tools.ui.team_overview.buttons.pick_another", |manager, ctx| {
                ctx.set_subject_team(None);
                ctx.set_subject_team_required(true);
                ctx.set_next_scene(TeamOverviewModule::ID, Vec::new());
                manager.go_back_to_scene(ctx, TEAM_SELECT_SCENE).map(|_| ())
            });
            form.show(ctx);
            Ok(())
        });
    }

    fn menu_entry(&self) -> Option<MenuEntry> {
        Some(
            MenuEntry::new("edu_tools.ui.main.buttons.team_overview", pick_team_for_overview)
                .with_icon("textures/edu_tools/ui/icons/main/teams")
                .with_weight(30),
        )
    }
}

#[cfg(test)]
mod tests {
    use edutools_core::storage::MemoryStorage;

    use super::*;

    #[test]
    fn test_settings_default_when_nothing_is_stored() {
        let module = TimerModule::new(Arc::new(MemoryStorage::new()));

        assert_eq!(module.settings().unwrap(), TimerSettings::default());
    }

    #[test]
    fn test_collected_settings_need_both_values() {
        // Arrange
        let mut ctx = SceneContext::new(PlayerId::new("teacher"));
        ctx.set_data(MINUTES_KEY, FieldValue::Number(12.4));

        // Act
        let missing = collected_settings(&ctx);
        ctx.set_data(COUNTDOWN_KEY, FieldValue::Toggle(true));
        let complete = collected_settings(&ctx).unwrap();

        // Assert
        assert!(matches!(missing, Err(ToolsError::MissingContext(_))));
        assert_eq!(
            complete,
            TimerSettings {
                minutes: 12,
                show_countdown: true
            }
        );
    }

    #[test]
    fn test_team_overview_requires_a_subject_team() {
        let mut scenes = SceneManager::new();
        TeamOverviewModule.register_scenes(&mut scenes);
        let mut ctx = SceneContext::new(PlayerId::new("teacher"));

        let result = scenes.open_scene(&mut ctx, TeamOverviewModule::ID);

        match result.unwrap_err() {
            ToolsError::MissingContext(what) => assert_eq!(what, "subject team"),
            other => panic!("expected MissingContext, got {other:?}"),
        }
    }
}
