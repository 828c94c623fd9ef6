//! Shared test helpers for module integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use edutools_core::error::ToolsError;
use edutools_core::player::PlayerId;
use edutools_core::storage::MemoryStorage;
use edutools_modules::builtin::team_select::TEAM_SELECT_SCENE;
use edutools_modules::builtin::{TeamsModule, register_defaults};
use edutools_modules::{EducatorTools, MenuEntry, Module, ModuleRegistry, bootstrap};
use edutools_scenes::context::keys;
use edutools_scenes::{MessageForm, SceneManager};

/// Teleports recorded by [`TeleportModule`] as `(subject, target)` team ids.
pub type Teleports = Arc<Mutex<Vec<(String, String)>>>;

/// A feature that picks a subject and a target team, then asks for
/// confirmation before recording the teleport.
pub struct TeleportModule {
    pub teleports: Teleports,
}

impl Module for TeleportModule {
    fn id(&self) -> &str {
        "teleport"
    }

    fn register_scenes(&self, scenes: &mut SceneManager) {
        let teleports = Arc::clone(&self.teleports);
        scenes.register_scene("teleport", move |_, ctx, _| {
            let (Some(subject), Some(target)) = (ctx.subject_team(), ctx.target_team()) else {
                return Err(ToolsError::MissingContext("teleport teams".to_owned()));
            };
            let pair = (subject.id.clone(), target.id.clone());
            let mut form = MessageForm::new("teleport");
            form.set_body(format!("{} -> {}", pair.0, pair.1));
            let teleports = Arc::clone(&teleports);
            form.set_button1("edu_tools.ui.buttons.confirm", move |manager, ctx| {
                teleports.lock().unwrap().push(pair);
                manager.go_back_to_scene(ctx, "main").map(|_| ())
            });
            form.set_button2("edu_tools.ui.buttons.back", |manager, ctx| {
                manager.go_back(ctx, 1).map(|_| ())
            });
            form.show(ctx);
            Ok(())
        });
    }

    fn menu_entry(&self) -> Option<MenuEntry> {
        let entry = MenuEntry::new("edu_tools.ui.main.buttons.teleport", |manager, ctx| {
            ctx.set_subject_team_required(true);
            ctx.set_target_team_required(true);
            ctx.set_data(keys::BODY_KEY, "teleport");
            ctx.set_next_scene("teleport", Vec::new());
            manager.open_scene(ctx, TEAM_SELECT_SCENE).map(|_| ())
        });
        Some(entry.with_weight(10))
    }
}

/// A feature whose entry opens the teleport scene without choosing teams.
pub struct ShortcutModule;

impl Module for ShortcutModule {
    fn id(&self) -> &str {
        "shortcut"
    }

    fn menu_entry(&self) -> Option<MenuEntry> {
        let entry = MenuEntry::new("edu_tools.ui.main.buttons.shortcut", |manager, ctx| {
            manager.open_scene(ctx, "teleport").map(|_| ())
        });
        Some(entry.with_weight(20))
    }
}

/// Builds the framework modules plus [`TeleportModule`] over a roster of
/// `alex` and `sam` and a stored two-member team `red`.
pub fn build_tools(teleports: &Teleports) -> EducatorTools {
    let mut registry = ModuleRegistry::new(Arc::new(MemoryStorage::new()));
    register_defaults(&mut registry, vec![PlayerId::new("alex"), PlayerId::new("sam")]).unwrap();
    registry
        .register(TeleportModule {
            teleports: Arc::clone(teleports),
        })
        .unwrap();
    registry.register(ShortcutModule).unwrap();

    let stored = registry
        .get_as::<TeamsModule>(TeamsModule::ID)
        .and_then(|module| module.stored())
        .unwrap();
    stored.create_team("red", "Red").unwrap();
    stored.add_member("red", PlayerId::new("alex")).unwrap();
    stored.add_member("red", PlayerId::new("sam")).unwrap();

    bootstrap(registry).unwrap()
}
