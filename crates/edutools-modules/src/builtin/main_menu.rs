//! Root menu.
//!
//! The menu gathers every module's [`MenuEntry`] while the registry is
//! initialized, which lets it depend on all modules while they are free to
//! depend on it.

use std::sync::{Arc, OnceLock};

use edutools_core::error::ToolsError;
use edutools_scenes::manager::DEFAULT_ROOT_SCENE;
use edutools_scenes::{ActionForm, SceneManager};

use crate::module::{MenuEntry, Module};
use crate::registry::ModuleRegistry;

/// Weight of the exit entry; it sorts after every feature entry.
pub const EXIT_WEIGHT: i32 = 100_000;

const EXIT_LABEL: &str = "edu_tools.ui.buttons.exit";
const EXIT_ICON: &str = "textures/edu_tools/ui/icons/_general/exit";

/// Registers the `main` scene.
#[derive(Default)]
pub struct MainMenuModule {
    entries: Arc<OnceLock<Vec<MenuEntry>>>,
}

impl MainMenuModule {
    /// Module id.
    pub const ID: &'static str = "main";

    /// Creates the module; its entries are collected during initialization.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The collected entries, sorted by weight. Empty before initialization.
    #[must_use]
    pub fn entries(&self) -> &[MenuEntry] {
        self.entries.get().map(Vec::as_slice).unwrap_or_default()
    }
}

impl Module for MainMenuModule {
    fn id(&self) -> &str {
        Self::ID
    }

    fn initialize(&self, registry: &ModuleRegistry) -> Result<(), ToolsError> {
        let mut entries = registry.collect_menu_entries();
        // Ending the session only needs the dialog to close.
        entries.push(
            MenuEntry::new(EXIT_LABEL, |_, _| Ok(()))
                .with_icon(EXIT_ICON)
                .with_weight(EXIT_WEIGHT),
        );
        entries.sort_by_key(|entry| entry.weight);
        tracing::debug!(module = Self::ID, entries = entries.len(), "menu entries collected");
        if self.entries.set(entries).is_err() {
            return Err(ToolsError::ModuleLifecycle(
                "main menu initialized twice".to_owned(),
            ));
        }
        Ok(())
    }

    fn register_scenes(&self, scenes: &mut SceneManager) {
        let entries = Arc::clone(&self.entries);
        scenes.register_scene(DEFAULT_ROOT_SCENE, move |_, ctx, _| {
            ctx.reset();
            ctx.add_to_history(DEFAULT_ROOT_SCENE);

            let mut form = ActionForm::new(DEFAULT_ROOT_SCENE);
            form.set_body("edu_tools.ui.main.body");
            for entry in entries.get().map(Vec::as_slice).unwrap_or_default() {
                let handler = Arc::clone(&entry.handler);
                form.add_button(
                    entry.label_key.clone(),
                    entry.icon_path.as_deref(),
                    move |manager, ctx| handler(manager, ctx),
                );
            }
            form.show(ctx);
            Ok(())
        });
    }
}

#[cfg(test)]
mod tests {
    use edutools_core::player::PlayerId;
    use edutools_core::storage::MemoryStorage;
    use edutools_scenes::{Dialog, SceneContext};
    use edutools_ui::FormView;

    use super::*;

    struct Feature(&'static str, i32);

    impl Module for Feature {
        fn id(&self) -> &str {
            self.0
        }

        fn menu_entry(&self) -> Option<MenuEntry> {
            Some(MenuEntry::new(self.0, |_, _| Ok(())).with_weight(self.1))
        }
    }

    #[test]
    fn test_main_scene_lists_entries_by_weight_with_exit_last() {
        // Arrange
        let mut registry = ModuleRegistry::new(Arc::new(MemoryStorage::new()));
        registry.register(MainMenuModule::new()).unwrap();
        registry.register(Feature("timer", 20)).unwrap();
        registry.register(Feature("teleport", 10)).unwrap();
        registry.initialize_all().unwrap();
        let mut scenes = SceneManager::new();
        registry.contribute_scenes(&mut scenes).unwrap();

        // Act
        let ctx = scenes.start(PlayerId::new("teacher")).unwrap();

        // Assert
        match ctx.pending_dialog().map(Dialog::view) {
            Some(FormView::Action(view)) => {
                let labels: Vec<&str> = view.buttons.iter().map(|b| b.label.as_str()).collect();
                assert_eq!(labels, ["teleport", "timer", EXIT_LABEL]);
            }
            other => panic!("expected an action view, got {other:?}"),
        }
    }

    #[test]
    fn test_main_scene_resets_the_context() {
        let module = MainMenuModule::new();
        let mut scenes = SceneManager::new();
        module.register_scenes(&mut scenes);
        let mut ctx = SceneContext::new(PlayerId::new("teacher"));
        ctx.set_history(vec!["timer".into(), "weather".into()]);
        ctx.set_subject_team_required(true);
        ctx.set_next_scene("teleport", Vec::new());

        scenes.open_scene(&mut ctx, DEFAULT_ROOT_SCENE).unwrap();

        assert_eq!(ctx.history(), [DEFAULT_ROOT_SCENE]);
        assert!(!ctx.is_subject_team_required());
        assert!(ctx.next_scene().is_none());
        assert!(module.entries().is_empty());
    }
}
