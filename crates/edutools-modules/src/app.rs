//! Startup orchestration.

use std::sync::Arc;

use edutools_core::error::ToolsError;
use edutools_core::player::PlayerId;
use edutools_scenes::{SceneContext, SceneManager, SessionEnd, run_session};
use edutools_ui::FormPresenter;

use crate::registry::ModuleRegistry;

/// A started deployment: the module registry and the scene registry, both
/// read-only from here on.
#[derive(Debug, Clone)]
pub struct EducatorTools {
    registry: Arc<ModuleRegistry>,
    scenes: Arc<SceneManager>,
}

/// Initializes every registered module, collects their scenes and returns
/// the handle sessions are started from.
///
/// # Errors
///
/// Returns the first initialization error, for example a module whose
/// required dependency is not registered.
pub fn bootstrap(mut registry: ModuleRegistry) -> Result<EducatorTools, ToolsError> {
    registry.initialize_all()?;
    let mut scenes = SceneManager::new();
    registry.contribute_scenes(&mut scenes)?;
    tracing::info!(
        modules = ?registry.module_ids(),
        scenes = ?scenes.scene_names(),
        "educator tools ready"
    );
    Ok(EducatorTools {
        registry: Arc::new(registry),
        scenes: Arc::new(scenes),
    })
}

impl EducatorTools {
    /// The module registry.
    #[must_use]
    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// The scene registry and navigator.
    #[must_use]
    pub fn scenes(&self) -> &SceneManager {
        &self.scenes
    }

    /// Opens the root menu for `player` and returns the new context with the
    /// menu pending.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the root scene.
    pub fn open_menu(&self, player: PlayerId) -> Result<SceneContext, ToolsError> {
        self.scenes.start(player)
    }

    /// Runs a full session for `player` until it closes or is canceled.
    ///
    /// # Errors
    ///
    /// Returns the first presenter, handler or scene error.
    pub async fn run(
        &self,
        player: PlayerId,
        presenter: &dyn FormPresenter,
    ) -> Result<SessionEnd, ToolsError> {
        let mut ctx = self.open_menu(player)?;
        run_session(&self.scenes, presenter, &mut ctx).await
    }
}
