//! The module contract.

use std::fmt;
use std::sync::Arc;

use edutools_core::error::ToolsError;
use edutools_scenes::{SceneContext, SceneManager};

use crate::registry::ModuleRegistry;

/// Click handler of a main menu entry.
pub type MenuHandler =
    Arc<dyn Fn(&SceneManager, &mut SceneContext) -> Result<(), ToolsError> + Send + Sync>;

/// An independently developed feature.
///
/// Every hook but [`Module::id`] is optional. The registry calls
/// [`Module::initialize`] once all modules are registered, so a module may
/// look up any other module there regardless of registration order.
pub trait Module: Send + Sync + 'static {
    /// Unique module identifier.
    fn id(&self) -> &str;

    /// Resolves dependencies on other modules.
    ///
    /// # Errors
    ///
    /// Returns `ToolsError::ModuleNotFound` when a required module is not
    /// registered. Startup aborts with this error.
    fn initialize(&self, _registry: &ModuleRegistry) -> Result<(), ToolsError> {
        Ok(())
    }

    /// Registers the module's scenes.
    fn register_scenes(&self, _scenes: &mut SceneManager) {}

    /// The entry this module adds to the main menu, if any.
    fn menu_entry(&self) -> Option<MenuEntry> {
        None
    }
}

/// A button of the main menu.
#[derive(Clone)]
pub struct MenuEntry {
    /// Translation key of the label.
    pub label_key: String,
    /// Icon texture path.
    pub icon_path: Option<String>,
    /// Sort key; lower weights come first.
    pub weight: i32,
    /// Runs when the entry is clicked.
    pub handler: MenuHandler,
}

impl MenuEntry {
    /// Creates an entry with weight 0 and no icon.
    #[must_use]
    pub fn new<F>(label_key: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&SceneManager, &mut SceneContext) -> Result<(), ToolsError> + Send + Sync + 'static,
    {
        Self {
            label_key: label_key.into(),
            icon_path: None,
            weight: 0,
            handler: Arc::new(handler),
        }
    }

    /// Sets the icon texture path.
    #[must_use]
    pub fn with_icon(mut self, icon_path: impl Into<String>) -> Self {
        self.icon_path = Some(icon_path.into());
        self
    }

    /// Sets the sort weight.
    #[must_use]
    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }
}

impl fmt::Debug for MenuEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuEntry")
            .field("label_key", &self.label_key)
            .field("icon_path", &self.icon_path)
            .field("weight", &self.weight)
            .finish_non_exhaustive()
    }
}
