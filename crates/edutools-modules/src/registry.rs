//! Module registry and startup lifecycle.
//!
//! Modules move through three phases: registration, initialization, scene
//! contribution. Each phase runs over every module in registration order and
//! starts only after the previous one finished for all of them, so a module
//! can depend on any other module without an explicit ordering.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use edutools_core::error::ToolsError;
use edutools_core::storage::PropertyStorage;
use edutools_scenes::SceneManager;

use crate::module::{MenuEntry, Module};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Registering,
    Initialized,
    ScenesContributed,
}

struct Registered {
    module: Arc<dyn Module>,
    concrete: Arc<dyn Any + Send + Sync>,
}

/// Registry of feature modules.
pub struct ModuleRegistry {
    storage: Arc<dyn PropertyStorage>,
    modules: Vec<Registered>,
    phase: Phase,
}

impl ModuleRegistry {
    /// Creates an empty registry whose modules persist through `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn PropertyStorage>) -> Self {
        Self {
            storage,
            modules: Vec::new(),
            phase: Phase::Registering,
        }
    }

    /// The storage the registry was built with.
    #[must_use]
    pub fn storage(&self) -> Arc<dyn PropertyStorage> {
        Arc::clone(&self.storage)
    }

    /// A view of the storage scoped to `namespace`.
    #[must_use]
    pub fn sub_storage(&self, namespace: &str) -> Arc<dyn PropertyStorage> {
        self.storage.sub_storage(namespace)
    }

    /// Adds a module.
    ///
    /// # Errors
    ///
    /// Returns `ToolsError::DuplicateModule` if a module with the same id is
    /// already registered; the registered module is kept. Returns
    /// `ToolsError::ModuleLifecycle` once the registry has been initialized.
    pub fn register<M: Module>(&mut self, module: M) -> Result<(), ToolsError> {
        if self.phase != Phase::Registering {
            return Err(ToolsError::ModuleLifecycle(format!(
                "cannot register '{}' after initialization",
                module.id()
            )));
        }
        if self.is_registered(module.id()) {
            return Err(ToolsError::DuplicateModule(module.id().to_owned()));
        }

        tracing::debug!(module = module.id(), "module registered");
        let module = Arc::new(module);
        self.modules.push(Registered {
            module: Arc::clone(&module) as Arc<dyn Module>,
            concrete: module,
        });
        Ok(())
    }

    /// Looks up a module by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<dyn Module>> {
        self.find(id).map(|entry| Arc::clone(&entry.module))
    }

    /// Looks up a module by id and returns it as its concrete type.
    ///
    /// Returns `None` when no module is registered under `id` or when it is
    /// not a `T`.
    #[must_use]
    pub fn get_as<T: Module>(&self, id: &str) -> Option<Arc<T>> {
        self.find(id)
            .and_then(|entry| Arc::clone(&entry.concrete).downcast::<T>().ok())
    }

    /// Whether a module is registered under `id`.
    #[must_use]
    pub fn is_registered(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Registered module ids in registration order.
    #[must_use]
    pub fn module_ids(&self) -> Vec<&str> {
        self.modules.iter().map(|entry| entry.module.id()).collect()
    }

    /// Removes a module. Modules that resolved it during initialization keep
    /// their reference.
    ///
    /// # Errors
    ///
    /// Returns `ToolsError::ModuleNotFound` if no module is registered under
    /// `id`.
    pub fn unregister(&mut self, id: &str) -> Result<Arc<dyn Module>, ToolsError> {
        let index = self
            .modules
            .iter()
            .position(|entry| entry.module.id() == id)
            .ok_or_else(|| ToolsError::ModuleNotFound(id.to_owned()))?;
        tracing::debug!(module = id, "module unregistered");
        Ok(self.modules.remove(index).module)
    }

    /// Runs every module's initialization hook in registration order.
    ///
    /// # Errors
    ///
    /// Returns the first hook error, or `ToolsError::ModuleLifecycle` if the
    /// registry was already initialized.
    pub fn initialize_all(&mut self) -> Result<(), ToolsError> {
        if self.phase != Phase::Registering {
            return Err(ToolsError::ModuleLifecycle(
                "modules are already initialized".to_owned(),
            ));
        }
        for entry in &self.modules {
            let id = entry.module.id();
            entry.module.initialize(self).inspect_err(|error| {
                tracing::error!(module = id, %error, "module initialization failed");
            })?;
            tracing::debug!(module = id, "module initialized");
        }
        self.phase = Phase::Initialized;
        tracing::info!(modules = self.modules.len(), "modules initialized");
        Ok(())
    }

    /// Lets every module register its scenes on `scenes`, in registration
    /// order.
    ///
    /// # Errors
    ///
    /// Returns `ToolsError::ModuleLifecycle` before [`Self::initialize_all`]
    /// or when called a second time.
    pub fn contribute_scenes(&mut self, scenes: &mut SceneManager) -> Result<(), ToolsError> {
        match self.phase {
            Phase::Initialized => {}
            Phase::Registering => {
                return Err(ToolsError::ModuleLifecycle(
                    "modules must be initialized before contributing scenes".to_owned(),
                ));
            }
            Phase::ScenesContributed => {
                return Err(ToolsError::ModuleLifecycle(
                    "scenes were already contributed".to_owned(),
                ));
            }
        }
        for entry in &self.modules {
            entry.module.register_scenes(scenes);
        }
        self.phase = Phase::ScenesContributed;
        tracing::info!(scenes = scenes.scene_names().len(), "scenes contributed");
        Ok(())
    }

    /// Every module's menu entry, sorted by weight. Entries of equal weight
    /// keep registration order.
    #[must_use]
    pub fn collect_menu_entries(&self) -> Vec<MenuEntry> {
        let mut entries: Vec<MenuEntry> = self
            .modules
            .iter()
            .filter_map(|entry| entry.module.menu_entry())
            .collect();
        entries.sort_by_key(|entry| entry.weight);
        entries
    }

    fn find(&self, id: &str) -> Option<&Registered> {
        self.modules.iter().find(|entry| entry.module.id() == id)
    }
}

impl fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("modules", &self.module_ids())
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
