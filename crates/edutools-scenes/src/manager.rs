//! Scene registry and navigation.
//!
//! One `SceneManager` is shared by every session. Its registry of scene
//! constructors is filled during startup and read-only afterwards; all
//! per-session state lives in the [`SceneContext`] passed to each call, so
//! each context is its own state machine riding on the shared registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use edutools_core::error::ToolsError;
use edutools_core::player::PlayerId;

use crate::args::SceneArg;
use crate::context::SceneContext;

/// Name of the scene opened when history runs out.
pub const DEFAULT_ROOT_SCENE: &str = "main";

/// Builds a scene: constructs a dialog and hands it to the context for
/// display, or delegates to another scene.
pub type SceneFactory = Arc<
    dyn Fn(&SceneManager, &mut SceneContext, &[SceneArg]) -> Result<(), ToolsError> + Send + Sync,
>;

/// Registry of scene constructors plus the navigation operations.
pub struct SceneManager {
    scenes: HashMap<String, SceneFactory>,
    root_scene: String,
}

impl SceneManager {
    /// Creates an empty registry whose root scene is [`DEFAULT_ROOT_SCENE`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_root_scene(DEFAULT_ROOT_SCENE)
    }

    /// Creates an empty registry with a custom root scene.
    #[must_use]
    pub fn with_root_scene(root_scene: impl Into<String>) -> Self {
        Self {
            scenes: HashMap::new(),
            root_scene: root_scene.into(),
        }
    }

    /// The scene opened when history runs out.
    #[must_use]
    pub fn root_scene(&self) -> &str {
        &self.root_scene
    }

    /// Registers a scene constructor. An existing entry with the same name is
    /// overwritten.
    pub fn register_scene<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&SceneManager, &mut SceneContext, &[SceneArg]) -> Result<(), ToolsError>
            + Send
            + Sync
            + 'static,
    {
        let name = name.into();
        if self.scenes.contains_key(&name) {
            tracing::warn!(scene = %name, "scene already registered, overwriting");
        }
        self.scenes.insert(name, Arc::new(factory));
    }

    /// Whether a scene is registered under `name`.
    #[must_use]
    pub fn has_scene(&self, name: &str) -> bool {
        self.scenes.contains_key(name)
    }

    /// Registered scene names, sorted.
    #[must_use]
    pub fn scene_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.scenes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Creates a context for `player` and opens the root scene in it.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the root scene constructor.
    pub fn start(&self, player: PlayerId) -> Result<SceneContext, ToolsError> {
        let mut ctx = SceneContext::new(player);
        tracing::debug!(
            session_id = %ctx.session_id(),
            player = %ctx.source_player(),
            "session started"
        );
        self.open(&mut ctx, &self.root_scene, true, Vec::new())?;
        Ok(ctx)
    }

    /// Opens `name` in `ctx`, optionally recording it in the history.
    ///
    /// Returns `Ok(false)` without touching the context when no scene is
    /// registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns the error of a scene constructor whose preconditions were not
    /// met by the caller.
    pub fn open(
        &self,
        ctx: &mut SceneContext,
        name: &str,
        add_to_history: bool,
        args: Vec<SceneArg>,
    ) -> Result<bool, ToolsError> {
        let Some(factory) = self.scenes.get(name) else {
            tracing::error!(session_id = %ctx.session_id(), scene = name, "scene not found in registry");
            return Ok(false);
        };
        if add_to_history {
            ctx.add_to_history(name);
        }
        tracing::debug!(
            session_id = %ctx.session_id(),
            scene = name,
            depth = ctx.history().len(),
            "opening scene"
        );
        (**factory)(self, ctx, &args)?;
        Ok(true)
    }

    /// Opens `name` without arguments and records it in the history.
    ///
    /// # Errors
    ///
    /// See [`SceneManager::open`].
    pub fn open_scene(&self, ctx: &mut SceneContext, name: &str) -> Result<bool, ToolsError> {
        self.open(ctx, name, true, Vec::new())
    }

    /// Rolls the history back by `steps` and reopens the scene now on top,
    /// or the root scene when nothing is left.
    ///
    /// Returns `Ok(false)` and leaves the history untouched when `steps` is
    /// zero or exceeds the history depth.
    ///
    /// # Errors
    ///
    /// See [`SceneManager::open`].
    pub fn go_back(&self, ctx: &mut SceneContext, steps: usize) -> Result<bool, ToolsError> {
        let depth = ctx.history().len();
        if steps == 0 || steps > depth {
            tracing::warn!(
                session_id = %ctx.session_id(),
                steps,
                depth,
                "cannot go back, not enough history"
            );
            return Ok(false);
        }

        let remaining = depth - steps;
        let (target, add_to_history) = if remaining == 0 {
            (self.root_scene.clone(), true)
        } else {
            (ctx.history()[remaining - 1].clone(), false)
        };
        if !self.has_scene(&target) {
            tracing::error!(session_id = %ctx.session_id(), scene = %target, "scene not found in registry");
            return Ok(false);
        }

        ctx.truncate_history(remaining);
        self.open(ctx, &target, add_to_history, Vec::new())
    }

    /// Rolls the history back to the last visit of `target` and reopens it.
    ///
    /// Returns `Ok(false)` and leaves the history untouched when `target` was
    /// never visited.
    ///
    /// # Errors
    ///
    /// See [`SceneManager::open`].
    pub fn go_back_to_scene(
        &self,
        ctx: &mut SceneContext,
        target: &str,
    ) -> Result<bool, ToolsError> {
        let Some(index) = ctx.history().iter().rposition(|scene| scene == target) else {
            tracing::warn!(
                session_id = %ctx.session_id(),
                scene = target,
                "scene not found in history"
            );
            return Ok(false);
        };
        if !self.has_scene(target) {
            tracing::error!(session_id = %ctx.session_id(), scene = target, "scene not found in registry");
            return Ok(false);
        }

        ctx.truncate_history(index + 1);
        self.open(ctx, target, false, Vec::new())
    }

    /// Consumes the context's stored continuation and opens it.
    ///
    /// Returns `Ok(false)` when no continuation is stored.
    ///
    /// # Errors
    ///
    /// See [`SceneManager::open`].
    pub fn submit(&self, ctx: &mut SceneContext) -> Result<bool, ToolsError> {
        let Some(next) = ctx.take_next_scene() else {
            tracing::debug!(session_id = %ctx.session_id(), "submit without a stored next scene");
            return Ok(false);
        };
        self.open(ctx, &next.name, true, next.args)
    }
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SceneManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneManager")
            .field("scenes", &self.scene_names())
            .field("root_scene", &self.root_scene)
            .finish()
    }
}
