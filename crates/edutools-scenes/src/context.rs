//! Per-interaction session state threaded across scenes.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use edutools_core::player::PlayerId;
use edutools_core::team::{Team, TeamProvider};
use edutools_ui::FieldValue;
use serde_json::Value;
use uuid::Uuid;

use crate::args::{Continuation, SceneArg};
use crate::form::Dialog;

/// Well-known keys of the context data bag.
pub mod keys {
    /// Filter applied when neither role is being collected.
    pub const TEAM_FILTER: &str = "team_filter";
    /// Filter applied while the subject team is being collected.
    pub const SUBJECT_FILTER: &str = "team_filter_subject";
    /// Filter applied while the target team is being collected.
    pub const TARGET_FILTER: &str = "team_filter_target";
    /// Translation key fragment customizing the team picker body text.
    pub const BODY_KEY: &str = "body_key";
}

/// Predicate deciding whether a team may be offered for selection.
pub type TeamFilter = Arc<dyn Fn(&Team, &dyn TeamProvider) -> bool + Send + Sync>;

/// Which selection a team filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterRole {
    /// Any selection.
    Any,
    /// Subject selection.
    Subject,
    /// Target selection.
    Target,
}

impl FilterRole {
    /// Returns the data key the filter is stored under.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Any => keys::TEAM_FILTER,
            Self::Subject => keys::SUBJECT_FILTER,
            Self::Target => keys::TARGET_FILTER,
        }
    }
}

/// A value held in the context data bag.
#[derive(Clone)]
pub enum ContextData {
    /// A team filter predicate.
    Filter(TeamFilter),
    /// A value collected from a dialog field, pending consolidation.
    Field(FieldValue),
    /// Flow-specific scratch data.
    Scratch(Value),
}

impl ContextData {
    /// Wraps a closure as a team filter.
    pub fn filter<F>(predicate: F) -> Self
    where
        F: Fn(&Team, &dyn TeamProvider) -> bool + Send + Sync + 'static,
    {
        Self::Filter(Arc::new(predicate))
    }

    /// Returns the filter, if this is one.
    #[must_use]
    pub fn as_filter(&self) -> Option<&TeamFilter> {
        match self {
            Self::Filter(filter) => Some(filter),
            _ => None,
        }
    }

    /// Returns the field value, if this is one.
    #[must_use]
    pub fn as_field(&self) -> Option<&FieldValue> {
        match self {
            Self::Field(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the scratch value, if this is one.
    #[must_use]
    pub fn as_scratch(&self) -> Option<&Value> {
        match self {
            Self::Scratch(value) => Some(value),
            _ => None,
        }
    }

    /// Returns a string held either as scratch data or as a text field value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scratch(Value::String(text)) | Self::Field(FieldValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Returns a flag held either as scratch data or as a toggle value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Scratch(Value::Bool(flag)) | Self::Field(FieldValue::Toggle(flag)) => Some(*flag),
            _ => None,
        }
    }
}

impl fmt::Debug for ContextData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filter(_) => f.write_str("Filter(..)"),
            Self::Field(value) => f.debug_tuple("Field").field(value).finish(),
            Self::Scratch(value) => f.debug_tuple("Scratch").field(value).finish(),
        }
    }
}

impl From<FieldValue> for ContextData {
    fn from(value: FieldValue) -> Self {
        Self::Field(value)
    }
}

impl From<Value> for ContextData {
    fn from(value: Value) -> Self {
        Self::Scratch(value)
    }
}

impl From<&str> for ContextData {
    fn from(value: &str) -> Self {
        Self::Scratch(Value::String(value.to_owned()))
    }
}

impl From<String> for ContextData {
    fn from(value: String) -> Self {
        Self::Scratch(Value::String(value))
    }
}

impl From<bool> for ContextData {
    fn from(value: bool) -> Self {
        Self::Scratch(Value::Bool(value))
    }
}

/// Mutable state of one menu interaction, owned by the participant who
/// opened it.
///
/// Only the scene currently displayed and the [`SceneManager`] driving the
/// flow read or write a context.
///
/// [`SceneManager`]: crate::manager::SceneManager
pub struct SceneContext {
    session_id: Uuid,
    source_player: PlayerId,
    history: Vec<String>,
    next_scene: Option<Continuation>,
    subject_team: Option<Team>,
    target_team: Option<Team>,
    subject_team_required: bool,
    target_team_required: bool,
    data: HashMap<String, ContextData>,
    pending_dialog: Option<Dialog>,
}

impl SceneContext {
    /// Creates an empty context for `source_player`.
    #[must_use]
    pub fn new(source_player: PlayerId) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            source_player,
            history: Vec::new(),
            next_scene: None,
            subject_team: None,
            target_team: None,
            subject_team_required: false,
            target_team_required: false,
            data: HashMap::new(),
            pending_dialog: None,
        }
    }

    /// Identifier used to correlate log lines of this interaction.
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// The participant who has the menu open.
    #[must_use]
    pub fn source_player(&self) -> &PlayerId {
        &self.source_player
    }

    // --- history ---

    /// Appends a scene to the history.
    pub fn add_to_history(&mut self, scene: impl Into<String>) {
        self.history.push(scene.into());
    }

    /// The visited scenes, oldest first.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Replaces the history.
    pub fn set_history(&mut self, history: Vec<String>) {
        self.history = history;
    }

    /// Empties the history.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// The scene at the top of the history.
    #[must_use]
    pub fn current_scene(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    /// The scene below the top of the history.
    #[must_use]
    pub fn previous_scene(&self) -> Option<&str> {
        self.history
            .len()
            .checked_sub(2)
            .map(|index| self.history[index].as_str())
    }

    pub(crate) fn truncate_history(&mut self, len: usize) {
        self.history.truncate(len);
    }

    // --- continuation ---

    /// Stores the scene to open once the current step completes.
    pub fn set_next_scene(&mut self, scene: impl Into<String>, args: Vec<SceneArg>) {
        self.next_scene = Some(Continuation::with_args(scene, args));
    }

    /// The stored continuation, if any.
    #[must_use]
    pub fn next_scene(&self) -> Option<&Continuation> {
        self.next_scene.as_ref()
    }

    /// Drops the stored continuation.
    pub fn clear_next_scene(&mut self) {
        self.next_scene = None;
    }

    /// Removes and returns the stored continuation.
    pub fn take_next_scene(&mut self) -> Option<Continuation> {
        self.next_scene.take()
    }

    // --- team selection ---

    /// Sets the team the current action applies to.
    pub fn set_subject_team(&mut self, team: Option<Team>) {
        self.subject_team = team;
    }

    /// The team the current action applies to.
    #[must_use]
    pub fn subject_team(&self) -> Option<&Team> {
        self.subject_team.as_ref()
    }

    /// Sets the team the current action is directed at.
    pub fn set_target_team(&mut self, team: Option<Team>) {
        self.target_team = team;
    }

    /// The team the current action is directed at.
    #[must_use]
    pub fn target_team(&self) -> Option<&Team> {
        self.target_team.as_ref()
    }

    /// Marks whether a subject team still has to be collected.
    pub fn set_subject_team_required(&mut self, required: bool) {
        self.subject_team_required = required;
    }

    /// Whether a subject team still has to be collected.
    #[must_use]
    pub fn is_subject_team_required(&self) -> bool {
        self.subject_team_required
    }

    /// Marks whether a target team still has to be collected.
    pub fn set_target_team_required(&mut self, required: bool) {
        self.target_team_required = required;
    }

    /// Whether a target team still has to be collected.
    #[must_use]
    pub fn is_target_team_required(&self) -> bool {
        self.target_team_required
    }

    // --- data bag ---

    /// Stores a value under `key`.
    pub fn set_data(&mut self, key: impl Into<String>, value: impl Into<ContextData>) {
        self.data.insert(key.into(), value.into());
    }

    /// Reads the value stored under `key`.
    #[must_use]
    pub fn data(&self, key: &str) -> Option<&ContextData> {
        self.data.get(key)
    }

    /// Whether a value is stored under `key`.
    #[must_use]
    pub fn has_data(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Removes and returns the value stored under `key`.
    pub fn remove_data(&mut self, key: &str) -> Option<ContextData> {
        self.data.remove(key)
    }

    /// Empties the data bag.
    pub fn clear_data(&mut self) {
        self.data.clear();
    }

    /// Stores a team filter for `role`.
    pub fn set_team_filter<F>(&mut self, role: FilterRole, predicate: F)
    where
        F: Fn(&Team, &dyn TeamProvider) -> bool + Send + Sync + 'static,
    {
        self.set_data(role.key(), ContextData::filter(predicate));
    }

    /// The team filter stored for `role`.
    #[must_use]
    pub fn team_filter(&self, role: FilterRole) -> Option<TeamFilter> {
        self.data(role.key())
            .and_then(ContextData::as_filter)
            .cloned()
    }

    /// Clears history, continuation, team selection and data.
    pub fn reset(&mut self) {
        self.clear_history();
        self.clear_next_scene();
        self.subject_team = None;
        self.target_team = None;
        self.subject_team_required = false;
        self.target_team_required = false;
        self.clear_data();
    }

    // --- display ---

    /// Hands a built dialog to the session for display.
    ///
    /// A session shows one dialog at a time; a dialog handed over before the
    /// previous one was shown replaces it.
    pub fn display(&mut self, dialog: Dialog) {
        if let Some(previous) = self.pending_dialog.replace(dialog) {
            tracing::warn!(
                session_id = %self.session_id,
                replaced = previous.title(),
                "dialog replaced before it was shown"
            );
        }
    }

    /// Whether a dialog is waiting to be shown.
    #[must_use]
    pub fn has_pending_dialog(&self) -> bool {
        self.pending_dialog.is_some()
    }

    /// The dialog waiting to be shown.
    #[must_use]
    pub fn pending_dialog(&self) -> Option<&Dialog> {
        self.pending_dialog.as_ref()
    }

    /// Removes and returns the dialog waiting to be shown.
    pub fn take_pending_dialog(&mut self) -> Option<Dialog> {
        self.pending_dialog.take()
    }
}

impl fmt::Debug for SceneContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneContext")
            .field("session_id", &self.session_id)
            .field("source_player", &self.source_player)
            .field("history", &self.history)
            .field("next_scene", &self.next_scene)
            .field("subject_team", &self.subject_team.as_ref().map(|t| &t.id))
            .field("target_team", &self.target_team.as_ref().map(|t| &t.id))
            .field("data", &self.data)
            .field("pending_dialog", &self.pending_dialog.as_ref().map(Dialog::title))
            .finish_non_exhaustive()
    }
}
