//! Positional scene arguments and deferred continuations.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use edutools_core::team::Team;
use serde_json::Value;

/// A positional argument passed to a scene constructor.
#[derive(Clone)]
pub enum SceneArg {
    /// A flag.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A string, usually an id or translation key.
    Text(String),
    /// A team picked earlier in the flow.
    Team(Team),
    /// Structured data.
    Json(Value),
    /// Any shared value, for configuration objects that carry handlers.
    Shared(Arc<dyn Any + Send + Sync>),
}

impl SceneArg {
    /// Wraps `value` as a shared argument.
    #[must_use]
    pub fn shared<T: Any + Send + Sync>(value: T) -> Self {
        Self::Shared(Arc::new(value))
    }

    /// Returns the flag, if this is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer, if this is one.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the team, if this is one.
    #[must_use]
    pub fn as_team(&self) -> Option<&Team> {
        match self {
            Self::Team(team) => Some(team),
            _ => None,
        }
    }

    /// Returns the shared value downcast to `T`.
    #[must_use]
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        match self {
            Self::Shared(value) => Arc::clone(value).downcast::<T>().ok(),
            _ => None,
        }
    }
}

impl fmt::Debug for SceneArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Self::Int(value) => f.debug_tuple("Int").field(value).finish(),
            Self::Text(value) => f.debug_tuple("Text").field(value).finish(),
            Self::Team(team) => f.debug_tuple("Team").field(&team.id).finish(),
            Self::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Self::Shared(_) => f.write_str("Shared(..)"),
        }
    }
}

impl PartialEq for SceneArg {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Team(a), Self::Team(b)) => a == b,
            (Self::Json(a), Self::Json(b)) => a == b,
            (Self::Shared(a), Self::Shared(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for SceneArg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for SceneArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for SceneArg {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for SceneArg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for SceneArg {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Team> for SceneArg {
    fn from(value: Team) -> Self {
        Self::Team(value)
    }
}

impl From<Value> for SceneArg {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

/// Builds a `Vec<SceneArg>` from values convertible into [`SceneArg`].
#[macro_export]
macro_rules! scene_args {
    () => {
        ::std::vec::Vec::<$crate::args::SceneArg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::args::SceneArg::from($arg)),+]
    };
}

/// A deferred instruction to open a scene with the given arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Continuation {
    /// Scene to open.
    pub name: String,
    /// Positional arguments for the scene constructor.
    pub args: Vec<SceneArg>,
}

impl Continuation {
    /// Creates a continuation without arguments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Creates a continuation with positional arguments.
    #[must_use]
    pub fn with_args(name: impl Into<String>, args: Vec<SceneArg>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}
