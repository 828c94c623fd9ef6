//! Participant responses to a presented dialog.

use serde::{Deserialize, Serialize};

/// A single value produced by an interactive field of a multi-field dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Slider position.
    Number(f64),
    /// Selected dropdown index.
    Index(usize),
    /// Toggle state.
    Toggle(bool),
    /// Entered text.
    Text(String),
}

impl FieldValue {
    /// Short name of the value kind, used in mismatch diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Index(_) => "index",
            Self::Toggle(_) => "toggle",
            Self::Text(_) => "text",
        }
    }
}

/// Outcome of presenting a dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum FormResponse {
    /// The participant dismissed the dialog without answering.
    Canceled,
    /// A button of a choice-list or confirmation dialog was pressed.
    Selected(usize),
    /// A multi-field dialog was submitted; one value per interactive field.
    Submitted(Vec<FieldValue>),
}

impl FormResponse {
    /// Returns true for [`FormResponse::Canceled`].
    #[must_use]
    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled)
    }
}
