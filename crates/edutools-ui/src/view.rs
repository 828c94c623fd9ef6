//! Render data for the three dialog styles.

use serde::{Deserialize, Serialize};

/// Prefix of every translation key used as a dialog title.
const TITLE_KEY_PREFIX: &str = "edu_tools.ui";

/// Relative slack allowed when matching a slider value to its step grid.
const STEP_TOLERANCE: f64 = 1e-6;

/// Builds the title translation key for a dialog id.
#[must_use]
pub fn title_key(id: &str) -> String {
    format!("{TITLE_KEY_PREFIX}.{id}.title")
}

/// Checks a slider value against the slider's range and step grid.
///
/// # Errors
///
/// Returns a short description of the problem, suitable for showing to the
/// participant.
pub fn check_slider_value(min: f64, max: f64, step: f64, value: f64) -> Result<(), String> {
    if !value.is_finite() {
        return Err(format!("{value} is not a finite number"));
    }
    if value < min || value > max {
        return Err(format!("{value} is outside {min}..{max}"));
    }
    if step > 0.0 {
        let offset = (value - min) / step;
        if (offset - offset.round()).abs() > STEP_TOLERANCE {
            return Err(format!("{value} is not a step of {step} from {min}"));
        }
    }
    Ok(())
}

/// A button of a choice-list dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonView {
    /// Label text or translation key.
    pub label: String,
    /// Optional texture path shown next to the label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A choice-list dialog: an ordered list of buttons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionView {
    /// Title translation key.
    pub title: String,
    /// Optional body text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Buttons in display order.
    pub buttons: Vec<ButtonView>,
}

/// A confirmation dialog with exactly two buttons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageView {
    /// Title translation key.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Label of the first button (index 0).
    pub button1: String,
    /// Label of the second button (index 1).
    pub button2: String,
}

/// One entry of a multi-field dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldView {
    /// Static text. Produces no response value.
    Label {
        /// Text shown.
        text: String,
    },
    /// Numeric slider.
    Slider {
        /// Field label.
        label: String,
        /// Lowest selectable value.
        min: f64,
        /// Highest selectable value.
        max: f64,
        /// Step between selectable values.
        step: f64,
        /// Initially selected value.
        default: f64,
    },
    /// Single-choice dropdown.
    Dropdown {
        /// Field label.
        label: String,
        /// Options in display order.
        options: Vec<String>,
        /// Initially selected option.
        default_index: usize,
    },
    /// Boolean toggle.
    Toggle {
        /// Field label.
        label: String,
        /// Initial state.
        default: bool,
    },
    /// Free-text input.
    TextField {
        /// Field label.
        label: String,
        /// Placeholder shown while empty.
        placeholder: String,
        /// Initial text.
        default: String,
    },
}

impl FieldView {
    /// Returns true when the field produces a response value.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        !matches!(self, Self::Label { .. })
    }

    /// Returns the label or text of the field.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Label { text } => text,
            Self::Slider { label, .. }
            | Self::Dropdown { label, .. }
            | Self::Toggle { label, .. }
            | Self::TextField { label, .. } => label,
        }
    }
}

/// A multi-field dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalView {
    /// Title translation key.
    pub title: String,
    /// Fields in display order.
    pub fields: Vec<FieldView>,
}

impl ModalView {
    /// Number of fields that produce a response value.
    #[must_use]
    pub fn interactive_count(&self) -> usize {
        self.fields.iter().filter(|f| f.is_interactive()).count()
    }
}

/// Any dialog the host can render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum FormView {
    /// Choice list.
    Action(ActionView),
    /// Two-button confirmation.
    Message(MessageView),
    /// Multi-field form.
    Modal(ModalView),
}

impl FormView {
    /// Returns the title translation key.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Action(view) => &view.title,
            Self::Message(view) => &view.title,
            Self::Modal(view) => &view.title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_key_uses_ui_namespace() {
        assert_eq!(title_key("main"), "edu_tools.ui.main.title");
    }

    #[test]
    fn test_check_slider_value_rejects_non_finite_values() {
        assert_eq!(
            check_slider_value(1.0, 60.0, 1.0, f64::NAN),
            Err("NaN is not a finite number".to_owned())
        );
        assert!(check_slider_value(1.0, 60.0, 1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_check_slider_value_honours_range_and_step() {
        assert_eq!(check_slider_value(1.0, 60.0, 1.0, 12.0), Ok(()));
        assert_eq!(check_slider_value(0.0, 1.0, 0.1, 0.3), Ok(()));
        assert_eq!(
            check_slider_value(1.0, 60.0, 1.0, 90.0),
            Err("90 is outside 1..60".to_owned())
        );
        assert_eq!(
            check_slider_value(1.0, 60.0, 1.0, 12.5),
            Err("12.5 is not a step of 1 from 1".to_owned())
        );
    }

    #[test]
    fn test_interactive_count_skips_labels() {
        let view = ModalView {
            title: title_key("timer"),
            fields: vec![
                FieldView::Label { text: "intro".into() },
                FieldView::Toggle { label: "show".into(), default: true },
                FieldView::Label { text: "outro".into() },
                FieldView::TextField {
                    label: "name".into(),
                    placeholder: String::new(),
                    default: String::new(),
                },
            ],
        };

        assert_eq!(view.interactive_count(), 2);
    }

    #[test]
    fn test_form_view_serializes_with_style_tag() {
        let view = FormView::Message(MessageView {
            title: title_key("confirm"),
            body: "sure?".into(),
            button1: "yes".into(),
            button2: "no".into(),
        });

        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["style"], "message");
        assert_eq!(json["button2"], "no");
    }
}
