//! Multi-field dialog.
//!
//! Fields are stored in display order. Each interactive field owns its
//! handler, so the value at response position *i* always reaches the handler
//! of the *i*-th interactive field. Labels own no handler and take no
//! response position.

use edutools_core::error::ToolsError;
use edutools_ui::{FieldValue, FieldView, FormResponse, ModalView, check_slider_value, title_key};

use super::{ButtonHandler, Dialog, FieldHandler, follow_next_scene};
use crate::args::Continuation;
use crate::context::SceneContext;
use crate::manager::SceneManager;

/// The option picked in a dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownChoice {
    /// Position of the option.
    pub index: usize,
    /// Option text.
    pub option: String,
}

enum InputHandler {
    Slider(FieldHandler<f64>),
    Dropdown(FieldHandler<DropdownChoice>),
    Toggle(FieldHandler<bool>),
    Text(FieldHandler<String>),
}

enum ModalEntry {
    Label(String),
    Input { view: FieldView, handler: InputHandler },
}

/// A value checked against the field it answers.
enum Resolved {
    Number(f64),
    Choice(DropdownChoice),
    Toggle(bool),
    Text(String),
}

/// An ordered list of typed fields, each interactive one paired with its
/// handler.
pub struct ModalForm {
    title: String,
    entries: Vec<ModalEntry>,
    on_submit: Option<ButtonHandler>,
    next_scene: Option<Continuation>,
}

impl ModalForm {
    /// Creates an empty form titled after `id`.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            title: title_key(id),
            entries: Vec::new(),
            on_submit: None,
            next_scene: None,
        }
    }

    /// The title translation key.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Appends static text.
    pub fn add_label(&mut self, text: impl Into<String>) {
        self.entries.push(ModalEntry::Label(text.into()));
    }

    /// Appends a numeric slider.
    pub fn add_slider<F>(
        &mut self,
        label: impl Into<String>,
        (min, max): (f64, f64),
        step: f64,
        default: f64,
        handler: F,
    ) where
        F: FnOnce(&mut SceneContext, f64) -> Result<(), ToolsError> + Send + 'static,
    {
        debug_assert!(
            min <= max && step > 0.0 && (min..=max).contains(&default),
            "slider needs min <= default <= max and a positive step"
        );
        self.entries.push(ModalEntry::Input {
            view: FieldView::Slider {
                label: label.into(),
                min,
                max,
                step,
                default,
            },
            handler: InputHandler::Slider(Box::new(handler)),
        });
    }

    /// Appends a single-choice dropdown.
    pub fn add_dropdown<F>(
        &mut self,
        label: impl Into<String>,
        options: Vec<String>,
        default_index: usize,
        handler: F,
    ) where
        F: FnOnce(&mut SceneContext, DropdownChoice) -> Result<(), ToolsError> + Send + 'static,
    {
        self.entries.push(ModalEntry::Input {
            view: FieldView::Dropdown {
                label: label.into(),
                options,
                default_index,
            },
            handler: InputHandler::Dropdown(Box::new(handler)),
        });
    }

    /// Appends a boolean toggle.
    pub fn add_toggle<F>(&mut self, label: impl Into<String>, default: bool, handler: F)
    where
        F: FnOnce(&mut SceneContext, bool) -> Result<(), ToolsError> + Send + 'static,
    {
        self.entries.push(ModalEntry::Input {
            view: FieldView::Toggle {
                label: label.into(),
                default,
            },
            handler: InputHandler::Toggle(Box::new(handler)),
        });
    }

    /// Appends a free-text field.
    pub fn add_text_field<F>(
        &mut self,
        label: impl Into<String>,
        placeholder: impl Into<String>,
        default: impl Into<String>,
        handler: F,
    ) where
        F: FnOnce(&mut SceneContext, String) -> Result<(), ToolsError> + Send + 'static,
    {
        self.entries.push(ModalEntry::Input {
            view: FieldView::TextField {
                label: label.into(),
                placeholder: placeholder.into(),
                default: default.into(),
            },
            handler: InputHandler::Text(Box::new(handler)),
        });
    }

    /// Runs `handler` once every field handler has run.
    pub fn on_submit<F>(&mut self, handler: F)
    where
        F: FnOnce(&SceneManager, &mut SceneContext) -> Result<(), ToolsError> + Send + 'static,
    {
        self.on_submit = Some(Box::new(handler));
    }

    /// Opens `next` after submission.
    pub fn set_next_scene(&mut self, next: Continuation) {
        self.next_scene = Some(next);
    }

    /// Number of fields that produce a response value.
    #[must_use]
    pub fn interactive_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, ModalEntry::Input { .. }))
            .count()
    }

    /// Render data for the host.
    #[must_use]
    pub fn view(&self) -> ModalView {
        ModalView {
            title: self.title.clone(),
            fields: self
                .entries
                .iter()
                .map(|entry| match entry {
                    ModalEntry::Label(text) => FieldView::Label { text: text.clone() },
                    ModalEntry::Input { view, .. } => view.clone(),
                })
                .collect(),
        }
    }

    /// Hands the dialog to the session for display.
    pub fn show(self, ctx: &mut SceneContext) {
        ctx.display(Dialog::Modal(self));
    }

    pub(super) fn dispatch(
        self,
        response: FormResponse,
        manager: &SceneManager,
        ctx: &mut SceneContext,
    ) -> Result<(), ToolsError> {
        let values = match response {
            FormResponse::Submitted(values) => values,
            other => {
                return Err(ToolsError::ResponseMismatch(format!(
                    "expected submitted field values, got {other:?}"
                )));
            }
        };
        let expected = self.interactive_count();
        if values.len() != expected {
            return Err(ToolsError::ResponseMismatch(format!(
                "expected {expected} field values, got {}",
                values.len()
            )));
        }

        let inputs: Vec<(FieldView, InputHandler)> = self
            .entries
            .into_iter()
            .filter_map(|entry| match entry {
                ModalEntry::Label(_) => None,
                ModalEntry::Input { view, handler } => Some((view, handler)),
            })
            .collect();

        // Every value is checked before the first handler runs.
        let mut resolved = Vec::with_capacity(expected);
        for (position, ((view, _), value)) in inputs.iter().zip(values).enumerate() {
            resolved.push(resolve(position, view, value)?);
        }

        for (position, ((_, handler), value)) in inputs.into_iter().zip(resolved).enumerate() {
            apply(position, handler, value, ctx)?;
        }

        if let Some(on_submit) = self.on_submit {
            on_submit(manager, ctx)?;
        }
        follow_next_scene(self.next_scene, manager, ctx)
    }
}

fn resolve(position: usize, view: &FieldView, value: FieldValue) -> Result<Resolved, ToolsError> {
    match (view, value) {
        (FieldView::Slider { min, max, step, .. }, FieldValue::Number(number)) => {
            check_slider_value(*min, *max, *step, number).map_err(|problem| {
                ToolsError::ResponseMismatch(format!("field {position}: slider value {problem}"))
            })?;
            Ok(Resolved::Number(number))
        }
        (FieldView::Dropdown { options, .. }, FieldValue::Index(index)) => options
            .get(index)
            .map(|option| {
                Resolved::Choice(DropdownChoice {
                    index,
                    option: option.clone(),
                })
            })
            .ok_or_else(|| {
                ToolsError::ResponseMismatch(format!(
                    "field {position}: option {index} of {} selected",
                    options.len()
                ))
            }),
        (FieldView::Toggle { .. }, FieldValue::Toggle(flag)) => Ok(Resolved::Toggle(flag)),
        (FieldView::TextField { .. }, FieldValue::Text(text)) => Ok(Resolved::Text(text)),
        (view, value) => Err(ToolsError::ResponseMismatch(format!(
            "field {position} ('{}'): unexpected {} value",
            view.label(),
            value.kind()
        ))),
    }
}

fn apply(
    position: usize,
    handler: InputHandler,
    value: Resolved,
    ctx: &mut SceneContext,
) -> Result<(), ToolsError> {
    match (handler, value) {
        (InputHandler::Slider(handler), Resolved::Number(number)) => handler(ctx, number),
        (InputHandler::Dropdown(handler), Resolved::Choice(choice)) => handler(ctx, choice),
        (InputHandler::Toggle(handler), Resolved::Toggle(flag)) => handler(ctx, flag),
        (InputHandler::Text(handler), Resolved::Text(text)) => handler(ctx, text),
        _ => Err(ToolsError::ResponseMismatch(format!(
            "field {position}: handler does not match its field"
        ))),
    }
}
