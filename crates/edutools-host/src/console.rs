//! Terminal presenter.
//!
//! Dialogs are printed as numbered lists. Buttons are picked by number;
//! multi-field dialogs take one value per interactive field separated by
//! `;`, where an empty value keeps the field's default. `q` cancels any
//! dialog, as does the end of input.

use std::fmt::Write as _;

use async_trait::async_trait;
use edutools_core::error::ToolsError;
use edutools_core::player::PlayerId;
use edutools_ui::{
    FieldValue, FieldView, FormPresenter, FormResponse, FormView, ModalView, check_slider_value,
};
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines, Stdin, Stdout,
};
use tokio::sync::Mutex;

const FIELD_SEPARATOR: char = ';';

struct ConsoleIo<R, W> {
    lines: Lines<R>,
    output: W,
}

/// Presents dialogs on a line-oriented terminal.
pub struct ConsolePresenter<R, W> {
    io: Mutex<ConsoleIo<R, W>>,
}

impl ConsolePresenter<BufReader<Stdin>, Stdout> {
    /// A presenter reading stdin and writing stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> ConsolePresenter<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// A presenter over arbitrary input and output streams.
    pub fn new(input: R, output: W) -> Self {
        Self {
            io: Mutex::new(ConsoleIo {
                lines: input.lines(),
                output,
            }),
        }
    }

    /// Consumes the presenter and returns its output stream.
    pub fn into_output(self) -> W {
        self.io.into_inner().output
    }
}

impl<R, W> ConsoleIo<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn write(&mut self, text: &str) -> Result<(), ToolsError> {
        self.output
            .write_all(text.as_bytes())
            .await
            .map_err(presentation_error)?;
        self.output.flush().await.map_err(presentation_error)
    }

    async fn read_line(&mut self) -> Result<Option<String>, ToolsError> {
        self.lines.next_line().await.map_err(presentation_error)
    }
}

#[async_trait]
impl<R, W> FormPresenter for ConsolePresenter<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn present(
        &self,
        player: &PlayerId,
        form: &FormView,
    ) -> Result<FormResponse, ToolsError> {
        let mut io = self.io.lock().await;
        io.write(&render(player, form)).await?;
        loop {
            io.write("> ").await?;
            let Some(line) = io.read_line().await? else {
                return Ok(FormResponse::Canceled);
            };
            match parse_response(form, &line) {
                Ok(response) => return Ok(response),
                Err(problem) => io.write(&format!("! {problem}\n")).await?,
            }
        }
    }

    async fn notify(&self, player: &PlayerId, message: &str) -> Result<(), ToolsError> {
        let mut io = self.io.lock().await;
        io.write(&format!("[{player}] {message}\n")).await
    }
}

fn presentation_error(error: std::io::Error) -> ToolsError {
    ToolsError::Presentation(format!("terminal: {error}"))
}

/// Renders `form` as the text shown to `player`.
#[must_use]
pub fn render(player: &PlayerId, form: &FormView) -> String {
    let mut out = format!("\n== {} ({player}) ==\n", form.title());
    match form {
        FormView::Action(view) => {
            if let Some(body) = &view.body {
                let _ = writeln!(out, "{body}");
            }
            for (number, button) in view.buttons.iter().enumerate().map(|(i, b)| (i + 1, b)) {
                let _ = writeln!(out, "  {number}) {}", button.label);
            }
        }
        FormView::Message(view) => {
            let _ = writeln!(out, "{}", view.body);
            let _ = writeln!(out, "  1) {}", view.button1);
            let _ = writeln!(out, "  2) {}", view.button2);
        }
        FormView::Modal(view) => render_modal(&mut out, view),
    }
    out.push_str("  q) cancel\n");
    out
}

fn render_modal(out: &mut String, view: &ModalView) {
    let mut number = 0;
    for field in &view.fields {
        if !field.is_interactive() {
            let _ = writeln!(out, "  {}", field.label());
            continue;
        }
        number += 1;
        let _ = match field {
            FieldView::Slider {
                label,
                min,
                max,
                step,
                default,
            } => writeln!(out, "  {number}. {label}: {min}..{max} step {step} [{default}]"),
            FieldView::Dropdown {
                label,
                options,
                default_index,
            } => {
                let choices: Vec<String> = options
                    .iter()
                    .enumerate()
                    .map(|(i, option)| format!("{}={option}", i + 1))
                    .collect();
                writeln!(
                    out,
                    "  {number}. {label}: {} [{}]",
                    choices.join(", "),
                    default_index + 1
                )
            }
            FieldView::Toggle { label, default } => {
                let default = if *default { "y" } else { "n" };
                writeln!(out, "  {number}. {label}: y/n [{default}]")
            }
            FieldView::TextField {
                label,
                placeholder,
                default,
            } => writeln!(out, "  {number}. {label}: {placeholder} [{default}]"),
            FieldView::Label { .. } => Ok(()),
        };
    }
    if number > 0 {
        let _ = writeln!(
            out,
            "  enter {number} value(s) separated by '{FIELD_SEPARATOR}', empty keeps the default"
        );
    }
}

/// Parses a line typed in answer to `form`.
///
/// # Errors
///
/// Returns a short description of the problem when the line does not
/// answer the dialog.
pub fn parse_response(form: &FormView, line: &str) -> Result<FormResponse, String> {
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") {
        return Ok(FormResponse::Canceled);
    }
    match form {
        FormView::Action(view) => parse_choice(line, view.buttons.len()),
        FormView::Message(_) => parse_choice(line, 2),
        FormView::Modal(view) => parse_fields(view, line).map(FormResponse::Submitted),
    }
}

fn parse_choice(line: &str, count: usize) -> Result<FormResponse, String> {
    match line.parse::<usize>() {
        Ok(number) if (1..=count).contains(&number) => Ok(FormResponse::Selected(number - 1)),
        _ => Err(format!("choose 1-{count} or q")),
    }
}

fn parse_fields(view: &ModalView, line: &str) -> Result<Vec<FieldValue>, String> {
    let inputs: Vec<&FieldView> = view.fields.iter().filter(|f| f.is_interactive()).collect();
    let parts: Vec<&str> = if line.is_empty() {
        vec![""; inputs.len()]
    } else {
        line.split(FIELD_SEPARATOR).map(str::trim).collect()
    };
    if parts.len() != inputs.len() {
        return Err(format!(
            "expected {} value(s), got {}",
            inputs.len(),
            parts.len()
        ));
    }
    inputs
        .into_iter()
        .zip(parts)
        .enumerate()
        .map(|(i, (field, part))| {
            parse_field(field, part).map_err(|problem| format!("value {}: {problem}", i + 1))
        })
        .collect()
}

fn parse_field(field: &FieldView, part: &str) -> Result<FieldValue, String> {
    match field {
        FieldView::Slider {
            min,
            max,
            step,
            default,
            ..
        } => {
            if part.is_empty() {
                return Ok(FieldValue::Number(*default));
            }
            let number: f64 = part.parse().map_err(|_| format!("'{part}' is not a number"))?;
            check_slider_value(*min, *max, *step, number)?;
            Ok(FieldValue::Number(number))
        }
        FieldView::Dropdown {
            options,
            default_index,
            ..
        } => {
            if part.is_empty() {
                return Ok(FieldValue::Index(*default_index));
            }
            match part.parse::<usize>() {
                Ok(number) if (1..=options.len()).contains(&number) => {
                    Ok(FieldValue::Index(number - 1))
                }
                _ => Err(format!("choose 1-{}", options.len())),
            }
        }
        FieldView::Toggle { default, .. } => match part.to_ascii_lowercase().as_str() {
            "" => Ok(FieldValue::Toggle(*default)),
            "y" | "yes" | "true" | "1" => Ok(FieldValue::Toggle(true)),
            "n" | "no" | "false" | "0" => Ok(FieldValue::Toggle(false)),
            _ => Err("answer y or n".to_owned()),
        },
        FieldView::TextField { default, .. } => Ok(FieldValue::Text(if part.is_empty() {
            default.clone()
        } else {
            part.to_owned()
        })),
        FieldView::Label { .. } => Err("labels take no value".to_owned()),
    }
}
