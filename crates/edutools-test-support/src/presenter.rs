//! Test presenters: mock `FormPresenter` implementations for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use edutools_core::error::ToolsError;
use edutools_core::player::PlayerId;
use edutools_ui::{FormPresenter, FormResponse, FormView};

/// A presenter that answers each dialog with the next scripted response and
/// records everything it was asked to show. Answers `Canceled` once the
/// script is exhausted, so a session driven by it always terminates.
#[derive(Debug)]
pub struct ScriptedPresenter {
    responses: Mutex<VecDeque<FormResponse>>,
    presented: Mutex<Vec<FormView>>,
    notifications: Mutex<Vec<(PlayerId, String)>>,
}

impl ScriptedPresenter {
    /// Create a presenter that answers with `responses` in order.
    #[must_use]
    pub fn new(responses: Vec<FormResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            presented: Mutex::new(Vec::new()),
            notifications: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of every view presented so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn presented(&self) -> Vec<FormView> {
        self.presented.lock().unwrap().clone()
    }

    /// Returns a snapshot of every notification sent so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn notifications(&self) -> Vec<(PlayerId, String)> {
        self.notifications.lock().unwrap().clone()
    }

    /// Number of scripted responses not yet used.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

#[async_trait]
impl FormPresenter for ScriptedPresenter {
    async fn present(
        &self,
        _player: &PlayerId,
        form: &FormView,
    ) -> Result<FormResponse, ToolsError> {
        self.presented.lock().unwrap().push(form.clone());
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(FormResponse::Canceled))
    }

    async fn notify(&self, player: &PlayerId, message: &str) -> Result<(), ToolsError> {
        self.notifications
            .lock()
            .unwrap()
            .push((player.clone(), message.to_owned()));
        Ok(())
    }
}

/// A presenter that fails every call with a presentation error.
#[derive(Debug)]
pub struct FailingPresenter;

#[async_trait]
impl FormPresenter for FailingPresenter {
    async fn present(
        &self,
        _player: &PlayerId,
        _form: &FormView,
    ) -> Result<FormResponse, ToolsError> {
        Err(ToolsError::Presentation("host unavailable".to_owned()))
    }

    async fn notify(&self, _player: &PlayerId, _message: &str) -> Result<(), ToolsError> {
        Err(ToolsError::Presentation("host unavailable".to_owned()))
    }
}
