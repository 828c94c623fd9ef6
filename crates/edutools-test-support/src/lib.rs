//! Shared test mocks and utilities for educator tools.

mod presenter;
mod teams;

pub use presenter::{FailingPresenter, ScriptedPresenter};
pub use teams::{StaticTeams, player, team};
