//! Framework modules every deployment ships with.

pub mod common;
pub mod confirm;
pub mod main_menu;
pub mod team_select;
pub mod teams;

pub use common::CommonScenesModule;
pub use confirm::{ConfirmButton, ConfirmConfig, ConfirmModule};
pub use main_menu::MainMenuModule;
pub use team_select::TeamSelectModule;
pub use teams::{StoredTeams, TeamsModule};

use std::sync::Arc;

use edutools_core::error::ToolsError;
use edutools_core::player::PlayerId;

use crate::registry::ModuleRegistry;

/// Registers the framework modules. Team data lives in the registry's
/// `teams` storage namespace; `roster` lists the participants the system
/// teams are generated from.
///
/// # Errors
///
/// Returns `ToolsError::DuplicateModule` if one of the framework ids is
/// already taken.
pub fn register_defaults(
    registry: &mut ModuleRegistry,
    roster: Vec<PlayerId>,
) -> Result<(), ToolsError> {
    let teams = StoredTeams::new(registry.sub_storage(TeamsModule::ID), roster);
    registry.register(MainMenuModule::new())?;
    registry.register(CommonScenesModule)?;
    registry.register(ConfirmModule)?;
    registry.register(TeamsModule::with_stored(Arc::new(teams)))?;
    registry.register(TeamSelectModule::new())?;
    Ok(())
}
