//! Registry assembly for the console host.

use std::sync::Arc;

use edutools_core::storage::PropertyStorage;
use edutools_core::team::Team;
use edutools_modules::ModuleRegistry;
use edutools_modules::builtin::{TeamsModule, register_defaults};

use crate::config::HostConfig;
use crate::demo::register_demo_modules;
use crate::error::HostError;

/// Registers the framework and demo modules over `storage` and seeds
/// `teams` into the teams module.
///
/// # Errors
///
/// Returns `HostError::Tools` if a module cannot be registered or a team
/// cannot be stored.
pub fn build_registry(
    storage: Arc<dyn PropertyStorage>,
    config: &HostConfig,
    teams: Vec<Team>,
) -> Result<ModuleRegistry, HostError> {
    let mut registry = ModuleRegistry::new(storage);
    register_defaults(&mut registry, config.roster.clone())?;
    register_demo_modules(&mut registry)?;
    seed_teams(&registry, teams)?;
    Ok(registry)
}

/// Stores `teams` through the teams module. Returns how many were stored.
///
/// # Errors
///
/// Returns `HostError::Config` if the teams module is not storage-backed and
/// `HostError::Tools` if a team cannot be stored.
pub fn seed_teams(registry: &ModuleRegistry, teams: Vec<Team>) -> Result<usize, HostError> {
    if teams.is_empty() {
        return Ok(0);
    }
    let stored = registry
        .get_as::<TeamsModule>(TeamsModule::ID)
        .and_then(|module| module.stored())
        .ok_or_else(|| HostError::Config("teams module is not storage-backed".to_owned()))?;
    let count = teams.len();
    for team in teams {
        stored.save_team(team)?;
    }
    tracing::info!(teams = count, "teams seeded");
    Ok(count)
}
