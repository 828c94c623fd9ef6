//! Host configuration, read from environment variables.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use edutools_core::player::PlayerId;
use edutools_core::team::Team;

use crate::error::HostError;

/// Participant the session is opened for.
pub const PLAYER_VAR: &str = "EDU_TOOLS_PLAYER";
/// Optional YAML file with teams to seed.
pub const TEAMS_FILE_VAR: &str = "EDU_TOOLS_TEAMS_FILE";
/// Comma-separated participant ids the system teams are generated from.
pub const ROSTER_VAR: &str = "EDU_TOOLS_ROSTER";
/// `json` or `pretty`.
pub const LOG_FORMAT_VAR: &str = "EDU_TOOLS_LOG_FORMAT";

const DEFAULT_PLAYER: &str = "teacher";

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line.
    Json,
    /// Human-readable lines.
    #[default]
    Pretty,
}

impl FromStr for LogFormat {
    type Err = HostError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(HostError::Config(format!(
                "{LOG_FORMAT_VAR} must be json or pretty, got '{other}'"
            ))),
        }
    }
}

/// Resolved host configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    /// Participant the session is opened for.
    pub player: PlayerId,
    /// Teams file to seed from.
    pub teams_file: Option<PathBuf>,
    /// Participants the system teams are generated from.
    pub roster: Vec<PlayerId>,
    /// Tracing output format.
    pub log_format: LogFormat,
}

impl HostConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `HostError::Config` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, HostError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of
    /// a variable if it is set.
    ///
    /// # Errors
    ///
    /// Returns `HostError::Config` if a variable holds an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, HostError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let player = match lookup(PLAYER_VAR) {
            Some(value) if value.trim().is_empty() => {
                return Err(HostError::Config(format!("{PLAYER_VAR} must not be empty")));
            }
            Some(value) => PlayerId::new(value.trim()),
            None => PlayerId::new(DEFAULT_PLAYER),
        };
        let teams_file = lookup(TEAMS_FILE_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let roster = lookup(ROSTER_VAR)
            .map(|value| parse_roster(&value))
            .unwrap_or_default();
        let log_format = lookup(LOG_FORMAT_VAR)
            .map(|value| value.parse::<LogFormat>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            player,
            teams_file,
            roster,
            log_format,
        })
    }
}

/// Splits a comma-separated roster, skipping blanks and duplicates.
fn parse_roster(value: &str) -> Vec<PlayerId> {
    let mut roster: Vec<PlayerId> = Vec::new();
    for id in value.split(',').map(str::trim).filter(|id| !id.is_empty()) {
        let player = PlayerId::new(id);
        if !roster.contains(&player) {
            roster.push(player);
        }
    }
    roster
}

/// Reads a YAML list of teams.
///
/// # Errors
///
/// Returns `HostError::Io` if the file cannot be read and `HostError::Yaml`
/// if it does not hold a list of teams.
pub async fn load_teams(path: &Path) -> Result<Vec<Team>, HostError> {
    let contents = tokio::fs::read_to_string(path).await?;
    parse_teams(&contents)
}

/// Parses a YAML list of teams.
///
/// # Errors
///
/// Returns `HostError::Yaml` if `contents` does not hold a list of teams.
pub fn parse_teams(contents: &str) -> Result<Vec<Team>, HostError> {
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_yaml::from_str(contents)?)
}
