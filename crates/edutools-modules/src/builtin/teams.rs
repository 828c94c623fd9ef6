//! Team provider module and its storage-backed provider.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use edutools_core::error::ToolsError;
use edutools_core::player::PlayerId;
use edutools_core::storage::{PropertyStorage, StorageExt};
use edutools_core::team::{
    ALL_PLAYERS_TEAM_ID, PLAYER_TEAM_PREFIX, Team, TeamProvider, is_system_team_id,
};

use crate::module::Module;

/// Storage key of the teacher-defined teams map.
const TEAMS_KEY: &str = "teams";

/// Exposes the deployment's [`TeamProvider`] to other modules.
pub struct TeamsModule {
    provider: Arc<dyn TeamProvider>,
    stored: Option<Arc<StoredTeams>>,
}

impl TeamsModule {
    /// Module id.
    pub const ID: &'static str = "teams";

    /// Wraps an external provider.
    #[must_use]
    pub fn new(provider: Arc<dyn TeamProvider>) -> Self {
        Self {
            provider,
            stored: None,
        }
    }

    /// Wraps a storage-backed provider, keeping its editing operations
    /// reachable through [`TeamsModule::stored`].
    #[must_use]
    pub fn with_stored(teams: Arc<StoredTeams>) -> Self {
        Self {
            provider: Arc::clone(&teams) as Arc<dyn TeamProvider>,
            stored: Some(teams),
        }
    }

    /// The team provider.
    #[must_use]
    pub fn provider(&self) -> Arc<dyn TeamProvider> {
        Arc::clone(&self.provider)
    }

    /// The storage-backed provider, when the module was built with one.
    #[must_use]
    pub fn stored(&self) -> Option<Arc<StoredTeams>> {
        self.stored.clone()
    }
}

impl Module for TeamsModule {
    fn id(&self) -> &str {
        Self::ID
    }
}

impl fmt::Debug for TeamsModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TeamsModule")
            .field("stored", &self.stored)
            .finish_non_exhaustive()
    }
}

/// Teams persisted as a JSON map under the `teams` key of a storage, plus
/// system teams generated on demand from a roster.
#[derive(Debug)]
pub struct StoredTeams {
    storage: Arc<dyn PropertyStorage>,
    roster: Vec<PlayerId>,
}

impl StoredTeams {
    /// Creates a provider over `storage`. `roster` lists the participants
    /// the system teams are generated from.
    #[must_use]
    pub fn new(storage: Arc<dyn PropertyStorage>, roster: Vec<PlayerId>) -> Self {
        Self { storage, roster }
    }

    /// Teacher-defined teams, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `ToolsError::Storage` if the stored map cannot be decoded.
    pub fn stored_teams(&self) -> Result<Vec<Team>, ToolsError> {
        Ok(self.load()?.into_values().collect())
    }

    /// Generated teams: all players first, then one per participant.
    #[must_use]
    pub fn system_teams(&self) -> Vec<Team> {
        std::iter::once(self.all_players_team())
            .chain(self.roster.iter().map(player_team))
            .collect()
    }

    /// Creates an empty, editable team.
    ///
    /// # Errors
    ///
    /// Returns `ToolsError::Validation` if `team_id` is taken or reserved
    /// for system teams.
    pub fn create_team(&self, team_id: &str, name: &str) -> Result<Team, ToolsError> {
        if is_system_team_id(team_id) {
            return Err(ToolsError::Validation(format!(
                "team id '{team_id}' is reserved for system teams"
            )));
        }
        let mut teams = self.load()?;
        if teams.contains_key(team_id) {
            return Err(ToolsError::Validation(format!(
                "team '{team_id}' already exists"
            )));
        }
        let team = Team::new(team_id, name);
        teams.insert(team_id.to_owned(), team.clone());
        self.save(&teams)?;
        tracing::debug!(team = team_id, "team created");
        Ok(team)
    }

    /// Inserts or replaces a teacher-defined team.
    ///
    /// # Errors
    ///
    /// Returns `ToolsError::Validation` for system team ids.
    pub fn save_team(&self, team: Team) -> Result<(), ToolsError> {
        if is_system_team_id(&team.id) {
            return Err(ToolsError::Validation(format!(
                "team id '{}' is reserved for system teams",
                team.id
            )));
        }
        let mut teams = self.load()?;
        teams.insert(team.id.clone(), team);
        self.save(&teams)
    }

    /// Deletes a team. Returns false when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `ToolsError::Validation` for system or non-editable teams.
    pub fn delete_team(&self, team_id: &str) -> Result<bool, ToolsError> {
        let mut teams = self.load()?;
        let Some(team) = teams.get(team_id) else {
            return Ok(false);
        };
        ensure_editable(team)?;
        teams.remove(team_id);
        self.save(&teams)?;
        Ok(true)
    }

    /// Adds `player` to a team. Returns false when already a member.
    ///
    /// # Errors
    ///
    /// Returns `ToolsError::Validation` if the team does not exist, cannot
    /// be edited, or would exceed its maximum size.
    pub fn add_member(&self, team_id: &str, player: PlayerId) -> Result<bool, ToolsError> {
        self.edit(team_id, |team| {
            if team.contains(&player) {
                return Ok(false);
            }
            if team
                .maximum_members
                .is_some_and(|max| team.member_ids.len() >= max)
            {
                return Err(ToolsError::Validation(format!(
                    "team '{}' is full",
                    team.id
                )));
            }
            team.member_ids.push(player);
            Ok(true)
        })
    }

    /// Removes `player` from a team. Returns false when not a member.
    ///
    /// # Errors
    ///
    /// Returns `ToolsError::Validation` if the team does not exist or cannot
    /// be edited.
    pub fn remove_member(&self, team_id: &str, player: &PlayerId) -> Result<bool, ToolsError> {
        self.edit(team_id, |team| {
            let before = team.member_ids.len();
            team.member_ids.retain(|member| member != player);
            Ok(team.member_ids.len() != before)
        })
    }

    fn edit<F>(&self, team_id: &str, change: F) -> Result<bool, ToolsError>
    where
        F: FnOnce(&mut Team) -> Result<bool, ToolsError>,
    {
        let mut teams = self.load()?;
        let team = teams
            .get_mut(team_id)
            .ok_or_else(|| ToolsError::Validation(format!("team '{team_id}' does not exist")))?;
        ensure_editable(team)?;
        let changed = change(team)?;
        if changed {
            self.save(&teams)?;
        }
        Ok(changed)
    }

    fn load(&self) -> Result<BTreeMap<String, Team>, ToolsError> {
        Ok(self.storage.get_as(TEAMS_KEY)?.unwrap_or_default())
    }

    fn save(&self, teams: &BTreeMap<String, Team>) -> Result<(), ToolsError> {
        self.storage.set_as(TEAMS_KEY, teams)
    }

    fn load_or_empty(&self) -> BTreeMap<String, Team> {
        self.load().unwrap_or_else(|error| {
            tracing::warn!(%error, "stored teams are unreadable");
            BTreeMap::new()
        })
    }

    fn all_players_team(&self) -> Team {
        let mut team = Team::new(ALL_PLAYERS_TEAM_ID, "All Players");
        team.member_ids = self.roster.clone();
        team.is_system = true;
        team.editable = false;
        team
    }
}

impl TeamProvider for StoredTeams {
    fn team(&self, team_id: &str) -> Option<Team> {
        if team_id == ALL_PLAYERS_TEAM_ID {
            return Some(self.all_players_team());
        }
        if let Some(player) = team_id.strip_prefix(PLAYER_TEAM_PREFIX) {
            return self
                .roster
                .iter()
                .find(|member| member.as_str() == player)
                .map(player_team);
        }
        self.load_or_empty().remove(team_id)
    }

    fn teams_for_player(&self, player: &PlayerId) -> Vec<Team> {
        self.all_teams()
            .into_iter()
            .filter(|team| team.contains(player))
            .collect()
    }

    fn all_teams(&self) -> Vec<Team> {
        self.load_or_empty()
            .into_values()
            .chain(self.system_teams())
            .collect()
    }
}

fn player_team(player: &PlayerId) -> Team {
    let mut team = Team::new(format!("{PLAYER_TEAM_PREFIX}{player}"), player.as_str());
    team.member_ids = vec![player.clone()];
    team.is_system = true;
    team.editable = false;
    team
}

fn ensure_editable(team: &Team) -> Result<(), ToolsError> {
    if team.is_system || !team.editable {
        return Err(ToolsError::Validation(format!(
            "team '{}' is not editable",
            team.id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use edutools_core::storage::MemoryStorage;

    use super::*;

    fn stored_teams(roster: &[&str]) -> StoredTeams {
        StoredTeams::new(
            Arc::new(MemoryStorage::new()),
            roster.iter().copied().map(PlayerId::from).collect(),
        )
    }

    #[test]
    fn test_all_teams_lists_stored_then_system_teams() {
        // Arrange
        let teams = stored_teams(&["alex", "sam"]);
        teams.create_team("red", "Red").unwrap();

        // Act
        let ids: Vec<String> = teams.all_teams().into_iter().map(|team| team.id).collect();

        // Assert
        assert_eq!(
            ids,
            [
                "red",
                ALL_PLAYERS_TEAM_ID,
                "system_player_alex",
                "system_player_sam"
            ]
        );
    }

    #[test]
    fn test_system_teams_are_generated_from_roster() {
        let teams = stored_teams(&["alex", "sam"]);

        let all = teams.team(ALL_PLAYERS_TEAM_ID).unwrap();
        let alex = teams.team("system_player_alex").unwrap();

        assert_eq!(all.member_ids.len(), 2);
        assert!(all.is_system);
        assert_eq!(alex.member_ids, [PlayerId::new("alex")]);
        assert!(teams.team("system_player_nobody").is_none());
    }

    #[test]
    fn test_create_team_rejects_duplicates_and_reserved_ids() {
        let teams = stored_teams(&[]);
        teams.create_team("red", "Red").unwrap();

        let duplicate = teams.create_team("red", "Red again");
        let reserved = teams.create_team("system_player_alex", "Alex");

        assert!(matches!(duplicate, Err(ToolsError::Validation(_))));
        assert!(matches!(reserved, Err(ToolsError::Validation(_))));
    }

    #[test]
    fn test_membership_edits_are_persisted() {
        // Arrange
        let teams = stored_teams(&["alex"]);
        teams.create_team("red", "Red").unwrap();

        // Act
        let added = teams.add_member("red", PlayerId::new("alex")).unwrap();
        let added_again = teams.add_member("red", PlayerId::new("alex")).unwrap();

        // Assert
        assert!(added);
        assert!(!added_again);
        assert_eq!(teams.teams_for_player(&PlayerId::new("alex")).len(), 3);
        assert!(teams.remove_member("red", &PlayerId::new("alex")).unwrap());
        assert_eq!(teams.team("red").unwrap().member_ids.len(), 0);
    }

    #[test]
    fn test_add_member_honours_maximum_size() {
        let teams = stored_teams(&[]);
        let mut pair = Team::new("pair", "Pair");
        pair.maximum_members = Some(1);
        teams.save_team(pair).unwrap();
        teams.add_member("pair", PlayerId::new("alex")).unwrap();

        let result = teams.add_member("pair", PlayerId::new("sam"));

        match result.unwrap_err() {
            ToolsError::Validation(message) => assert!(message.contains("full")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_locked_team_cannot_be_deleted() {
        let teams = stored_teams(&[]);
        let mut locked = Team::new("staff", "Staff");
        locked.editable = false;
        teams.save_team(locked).unwrap();

        assert!(matches!(
            teams.delete_team("staff"),
            Err(ToolsError::Validation(_))
        ));
        assert!(!teams.delete_team("missing").unwrap());
    }
}
