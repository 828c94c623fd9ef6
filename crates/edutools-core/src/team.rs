//! Teams: named groups of participants used as subjects or targets of an action.

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// Id of the generated team containing every known participant.
pub const ALL_PLAYERS_TEAM_ID: &str = "system_all_players";

/// Id prefix of the generated single-participant teams.
pub const PLAYER_TEAM_PREFIX: &str = "system_player_";

/// Id prefix shared by all generated teams.
pub const SYSTEM_TEAM_PREFIX: &str = "system_";

/// A named set of participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Unique team identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Members of the team.
    #[serde(default)]
    pub member_ids: Vec<PlayerId>,
    /// Whether the team may be modified.
    #[serde(default = "default_editable")]
    pub editable: bool,
    /// Whether the team was generated by the system rather than a teacher.
    #[serde(default)]
    pub is_system: bool,
    /// Optional icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Minimum number of members required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_members: Option<usize>,
    /// Maximum number of members allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_members: Option<usize>,
}

fn default_editable() -> bool {
    true
}

impl Team {
    /// Creates an editable, teacher-defined team with no members.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            member_ids: Vec::new(),
            editable: true,
            is_system: false,
            icon: None,
            minimum_members: None,
            maximum_members: None,
        }
    }

    /// Returns true when `player` belongs to this team.
    #[must_use]
    pub fn contains(&self, player: &PlayerId) -> bool {
        self.member_ids.contains(player)
    }

    /// Returns true when the team has at most one member.
    #[must_use]
    pub fn is_single_member(&self) -> bool {
        self.member_ids.len() <= 1
    }

    /// Returns true when `count` members satisfy the team's size limits.
    #[must_use]
    pub fn accepts_member_count(&self, count: usize) -> bool {
        self.minimum_members.is_none_or(|min| count >= min)
            && self.maximum_members.is_none_or(|max| count <= max)
    }
}

/// Returns true when `team_id` names a generated team.
#[must_use]
pub fn is_system_team_id(team_id: &str) -> bool {
    team_id.starts_with(SYSTEM_TEAM_PREFIX)
}

/// Returns true when `team_id` names a generated single-participant team.
#[must_use]
pub fn is_player_team_id(team_id: &str) -> bool {
    team_id.starts_with(PLAYER_TEAM_PREFIX)
}

/// Source of teams. Implemented outside the navigation core.
pub trait TeamProvider: Send + Sync {
    /// Looks up a team by id.
    fn team(&self, team_id: &str) -> Option<Team>;

    /// Returns every team `player` belongs to.
    fn teams_for_player(&self, player: &PlayerId) -> Vec<Team>;

    /// Returns every known team.
    fn all_teams(&self) -> Vec<Team>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_deserializes_with_defaults() {
        // Arrange
        let json = serde_json::json!({ "id": "red", "name": "Red" });

        // Act
        let team: Team = serde_json::from_value(json).unwrap();

        // Assert
        assert_eq!(team.id, "red");
        assert!(team.member_ids.is_empty());
        assert!(team.editable);
        assert!(!team.is_system);
    }

    #[test]
    fn test_accepts_member_count_honours_limits() {
        let mut team = Team::new("red", "Red");
        team.minimum_members = Some(2);
        team.maximum_members = Some(3);

        assert!(!team.accepts_member_count(1));
        assert!(team.accepts_member_count(2));
        assert!(team.accepts_member_count(3));
        assert!(!team.accepts_member_count(4));
    }

    #[test]
    fn test_system_team_ids_are_recognized() {
        assert!(is_system_team_id(ALL_PLAYERS_TEAM_ID));
        assert!(is_system_team_id("system_player_alex"));
        assert!(is_player_team_id("system_player_alex"));
        assert!(!is_player_team_id(ALL_PLAYERS_TEAM_ID));
        assert!(!is_system_team_id("red"));
    }
}
