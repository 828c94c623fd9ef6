//! Team fixtures.

use edutools_core::player::PlayerId;
use edutools_core::team::{Team, TeamProvider};

/// Builds a teacher-defined team with the given members.
#[must_use]
pub fn team(id: &str, members: &[&str]) -> Team {
    let mut team = Team::new(id, id);
    team.member_ids = members.iter().copied().map(PlayerId::from).collect();
    team
}

/// Builds a participant id.
#[must_use]
pub fn player(id: &str) -> PlayerId {
    PlayerId::new(id)
}

/// A fixed, in-memory team provider.
#[derive(Debug, Clone, Default)]
pub struct StaticTeams {
    teams: Vec<Team>,
}

impl StaticTeams {
    /// Create a provider serving `teams` in the given order.
    #[must_use]
    pub fn new(teams: Vec<Team>) -> Self {
        Self { teams }
    }
}

impl TeamProvider for StaticTeams {
    fn team(&self, team_id: &str) -> Option<Team> {
        self.teams.iter().find(|team| team.id == team_id).cloned()
    }

    fn teams_for_player(&self, player: &PlayerId) -> Vec<Team> {
        self.teams
            .iter()
            .filter(|team| team.contains(player))
            .cloned()
            .collect()
    }

    fn all_teams(&self) -> Vec<Team> {
        self.teams.clone()
    }
}
