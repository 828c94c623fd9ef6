//! Drives whole menu sessions through the console presenter.

use std::sync::Arc;

use edutools_core::player::PlayerId;
use edutools_core::storage::{MemoryStorage, PropertyStorage};
use edutools_core::team::{Team, TeamProvider};
use edutools_host::config::{HostConfig, LogFormat, load_teams};
use edutools_host::console::ConsolePresenter;
use edutools_host::demo::{TimerModule, TimerSettings};
use edutools_host::setup::build_registry;
use edutools_modules::builtin::TeamsModule;
use edutools_modules::{EducatorTools, bootstrap};
use edutools_scenes::SessionEnd;
use edutools_test_support::team;

fn config() -> HostConfig {
    HostConfig {
        player: PlayerId::new("teacher"),
        teams_file: None,
        roster: vec![PlayerId::new("alex"), PlayerId::new("sam")],
        log_format: LogFormat::Pretty,
    }
}

fn tools(teams: Vec<Team>) -> EducatorTools {
    let storage: Arc<dyn PropertyStorage> = Arc::new(MemoryStorage::new());
    let registry = build_registry(storage, &config(), teams).unwrap();
    bootstrap(registry).unwrap()
}

async fn run_script(tools: &EducatorTools, script: &str) -> (SessionEnd, String) {
    let presenter = ConsolePresenter::new(script.as_bytes(), Vec::new());
    let end = tools
        .run(PlayerId::new("teacher"), &presenter)
        .await
        .unwrap();
    let output = String::from_utf8(presenter.into_output()).unwrap();
    (end, output)
}

#[tokio::test]
async fn test_timer_settings_are_saved_and_session_exits() {
    // Arrange
    let tools = tools(Vec::new());

    // Act: open the timer, submit 12 minutes with countdown, continue back
    // to the menu, then exit.
    let (end, output) = run_script(&tools, "1\n12;y\n1\n3\n").await;

    // Assert
    assert_eq!(end, SessionEnd::Closed);
    assert!(output.contains("edu_tools.ui.timer.title"));
    assert!(output.contains("edu_tools.ui.timer_started.title"));
    let timer = tools
        .registry()
        .get_as::<TimerModule>(TimerModule::ID)
        .unwrap();
    assert_eq!(
        timer.settings().unwrap(),
        TimerSettings {
            minutes: 12,
            show_countdown: true
        }
    );
}

#[tokio::test]
async fn test_invalid_modal_input_is_reprompted() {
    let tools = tools(Vec::new());

    let (end, output) = run_script(&tools, "1\n90;y\n30;n\nq\n").await;

    assert_eq!(end, SessionEnd::Canceled);
    assert!(output.contains("! "));
    let timer = tools
        .registry()
        .get_as::<TimerModule>(TimerModule::ID)
        .unwrap();
    assert_eq!(timer.settings().unwrap().minutes, 30);
}

#[tokio::test]
async fn test_team_overview_lists_members_of_picked_team() {
    // Arrange
    let tools = tools(vec![team("red", &["alex", "sam"])]);

    // Act: open the overview, pick the first team, go back to the menu and
    // cancel.
    let (end, output) = run_script(&tools, "2\n1\n1\nq\n").await;

    // Assert
    assert_eq!(end, SessionEnd::Canceled);
    assert!(output.contains("edu_tools.ui.team_overview.team_select.get_subject.body"));
    assert!(output.contains("red: alex, sam"));
}

#[tokio::test]
async fn test_team_overview_can_pick_another_team() {
    let tools = tools(vec![team("red", &["alex"]), team("blue", &["sam"])]);

    // blue is listed first; the second button returns to the picker.
    let (end, output) = run_script(&tools, "2\n1\n2\n2\n1\n3\n").await;

    assert_eq!(end, SessionEnd::Closed);
    assert!(output.contains("blue: sam"));
    assert!(output.contains("red: alex"));
}

#[tokio::test]
async fn test_end_of_input_cancels_session() {
    let tools = tools(Vec::new());

    let (end, output) = run_script(&tools, "").await;

    assert_eq!(end, SessionEnd::Canceled);
    assert!(output.contains("edu_tools.ui.main.title"));
}

#[tokio::test]
async fn test_teams_file_is_seeded_into_storage() {
    // Arrange
    let path = std::env::temp_dir().join(format!("edutools-teams-{}.yaml", uuid::Uuid::new_v4()));
    tokio::fs::write(
        &path,
        "- id: red\n  name: Red\n  member_ids: [alex]\n- id: blue\n  name: Blue\n",
    )
    .await
    .unwrap();

    // Act
    let teams = load_teams(&path).await.unwrap();
    let tools = tools(teams);
    tokio::fs::remove_file(&path).await.unwrap();

    // Assert
    let module = tools
        .registry()
        .get_as::<TeamsModule>(TeamsModule::ID)
        .unwrap();
    let ids: Vec<String> = module
        .stored()
        .unwrap()
        .stored_teams()
        .unwrap()
        .into_iter()
        .map(|team| team.id)
        .collect();
    assert_eq!(ids, ["blue", "red"]);
    assert_eq!(
        module.provider().team("red").map(|team| team.name),
        Some("Red".to_owned())
    );
}
