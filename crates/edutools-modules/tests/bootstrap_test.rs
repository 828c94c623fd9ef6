//! Integration tests for startup orchestration.

mod common;

use std::sync::Arc;

use edutools_core::error::ToolsError;
use edutools_core::player::PlayerId;
use edutools_core::storage::MemoryStorage;
use edutools_modules::builtin::{
    CommonScenesModule, ConfirmModule, MainMenuModule, TeamSelectModule, register_defaults,
};
use edutools_modules::{ModuleRegistry, bootstrap};

#[test]
fn test_bootstrap_registers_framework_scenes() {
    let teleports = Arc::default();

    let tools = common::build_tools(&teleports);

    let scenes = tools.scenes().scene_names();
    for scene in [
        "main",
        "confirm",
        "team_select",
        "no_teams",
        "not_enough_players",
        "teleport",
    ] {
        assert!(scenes.contains(&scene), "missing scene {scene}");
    }
    assert_eq!(
        tools.registry().module_ids(),
        ["main", "scenes", "confirm", "teams", "team_select", "teleport", "shortcut"]
    );
}

#[test]
fn test_bootstrap_fails_when_team_picker_has_no_teams_module() {
    // Arrange
    let mut registry = ModuleRegistry::new(Arc::new(MemoryStorage::new()));
    registry.register(MainMenuModule::new()).unwrap();
    registry.register(CommonScenesModule).unwrap();
    registry.register(ConfirmModule).unwrap();
    registry.register(TeamSelectModule::new()).unwrap();

    // Act
    let result = bootstrap(registry);

    // Assert
    match result.unwrap_err() {
        ToolsError::ModuleNotFound(id) => assert_eq!(id, "teams"),
        other => panic!("expected ModuleNotFound, got {other:?}"),
    }
}

#[test]
fn test_register_defaults_twice_is_rejected() {
    let mut registry = ModuleRegistry::new(Arc::new(MemoryStorage::new()));
    register_defaults(&mut registry, Vec::new()).unwrap();

    let result = register_defaults(&mut registry, vec![PlayerId::new("alex")]);

    match result.unwrap_err() {
        ToolsError::DuplicateModule(id) => assert_eq!(id, "main"),
        other => panic!("expected DuplicateModule, got {other:?}"),
    }
}

#[test]
fn test_open_menu_starts_each_participant_in_a_fresh_context() {
    let teleports = Arc::default();
    let tools = common::build_tools(&teleports);

    let teacher = tools.open_menu(PlayerId::new("teacher")).unwrap();
    let assistant = tools.open_menu(PlayerId::new("assistant")).unwrap();

    assert_ne!(teacher.session_id(), assistant.session_id());
    assert_eq!(teacher.history(), ["main"]);
    assert_eq!(assistant.source_player(), &PlayerId::new("assistant"));
    assert!(assistant.has_pending_dialog());
}
