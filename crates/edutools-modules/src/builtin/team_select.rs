//! Generic team picker.
//!
//! A flow that needs teams sets the required flags, optional filters and a
//! continuation on the context, then opens `team_select`. The picker collects
//! the subject team, then the target team, and finally resumes the stored
//! continuation through [`SceneManager::submit`].

use std::sync::{Arc, OnceLock};

use edutools_core::error::ToolsError;
use edutools_core::team::{Team, TeamProvider, is_player_team_id};
use edutools_scenes::context::keys;
use edutools_scenes::{ActionForm, ContextData, FilterRole, SceneContext, SceneManager};

use crate::builtin::common::NO_TEAMS_SCENE;
use crate::builtin::teams::TeamsModule;
use crate::module::Module;
use crate::registry::ModuleRegistry;

/// Name of the team picker scene.
pub const TEAM_SELECT_SCENE: &str = "team_select";

const SYSTEM_ICON_DIR: &str = "textures/edu_tools/ui/icons/teams/";
const GENERIC_ICON_DIR: &str = "textures/edu_tools/ui/icons/generic/";

/// Registers the `team_select` scene. Requires the `teams` module.
#[derive(Default)]
pub struct TeamSelectModule {
    teams: Arc<OnceLock<Arc<dyn TeamProvider>>>,
}

impl TeamSelectModule {
    /// Module id.
    pub const ID: &'static str = "team_select";

    /// Creates the module; its provider is resolved during initialization.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Module for TeamSelectModule {
    fn id(&self) -> &str {
        Self::ID
    }

    fn initialize(&self, registry: &ModuleRegistry) -> Result<(), ToolsError> {
        let teams = registry
            .get_as::<TeamsModule>(TeamsModule::ID)
            .ok_or_else(|| ToolsError::ModuleNotFound(TeamsModule::ID.to_owned()))?;
        if self.teams.set(teams.provider()).is_err() {
            tracing::warn!(module = Self::ID, "team provider already resolved");
        }
        Ok(())
    }

    fn register_scenes(&self, scenes: &mut SceneManager) {
        let teams = Arc::clone(&self.teams);
        scenes.register_scene(TEAM_SELECT_SCENE, move |manager, ctx, _| {
            let provider = teams.get().ok_or_else(|| {
                ToolsError::ModuleLifecycle("team_select opened before initialization".to_owned())
            })?;
            show_team_select(manager, ctx, provider.as_ref())
        });
    }
}

fn show_team_select(
    manager: &SceneManager,
    ctx: &mut SceneContext,
    teams: &dyn TeamProvider,
) -> Result<(), ToolsError> {
    let picking_target = !ctx.is_subject_team_required() && ctx.is_target_team_required();
    let filter = if ctx.is_subject_team_required() {
        ctx.team_filter(FilterRole::Subject)
    } else if picking_target {
        ctx.team_filter(FilterRole::Target)
    } else {
        None
    }
    .or_else(|| ctx.team_filter(FilterRole::Any));

    let mut form = ActionForm::new(TEAM_SELECT_SCENE);
    form.set_body(body_key(ctx));

    for team in teams.all_teams() {
        if filter.as_ref().is_some_and(|keep| !keep(&team, teams)) {
            continue;
        }
        if picking_target && !team.is_single_member() {
            continue;
        }
        let label = button_label(&team);
        let icon = icon_path(&team);
        form.add_button(label, icon.as_deref(), move |manager, ctx| {
            select_team(manager, ctx, team)
        });
    }

    if !ctx.is_subject_team_required() && !ctx.is_target_team_required() {
        ctx.remove_data(keys::TEAM_FILTER);
    }

    if form.button_count() == 0 {
        tracing::debug!(session_id = %ctx.session_id(), "no selectable teams");
        manager.open(ctx, NO_TEAMS_SCENE, false, Vec::new())?;
        return Ok(());
    }
    form.show(ctx);
    Ok(())
}

/// The body text; `body_key` in the context data names a flow-specific
/// variant.
fn body_key(ctx: &SceneContext) -> String {
    let custom = ctx.data(keys::BODY_KEY).and_then(ContextData::as_str);
    let step = if ctx.is_subject_team_required() {
        "get_subject"
    } else if ctx.is_target_team_required() {
        "get_target"
    } else {
        tracing::warn!(
            session_id = %ctx.session_id(),
            "team_select opened without a required team"
        );
        return "edu_tools.ui.team_select.default.body".to_owned();
    };
    match custom {
        Some(flow) => format!("edu_tools.ui.{flow}.team_select.{step}.body"),
        None => format!("edu_tools.ui.team_select.{step}.body"),
    }
}

/// Generated teams other than single-participant ones carry a translated
/// name.
fn button_label(team: &Team) -> String {
    if team.is_system && !is_player_team_id(&team.id) {
        format!("edu_tools.ui.team.name.{}", team.id)
    } else {
        team.name.clone()
    }
}

fn icon_path(team: &Team) -> Option<String> {
    if team.is_system {
        let icon = team.icon.as_deref().unwrap_or(team.id.as_str());
        Some(format!("{SYSTEM_ICON_DIR}{icon}"))
    } else {
        team.icon
            .as_ref()
            .map(|icon| format!("{GENERIC_ICON_DIR}{icon}"))
    }
}

fn select_team(
    manager: &SceneManager,
    ctx: &mut SceneContext,
    team: Team,
) -> Result<(), ToolsError> {
    if ctx.is_subject_team_required() {
        tracing::debug!(session_id = %ctx.session_id(), team = %team.id, "subject team selected");
        ctx.set_subject_team(Some(team));
        ctx.set_subject_team_required(false);
        if ctx.is_target_team_required() {
            manager.open(ctx, TEAM_SELECT_SCENE, false, Vec::new())?;
            return Ok(());
        }
    } else if ctx.is_target_team_required() {
        tracing::debug!(session_id = %ctx.session_id(), team = %team.id, "target team selected");
        ctx.set_target_team(Some(team));
        ctx.set_target_team_required(false);
    }

    if ctx.next_scene().is_none() {
        return Err(ToolsError::MissingContext(
            "next scene after team selection".to_owned(),
        ));
    }
    manager.submit(ctx)?;
    Ok(())
}
