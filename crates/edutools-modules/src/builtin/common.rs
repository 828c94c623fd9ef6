//! Fallback scenes shared by feature flows.

use edutools_scenes::{ActionForm, SceneManager};

use crate::module::Module;

/// Scene shown when a team picker has nothing to offer.
pub const NO_TEAMS_SCENE: &str = "no_teams";

/// Scene shown when a flow needs more participants than are available.
pub const NOT_ENOUGH_PLAYERS_SCENE: &str = "not_enough_players";

const BACK_LABEL: &str = "edu_tools.ui.buttons.back";
const BACK_ICON: &str = "textures/edu_tools/ui/icons/_general/back";

/// Registers the `no_teams` and `not_enough_players` scenes.
#[derive(Debug, Default)]
pub struct CommonScenesModule;

impl CommonScenesModule {
    /// Module id.
    pub const ID: &'static str = "scenes";
}

impl Module for CommonScenesModule {
    fn id(&self) -> &str {
        Self::ID
    }

    fn register_scenes(&self, scenes: &mut SceneManager) {
        for (name, icon) in [
            (NO_TEAMS_SCENE, Some(BACK_ICON)),
            (NOT_ENOUGH_PLAYERS_SCENE, None),
        ] {
            scenes.register_scene(name, move |_, ctx, _| {
                let mut form = ActionForm::new(name);
                form.set_body(format!("edu_tools.ui.{name}.body"));
                form.add_button(BACK_LABEL, icon, |manager, ctx| {
                    manager.go_back(ctx, 1).map(|_| ())
                });
                form.show(ctx);
                Ok(())
            });
        }
    }
}
