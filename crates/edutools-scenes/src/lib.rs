//! Educator Tools Scenes: navigation, session context and dialogs.
//!
//! A scene is a named constructor registered in the [`SceneManager`]. Opening
//! a scene runs its constructor against the participant's [`SceneContext`],
//! which usually builds a dialog and leaves it pending for the session driver
//! in [`session`].

pub mod args;
pub mod context;
pub mod form;
pub mod manager;
pub mod session;

pub use args::{Continuation, SceneArg};
pub use context::{ContextData, FilterRole, SceneContext, TeamFilter};
pub use form::{ActionForm, Dialog, DialogOutcome, DropdownChoice, MessageForm, ModalForm};
pub use manager::{SceneFactory, SceneManager};
pub use session::{SessionEnd, run_session};
