//! Educator Tools Modules: feature composition.
//!
//! Feature modules are registered into a [`ModuleRegistry`], initialized once
//! every module is known, then asked to contribute their scenes to a shared
//! [`SceneManager`](edutools_scenes::SceneManager). [`bootstrap`] runs these
//! steps in order and returns the handle sessions are started from.

pub mod app;
pub mod builtin;
pub mod module;
pub mod registry;

pub use app::{EducatorTools, bootstrap};
pub use module::{MenuEntry, MenuHandler, Module};
pub use registry::ModuleRegistry;
