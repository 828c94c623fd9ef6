//! Educator Tools console host.
//!
//! Wires the framework modules and the demo features into a registry, seeds
//! teams from configuration and presents dialogs on the terminal.

pub mod config;
pub mod console;
pub mod demo;
pub mod error;
pub mod setup;
