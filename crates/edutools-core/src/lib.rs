//! Educator Tools Core: shared abstractions.
//!
//! This crate defines the types every other crate depends on: the error
//! type, participant identity, teams and the property storage seam. It
//! contains no navigation or presentation code.

pub mod error;
pub mod player;
pub mod storage;
pub mod team;
