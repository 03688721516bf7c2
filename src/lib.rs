//! Armory: a command-line reader for the game reference catalogue
//!
//! Loads the weapon, ring, equipment, task and item catalogues exported as
//! JSON, resolves crafting lineages, and lists records through a shared
//! filter and sort pipeline.

pub mod cli;
pub mod core;
pub mod entities;
pub mod json;
