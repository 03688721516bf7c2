//! CLI command implementations

pub mod utils;

pub mod chain;
pub mod check;
pub mod completions;
pub mod equip;
pub mod item;
pub mod ring;
pub mod task;
pub mod weapon;
