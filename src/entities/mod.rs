//! Entity type definitions
//!
//! The catalogue covers five kinds:
//!
//! **Crafted gear** (records declare their crafting sources in `base`):
//! - [`Weapon`] - weapons, sorted by level then rank
//! - [`Ring`] - rings, sorted by level then rank
//! - [`Equipment`] - armor pieces, sorted by level then rank
//!
//! **Quests and goods:**
//! - [`Task`] - quests with time windows, projected from [`task::RawTask`]
//! - [`Item`] - consumables and materials, kept in catalogue order

pub mod equipment;
pub mod item;
pub mod ring;
pub mod task;
pub mod weapon;

pub use equipment::{Equipment, EquipmentFilter};
pub use item::{Item, ItemFilter};
pub use ring::{Ring, RingFilter};
pub use task::{Task, TaskFilter, TimeSlot};
pub use weapon::{Weapon, WeaponFilter};
