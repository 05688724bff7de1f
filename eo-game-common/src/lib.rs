#![allow(clippy::too_many_arguments)]

pub mod damage;
pub mod direction;
pub mod messages;
pub mod number;

pub use damage::{DamageEntry, DamageList};
pub use direction::Direction;
