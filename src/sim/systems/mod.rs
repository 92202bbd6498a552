//! Behavior systems, one pass each per tick
//!
//! [`tick`](crate::sim::tick::tick) runs these in a fixed order: input,
//! AI, integration, collision (its own module), spawning, weapons,
//! lifespan. Systems find their entities by component shape, so joining
//! or leaving a system is just adding or stripping components.

pub mod ai;
pub mod input;
pub mod lifespan;
pub mod movement;
pub mod spawner;
pub mod weapons;

pub use ai::steer_enemies;
pub use input::apply_move_intent;
pub use lifespan::expire_lifespans;
pub use movement::integrate;
pub use spawner::{spawn_enemies, spawn_interval};
pub use weapons::fire_weapons;
