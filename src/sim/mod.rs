//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed-order systems, one pass per tick
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod components;
pub mod grid;
pub mod state;
pub mod systems;
pub mod tick;

pub use collision::circles_overlap;
pub use grid::SpatialGrid;
pub use state::{GameEvent, GamePhase, GameState, Hud};
pub use tick::{TickInput, tick};
