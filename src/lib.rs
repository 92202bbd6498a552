//! Nightswarm - a survivor-style horde arena simulation core
//!
//! Core modules:
//! - `ecs`: Entity registry, typed component tables, reset-on-acquire pools
//! - `sim`: Deterministic simulation (systems, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `config`: Runtime-tunable simulation parameters
//!
//! Rendering, input capture, menus, and score boards live outside this
//! crate. They talk to the simulation through [`TickInput`], the per-tick
//! event queue on [`GameState`], and read-only component lookups.

pub mod config;
pub mod ecs;
pub mod sim;
pub mod tuning;

pub use config::SimConfig;
pub use ecs::{Entity, EntityPool, Registry};
pub use sim::{GameEvent, GamePhase, GameState, Hud, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one render frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Default world dimensions (pixels)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Broad-phase cell side, roughly 2-4x a typical collider diameter
    pub const GRID_CELL_SIZE: f32 = 64.0;

    /// Player defaults
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    pub const PLAYER_RADIUS: f32 = 16.0;
    pub const PLAYER_MOVE_SPEED: f32 = 200.0;
    pub const PLAYER_SPRITE_SIZE: f32 = 32.0;

    /// Contact damage exchanged while the player overlaps an enemy
    pub const CONTACT_DAMAGE_TO_PLAYER: f32 = 10.0;
    pub const CONTACT_DAMAGE_TO_ENEMY: f32 = 50.0;

    /// Spawn pacing: the interval ramps from initial to minimum over the
    /// first SPAWN_RAMP_SECS of run time, then holds at the minimum
    pub const SPAWN_INITIAL_INTERVAL: f32 = 3.0;
    pub const SPAWN_MIN_INTERVAL: f32 = 0.5;
    pub const SPAWN_RAMP_SECS: f32 = 60.0;
    /// How far outside the world edge enemies appear
    pub const SPAWN_EDGE_MARGIN: f32 = 50.0;

    /// Experience curve: first threshold and per-level growth (floored)
    pub const XP_FIRST_THRESHOLD: u32 = 100;
    pub const XP_CURVE_GROWTH: f32 = 1.5;

    /// Upgrade choices offered per level gained
    pub const UPGRADE_CHOICES: usize = 3;

    /// Small-body collider radii
    pub const PROJECTILE_RADIUS: f32 = 4.0;
    pub const PICKUP_RADIUS: f32 = 5.0;
}
