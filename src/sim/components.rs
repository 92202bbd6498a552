//! Component kinds attached to simulated entities
//!
//! Plain data, no behavior. An entity participates in a system purely by
//! holding that system's components; pooled entities shed their `Collider`
//! (and friends) while dormant, which is what takes them out of play.

use std::collections::HashSet;

use glam::Vec2;

use crate::consts;
use crate::ecs::Entity;

/// World-space center of the entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Pixels per second, applied by the integration pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity(pub Vec2);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// Circular collision body. Only entities holding one are visible to the
/// broad phase, so stripping it parks an entity out of play.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub radius: f32,
}

/// Opaque visual handle read by the render collaborator. `image` means
/// nothing to the simulation; `visible` is cleared while a pooled entity
/// is dormant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub image: u32,
    pub size: f32,
    pub visible: bool,
}

/// Marks the player avatar and carries the latest normalized move intent
/// (length at most 1) written by the input pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerInputState {
    pub move_dir: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiBehavior {
    #[default]
    Chase,
}

/// Steering brain: where to go and how.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiState {
    pub target: Entity,
    pub behavior: AiBehavior,
}

/// Index into [`tuning::ENEMIES`](crate::tuning::ENEMIES).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyKind(pub usize);

/// Single-hit shot; consumed on its first enemy contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub damage: f32,
}

/// Damage burst that hits each enemy at most once per activation.
#[derive(Debug, Clone)]
pub struct AreaEffect {
    pub damage: f32,
    pub already_hit: HashSet<Entity>,
}

impl AreaEffect {
    pub fn new(damage: f32) -> Self {
        Self {
            damage,
            already_hit: HashSet::new(),
        }
    }
}

/// Seconds left before the entity is reclaimed by its pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifespan {
    pub remaining: f32,
}

/// Experience pickup dropped where an enemy died.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pickup {
    pub xp: u32,
}

/// Level progress. `next_level` is the full cost of the upcoming level;
/// `current` counts up toward it and carries the remainder across.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Experience {
    pub current: u32,
    pub next_level: u32,
    pub level: u32,
}

impl Default for Experience {
    fn default() -> Self {
        Self {
            current: 0,
            next_level: consts::XP_FIRST_THRESHOLD,
            level: 1,
        }
    }
}

/// One equipped weapon: which kind, at what level, and how long since it
/// last triggered. The cooldown accumulates even with no target in range,
/// so a weapon held ready fires the moment one appears.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponSlot {
    pub weapon: usize,
    pub level: u32,
    pub cooldown: f32,
}

impl WeaponSlot {
    pub fn new(weapon: usize, level: u32) -> Self {
        Self {
            weapon,
            level,
            cooldown: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActiveWeapons {
    pub slots: Vec<WeaponSlot>,
}

/// Multiplicative stat modifiers accumulated from upgrades.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerStats {
    /// Pixels per second at full stick
    pub move_speed: f32,
    pub attack_speed_mul: f32,
    pub damage_mul: f32,
    pub area_mul: f32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            move_speed: consts::PLAYER_MOVE_SPEED,
            attack_speed_mul: 1.0,
            damage_mul: 1.0,
            area_mul: 1.0,
        }
    }
}

/// Gate for contact damage: the next exchange is allowed once the run
/// clock reaches `ready_at`. With a zero cooldown configured this never
/// blocks anything.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactClock {
    pub ready_at: f32,
}
