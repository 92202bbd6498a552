//! Data-driven game balance
//!
//! Everything an arena is populated with - enemy kinds, weapon behavior per
//! level, the upgrade catalog - lives in these tables. Gameplay code refers
//! to rows by index and never hardcodes the numbers.

use glam::Vec2;

use crate::ecs::{Entity, Registry};
use crate::sim::components::{Health, PlayerStats};

/// Stable image ids handed to the render collaborator through `Sprite`.
/// The simulation never interprets them.
pub mod images {
    pub const PLAYER: u32 = 0;
    pub const PROJECTILE: u32 = 1;
    pub const PICKUP: u32 = 2;
    pub const AREA_BURST: u32 = 3;
    pub const BAT: u32 = 16;
    pub const GOBLIN: u32 = 17;
}

/// One enemy kind: combat numbers plus the rewards for killing it.
#[derive(Debug, Clone, Copy)]
pub struct EnemySpec {
    pub name: &'static str,
    pub health: f32,
    /// Chase speed, pixels per second
    pub speed: f32,
    pub radius: f32,
    /// Experience carried by the pickup dropped on death
    pub xp: u32,
    /// Score awarded on death
    pub score: u32,
    pub sprite_size: f32,
    pub image: u32,
}

/// Indexed by the `EnemyKind` component.
pub static ENEMIES: &[EnemySpec] = &[
    EnemySpec {
        name: "bat",
        health: 50.0,
        speed: 100.0,
        radius: 12.0,
        xp: 10,
        score: 50,
        sprite_size: 24.0,
        image: images::BAT,
    },
    EnemySpec {
        name: "goblin",
        health: 100.0,
        speed: 75.0,
        radius: 14.0,
        xp: 25,
        score: 100,
        sprite_size: 28.0,
        image: images::GOBLIN,
    },
];

/// What a weapon does when it triggers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeaponEffect {
    /// Aimed shot toward the nearest enemy
    Projectile {
        damage: f32,
        speed: f32,
        lifetime: f32,
    },
    /// Damage burst centered on the wielder
    Area {
        damage: f32,
        radius: f32,
        duration: f32,
    },
}

/// Numbers for one weapon at one level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponLevel {
    /// Triggers per second before attack-speed modifiers
    pub fire_rate: f32,
    /// Hold fire unless an enemy is within this distance (scaled by the
    /// wielder's area modifier)
    pub range: f32,
    pub effect: WeaponEffect,
}

/// One weapon kind with its per-level table. Level N reads `levels[N-1]`;
/// a slot whose level has no row is skipped with a warning.
#[derive(Debug, Clone, Copy)]
pub struct WeaponSpec {
    pub name: &'static str,
    pub levels: &'static [WeaponLevel],
}

pub const WAND: usize = 0;
pub const AURA: usize = 1;

pub static WEAPONS: &[WeaponSpec] = &[
    WeaponSpec {
        name: "wand",
        levels: &[WeaponLevel {
            fire_rate: 2.0,
            range: 300.0,
            effect: WeaponEffect::Projectile {
                damage: 25.0,
                speed: 400.0,
                lifetime: 2.0,
            },
        }],
    },
    WeaponSpec {
        name: "aura",
        levels: &[WeaponLevel {
            fire_rate: 2.0,
            range: 75.0,
            effect: WeaponEffect::Area {
                damage: 10.0,
                radius: 75.0,
                duration: 0.2,
            },
        }],
    },
];

/// Numbers for the level at 1-based `level`, if the table goes that high.
pub fn weapon_level(weapon: usize, level: u32) -> Option<&'static WeaponLevel> {
    let idx = level.checked_sub(1)? as usize;
    WEAPONS.get(weapon)?.levels.get(idx)
}

/// One pick on the level-up screen. `apply` runs against the player once,
/// when the choice is confirmed.
#[derive(Clone, Copy)]
pub struct UpgradeSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub blurb: &'static str,
    pub apply: fn(&mut Registry, Entity),
}

pub static UPGRADES: &[UpgradeSpec] = &[
    UpgradeSpec {
        id: "move_speed_1",
        name: "Running Shoes",
        blurb: "+10% movement speed",
        apply: |reg, player| {
            if let Some(stats) = reg.get_mut::<PlayerStats>(player) {
                stats.move_speed *= 1.10;
            }
        },
    },
    UpgradeSpec {
        id: "max_health_1",
        name: "Armor Vest",
        blurb: "+20% max health, fully healed",
        apply: |reg, player| {
            if let Some(health) = reg.get_mut::<Health>(player) {
                health.max = (health.max * 1.20).floor();
                health.current = health.max;
            }
        },
    },
    UpgradeSpec {
        id: "damage_1",
        name: "Power Crystal",
        blurb: "+10% damage",
        apply: |reg, player| {
            if let Some(stats) = reg.get_mut::<PlayerStats>(player) {
                stats.damage_mul *= 1.10;
            }
        },
    },
    UpgradeSpec {
        id: "attack_speed_1",
        name: "Focus Gem",
        blurb: "+10% attack speed",
        apply: |reg, player| {
            if let Some(stats) = reg.get_mut::<PlayerStats>(player) {
                stats.attack_speed_mul *= 1.10;
            }
        },
    },
    UpgradeSpec {
        id: "area_1",
        name: "Scope",
        blurb: "+15% area and range",
        apply: |reg, player| {
            if let Some(stats) = reg.get_mut::<PlayerStats>(player) {
                stats.area_mul *= 1.15;
            }
        },
    },
];

/// Catalog row for a stable upgrade id.
pub fn upgrade_by_id(id: &str) -> Option<&'static UpgradeSpec> {
    UPGRADES.iter().find(|u| u.id == id)
}

/// Spawn points sit this much outside the world on a random edge; the
/// helper keeps edge selection in one place for the spawner and its tests.
pub fn edge_spawn_point(edge: u32, along: f32, world: Vec2, margin: f32) -> Vec2 {
    match edge % 4 {
        0 => Vec2::new(along * world.x, -margin),
        1 => Vec2::new(world.x + margin, along * world.y),
        2 => Vec2::new(along * world.x, world.y + margin),
        _ => Vec2::new(-margin, along * world.y),
    }
}
