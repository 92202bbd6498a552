//! Game state and run lifecycle
//!
//! [`GameState`] is the explicit simulation context: registry, pools, broad
//! phase, clocks, RNG, and phase machine. Every system takes it by `&mut`;
//! there are no globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::components::{
    ActiveWeapons, AiBehavior, AiState, AreaEffect, Collider, ContactClock, EnemyKind, Experience,
    Health, Lifespan, Pickup, PlayerInputState, PlayerStats, Position, Projectile, Sprite,
    Velocity, WeaponSlot,
};
use super::grid::SpatialGrid;
use crate::config::SimConfig;
use crate::consts;
use crate::ecs::{Entity, EntityPool, Registry};
use crate::tuning::{self, images, ENEMIES, UPGRADES};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Frozen while the player picks a level-up reward
    PausedForUpgrade,
    /// Frozen by an explicit pause request
    PausedMenu,
    /// Run over; terminal until the host builds a fresh state
    Ended,
}

/// Things that happened during the last tick, drained by observers.
/// The queue is cleared at the start of the next tick, so each event is
/// visible exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    /// Contact damage landed on the player
    PlayerHurt { amount: f32 },
    /// An enemy died; `at` is where its experience pickup dropped
    EnemySlain { kind: usize, at: Vec2, score: u32 },
    /// The player walked over an experience pickup
    PickupCollected { xp: u32 },
    /// A weapon slot triggered
    WeaponFired { weapon: usize },
    /// A level was gained (one upgrade choice queued per event)
    LeveledUp { level: u32 },
    /// An upgrade choice was confirmed and applied
    UpgradeApplied { id: &'static str },
    /// Terminal: the run is over
    RunEnded { score: u64 },
}

/// One-line status readout for HUD observers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Hud {
    pub score: u64,
    pub health: f32,
    pub max_health: f32,
    pub level: u32,
    pub xp: u32,
    pub xp_next: u32,
}

/// One pool per spawnable archetype. `enemies` is index-aligned with
/// [`tuning::ENEMIES`].
pub(crate) struct Pools {
    pub(crate) enemies: Vec<EntityPool>,
    pub(crate) projectiles: EntityPool,
    pub(crate) pickups: EntityPool,
    pub(crate) areas: EntityPool,
}

fn enemy_pool(kind: usize, player: Entity) -> EntityPool {
    let spec = &ENEMIES[kind];
    EntityPool::new(
        spec.name,
        move |reg| {
            let spec = &ENEMIES[kind];
            let id = reg.create();
            reg.add(id, Position(Vec2::ZERO));
            reg.add(id, Velocity::default());
            reg.add(id, Health::full(spec.health));
            reg.add(
                id,
                Sprite {
                    image: spec.image,
                    size: spec.sprite_size,
                    visible: true,
                },
            );
            reg.add(id, Collider { radius: spec.radius });
            reg.add(
                id,
                AiState {
                    target: player,
                    behavior: AiBehavior::Chase,
                },
            );
            reg.add(id, EnemyKind(kind));
            id
        },
        move |reg, id| {
            let spec = &ENEMIES[kind];
            if let Some(health) = reg.get_mut::<Health>(id) {
                *health = Health::full(spec.health);
            }
            if let Some(pos) = reg.get_mut::<Position>(id) {
                pos.0 = Vec2::ZERO;
            }
            if let Some(ai) = reg.get_mut::<AiState>(id) {
                ai.target = player;
            }
            if let Some(sprite) = reg.get_mut::<Sprite>(id) {
                sprite.visible = true;
            }
            reg.add(id, Velocity::default());
            reg.add(id, Collider { radius: spec.radius });
        },
    )
}

fn projectile_pool() -> EntityPool {
    EntityPool::new(
        "projectile",
        |reg| {
            let id = reg.create();
            reg.add(id, Position(Vec2::ZERO));
            reg.add(id, Projectile { damage: 0.0 });
            reg.add(
                id,
                Sprite {
                    image: images::PROJECTILE,
                    size: consts::PROJECTILE_RADIUS * 2.0,
                    visible: true,
                },
            );
            id
        },
        |reg, id| {
            if let Some(sprite) = reg.get_mut::<Sprite>(id) {
                sprite.visible = true;
            }
            reg.add(id, Velocity::default());
            reg.add(
                id,
                Collider {
                    radius: consts::PROJECTILE_RADIUS,
                },
            );
            reg.add(id, Lifespan { remaining: 2.0 });
        },
    )
}

fn pickup_pool() -> EntityPool {
    EntityPool::new(
        "pickup",
        |reg| {
            let id = reg.create();
            reg.add(id, Position(Vec2::ZERO));
            reg.add(id, Pickup { xp: 0 });
            reg.add(
                id,
                Sprite {
                    image: images::PICKUP,
                    size: consts::PICKUP_RADIUS * 2.0,
                    visible: true,
                },
            );
            id
        },
        |reg, id| {
            if let Some(sprite) = reg.get_mut::<Sprite>(id) {
                sprite.visible = true;
            }
            reg.add(
                id,
                Collider {
                    radius: consts::PICKUP_RADIUS,
                },
            );
        },
    )
}

fn area_pool() -> EntityPool {
    EntityPool::new(
        "area",
        |reg| {
            let id = reg.create();
            reg.add(id, Position(Vec2::ZERO));
            reg.add(id, AreaEffect::new(0.0));
            reg.add(
                id,
                Sprite {
                    image: images::AREA_BURST,
                    size: 0.0,
                    visible: true,
                },
            );
            id
        },
        |reg, id| {
            if let Some(area) = reg.get_mut::<AreaEffect>(id) {
                area.already_hit.clear();
            }
            if let Some(sprite) = reg.get_mut::<Sprite>(id) {
                sprite.visible = true;
            }
            reg.add(id, Collider { radius: 1.0 });
            reg.add(id, Lifespan { remaining: 0.1 });
        },
    )
}

fn spawn_player(reg: &mut Registry, config: &SimConfig) -> Entity {
    let id = reg.create();
    reg.add(id, Position(config.world_center()));
    reg.add(id, Velocity::default());
    reg.add(id, Health::full(consts::PLAYER_MAX_HEALTH));
    reg.add(
        id,
        Sprite {
            image: images::PLAYER,
            size: consts::PLAYER_SPRITE_SIZE,
            visible: true,
        },
    );
    reg.add(
        id,
        Collider {
            radius: consts::PLAYER_RADIUS,
        },
    );
    reg.add(id, PlayerInputState::default());
    reg.add(id, Experience::default());
    reg.add(id, PlayerStats::default());
    reg.add(
        id,
        ActiveWeapons {
            slots: vec![
                WeaponSlot::new(tuning::WAND, 1),
                WeaponSlot::new(tuning::AURA, 1),
            ],
        },
    );
    reg.add(id, ContactClock::default());
    id
}

/// Complete simulation state for one run. A new run is a new instance;
/// nothing survives from the previous one.
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Parameters fixed at construction (world bounds track resizes)
    pub config: SimConfig,
    /// Entities and their components
    pub registry: Registry,
    /// Broad-phase accelerator, rebuilt by the collision pass each tick
    pub grid: SpatialGrid,
    /// Current phase
    pub phase: GamePhase,
    /// Score accumulated from slain enemies
    pub score: u64,
    /// Seconds of `Running` time (paused ticks don't count)
    pub run_time: f32,
    /// Completed `Running` ticks
    pub ticks: u64,
    /// Events from the tick in progress / just finished
    pub events: Vec<GameEvent>,
    /// Simulation RNG; every random decision draws from here
    pub rng: Pcg32,
    /// The player avatar
    pub player: Entity,
    pub(crate) pools: Pools,
    pub(crate) spawn_timer: f32,
    /// Level-ups awaiting an upgrade choice
    pending_upgrades: u32,
    /// Catalog indices currently offered, meaningful in `PausedForUpgrade`
    upgrade_offer: Vec<usize>,
}

impl GameState {
    /// Build a fresh run: player at world center with the starting
    /// loadout, empty pools, phase `Running`.
    pub fn new(config: SimConfig, seed: u64) -> Self {
        let mut registry = Registry::new();
        let player = spawn_player(&mut registry, &config);
        let pools = Pools {
            enemies: (0..ENEMIES.len()).map(|k| enemy_pool(k, player)).collect(),
            projectiles: projectile_pool(),
            pickups: pickup_pool(),
            areas: area_pool(),
        };
        log::info!(
            "new run: seed {}, world {}x{}",
            seed,
            config.world_width,
            config.world_height
        );
        Self {
            seed,
            grid: SpatialGrid::new(config.cell_size),
            config,
            registry,
            phase: GamePhase::Running,
            score: 0,
            run_time: 0.0,
            ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            player,
            pools,
            spawn_timer: 0.0,
            pending_upgrades: 0,
            upgrade_offer: Vec::new(),
        }
    }

    /// Activate an enemy of `kind` at `pos`. Unknown kinds are logged and
    /// dropped.
    pub fn spawn_enemy(&mut self, kind: usize, pos: Vec2) -> Option<Entity> {
        let Some(pool) = self.pools.enemies.get_mut(kind) else {
            log::warn!("unknown enemy kind {}, not spawning", kind);
            return None;
        };
        let id = pool.acquire(&mut self.registry);
        if let Some(p) = self.registry.get_mut::<Position>(id) {
            p.0 = pos;
        }
        Some(id)
    }

    /// Park an enemy back in its pool: collision body and motion are
    /// stripped, the sprite hidden. An enemy whose kind went missing
    /// can't be routed to a pool and is destroyed outright.
    pub fn release_enemy(&mut self, id: Entity) {
        let Some(&EnemyKind(kind)) = self.registry.get::<EnemyKind>(id) else {
            log::warn!("releasing enemy {} with no kind, destroying instead", id);
            self.registry.destroy(id);
            return;
        };
        self.registry.remove::<Collider>(id);
        self.registry.remove::<Velocity>(id);
        if let Some(sprite) = self.registry.get_mut::<Sprite>(id) {
            sprite.visible = false;
        }
        if let Some(pool) = self.pools.enemies.get_mut(kind) {
            pool.release(id);
        }
    }

    pub fn spawn_projectile(&mut self, pos: Vec2, vel: Vec2, damage: f32, lifetime: f32) -> Entity {
        let id = self.pools.projectiles.acquire(&mut self.registry);
        if let Some(p) = self.registry.get_mut::<Position>(id) {
            p.0 = pos;
        }
        if let Some(v) = self.registry.get_mut::<Velocity>(id) {
            v.0 = vel;
        }
        if let Some(shot) = self.registry.get_mut::<Projectile>(id) {
            shot.damage = damage;
        }
        if let Some(life) = self.registry.get_mut::<Lifespan>(id) {
            life.remaining = lifetime;
        }
        id
    }

    pub fn release_projectile(&mut self, id: Entity) {
        self.registry.remove::<Collider>(id);
        self.registry.remove::<Velocity>(id);
        self.registry.remove::<Lifespan>(id);
        if let Some(sprite) = self.registry.get_mut::<Sprite>(id) {
            sprite.visible = false;
        }
        self.pools.projectiles.release(id);
    }

    pub fn spawn_pickup(&mut self, pos: Vec2, xp: u32) -> Entity {
        let id = self.pools.pickups.acquire(&mut self.registry);
        if let Some(p) = self.registry.get_mut::<Position>(id) {
            p.0 = pos;
        }
        if let Some(pickup) = self.registry.get_mut::<Pickup>(id) {
            pickup.xp = xp;
        }
        id
    }

    pub fn release_pickup(&mut self, id: Entity) {
        self.registry.remove::<Collider>(id);
        if let Some(sprite) = self.registry.get_mut::<Sprite>(id) {
            sprite.visible = false;
        }
        self.pools.pickups.release(id);
    }

    pub fn spawn_area(&mut self, pos: Vec2, damage: f32, radius: f32, duration: f32) -> Entity {
        let id = self.pools.areas.acquire(&mut self.registry);
        if let Some(p) = self.registry.get_mut::<Position>(id) {
            p.0 = pos;
        }
        if let Some(area) = self.registry.get_mut::<AreaEffect>(id) {
            area.damage = damage;
        }
        if let Some(collider) = self.registry.get_mut::<Collider>(id) {
            collider.radius = radius;
        }
        if let Some(life) = self.registry.get_mut::<Lifespan>(id) {
            life.remaining = duration;
        }
        if let Some(sprite) = self.registry.get_mut::<Sprite>(id) {
            sprite.size = radius * 2.0;
        }
        id
    }

    pub fn release_area(&mut self, id: Entity) {
        self.registry.remove::<Collider>(id);
        self.registry.remove::<Lifespan>(id);
        if let Some(sprite) = self.registry.get_mut::<Sprite>(id) {
            sprite.visible = false;
        }
        self.pools.areas.release(id);
    }

    /// Feed experience to the player. Each threshold crossed gains a
    /// level (remainder carries over, threshold grows 1.5x floored) and
    /// queues one upgrade choice; the first queued choice freezes the
    /// simulation.
    pub fn grant_xp(&mut self, amount: u32) {
        let Some(exp) = self.registry.get_mut::<Experience>(self.player) else {
            return;
        };
        exp.current += amount;
        let mut gained = Vec::new();
        while exp.current >= exp.next_level {
            exp.current -= exp.next_level;
            exp.level += 1;
            exp.next_level = (exp.next_level as f32 * consts::XP_CURVE_GROWTH).floor() as u32;
            gained.push(exp.level);
        }
        for level in gained {
            log::info!("level up -> {}", level);
            self.events.push(GameEvent::LeveledUp { level });
            self.pending_upgrades += 1;
        }
        if self.pending_upgrades > 0 && self.phase == GamePhase::Running {
            self.phase = GamePhase::PausedForUpgrade;
            self.roll_offer();
        }
    }

    /// Draw a fresh set of distinct upgrade choices.
    fn roll_offer(&mut self) {
        let count = consts::UPGRADE_CHOICES.min(UPGRADES.len());
        self.upgrade_offer = rand::seq::index::sample(&mut self.rng, UPGRADES.len(), count)
            .into_iter()
            .collect();
    }

    /// Catalog indices currently on offer. Empty outside
    /// `PausedForUpgrade`.
    pub fn upgrade_offer(&self) -> &[usize] {
        &self.upgrade_offer
    }

    /// Confirm one choice by catalog id. Applies the upgrade exactly
    /// once, then either rolls the next offer (more level-ups queued) or
    /// resumes the run. Ids outside the current offer are refused.
    pub fn choose_upgrade(&mut self, id: &str) {
        if self.phase != GamePhase::PausedForUpgrade {
            log::warn!("upgrade choice '{}' ignored outside the upgrade pause", id);
            return;
        }
        let Some(&pick) = self
            .upgrade_offer
            .iter()
            .find(|&&idx| UPGRADES[idx].id == id)
        else {
            log::warn!("upgrade choice '{}' is not in the current offer", id);
            return;
        };
        let spec = &UPGRADES[pick];
        (spec.apply)(&mut self.registry, self.player);
        log::info!("upgrade applied: {}", spec.name);
        self.events.push(GameEvent::UpgradeApplied { id: spec.id });
        self.pending_upgrades = self.pending_upgrades.saturating_sub(1);
        if self.pending_upgrades > 0 {
            self.roll_offer();
        } else {
            self.upgrade_offer.clear();
            self.phase = GamePhase::Running;
        }
    }

    /// Freeze for the menu. Idempotent; does nothing during the upgrade
    /// pause or after the run ends.
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::PausedMenu;
            log::info!("paused");
        }
    }

    /// Undo a menu pause. Idempotent.
    pub fn resume(&mut self) {
        if self.phase == GamePhase::PausedMenu {
            self.phase = GamePhase::Running;
            log::info!("resumed");
        }
    }

    /// Flip between `Running` and `PausedMenu`; ignored in any other
    /// phase.
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Running => self.pause(),
            GamePhase::PausedMenu => self.resume(),
            GamePhase::PausedForUpgrade | GamePhase::Ended => {}
        }
    }

    /// Terminal transition. The tick in progress still completes; later
    /// ticks are no-ops. Fires `RunEnded` exactly once.
    pub(crate) fn end_run(&mut self) {
        if self.phase == GamePhase::Ended {
            return;
        }
        self.phase = GamePhase::Ended;
        self.events.push(GameEvent::RunEnded { score: self.score });
        log::info!("run ended: score {}", self.score);
    }

    /// Status readout for HUD observers. Zeros once the run is torn down.
    pub fn hud(&self) -> Hud {
        let (health, max_health) = self
            .registry
            .get::<Health>(self.player)
            .map_or((0.0, 0.0), |h| (h.current.max(0.0), h.max));
        let (level, xp, xp_next) = self
            .registry
            .get::<Experience>(self.player)
            .map_or((0, 0, 0), |e| (e.level, e.current, e.next_level));
        Hud {
            score: self.score,
            health,
            max_health,
            level,
            xp,
            xp_next,
        }
    }

    /// Track a host resize. Affects the movement clamp only; the sparse
    /// grid has no geometry to rebuild.
    pub fn set_world_bounds(&mut self, width: f32, height: f32) {
        self.config.world_width = width;
        self.config.world_height = height;
        log::debug!("world bounds now {}x{}", width, height);
    }

    /// Abandon the run between ticks: every entity destroyed, every pool
    /// emptied, id counter reset. Terminal like `end_run`, but nothing is
    /// left to observe.
    pub fn teardown(&mut self) {
        self.registry.clear();
        for pool in &mut self.pools.enemies {
            pool.clear();
        }
        self.pools.projectiles.clear();
        self.pools.pickups.clear();
        self.pools.areas.clear();
        self.events.clear();
        self.upgrade_offer.clear();
        self.pending_upgrades = 0;
        self.phase = GamePhase::Ended;
        log::info!("simulation torn down");
    }
}
