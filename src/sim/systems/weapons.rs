//! Automatic weapon fire
//!
//! Every equipped slot accumulates cooldown each running tick and pulls
//! its trigger once `(1 / fire_rate) / attack_speed` has built up - but
//! only with a live target inside range. With nothing in range the
//! accumulator keeps building, so the shot comes out the instant a
//! target appears.

use glam::Vec2;

use crate::ecs::Entity;
use crate::sim::components::{ActiveWeapons, AiState, Collider, PlayerStats, Position};
use crate::sim::state::{GameEvent, GameState};
use crate::tuning::{self, WeaponEffect};

/// Nearest live, collidable enemy to `from`, with its squared distance.
/// Dormant pooled enemies have no collider and are never targets. Ties
/// go to the lowest entity id.
fn nearest_enemy(game: &GameState, from: Vec2) -> Option<(Entity, f32)> {
    let mut best: Option<(Entity, f32)> = None;
    for id in game.registry.query::<(AiState, Position, Collider)>() {
        let Some(&Position(pos)) = game.registry.get::<Position>(id) else {
            continue;
        };
        let d2 = from.distance_squared(pos);
        if best.is_none_or(|(_, b)| d2 < b) {
            best = Some((id, d2));
        }
    }
    best
}

/// One pass over every armed entity's weapon slots.
pub fn fire_weapons(game: &mut GameState, dt: f32) {
    for shooter in game.registry.query::<(ActiveWeapons, Position, PlayerStats)>() {
        let Some(&Position(origin)) = game.registry.get::<Position>(shooter) else {
            continue;
        };
        let Some(&stats) = game.registry.get::<PlayerStats>(shooter) else {
            continue;
        };
        let slot_count = game
            .registry
            .get::<ActiveWeapons>(shooter)
            .map_or(0, |w| w.slots.len());

        for i in 0..slot_count {
            let Some(slot) = game
                .registry
                .get_mut::<ActiveWeapons>(shooter)
                .and_then(|w| w.slots.get_mut(i))
            else {
                continue;
            };
            slot.cooldown += dt;
            let slot = *slot;

            let Some(spec) = tuning::weapon_level(slot.weapon, slot.level) else {
                log::warn!(
                    "weapon {} has no level {} data, slot skipped",
                    slot.weapon,
                    slot.level
                );
                continue;
            };
            let interval = (1.0 / spec.fire_rate) / stats.attack_speed_mul;
            if slot.cooldown < interval {
                continue;
            }
            let reach = spec.range * stats.area_mul;
            let Some((target, d2)) = nearest_enemy(game, origin) else {
                continue;
            };
            if d2 > reach * reach {
                continue;
            }

            // trigger pulled: the accumulator is spent even if the shot
            // turns out to have nowhere to go
            if let Some(slot) = game
                .registry
                .get_mut::<ActiveWeapons>(shooter)
                .and_then(|w| w.slots.get_mut(i))
            {
                slot.cooldown = 0.0;
            }
            match spec.effect {
                WeaponEffect::Projectile {
                    damage,
                    speed,
                    lifetime,
                } => {
                    let Some(&Position(target_pos)) = game.registry.get::<Position>(target)
                    else {
                        continue;
                    };
                    let dir = (target_pos - origin).normalize_or_zero();
                    if dir == Vec2::ZERO {
                        continue;
                    }
                    game.spawn_projectile(
                        origin,
                        dir * speed,
                        damage * stats.damage_mul,
                        lifetime,
                    );
                }
                WeaponEffect::Area {
                    damage,
                    radius,
                    duration,
                } => {
                    game.spawn_area(
                        origin,
                        damage * stats.damage_mul,
                        radius * stats.area_mul,
                        duration,
                    );
                }
            }
            game.events.push(GameEvent::WeaponFired {
                weapon: slot.weapon,
            });
        }
    }
}
