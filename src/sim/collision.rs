//! Collision detection and contact rules
//!
//! Two phases every tick. Broad: rebuild the spatial hash from every
//! collidable body and gather candidate pairs from shared cells. Narrow:
//! re-fetch both bodies, test the circles strictly, and run the one
//! contact rule the pair's components select. Components are re-read at
//! pair time because an earlier pair in the same pass may have released
//! either side; a missing component simply means "no collision".

use glam::Vec2;

use crate::consts;
use crate::ecs::{Entity, Registry};
use crate::sim::components::{
    AreaEffect, Collider, ContactClock, EnemyKind, Health, Pickup, PlayerInputState, Position,
    Projectile,
};
use crate::sim::state::{GameEvent, GameState};
use crate::tuning::ENEMIES;

/// Strict circle-circle overlap: circles that merely touch (distance
/// exactly the radius sum) do not collide.
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a_pos.distance_squared(b_pos) < reach * reach
}

fn body(reg: &Registry, id: Entity) -> Option<(Vec2, f32)> {
    let pos = reg.get::<Position>(id)?.0;
    let radius = reg.get::<Collider>(id)?.radius;
    Some((pos, radius))
}

/// A pair the narrow phase matched to a rule, orientation normalized.
/// The rules are mutually exclusive: no entity is simultaneously player
/// and enemy, or projectile and pickup.
enum Contact {
    PlayerEnemy { player: Entity, enemy: Entity },
    ProjectileEnemy { projectile: Entity, enemy: Entity },
    PlayerPickup { player: Entity, pickup: Entity },
    AreaEnemy { area: Entity, enemy: Entity },
}

fn classify(reg: &Registry, a: Entity, b: Entity) -> Option<Contact> {
    let player = |id| reg.has::<PlayerInputState>(id);
    let enemy = |id| reg.has::<EnemyKind>(id);
    let projectile = |id| reg.has::<Projectile>(id);
    let pickup = |id| reg.has::<Pickup>(id);
    let area = |id| reg.has::<AreaEffect>(id);

    if player(a) && enemy(b) {
        Some(Contact::PlayerEnemy {
            player: a,
            enemy: b,
        })
    } else if player(b) && enemy(a) {
        Some(Contact::PlayerEnemy {
            player: b,
            enemy: a,
        })
    } else if projectile(a) && enemy(b) {
        Some(Contact::ProjectileEnemy {
            projectile: a,
            enemy: b,
        })
    } else if projectile(b) && enemy(a) {
        Some(Contact::ProjectileEnemy {
            projectile: b,
            enemy: a,
        })
    } else if player(a) && pickup(b) {
        Some(Contact::PlayerPickup {
            player: a,
            pickup: b,
        })
    } else if player(b) && pickup(a) {
        Some(Contact::PlayerPickup {
            player: b,
            pickup: a,
        })
    } else if area(a) && enemy(b) {
        Some(Contact::AreaEnemy { area: a, enemy: b })
    } else if area(b) && enemy(a) {
        Some(Contact::AreaEnemy { area: b, enemy: a })
    } else {
        None
    }
}

/// The collision pass. Pairs are visited with the lower id as `a`, each
/// unordered pair at most once per tick; bodies spawned mid-pass (pickup
/// drops) are not in this tick's grid and wait for the next.
pub fn resolve_collisions(game: &mut GameState) {
    let bodies = game.registry.query::<(Position, Collider)>();
    game.grid.clear();
    for &id in &bodies {
        if let Some((pos, radius)) = body(&game.registry, id) {
            game.grid.insert(id, pos, radius);
        }
    }

    for &a in &bodies {
        let Some((pos_a, radius_a)) = body(&game.registry, a) else {
            continue;
        };
        let candidates = game.grid.query(pos_a, radius_a);
        for b in candidates {
            if b <= a {
                continue;
            }
            // re-fetch both sides: an earlier pair may have released
            // either one during this pass
            let Some((pos_a, radius_a)) = body(&game.registry, a) else {
                break;
            };
            let Some((pos_b, radius_b)) = body(&game.registry, b) else {
                continue;
            };
            if !circles_overlap(pos_a, radius_a, pos_b, radius_b) {
                continue;
            }
            if let Some(contact) = classify(&game.registry, a, b) {
                resolve_contact(game, contact);
            }
        }
    }
}

fn resolve_contact(game: &mut GameState, contact: Contact) {
    match contact {
        Contact::PlayerEnemy { player, enemy } => player_touches_enemy(game, player, enemy),
        Contact::ProjectileEnemy { projectile, enemy } => {
            projectile_hits_enemy(game, projectile, enemy)
        }
        Contact::PlayerPickup { player, pickup } => player_collects_pickup(game, player, pickup),
        Contact::AreaEnemy { area, enemy } => area_hits_enemy(game, area, enemy),
    }
}

/// Mutual contact damage, gated by the configured cooldown through the
/// player's `ContactClock`. With a zero cooldown every overlapping tick
/// exchanges damage.
fn player_touches_enemy(game: &mut GameState, player: Entity, enemy: Entity) {
    let cooldown = game.config.contact_damage_cooldown;
    let now = game.run_time;
    if let Some(clock) = game.registry.get_mut::<ContactClock>(player) {
        if now < clock.ready_at {
            return;
        }
        clock.ready_at = now + cooldown;
    }

    let player_dead = match game.registry.get_mut::<Health>(player) {
        Some(health) => {
            health.current -= consts::CONTACT_DAMAGE_TO_PLAYER;
            health.is_dead()
        }
        None => false,
    };
    game.events.push(GameEvent::PlayerHurt {
        amount: consts::CONTACT_DAMAGE_TO_PLAYER,
    });
    if player_dead {
        game.end_run();
    }
    // the run ending doesn't cut the exchange short; the tick finishes
    damage_enemy(game, enemy, consts::CONTACT_DAMAGE_TO_ENEMY);
}

/// Single-hit shot: damage once, then consumed no matter what.
fn projectile_hits_enemy(game: &mut GameState, projectile: Entity, enemy: Entity) {
    let damage = game
        .registry
        .get::<Projectile>(projectile)
        .map_or(0.0, |p| p.damage);
    damage_enemy(game, enemy, damage);
    game.release_projectile(projectile);
}

fn player_collects_pickup(game: &mut GameState, _player: Entity, pickup: Entity) {
    if let Some(&Pickup { xp }) = game.registry.get::<Pickup>(pickup) {
        game.events.push(GameEvent::PickupCollected { xp });
        game.grant_xp(xp);
    }
    game.release_pickup(pickup);
}

/// A burst damages each enemy at most once per activation; the hit set
/// remembers who already paid.
fn area_hits_enemy(game: &mut GameState, area: Entity, enemy: Entity) {
    let damage = match game.registry.get_mut::<AreaEffect>(area) {
        Some(effect) => {
            if !effect.already_hit.insert(enemy) {
                return;
            }
            effect.damage
        }
        None => return,
    };
    damage_enemy(game, enemy, damage);
}

fn damage_enemy(game: &mut GameState, enemy: Entity, amount: f32) {
    let dead = match game.registry.get_mut::<Health>(enemy) {
        Some(health) => {
            health.current -= amount;
            health.is_dead()
        }
        None => false,
    };
    if dead {
        slay_enemy(game, enemy);
    }
}

/// Death rewards, then back to the pool: score by kind, an experience
/// pickup where the enemy stood.
fn slay_enemy(game: &mut GameState, enemy: Entity) {
    let kind = game.registry.get::<EnemyKind>(enemy).map(|k| k.0);
    let at = game.registry.get::<Position>(enemy).map(|p| p.0);
    if let (Some(kind), Some(at)) = (kind, at) {
        if let Some(spec) = ENEMIES.get(kind) {
            game.score += spec.score as u64;
            game.events.push(GameEvent::EnemySlain {
                kind,
                at,
                score: spec.score,
            });
            game.spawn_pickup(at, spec.xp);
        }
    }
    game.release_enemy(enemy);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::components::Experience;

    fn game() -> GameState {
        GameState::new(SimConfig::default(), 9)
    }

    fn health_of(game: &GameState, id: Entity) -> f32 {
        game.registry.get::<Health>(id).unwrap().current
    }

    #[test]
    fn test_touching_circles_do_not_collide() {
        assert!(circles_overlap(
            Vec2::new(400.0, 300.0),
            16.0,
            Vec2::new(410.0, 300.0),
            12.0
        ));
        // exactly radius-sum apart: a miss
        assert!(!circles_overlap(
            Vec2::ZERO,
            10.0,
            Vec2::new(30.0, 0.0),
            20.0
        ));
        assert!(!circles_overlap(
            Vec2::ZERO,
            10.0,
            Vec2::new(31.0, 0.0),
            20.0
        ));
    }

    #[test]
    fn test_overlapping_player_and_enemy_exchange_contact_damage() {
        let mut game = game();
        // player at (400, 300) r16; goblin 10px away r14: overlapping
        let goblin = game.spawn_enemy(1, Vec2::new(410.0, 300.0)).unwrap();
        resolve_collisions(&mut game);

        assert_eq!(health_of(&game, game.player), 90.0);
        assert_eq!(health_of(&game, goblin), 50.0);
        assert!(game
            .events
            .contains(&GameEvent::PlayerHurt { amount: 10.0 }));
        // one unordered pair, one exchange
        assert_eq!(
            game.events
                .iter()
                .filter(|e| matches!(e, GameEvent::PlayerHurt { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_lethal_projectile_slays_scores_and_drops_a_pickup() {
        let mut game = game();
        let goblin = game.spawn_enemy(1, Vec2::new(600.0, 300.0)).unwrap();
        *game.registry.get_mut::<Health>(goblin).unwrap() = Health {
            current: 20.0,
            max: 20.0,
        };
        let shot = game.spawn_projectile(Vec2::new(595.0, 300.0), Vec2::X, 25.0, 2.0);

        resolve_collisions(&mut game);

        // overkill is kept on the dormant body, not clamped
        assert_eq!(health_of(&game, goblin), -5.0);
        assert!(!game.registry.has::<Collider>(goblin), "enemy released");
        assert!(!game.registry.has::<Collider>(shot), "shot consumed");
        assert_eq!(game.pools.projectiles.idle(), 1);

        assert_eq!(game.score, ENEMIES[1].score as u64);
        assert!(game.events.contains(&GameEvent::EnemySlain {
            kind: 1,
            at: Vec2::new(600.0, 300.0),
            score: ENEMIES[1].score,
        }));

        // the drop sits where the enemy died, carrying its experience
        let drops = game.registry.query::<(Pickup, Collider)>();
        assert_eq!(drops.len(), 1);
        assert_eq!(
            game.registry.get::<Position>(drops[0]).unwrap().0,
            Vec2::new(600.0, 300.0)
        );
        assert_eq!(
            game.registry.get::<Pickup>(drops[0]).unwrap().xp,
            ENEMIES[1].xp
        );
    }

    #[test]
    fn test_projectile_is_consumed_even_when_the_enemy_survives() {
        let mut game = game();
        let bat = game.spawn_enemy(0, Vec2::new(600.0, 300.0)).unwrap();
        let shot = game.spawn_projectile(Vec2::new(597.0, 300.0), Vec2::X, 25.0, 2.0);

        resolve_collisions(&mut game);

        assert_eq!(health_of(&game, bat), ENEMIES[0].health - 25.0);
        assert!(game.registry.has::<Collider>(bat), "enemy lives on");
        assert!(!game.registry.has::<Collider>(shot));
        assert_eq!(game.pools.projectiles.idle(), 1);
    }

    #[test]
    fn test_projectile_overlapping_two_enemies_hits_only_one() {
        let mut game = game();
        let first = game.spawn_enemy(0, Vec2::new(605.0, 300.0)).unwrap();
        let second = game.spawn_enemy(0, Vec2::new(595.0, 300.0)).unwrap();
        game.spawn_projectile(Vec2::new(600.0, 300.0), Vec2::X, 25.0, 2.0);

        // a double release would trip the pool's debug assertion
        resolve_collisions(&mut game);

        let damaged = [first, second]
            .iter()
            .filter(|&&id| health_of(&game, id) < ENEMIES[0].health)
            .count();
        assert_eq!(damaged, 1, "single-hit shots spend themselves on one enemy");
        assert_eq!(game.pools.projectiles.idle(), 1);
    }

    #[test]
    fn test_pickup_grants_xp_and_returns_to_pool() {
        let mut game = game();
        let center = game.registry.get::<Position>(game.player).unwrap().0;
        let drop = game.spawn_pickup(center, 10);

        resolve_collisions(&mut game);

        let exp = game.registry.get::<Experience>(game.player).unwrap();
        assert_eq!(exp.current, 10);
        assert!(!game.registry.has::<Collider>(drop));
        assert_eq!(game.pools.pickups.idle(), 1);
        assert!(game.events.contains(&GameEvent::PickupCollected { xp: 10 }));
    }

    #[test]
    fn test_area_burst_hits_each_enemy_once_per_activation() {
        let mut game = game();
        let goblin = game.spawn_enemy(1, Vec2::new(700.0, 300.0)).unwrap();
        let burst = game.spawn_area(Vec2::new(700.0, 300.0), 10.0, 75.0, 0.2);

        resolve_collisions(&mut game);
        assert_eq!(health_of(&game, goblin), 90.0);

        // the burst lingers across ticks; the hit set holds
        resolve_collisions(&mut game);
        assert_eq!(health_of(&game, goblin), 90.0);

        // a fresh activation starts a fresh hit set
        game.release_area(burst);
        game.spawn_area(Vec2::new(700.0, 300.0), 10.0, 75.0, 0.2);
        resolve_collisions(&mut game);
        assert_eq!(health_of(&game, goblin), 80.0);
    }

    #[test]
    fn test_player_death_ends_the_run_but_the_pass_finishes() {
        let mut game = game();
        game.registry.get_mut::<Health>(game.player).unwrap().current = 5.0;
        let left = game.spawn_enemy(1, Vec2::new(390.0, 300.0)).unwrap();
        let right = game.spawn_enemy(1, Vec2::new(410.0, 300.0)).unwrap();

        resolve_collisions(&mut game);

        assert_eq!(game.phase, crate::sim::state::GamePhase::Ended);
        let endings = game
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::RunEnded { .. }))
            .count();
        assert_eq!(endings, 1, "the terminal transition fires once");
        // both pairs still ran their exchange
        assert_eq!(health_of(&game, left), 50.0);
        assert_eq!(health_of(&game, right), 50.0);
    }

    #[test]
    fn test_contact_cooldown_opens_and_closes_the_exchange() {
        let mut game = game();
        game.config.contact_damage_cooldown = 1.0;
        let goblin = game.spawn_enemy(1, Vec2::new(410.0, 300.0)).unwrap();

        resolve_collisions(&mut game);
        assert_eq!(health_of(&game, game.player), 90.0);
        assert_eq!(health_of(&game, goblin), 50.0);

        // same window: the whole exchange stays shut, both directions
        resolve_collisions(&mut game);
        assert_eq!(health_of(&game, game.player), 90.0);
        assert_eq!(health_of(&game, goblin), 50.0);

        game.run_time = 1.0;
        resolve_collisions(&mut game);
        assert_eq!(health_of(&game, game.player), 80.0);
        assert!(!game.registry.has::<Collider>(goblin), "second hit was lethal");
    }

    #[test]
    fn test_released_bodies_vanish_from_the_pass() {
        let mut game = game();
        let goblin = game.spawn_enemy(1, Vec2::new(410.0, 300.0)).unwrap();
        game.release_enemy(goblin);
        resolve_collisions(&mut game);
        assert_eq!(health_of(&game, game.player), 100.0);
        assert!(game.events.is_empty());
    }
}
