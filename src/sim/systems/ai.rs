//! Enemy steering pass

use crate::sim::components::{AiBehavior, AiState, EnemyKind, Position, Velocity};
use crate::sim::state::GameState;
use crate::tuning::ENEMIES;

/// Point each enemy's velocity at its target at the kind's chase speed.
/// An enemy exactly on top of its target parks instead of producing a NaN
/// heading; a target with no position leaves the previous velocity alone.
pub fn steer_enemies(game: &mut GameState) {
    for id in game
        .registry
        .query::<(AiState, Velocity, Position, EnemyKind)>()
    {
        let Some(&AiState { target, behavior }) = game.registry.get::<AiState>(id) else {
            continue;
        };
        let Some(&EnemyKind(kind)) = game.registry.get::<EnemyKind>(id) else {
            continue;
        };
        let Some(spec) = ENEMIES.get(kind) else {
            log::warn!("enemy {} has unknown kind {}, not steering", id, kind);
            continue;
        };
        let Some(&Position(target_pos)) = game.registry.get::<Position>(target) else {
            continue;
        };
        let Some(&Position(pos)) = game.registry.get::<Position>(id) else {
            continue;
        };
        match behavior {
            AiBehavior::Chase => {
                let dir = (target_pos - pos).normalize_or_zero();
                if let Some(vel) = game.registry.get_mut::<Velocity>(id) {
                    vel.0 = dir * spec.speed;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use glam::Vec2;

    #[test]
    fn test_enemies_chase_at_kind_speed() {
        let mut game = GameState::new(SimConfig::default(), 3);
        // player sits at (400, 300); bat due west, goblin due north
        let bat = game.spawn_enemy(0, Vec2::new(300.0, 300.0)).unwrap();
        let goblin = game.spawn_enemy(1, Vec2::new(400.0, 100.0)).unwrap();

        steer_enemies(&mut game);

        let bat_vel = game.registry.get::<Velocity>(bat).unwrap().0;
        assert!((bat_vel - Vec2::new(ENEMIES[0].speed, 0.0)).length() < 1e-3);
        let goblin_vel = game.registry.get::<Velocity>(goblin).unwrap().0;
        assert!((goblin_vel - Vec2::new(0.0, ENEMIES[1].speed)).length() < 1e-3);
    }

    #[test]
    fn test_enemy_on_top_of_target_parks() {
        let mut game = GameState::new(SimConfig::default(), 3);
        let center = game.registry.get::<Position>(game.player).unwrap().0;
        let bat = game.spawn_enemy(0, center).unwrap();
        steer_enemies(&mut game);
        assert_eq!(game.registry.get::<Velocity>(bat).unwrap().0, Vec2::ZERO);
    }

    #[test]
    fn test_missing_target_keeps_previous_velocity() {
        let mut game = GameState::new(SimConfig::default(), 3);
        let bat = game.spawn_enemy(0, Vec2::new(0.0, 0.0)).unwrap();
        steer_enemies(&mut game);
        let chasing = game.registry.get::<Velocity>(bat).unwrap().0;
        assert!(chasing.length() > 0.0);

        game.registry.destroy(game.player);
        steer_enemies(&mut game);
        assert_eq!(game.registry.get::<Velocity>(bat).unwrap().0, chasing);
    }
}
