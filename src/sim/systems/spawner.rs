//! Timed enemy spawning
//!
//! Pressure ramps with run time: the gap between spawns shrinks linearly
//! from a relaxed opening pace to a fixed floor, then holds there. Each
//! trigger places one enemy of a random kind just outside a random world
//! edge, pointed at the player by its pool reset.

use rand::Rng;

use crate::consts;
use crate::sim::state::GameState;
use crate::tuning::{self, ENEMIES};

/// Seconds between spawns after `run_time` seconds of play. Starts at
/// [`consts::SPAWN_INITIAL_INTERVAL`], reaches
/// [`consts::SPAWN_MIN_INTERVAL`] at the end of the ramp, and never goes
/// below it.
pub fn spawn_interval(run_time: f32) -> f32 {
    let progress = (run_time / consts::SPAWN_RAMP_SECS).min(1.0);
    consts::SPAWN_INITIAL_INTERVAL
        - (consts::SPAWN_INITIAL_INTERVAL - consts::SPAWN_MIN_INTERVAL) * progress
}

/// Accumulate toward the current interval and place one enemy per
/// trigger. The accumulator resets to zero rather than carrying spill,
/// so a long frame still spawns exactly once.
pub fn spawn_enemies(game: &mut GameState, dt: f32) {
    game.spawn_timer += dt;
    if game.spawn_timer < spawn_interval(game.run_time) {
        return;
    }
    game.spawn_timer = 0.0;

    let world = game.config.world_size();
    let edge = game.rng.random_range(0u32..4);
    let along = game.rng.random_range(0.0f32..1.0);
    let pos = tuning::edge_spawn_point(edge, along, world, consts::SPAWN_EDGE_MARGIN);
    let kind = game.rng.random_range(0..ENEMIES.len());
    log::debug!("spawning {} at {}", ENEMIES[kind].name, pos);
    game.spawn_enemy(kind, pos);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::components::EnemyKind;

    fn active_enemies(game: &GameState) -> usize {
        game.registry.query::<(EnemyKind,)>().len()
            - game
                .pools
                .enemies
                .iter()
                .map(|p| p.idle())
                .sum::<usize>()
    }

    #[test]
    fn test_interval_ramps_to_the_floor() {
        assert_eq!(spawn_interval(0.0), consts::SPAWN_INITIAL_INTERVAL);
        assert_eq!(spawn_interval(consts::SPAWN_RAMP_SECS), consts::SPAWN_MIN_INTERVAL);
        // halfway through the ramp sits halfway down
        assert!((spawn_interval(30.0) - 1.75).abs() < 1e-4);
        // long past the ramp the floor holds
        for minutes in 1..30 {
            let t = consts::SPAWN_RAMP_SECS * minutes as f32;
            assert_eq!(spawn_interval(t), consts::SPAWN_MIN_INTERVAL);
        }
    }

    #[test]
    fn test_timer_builds_until_the_interval() {
        let mut game = GameState::new(SimConfig::default(), 11);
        spawn_enemies(&mut game, 1.0);
        spawn_enemies(&mut game, 1.0);
        assert_eq!(active_enemies(&game), 0, "2s accumulated, interval is 3s");
        spawn_enemies(&mut game, 1.0);
        assert_eq!(active_enemies(&game), 1);
        // the accumulator was spent
        spawn_enemies(&mut game, 1.0);
        assert_eq!(active_enemies(&game), 1);
    }

    #[test]
    fn test_one_spawn_per_trigger_even_on_long_frames() {
        let mut game = GameState::new(SimConfig::default(), 11);
        spawn_enemies(&mut game, 30.0);
        assert_eq!(active_enemies(&game), 1);
    }

    #[test]
    fn test_spawns_hug_the_world_margin() {
        let mut game = GameState::new(SimConfig::default(), 17);
        for _ in 0..40 {
            spawn_enemies(&mut game, 10.0);
        }
        let spawned: Vec<_> = game.registry.query::<(EnemyKind,)>();
        assert!(!spawned.is_empty());
        let margin = consts::SPAWN_EDGE_MARGIN;
        let world = game.config.world_size();
        for id in spawned {
            let pos = game
                .registry
                .get::<crate::sim::components::Position>(id)
                .unwrap()
                .0;
            let pinned = pos.x == -margin
                || pos.x == world.x + margin
                || pos.y == -margin
                || pos.y == world.y + margin;
            assert!(pinned, "{pos} is not on a spawn edge");
        }
    }
}
