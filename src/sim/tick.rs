//! Fixed timestep simulation tick
//!
//! Core loop that advances one frame deterministically: input, AI,
//! integration, collision, spawning, weapons, lifespans, always in that
//! order. Pause and game-over gate the whole pass; a paused tick leaves
//! every clock and body untouched.

use glam::Vec2;

use super::collision;
use super::state::{GamePhase, GameState};
use super::systems;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Requested movement direction; longer-than-unit vectors are
    /// normalized, zero means stand still
    pub move_dir: Vec2,
    /// Menu pause toggle
    pub pause: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(game: &mut GameState, input: &TickInput, dt: f32) {
    // last tick's events have been observed by now
    game.events.clear();

    if input.pause {
        game.toggle_pause();
    }

    // Don't tick while paused or after the run ended
    match game.phase {
        GamePhase::PausedForUpgrade | GamePhase::PausedMenu | GamePhase::Ended => return,
        GamePhase::Running => {}
    }

    game.ticks += 1;
    game.run_time += dt;

    systems::apply_move_intent(game, input.move_dir);
    systems::steer_enemies(game);
    systems::integrate(game, dt);
    collision::resolve_collisions(game);
    systems::spawn_enemies(game, dt);
    systems::fire_weapons(game, dt);
    systems::expire_lifespans(game, dt);
}
