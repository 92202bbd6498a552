//! Player input pass
//!
//! Turns the host's move vector into player velocity. Runs first so the
//! rest of the tick sees this tick's intent.

use glam::Vec2;

use crate::sim::components::{PlayerInputState, PlayerStats, Velocity};
use crate::sim::state::GameState;

/// Clamp the move vector to unit length (diagonals aren't faster, analog
/// deflection passes through) and scale by the move-speed stat. A zero
/// vector stops the avatar.
pub fn apply_move_intent(game: &mut GameState, move_dir: Vec2) {
    let dir = if move_dir.length_squared() > 1.0 {
        move_dir.normalize()
    } else {
        move_dir
    };
    for id in game
        .registry
        .query::<(PlayerInputState, Velocity, PlayerStats)>()
    {
        let Some(&PlayerStats { move_speed, .. }) = game.registry.get::<PlayerStats>(id) else {
            continue;
        };
        if let Some(intent) = game.registry.get_mut::<PlayerInputState>(id) {
            intent.move_dir = dir;
        }
        if let Some(vel) = game.registry.get_mut::<Velocity>(id) {
            vel.0 = dir * move_speed;
        }
    }
}
