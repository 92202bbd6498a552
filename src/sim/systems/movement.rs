//! Integration pass

use crate::sim::components::{Collider, PlayerInputState, Position, Velocity};
use crate::sim::state::GameState;

/// Euler-integrate every moving body, then clamp player-controlled
/// entities to the world rectangle inset by their collider radius.
/// Enemies and shots roam off-world freely; only the avatar is fenced in.
pub fn integrate(game: &mut GameState, dt: f32) {
    let world = game.config.world_size();
    for id in game.registry.query::<(Position, Velocity)>() {
        let Some(&Velocity(vel)) = game.registry.get::<Velocity>(id) else {
            continue;
        };
        if let Some(pos) = game.registry.get_mut::<Position>(id) {
            pos.0 += vel * dt;
        }
        if game.registry.has::<PlayerInputState>(id) {
            let inset = game.registry.get::<Collider>(id).map_or(0.0, |c| c.radius);
            if let Some(pos) = game.registry.get_mut::<Position>(id) {
                pos.0.x = pos.0.x.min(world.x - inset).max(inset);
                pos.0.y = pos.0.y.min(world.y - inset).max(inset);
            }
        }
    }
}
