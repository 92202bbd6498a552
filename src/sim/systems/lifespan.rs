//! Timed expiry for pooled transients
//!
//! Projectiles and area bursts carry a `Lifespan`; when it runs out they
//! go back to their pool. Release strips the `Lifespan` itself, so an
//! expired entity can't be processed twice.

use crate::sim::components::{AreaEffect, Lifespan, Projectile};
use crate::sim::state::GameState;

pub fn expire_lifespans(game: &mut GameState, dt: f32) {
    for id in game.registry.query::<(Lifespan,)>() {
        let expired = match game.registry.get_mut::<Lifespan>(id) {
            Some(life) => {
                life.remaining -= dt;
                life.remaining <= 0.0
            }
            None => false,
        };
        if !expired {
            continue;
        }
        if game.registry.has::<Projectile>(id) {
            game.release_projectile(id);
        } else if game.registry.has::<AreaEffect>(id) {
            game.release_area(id);
        }
    }
}
