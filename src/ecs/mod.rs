//! Entity/component storage layer
//!
//! An entity is a bare id; what it *is* comes entirely from the component
//! kinds attached to it. Three pieces:
//! - [`ComponentStore`]: one sparse table per component kind
//! - [`Registry`]: entity lifecycle plus multi-kind queries over the store
//! - [`EntityPool`]: free-lists of recyclable entities per spawnable
//!   archetype, with factory/reset callbacks
//!
//! Nothing in here knows about the game. The simulation layer defines the
//! component kinds and archetype recipes.

mod entity;
mod pool;
mod registry;
mod store;

pub use entity::Entity;
pub use pool::EntityPool;
pub use registry::Registry;
pub use store::{ComponentSet, ComponentStore};
