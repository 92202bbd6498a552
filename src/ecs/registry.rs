//! Entity lifecycle and cross-kind queries

use std::collections::HashSet;

use super::store::{ComponentSet, ComponentStore};
use super::Entity;

/// Issues entity ids, tracks which are alive, and layers queries over the
/// component tables.
///
/// Destroying an entity strips every component it holds; the id is not
/// reissued until [`clear`](Registry::clear) resets the counter. Reads on
/// a destroyed entity simply miss, so holding an id across a destroy is
/// safe mid-iteration.
pub struct Registry {
    next_id: u32,
    alive: HashSet<Entity>,
    components: ComponentStore,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            alive: HashSet::new(),
            components: ComponentStore::new(),
        }
    }

    /// Mint a fresh, componentless entity.
    pub fn create(&mut self) -> Entity {
        let id = Entity::from_raw(self.next_id);
        self.next_id += 1;
        self.alive.insert(id);
        id
    }

    /// Remove `id` and everything attached to it. Destroying an entity
    /// that is already gone is a no-op.
    pub fn destroy(&mut self, id: Entity) {
        if self.alive.remove(&id) {
            self.components.strip_all(id);
        }
    }

    #[inline]
    pub fn is_alive(&self, id: Entity) -> bool {
        self.alive.contains(&id)
    }

    pub fn alive_count(&self) -> usize {
        self.alive.len()
    }

    /// Full teardown: every entity and component row dropped, id counter
    /// back to zero. A fresh run starts from a state indistinguishable
    /// from a new registry.
    pub fn clear(&mut self) {
        self.alive.clear();
        self.components.clear();
        self.next_id = 0;
    }

    /// Attach (or overwrite) a component on a live entity. Dead targets
    /// are refused so a destroyed id cannot grow state back.
    pub fn add<T: 'static>(&mut self, id: Entity, value: T) {
        if !self.is_alive(id) {
            log::warn!("ignoring component add on dead entity {}", id);
            return;
        }
        self.components.insert(id, value);
    }

    /// Detach a component, returning it. Absent components (or a dead
    /// entity) are a quiet `None`.
    pub fn remove<T: 'static>(&mut self, id: Entity) -> Option<T> {
        self.components.remove::<T>(id)
    }

    #[inline]
    pub fn get<T: 'static>(&self, id: Entity) -> Option<&T> {
        self.components.get::<T>(id)
    }

    #[inline]
    pub fn get_mut<T: 'static>(&mut self, id: Entity) -> Option<&mut T> {
        self.components.get_mut::<T>(id)
    }

    #[inline]
    pub fn has<T: 'static>(&self, id: Entity) -> bool {
        self.components.contains::<T>(id)
    }

    pub fn count<T: 'static>(&self) -> usize {
        self.components.count::<T>()
    }

    /// Every live entity holding all of the listed component kinds, each
    /// exactly once, in ascending id order. The snapshot is taken up
    /// front: entities created afterwards don't appear, and destroying a
    /// listed entity mid-iteration just makes its later reads miss.
    pub fn query<S: ComponentSet>(&self) -> Vec<Entity> {
        let mut out: Vec<Entity> = S::seed(&self.components)
            .into_iter()
            .filter(|&id| self.is_alive(id) && S::all_present(&self.components, id))
            .collect();
        out.sort_unstable();
        out
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
