//! Reset-on-acquire entity pools
//!
//! Short-lived archetypes (enemies, projectiles, pickups, area bursts)
//! churn constantly; destroying and re-creating them would thrash the
//! component tables. A pool keeps dormant entity ids on a free-list
//! instead. The factory mints an entity with its permanent components the
//! first time the free-list runs dry; the reset callback re-arms transient
//! state on *every* acquire, so a recycled entity is indistinguishable
//! from a freshly minted one.

use std::collections::HashSet;

use super::{Entity, Registry};

type FactoryFn = Box<dyn Fn(&mut Registry) -> Entity>;
type ResetFn = Box<dyn Fn(&mut Registry, Entity)>;

/// Free-list of recyclable entities for one spawnable archetype.
///
/// The pool never destroys entities. Callers strip or hide whatever must
/// not persist *before* calling [`release`](EntityPool::release); release
/// itself is pure bookkeeping.
pub struct EntityPool {
    label: &'static str,
    factory: FactoryFn,
    reset: ResetFn,
    free: Vec<Entity>,
    checked_out: HashSet<Entity>,
    minted: u32,
}

impl EntityPool {
    pub fn new(
        label: &'static str,
        factory: impl Fn(&mut Registry) -> Entity + 'static,
        reset: impl Fn(&mut Registry, Entity) + 'static,
    ) -> Self {
        Self {
            label,
            factory: Box::new(factory),
            reset: Box::new(reset),
            free: Vec::new(),
            checked_out: HashSet::new(),
            minted: 0,
        }
    }

    /// Hand out a ready-to-use entity: a recycled one when available,
    /// otherwise a freshly minted one. The reset callback runs either way.
    pub fn acquire(&mut self, reg: &mut Registry) -> Entity {
        let id = match self.free.pop() {
            Some(id) => id,
            None => {
                self.minted += 1;
                let id = (self.factory)(reg);
                log::debug!(
                    "pool '{}' grew: minted {} ({} total)",
                    self.label,
                    id,
                    self.minted
                );
                id
            }
        };
        (self.reset)(reg, id);
        self.checked_out.insert(id);
        id
    }

    /// Return an entity to the free-list. Releasing an id that is not
    /// checked out here is a bug in the caller; it asserts in debug
    /// builds and is ignored in release builds so the free-list can never
    /// hold duplicates.
    pub fn release(&mut self, id: Entity) {
        if !self.checked_out.remove(&id) {
            debug_assert!(false, "pool '{}': release of {} not checked out", self.label, id);
            log::warn!(
                "pool '{}': ignoring release of {} that is not checked out",
                self.label,
                id
            );
            return;
        }
        self.free.push(id);
    }

    /// Dormant entities waiting on the free-list.
    pub fn idle(&self) -> usize {
        self.free.len()
    }

    /// Entities currently out in the world.
    pub fn in_flight(&self) -> usize {
        self.checked_out.len()
    }

    /// Total factory mints over the pool's lifetime.
    pub fn minted(&self) -> u32 {
        self.minted
    }

    /// Forget all tracking. Used at teardown after the registry itself
    /// has been cleared; the pool does not touch the entities.
    pub fn clear(&mut self) {
        self.free.clear();
        self.checked_out.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Charge(u32);

    struct Armed;

    fn test_pool() -> EntityPool {
        EntityPool::new(
            "test",
            |reg| {
                let id = reg.create();
                reg.add(id, Charge(0));
                id
            },
            |reg, id| {
                if let Some(c) = reg.get_mut::<Charge>(id) {
                    c.0 = 3;
                }
                reg.add(id, Armed);
            },
        )
    }

    #[test]
    fn test_acquire_mints_and_resets() {
        let mut reg = Registry::new();
        let mut pool = test_pool();
        let id = pool.acquire(&mut reg);
        // the factory wrote 0; reset must still have run
        assert_eq!(reg.get::<Charge>(id), Some(&Charge(3)));
        assert!(reg.has::<Armed>(id));
        assert_eq!(pool.minted(), 1);
        assert_eq!(pool.in_flight(), 1);
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn test_release_then_acquire_recycles_same_entity() {
        let mut reg = Registry::new();
        let mut pool = test_pool();
        let first = pool.acquire(&mut reg);

        // dirty the transient state the way gameplay would
        if let Some(c) = reg.get_mut::<Charge>(first) {
            c.0 = 0;
        }
        reg.remove::<Armed>(first);
        pool.release(first);
        assert_eq!(pool.idle(), 1);
        assert!(reg.is_alive(first), "pools never destroy entities");

        let second = pool.acquire(&mut reg);
        assert_eq!(second, first);
        assert_eq!(pool.minted(), 1, "no extra mint while the free-list has stock");
        assert_eq!(reg.get::<Charge>(second), Some(&Charge(3)));
        assert!(reg.has::<Armed>(second));
    }

    #[test]
    fn test_distinct_entities_while_all_checked_out() {
        let mut reg = Registry::new();
        let mut pool = test_pool();
        let a = pool.acquire(&mut reg);
        let b = pool.acquire(&mut reg);
        assert_ne!(a, b);
        assert_eq!(pool.minted(), 2);
        assert_eq!(pool.in_flight(), 2);
    }

    #[test]
    #[should_panic]
    fn test_double_release_asserts_in_debug() {
        let mut reg = Registry::new();
        let mut pool = test_pool();
        let id = pool.acquire(&mut reg);
        pool.release(id);
        pool.release(id);
    }

    #[test]
    #[should_panic]
    fn test_release_of_foreign_id_asserts_in_debug() {
        let mut reg = Registry::new();
        let mut pool = test_pool();
        let stranger = reg.create();
        pool.release(stranger);
    }

    #[test]
    fn test_clear_forgets_tracking() {
        let mut reg = Registry::new();
        let mut pool = test_pool();
        let id = pool.acquire(&mut reg);
        pool.release(id);
        pool.acquire(&mut reg);
        pool.clear();
        assert_eq!(pool.idle(), 0);
        assert_eq!(pool.in_flight(), 0);
    }
}
