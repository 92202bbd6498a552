//! Typed component tables
//!
//! One sparse table per component kind, keyed by entity id. The store holds
//! data only; entity liveness and multi-kind queries live in the
//! [`Registry`](super::Registry).

use std::any::{Any, TypeId};
use std::collections::HashMap;

use super::Entity;

type Rows<T> = HashMap<Entity, T>;

/// A type-erased table plus the thunks destruction and teardown need
/// without knowing the row type.
struct Table {
    rows: Box<dyn Any>,
    remove_row: fn(&mut dyn Any, Entity),
    clear_rows: fn(&mut dyn Any),
}

fn remove_row_thunk<T: 'static>(rows: &mut dyn Any, id: Entity) {
    if let Some(rows) = rows.downcast_mut::<Rows<T>>() {
        rows.remove(&id);
    }
}

fn clear_rows_thunk<T: 'static>(rows: &mut dyn Any) {
    if let Some(rows) = rows.downcast_mut::<Rows<T>>() {
        rows.clear();
    }
}

/// Sparse component storage: `HashMap<Entity, T>` per kind, located by
/// `TypeId`. Kinds register themselves on first insert; looking up a kind
/// the store has never seen is an ordinary miss, not an error.
pub struct ComponentStore {
    tables: HashMap<TypeId, Table>,
}

impl ComponentStore {
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    fn rows<T: 'static>(&self) -> Option<&Rows<T>> {
        self.tables
            .get(&TypeId::of::<T>())?
            .rows
            .downcast_ref::<Rows<T>>()
    }

    fn rows_mut<T: 'static>(&mut self) -> Option<&mut Rows<T>> {
        self.tables
            .get_mut(&TypeId::of::<T>())?
            .rows
            .downcast_mut::<Rows<T>>()
    }

    /// Insert or overwrite the row for `id`.
    pub fn insert<T: 'static>(&mut self, id: Entity, value: T) {
        let table = self
            .tables
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Table {
                rows: Box::new(Rows::<T>::new()),
                remove_row: remove_row_thunk::<T>,
                clear_rows: clear_rows_thunk::<T>,
            });
        if let Some(rows) = table.rows.downcast_mut::<Rows<T>>() {
            rows.insert(id, value);
        }
    }

    pub fn get<T: 'static>(&self, id: Entity) -> Option<&T> {
        self.rows::<T>()?.get(&id)
    }

    pub fn get_mut<T: 'static>(&mut self, id: Entity) -> Option<&mut T> {
        self.rows_mut::<T>()?.get_mut(&id)
    }

    /// Detach and return the row for `id`. Absent rows are a quiet `None`.
    pub fn remove<T: 'static>(&mut self, id: Entity) -> Option<T> {
        self.rows_mut::<T>()?.remove(&id)
    }

    pub fn contains<T: 'static>(&self, id: Entity) -> bool {
        self.rows::<T>().is_some_and(|rows| rows.contains_key(&id))
    }

    /// Ids currently holding a `T`, in table order. Callers that need a
    /// stable order sort the result.
    pub fn ids<T: 'static>(&self) -> Vec<Entity> {
        self.rows::<T>()
            .map(|rows| rows.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn count<T: 'static>(&self) -> usize {
        self.rows::<T>().map_or(0, |rows| rows.len())
    }

    /// Remove every component attached to `id`, across all kinds.
    pub(crate) fn strip_all(&mut self, id: Entity) {
        for table in self.tables.values_mut() {
            (table.remove_row)(&mut *table.rows, id);
        }
    }

    /// Drop every row in every table. Registered kinds stay registered.
    pub(crate) fn clear(&mut self) {
        for table in self.tables.values_mut() {
            (table.clear_rows)(&mut *table.rows);
        }
    }
}

impl Default for ComponentStore {
    fn default() -> Self {
        Self::new()
    }
}

/// A tuple of component kinds usable as a query filter, implemented for
/// tuples of one to four kinds. The first kind seeds the candidate set, so
/// lead with the rarest kind where it matters.
pub trait ComponentSet {
    fn seed(store: &ComponentStore) -> Vec<Entity>;
    fn all_present(store: &ComponentStore, id: Entity) -> bool;
}

macro_rules! impl_component_set {
    ($head:ident $(, $tail:ident)*) => {
        impl<$head: 'static $(, $tail: 'static)*> ComponentSet for ($head, $($tail,)*) {
            fn seed(store: &ComponentStore) -> Vec<Entity> {
                store.ids::<$head>()
            }

            fn all_present(store: &ComponentStore, id: Entity) -> bool {
                store.contains::<$head>(id) $(&& store.contains::<$tail>(id))*
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Hp(i32);

    #[derive(Debug, PartialEq)]
    struct Label(&'static str);

    struct Marker;

    fn e(raw: u32) -> Entity {
        Entity::from_raw(raw)
    }

    #[test]
    fn test_insert_is_upsert() {
        let mut store = ComponentStore::new();
        store.insert(e(1), Hp(10));
        store.insert(e(1), Hp(25));
        assert_eq!(store.get::<Hp>(e(1)), Some(&Hp(25)));
        assert_eq!(store.count::<Hp>(), 1);
    }

    #[test]
    fn test_unknown_kind_lookups_miss_quietly() {
        let store = ComponentStore::new();
        assert_eq!(store.get::<Hp>(e(1)), None);
        assert!(!store.contains::<Hp>(e(1)));
        assert!(store.ids::<Hp>().is_empty());
    }

    #[test]
    fn test_remove_detaches_and_returns() {
        let mut store = ComponentStore::new();
        store.insert(e(3), Label("orb"));
        assert_eq!(store.remove::<Label>(e(3)), Some(Label("orb")));
        assert_eq!(store.remove::<Label>(e(3)), None);
        assert!(!store.contains::<Label>(e(3)));
    }

    #[test]
    fn test_get_mut_edits_in_place() {
        let mut store = ComponentStore::new();
        store.insert(e(7), Hp(50));
        if let Some(hp) = store.get_mut::<Hp>(e(7)) {
            hp.0 -= 30;
        }
        assert_eq!(store.get::<Hp>(e(7)), Some(&Hp(20)));
    }

    #[test]
    fn test_strip_all_crosses_every_kind() {
        let mut store = ComponentStore::new();
        store.insert(e(4), Hp(1));
        store.insert(e(4), Label("bat"));
        store.insert(e(4), Marker);
        store.insert(e(5), Hp(2));
        store.strip_all(e(4));
        assert!(!store.contains::<Hp>(e(4)));
        assert!(!store.contains::<Label>(e(4)));
        assert!(!store.contains::<Marker>(e(4)));
        assert!(store.contains::<Hp>(e(5)));
    }

    #[test]
    fn test_clear_keeps_tables_usable() {
        let mut store = ComponentStore::new();
        store.insert(e(1), Hp(9));
        store.insert(e(2), Label("goblin"));
        store.clear();
        assert_eq!(store.count::<Hp>(), 0);
        assert_eq!(store.count::<Label>(), 0);
        store.insert(e(1), Hp(12));
        assert_eq!(store.get::<Hp>(e(1)), Some(&Hp(12)));
    }

    #[test]
    fn test_component_set_membership() {
        let mut store = ComponentStore::new();
        store.insert(e(1), Hp(1));
        store.insert(e(1), Label("both"));
        store.insert(e(2), Hp(2));
        assert!(<(Hp, Label)>::all_present(&store, e(1)));
        assert!(!<(Hp, Label)>::all_present(&store, e(2)));

        let mut seed = <(Hp,)>::seed(&store);
        seed.sort_unstable();
        assert_eq!(seed, vec![e(1), e(2)]);
    }
}
