//! Entity identifiers

use std::fmt;

/// Opaque handle for a simulated object.
///
/// Ids are issued by [`Registry::create`](super::Registry::create) and stay
/// unique until [`Registry::clear`](super::Registry::clear) resets the
/// counter at teardown. Pooled entities keep their id across dormancy, so
/// a handle held by a collaborator is stable for a whole run.
///
/// `Ord` follows the issue order; queries iterate ascending and collision
/// pairs are canonicalized with the lower id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u32);

impl Entity {
    pub(crate) fn from_raw(raw: u32) -> Self {
        Entity(raw)
    }

    /// Raw id, for collaborators that key external resources by entity
    /// (e.g. a renderer's per-entity display objects).
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
