//! Bounded, ordered collections of shared entity references.
//!
//! A roster never owns entities; it holds handles into an
//! [`EntityStore`] and registers itself as a holder of every entry. The
//! same roster type serves as registry catalog, prerequisite list,
//! taken-course list, and attendee list.
//!
//! Capacity is fixed at construction. [`Roster::add`] either fully
//! succeeds (handle stored, entity attached) or fully fails with no
//! mutation; there is no dynamic growth and no deduplication.

use crate::{
    entity::Entity,
    store::{Detach, EntityId, EntityStore, ShareError},
};

/// Fixed-capacity, insertion-ordered sequence of shared entity handles.
#[derive(Debug)]
pub struct Roster<T> {
    capacity: usize,
    entries: Vec<EntityId<T>>,
}

impl<T> Roster<T> {
    /// Create an empty roster holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self { capacity, entries: Vec::with_capacity(capacity) }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the roster holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the roster is at capacity.
    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity
    }

    /// Maximum number of entries, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Handles in insertion order.
    pub fn entries(&self) -> &[EntityId<T>] {
        &self.entries
    }

    /// Append a handle and attach the entity.
    ///
    /// Returns `Ok(false)` with no mutation when the roster is full.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::Stale`] (no mutation) if the handle refers to
    /// a finalized entity.
    pub fn add(&mut self, store: &mut EntityStore<T>, id: EntityId<T>) -> Result<bool, ShareError> {
        if self.is_full() {
            return Ok(false);
        }
        store.attach(id)?;
        self.entries.push(id);
        Ok(true)
    }

    /// Unguarded append for composite operations that have already checked
    /// capacity and attached the entity themselves. Needed when a roster
    /// lives inside the same store it references (a course's prerequisite
    /// list), where `add` cannot borrow both at once.
    pub(crate) fn push(&mut self, id: EntityId<T>) {
        self.entries.push(id);
    }

    /// Whether the roster holds this exact entity, by handle identity.
    pub fn contains(&self, id: EntityId<T>) -> bool {
        self.entries.contains(&id)
    }

    /// Identity subset check: every entity of `other` appears in `self`.
    ///
    /// Handles are compared, never names: two distinct courses that happen
    /// to share a name do not satisfy each other. O(n·m) scan, false at the
    /// first unmatched entry.
    pub fn contains_all(&self, other: &Self) -> bool {
        other.entries.iter().all(|id| self.contains(*id))
    }

    /// Same capacity, same entries in order, every member attached once
    /// more: copying a roster multiplies holders, never entities.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::Stale`] if any entry refers to a finalized
    /// entity, which would mean the roster's own hold was lost.
    pub fn duplicate(&self, store: &mut EntityStore<T>) -> Result<Self, ShareError> {
        let mut copy = Self::new(self.capacity);
        for &id in &self.entries {
            store.attach(id)?;
            copy.entries.push(id);
        }
        Ok(copy)
    }

    /// Detach every entry in order and clear the roster.
    ///
    /// Returns the payloads of entities this release finalized; the caller
    /// must dismantle their nested rosters in turn. Teardown is explicit
    /// rather than `Drop`-driven because the store lives outside the
    /// roster.
    pub fn release(&mut self, store: &mut EntityStore<T>) -> Vec<T> {
        let mut finalized = Vec::new();
        for id in self.entries.drain(..) {
            match store.detach(id) {
                Ok(Detach::Finalized(value)) => finalized.push(value),
                Ok(Detach::Held { .. }) => {},
                Err(error) => {
                    tracing::warn!(?id, %error, "roster entry failed to detach during release");
                },
            }
        }
        finalized
    }
}

impl<T: Entity> Roster<T> {
    /// First entity whose name matches, scanning in insertion order.
    pub fn find(&self, store: &EntityStore<T>, name: &str) -> Option<EntityId<T>> {
        self.entries
            .iter()
            .copied()
            .find(|&id| store.get(id).is_ok_and(|entity| entity.matches(name)))
    }

    /// Short renderings of every entry, in insertion order.
    pub fn summaries(&self, store: &EntityStore<T>) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|&id| store.get(id).ok().map(Entity::summary))
            .collect()
    }
}
