//! Reference-counted entity storage.
//!
//! Courses and students are shared by many holders at once: the registry
//! catalog, prerequisite lists, taken-course lists, attendee rosters. The
//! store owns every entity outright and hands out typed generational
//! handles. Holders register themselves with [`EntityStore::attach`] and
//! release with [`EntityStore::detach`]; the entity is finalized exactly
//! once, on the detach that drops the holder count to zero, and its payload
//! is returned to that caller so nested rosters can be dismantled in turn.
//!
//! Vacating a slot bumps its generation, so a handle left over from a
//! finalized entity can never reach a recycled slot: every operation on it
//! reports [`ShareError::Stale`] instead.

use std::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
};

/// Typed handle to an entity living in an [`EntityStore`].
///
/// Identity comparison of handles is the identity comparison of entities:
/// two handles are equal exactly when they designate the same stored entity.
pub struct EntityId<T> {
    index: u32,
    generation: u32,
    _entity: PhantomData<fn() -> T>,
}

// Manual impls: the handle is Copy/Eq/Hash regardless of the payload type.
impl<T> Clone for EntityId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EntityId<T> {}

impl<T> PartialEq for EntityId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for EntityId<T> {}

impl<T> Hash for EntityId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> fmt::Debug for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({}v{})", self.index, self.generation)
    }
}

/// Errors from share-count bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ShareError {
    /// The handle refers to a finalized or never-allocated entity.
    #[error("stale handle: slot {index} generation {generation}")]
    Stale {
        /// Slot index of the stale handle.
        index: u32,
        /// Generation carried by the stale handle.
        generation: u32,
    },

    /// Detach on an entity that has no registered holders.
    #[error("detach without a matching attach: slot {index}")]
    Unheld {
        /// Slot index of the entity.
        index: u32,
    },
}

/// Result of a successful [`EntityStore::detach`].
#[derive(Debug, PartialEq, Eq)]
pub enum Detach<T> {
    /// Other holders remain; the entity stays in the store.
    Held {
        /// Holder count after the detach.
        remaining: u32,
    },

    /// The detach dropped the last holder. The entity has been removed from
    /// the store and its payload handed to the caller, who is responsible
    /// for dismantling any rosters nested inside it.
    Finalized(T),
}

struct Slot<T> {
    generation: u32,
    holders: u32,
    /// `None` marks a vacant slot awaiting reuse.
    value: Option<T>,
}

/// Slot store for one entity type.
///
/// Entities enter with [`EntityStore::insert`] at zero holders; every
/// collection that references an entity attaches, every collection that
/// lets go detaches. There is no implicit creator hold, so the count is
/// simply the number of roster entries referencing the entity.
pub struct EntityStore<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    live: usize,
}

impl<T> EntityStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self { slots: Vec::new(), free: Vec::new(), live: 0 }
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether the store holds no live entities.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Whether the handle designates a live entity.
    pub fn contains(&self, id: EntityId<T>) -> bool {
        self.slot(id).is_ok()
    }

    /// Store a new entity and return its handle. Holder count starts at
    /// zero; the first collection to accept the entity attaches it.
    pub fn insert(&mut self, value: T) -> EntityId<T> {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(index as usize) {
                slot.holders = 0;
                slot.value = Some(value);
                return EntityId { index, generation: slot.generation, _entity: PhantomData };
            }
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot { generation: 0, holders: 0, value: Some(value) });
        EntityId { index, generation: 0, _entity: PhantomData }
    }

    /// Register one more holder. Returns the new holder count.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::Stale`] if the entity was already finalized.
    pub fn attach(&mut self, id: EntityId<T>) -> Result<u32, ShareError> {
        let slot = self.slot_mut(id)?;
        slot.holders += 1;
        Ok(slot.holders)
    }

    /// Release one holder.
    ///
    /// On the transition to zero holders the slot is vacated, its
    /// generation advances, and the payload moves out to the caller as
    /// [`Detach::Finalized`]. Any later operation on the same handle is
    /// [`ShareError::Stale`]; finalization happens exactly once, by
    /// construction.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::Stale`] for a finalized entity and
    /// [`ShareError::Unheld`] for a detach without a matching attach.
    pub fn detach(&mut self, id: EntityId<T>) -> Result<Detach<T>, ShareError> {
        let slot = self.slot_mut(id)?;
        match slot.holders {
            0 => Err(ShareError::Unheld { index: id.index }),
            1 => {
                slot.holders = 0;
                slot.generation = slot.generation.wrapping_add(1);
                let value = slot
                    .value
                    .take()
                    .ok_or(ShareError::Stale { index: id.index, generation: id.generation })?;
                self.free.push(id.index);
                self.live -= 1;
                Ok(Detach::Finalized(value))
            },
            n => {
                slot.holders = n - 1;
                Ok(Detach::Held { remaining: n - 1 })
            },
        }
    }

    /// Borrow an entity.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::Stale`] if the entity was already finalized.
    pub fn get(&self, id: EntityId<T>) -> Result<&T, ShareError> {
        self.slot(id)?
            .value
            .as_ref()
            .ok_or(ShareError::Stale { index: id.index, generation: id.generation })
    }

    /// Borrow an entity mutably.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::Stale`] if the entity was already finalized.
    pub fn get_mut(&mut self, id: EntityId<T>) -> Result<&mut T, ShareError> {
        let generation = id.generation;
        let index = id.index;
        self.slot_mut(id)?
            .value
            .as_mut()
            .ok_or(ShareError::Stale { index, generation })
    }

    /// Current holder count of an entity.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::Stale`] if the entity was already finalized.
    pub fn holders(&self, id: EntityId<T>) -> Result<u32, ShareError> {
        Ok(self.slot(id)?.holders)
    }

    fn slot(&self, id: EntityId<T>) -> Result<&Slot<T>, ShareError> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation && slot.value.is_some())
            .ok_or(ShareError::Stale { index: id.index, generation: id.generation })
    }

    fn slot_mut(&mut self, id: EntityId<T>) -> Result<&mut Slot<T>, ShareError> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation && slot.value.is_some())
            .ok_or(ShareError::Stale { index: id.index, generation: id.generation })
    }
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EntityStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityStore")
            .field("live", &self.live)
            .field("slots", &self.slots.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_then_detach_round_trips_count() {
        let mut store = EntityStore::new();
        let id = store.insert("algebra".to_string());

        assert_eq!(store.attach(id), Ok(1));
        assert_eq!(store.attach(id), Ok(2));
        assert_eq!(store.detach(id), Ok(Detach::Held { remaining: 1 }));
        assert_eq!(store.holders(id), Ok(1));
    }

    #[test]
    fn last_detach_finalizes_and_returns_payload() {
        let mut store = EntityStore::new();
        let id = store.insert("algebra".to_string());

        assert_eq!(store.attach(id), Ok(1));
        assert_eq!(store.detach(id), Ok(Detach::Finalized("algebra".to_string())));
        assert!(store.is_empty());
    }

    #[test]
    fn operations_on_finalized_entity_are_stale() {
        let mut store = EntityStore::new();
        let id = store.insert(7u32);
        assert_eq!(store.attach(id), Ok(1));
        assert!(matches!(store.detach(id), Ok(Detach::Finalized(7))));

        assert!(matches!(store.attach(id), Err(ShareError::Stale { .. })));
        assert!(matches!(store.detach(id), Err(ShareError::Stale { .. })));
        assert!(matches!(store.get(id), Err(ShareError::Stale { .. })));
        assert!(!store.contains(id));
    }

    #[test]
    fn detach_without_holders_is_unheld() {
        let mut store = EntityStore::new();
        let id = store.insert(7u32);
        assert!(matches!(store.detach(id), Err(ShareError::Unheld { .. })));
    }

    #[test]
    fn recycled_slot_does_not_alias_old_handle() {
        let mut store = EntityStore::new();
        let first = store.insert("first".to_string());
        assert_eq!(store.attach(first), Ok(1));
        assert!(matches!(store.detach(first), Ok(Detach::Finalized(_))));

        // Reuses the vacated slot under a new generation.
        let second = store.insert("second".to_string());
        assert_ne!(first, second);
        assert!(matches!(store.get(first), Err(ShareError::Stale { .. })));
        assert_eq!(store.get(second), Ok(&"second".to_string()));
    }
}
