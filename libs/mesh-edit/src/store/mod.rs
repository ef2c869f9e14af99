//! # Element Store
//!
//! Insertion-ordered arena with deferred erasure.
//!
//! ## Lifecycle
//!
//! ```text
//! insert ──► Live ──erase──► Erased ──compact──► Vacant
//! ```
//!
//! Erased elements stay readable until [`ElementStore::compact`] so that a
//! multi-step edit can still copy data out of elements it has condemned, and
//! so the validator can tell a reference to a condemned element apart from a
//! dangling one. Compaction frees storage without moving survivors, so every
//! surviving handle stays valid. Freed slots are handed out again under a
//! bumped generation, which makes old handles to them detectably stale.

pub mod handles;

#[cfg(test)]
mod tests;

pub use handles::{EdgeId, ElementKey, ElementRef, FaceId, HalfedgeId, VertexId};

use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// State of a single arena slot.
#[derive(Debug, Clone)]
enum Slot<T> {
    Live(T),
    Erased(T),
    Vacant,
}

/// A slot plus the generation of the handle that currently owns it.
#[derive(Debug, Clone)]
struct Entry<T> {
    generation: u32,
    slot: Slot<T>,
}

/// Next generation number, skipping the one reserved for `INVALID` handles.
fn bump(generation: u32) -> u32 {
    match generation.wrapping_add(1) {
        u32::MAX => 0,
        next => next,
    }
}

/// Arena owning every element of one kind.
///
/// # Example
///
/// ```rust
/// use mesh_edit::store::{ElementKey, ElementStore, VertexId};
///
/// let mut store: ElementStore<VertexId, f64> = ElementStore::new();
/// let a = store.insert(1.0);
/// let b = store.insert(2.0);
/// assert!(store.erase(a));
/// assert_eq!(store.len(), 1);
/// assert_eq!(store.get(a), Some(&1.0)); // still readable until compaction
/// assert_eq!(store.compact(), 1);
/// assert_eq!(store.get(a), None);
/// assert_eq!(store[b], 2.0);
///
/// // The freed slot is reused under a new generation
/// let c = store.insert(3.0);
/// assert_eq!(c.index(), a.index());
/// assert_eq!(store.get(a), None);
/// ```
#[derive(Debug, Clone)]
pub struct ElementStore<K, T> {
    entries: Vec<Entry<T>>,
    /// Generation given to slots pushed by this store.
    epoch: u32,
    /// Highest generation handed out so far.
    newest: u32,
    live: usize,
    condemned: Vec<u32>,
    free: Vec<u32>,
    _key: PhantomData<K>,
}

impl<K: ElementKey, T> Default for ElementStore<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ElementKey, T> ElementStore<K, T> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    fn starting_at(epoch: u32) -> Self {
        Self {
            entries: Vec::new(),
            epoch,
            newest: epoch,
            live: 0,
            condemned: Vec::new(),
            free: Vec::new(),
            _key: PhantomData,
        }
    }

    /// Inserts an element and returns its fresh handle.
    ///
    /// Slots freed by [`ElementStore::compact`] are reused first, each under
    /// a generation no earlier handle to that slot carries.
    pub fn insert(&mut self, value: T) -> K {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let entry = &mut self.entries[index as usize];
            let generation = bump(entry.generation.max(self.newest));
            entry.generation = generation;
            entry.slot = Slot::Live(value);
            self.newest = generation;
            return K::from_parts(generation, index);
        }
        let index = self.entries.len() as u32;
        self.entries.push(Entry {
            generation: self.epoch,
            slot: Slot::Live(value),
        });
        K::from_parts(self.epoch, index)
    }

    #[inline]
    fn slot(&self, key: K) -> Option<&Slot<T>> {
        let entry = self.entries.get(key.index() as usize)?;
        (entry.generation == key.generation()).then_some(&entry.slot)
    }

    #[inline]
    fn slot_mut(&mut self, key: K) -> Option<&mut Slot<T>> {
        let entry = self.entries.get_mut(key.index() as usize)?;
        (entry.generation == key.generation()).then_some(&mut entry.slot)
    }

    /// Resolves a live or erased (not yet compacted) element.
    pub fn get(&self, key: K) -> Option<&T> {
        match self.slot(key)? {
            Slot::Live(value) | Slot::Erased(value) => Some(value),
            Slot::Vacant => None,
        }
    }

    /// Mutable variant of [`ElementStore::get`].
    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        match self.slot_mut(key)? {
            Slot::Live(value) | Slot::Erased(value) => Some(value),
            Slot::Vacant => None,
        }
    }

    /// True if the handle refers to an element that has not been erased.
    pub fn is_live(&self, key: K) -> bool {
        matches!(self.slot(key), Some(Slot::Live(_)))
    }

    /// True if the handle refers to an element marked for removal.
    pub fn is_erased(&self, key: K) -> bool {
        matches!(self.slot(key), Some(Slot::Erased(_)))
    }

    /// Marks an element for removal. Idempotent; returns true only on the
    /// transition from live to erased.
    pub fn erase(&mut self, key: K) -> bool {
        let Some(slot) = self.slot_mut(key) else {
            return false;
        };
        match std::mem::replace(slot, Slot::Vacant) {
            Slot::Live(value) => {
                *slot = Slot::Erased(value);
                self.live -= 1;
                self.condemned.push(key.index());
                true
            }
            other => {
                *slot = other;
                false
            }
        }
    }

    /// Physically drops every erased element and makes its slot available
    /// for reuse. Returns how many were freed.
    pub fn compact(&mut self) -> usize {
        let freed = self.condemned.len();
        // Reused last-freed-first, so keep the lowest index on top
        self.condemned.sort_unstable_by(|a, b| b.cmp(a));
        for index in self.condemned.drain(..) {
            self.entries[index as usize].slot = Slot::Vacant;
            self.free.push(index);
        }
        freed
    }

    /// Removes everything and starts a new generation.
    pub fn clear(&mut self) {
        *self = self.successor();
    }

    /// Empty store whose handles never alias a handle issued by this one.
    pub fn successor(&self) -> Self {
        Self::starting_at(bump(self.newest))
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    /// True if no element is live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of erased elements awaiting compaction.
    #[inline]
    pub fn pending_erasures(&self) -> usize {
        self.condemned.len()
    }

    /// Number of compacted slots waiting to be reused.
    #[inline]
    pub fn vacant_slots(&self) -> usize {
        self.free.len()
    }

    /// Number of slots, live or not. Bounds the number of live elements.
    #[inline]
    pub fn capacity_hint(&self) -> usize {
        self.entries.len()
    }

    /// Live handles in slot order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Live elements with their handles, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| match &entry.slot {
                Slot::Live(value) => Some((K::from_parts(entry.generation, index as u32), value)),
                _ => None,
            })
    }

    /// Erased-but-not-compacted handles, in erasure order.
    pub fn erased_keys(&self) -> impl Iterator<Item = K> + '_ {
        self.condemned
            .iter()
            .map(|&index| K::from_parts(self.entries[index as usize].generation, index))
    }
}

impl<K: ElementKey, T> Index<K> for ElementStore<K, T> {
    type Output = T;

    /// Resolves a live or erased element.
    ///
    /// # Panics
    ///
    /// Panics on a stale or compacted handle. Operators only index handles
    /// they obtained from live links; use [`ElementStore::get`] when the
    /// handle may be dangling.
    #[allow(clippy::panic)]
    fn index(&self, key: K) -> &T {
        match self.get(key) {
            Some(value) => value,
            None => panic!("dangling element handle {key:?}"),
        }
    }
}

impl<K: ElementKey, T> IndexMut<K> for ElementStore<K, T> {
    #[allow(clippy::panic)]
    fn index_mut(&mut self, key: K) -> &mut T {
        match self.get_mut(key) {
            Some(value) => value,
            None => panic!("dangling element handle {key:?}"),
        }
    }
}
