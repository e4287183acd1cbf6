use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::error::UsageError;

/// Marker for a resource kind. Handles and arenas are typed by kind so a
/// mesh handle cannot index the texture table.
pub trait Resource {
    /// Short name used in usage-error messages.
    const KIND: &'static str;
}

/// Typed index into an [`Arena`].
///
/// Handles are dense and append-only: the `n`-th resource of a kind gets
/// index `n`. A handle stays valid for the arena's lifetime, including across
/// hot-swaps of its payload.
pub struct Handle<T> {
    index: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    pub(crate) const fn new(index: u32) -> Self {
        Self { index, _marker: PhantomData }
    }

    #[inline]
    pub fn index(self) -> u32 {
        self.index
    }
}

// Manual impls: derives would require `T: Clone` etc.
impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Handle<T> {}

impl<T> PartialOrd for Handle<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Handle<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T: Resource> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", T::KIND, self.index)
    }
}

struct Slot<T> {
    generation: u32,
    value: T,
}

/// Append-only, generation-checked table for one resource kind `K`.
pub struct Arena<K, T> {
    slots: Vec<Slot<T>>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: Resource, T> Arena<K, T> {
    pub fn new() -> Self {
        Self { slots: Vec::new(), _kind: PhantomData }
    }

    pub fn insert(&mut self, value: T) -> Handle<K> {
        let index = self.slots.len() as u32;
        self.slots.push(Slot { generation: 0, value });
        Handle::new(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn try_get(&self, handle: Handle<K>) -> Option<&T> {
        self.slots.get(handle.index as usize).map(|s| &s.value)
    }

    /// Returns the resource behind `handle`.
    ///
    /// # Panics
    ///
    /// Panics with a [`UsageError`] when `handle` is out of range.
    #[track_caller]
    pub fn get(&self, handle: Handle<K>) -> &T {
        match self.try_get(handle) {
            Some(value) => value,
            None => self.out_of_range(handle),
        }
    }

    /// Generation of the slot: 0 at insertion, +1 per [`replace`](Self::replace).
    #[track_caller]
    pub fn generation(&self, handle: Handle<K>) -> u32 {
        match self.slots.get(handle.index as usize) {
            Some(slot) => slot.generation,
            None => self.out_of_range(handle),
        }
    }

    /// Swaps in a new payload under the same handle and returns the old one.
    #[track_caller]
    pub fn replace(&mut self, handle: Handle<K>, value: T) -> T {
        let len = self.slots.len();
        let Some(slot) = self.slots.get_mut(handle.index as usize) else {
            UsageError::HandleOutOfRange { kind: K::KIND, index: handle.index, len }.raise()
        };
        slot.generation = slot.generation.wrapping_add(1);
        std::mem::replace(&mut slot.value, value)
    }

    /// Empties the table, yielding every payload. Handles issued before are
    /// invalid afterwards.
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.slots.drain(..).map(|s| s.value)
    }

    #[track_caller]
    fn out_of_range(&self, handle: Handle<K>) -> ! {
        UsageError::HandleOutOfRange {
            kind: K::KIND,
            index: handle.index,
            len: self.slots.len(),
        }
        .raise()
    }
}

impl<K: Resource, T> Default for Arena<K, T> {
    fn default() -> Self {
        Self::new()
    }
}
