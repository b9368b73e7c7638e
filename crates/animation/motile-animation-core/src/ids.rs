//! Generation-checked handles and a slot arena.
//!
//! A handle stays valid until its slot is freed; reusing the slot bumps the
//! generation, so stale handles resolve to `None` instead of to whatever now
//! lives there.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Handle {
    pub index: u32,
    pub generation: u32,
}

/// Animated value stored in the manager.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ValueId(pub Handle);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct WindowId(pub Handle);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct WorkspaceId(pub Handle);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LayerId(pub Handle);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct MonitorId(pub u32);

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    item: Option<T>,
}

/// Dense storage with free-list reuse.
#[derive(Debug)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: T) -> Handle {
        self.insert_with(|_| item)
    }

    /// Insert an item that needs to know its own handle (e.g. to name itself
    /// as the owner of values it creates).
    pub fn insert_with(&mut self, make: impl FnOnce(Handle) -> T) -> Handle {
        if let Some(&index) = self.free.last() {
            let handle = Handle {
                index,
                generation: self.slots[index as usize].generation,
            };
            let item = make(handle);
            self.free.pop();
            self.slots[index as usize].item = Some(item);
            self.len += 1;
            return handle;
        }
        let handle = Handle {
            index: self.slots.len() as u32,
            generation: 0,
        };
        let item = make(handle);
        self.slots.push(Slot {
            generation: 0,
            item: Some(item),
        });
        self.len += 1;
        handle
    }

    /// Free the slot; stale or already-removed handles return `None`.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let item = slot.item.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Some(item)
    }

    #[inline]
    pub fn get(&self, handle: Handle) -> Option<&T> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.item.as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.item.as_mut()
    }

    #[inline]
    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.item.as_ref().map(|item| {
                (
                    Handle {
                        index: i as u32,
                        generation: s.generation,
                    },
                    item,
                )
            })
        })
    }
}
