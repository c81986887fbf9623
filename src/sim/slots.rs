//! Fixed-capacity slot arena with a free list
//!
//! Entries are addressed by slot index. Inserting into a full arena is a
//! no-op that hands the value back to the caller.

use serde::{Deserialize, Serialize};

/// Index of an occupied slot
pub type SlotIndex = usize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotArena<T> {
    slots: Vec<Option<T>>,
    /// Free slot indices; the next insert pops from the back
    free: Vec<SlotIndex>,
}

impl<T> SlotArena<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            free: (0..capacity).rev().collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.len() == self.slots.len()
    }

    pub fn is_full(&self) -> bool {
        self.free.is_empty()
    }

    /// Store `value` in a free slot, or give it back when every slot is taken
    pub fn insert(&mut self, value: T) -> Result<SlotIndex, T> {
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(value);
                Ok(index)
            }
            None => Err(value),
        }
    }

    pub fn remove(&mut self, index: SlotIndex) -> Option<T> {
        let value = self.slots.get_mut(index)?.take()?;
        self.free.push(index);
        Some(value)
    }

    pub fn get(&self, index: SlotIndex) -> Option<&T> {
        self.slots.get(index)?.as_ref()
    }

    pub fn get_mut(&mut self, index: SlotIndex) -> Option<&mut T> {
        self.slots.get_mut(index)?.as_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|v| (i, v)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SlotIndex, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|v| (i, v)))
    }

    /// Remove every entry matching `evict`, returning the freed slots and their values
    pub fn drain_where(&mut self, mut evict: impl FnMut(&T) -> bool) -> Vec<(SlotIndex, T)> {
        let doomed: Vec<SlotIndex> = self
            .iter()
            .filter(|(_, v)| evict(*v))
            .map(|(i, _)| i)
            .collect();
        doomed
            .into_iter()
            .filter_map(|i| self.remove(i).map(|v| (i, v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_insert_fills_lowest_slot_first() {
        let mut arena = SlotArena::with_capacity(3);
        assert_eq!(arena.insert('a'), Ok(0));
        assert_eq!(arena.insert('b'), Ok(1));
        assert_eq!(arena.remove(0), Some('a'));
        assert_eq!(arena.insert('c'), Ok(0));
    }

    #[test]
    fn test_full_arena_rejects_insert() {
        let mut arena = SlotArena::with_capacity(2);
        arena.insert(1).ok();
        arena.insert(2).ok();
        assert!(arena.is_full());
        assert_eq!(arena.insert(3), Err(3));
        let values: Vec<_> = arena.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![1, 2]);
    }

    #[test]
    fn test_remove_empty_slot_is_none() {
        let mut arena: SlotArena<u8> = SlotArena::with_capacity(2);
        assert_eq!(arena.remove(0), None);
        assert_eq!(arena.remove(9), None);
        assert!(arena.is_empty());
    }

    #[test]
    fn test_drain_where() {
        let mut arena = SlotArena::with_capacity(4);
        for v in [1, 2, 3, 4] {
            arena.insert(v).ok();
        }
        let removed = arena.drain_where(|v| v % 2 == 0);
        assert_eq!(removed, vec![(1, 2), (3, 4)]);
        assert_eq!(arena.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_len_never_exceeds_capacity(ops in proptest::collection::vec(any::<Option<u8>>(), 0..64)) {
            let mut arena = SlotArena::with_capacity(5);
            for op in ops {
                match op {
                    Some(v) => { let _ = arena.insert(v); }
                    None => {
                        let first = arena.iter().map(|(i, _)| i).next();
                        if let Some(i) = first {
                            arena.remove(i);
                        }
                    }
                }
                prop_assert!(arena.len() <= arena.capacity());
                prop_assert_eq!(arena.len(), arena.iter().count());
            }
        }
    }
}
