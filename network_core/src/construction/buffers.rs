//! Buffers for the construction pass: undecided candidates and the mention window.

use std::collections::VecDeque;

/// A known alias detected at a word boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCandidate {
    pub alias: String,

    /// Character offset of the boundary that ended the alias.
    pub position: usize,

    /// Trailing context the alias was matched against.
    pub context: String,
}

impl NameCandidate {
    /// Check if this alias is a strict part of another candidate's alias,
    /// e.g. "Drogo" inside "Khal Drogo".
    pub fn is_nested_in(&self, other: &NameCandidate) -> bool {
        other.alias != self.alias && other.alias.contains(&self.alias)
    }
}

/// FIFO of word-boundary results whose fate is not decided yet.
///
/// `None` entries are words that matched no alias.
#[derive(Debug, Clone, Default)]
pub struct PendingBuffer {
    entries: VecDeque<Option<NameCandidate>>,
}

impl PendingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: Option<NameCandidate>) {
        self.entries.push_back(entry);
    }

    /// Take the oldest entry.
    pub fn pop(&mut self) -> Option<Option<NameCandidate>> {
        self.entries.pop_front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The last `capacity` resolved mention slots, oldest first.
///
/// `None` is a placeholder for "no name here". Slots pushed past capacity evict
/// the oldest one.
#[derive(Debug, Clone)]
pub struct MentionWindow {
    slots: VecDeque<Option<String>>,
    capacity: usize,
}

impl MentionWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Push a slot, returning the evicted one if the window was full.
    pub fn push(&mut self, slot: Option<String>) -> Option<Option<String>> {
        self.slots.push_back(slot);
        if self.slots.len() > self.capacity {
            self.slots.pop_front()
        } else {
            None
        }
    }

    /// Aliases in the window, oldest first, skipping empty slots.
    pub fn mentions(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().filter_map(|slot| slot.as_deref())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
