//! Alias index - every known spelling of a character mapped to its slot.

use std::collections::HashMap;

use crate::error::{RosterError, RosterResult};

/// Immutable-after-construction mapping from alias text to a character slot.
///
/// Aliases keep their registration order. Matchers that need a deterministic
/// winner between two equally long aliases rely on this order: the earlier
/// registration wins.
#[derive(Debug, Clone, Default)]
pub struct AliasIndex {
    /// Aliases in registration order.
    entries: Vec<(String, usize)>,

    /// Index: alias -> slot.
    lookup: HashMap<String, usize>,
}

impl AliasIndex {
    /// Create a new empty alias index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from `(alias, slot)` pairs, in order.
    pub fn from_pairs<I, S>(pairs: I) -> RosterResult<Self>
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let mut index = Self::new();
        for (alias, slot) in pairs {
            index.insert(alias, slot)?;
        }
        Ok(index)
    }

    /// Register an alias for a slot.
    ///
    /// Returns `false` if the alias was already registered for the same slot.
    /// Registering an alias for a second, different slot is an error.
    pub fn insert(&mut self, alias: impl Into<String>, slot: usize) -> RosterResult<bool> {
        let alias = alias.into();
        if alias.is_empty() {
            return Err(RosterError::EmptyAlias);
        }

        match self.lookup.get(&alias) {
            Some(&existing) if existing == slot => Ok(false),
            Some(&existing) => Err(RosterError::ConflictingAlias {
                alias,
                existing,
                requested: slot,
            }),
            None => {
                self.lookup.insert(alias.clone(), slot);
                self.entries.push((alias, slot));
                Ok(true)
            }
        }
    }

    /// Get the slot an alias maps to.
    pub fn slot(&self, alias: &str) -> Option<usize> {
        self.lookup.get(alias).copied()
    }

    /// Check if an alias is registered.
    pub fn contains(&self, alias: &str) -> bool {
        self.lookup.contains_key(alias)
    }

    /// Iterate over `(alias, slot)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(alias, slot)| (alias.as_str(), *slot))
    }

    /// All aliases registered for a slot, in registration order.
    pub fn aliases_of(&self, slot: usize) -> Vec<&str> {
        self.iter()
            .filter(|(_, s)| *s == slot)
            .map(|(alias, _)| alias)
            .collect()
    }

    /// Largest slot referenced by any alias.
    pub fn max_slot(&self) -> Option<usize> {
        self.entries.iter().map(|(_, slot)| *slot).max()
    }

    /// Get the number of registered aliases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
