//! Character roster - canonical names plus the aliases that refer to them.

mod alias;

pub use alias::*;

use serde::{Deserialize, Serialize};

use crate::error::{RosterError, RosterResult};

/// One character as written in a roster file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterEntry {
    /// Canonical display name.
    pub name: String,

    /// Additional spellings, nicknames, and titles.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl CharacterEntry {
    /// Create an entry with no extra aliases.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
        }
    }

    /// Add an alias to this entry.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }
}

#[derive(Debug, Deserialize)]
struct RosterFile {
    #[serde(default)]
    characters: Vec<CharacterEntry>,
}

/// The ordered set of characters a network is built over.
///
/// Slot `i` has the canonical name `characters()[i]`. Every canonical name is
/// also registered as an alias of its own slot.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    characters: Vec<String>,
    aliases: AliasIndex,
}

impl Roster {
    /// Create a new empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a roster from an externally built character list and alias index.
    ///
    /// Every alias must point at an existing slot. Canonical names are not
    /// added to the index automatically here.
    pub fn from_parts(characters: Vec<String>, aliases: AliasIndex) -> RosterResult<Self> {
        let size = characters.len();
        if let Some((alias, slot)) = aliases.iter().find(|(_, slot)| *slot >= size) {
            return Err(RosterError::SlotOutOfRange {
                alias: alias.to_string(),
                slot,
                size,
            });
        }
        Ok(Self { characters, aliases })
    }

    /// Parse a roster from TOML.
    ///
    /// ```toml
    /// [[characters]]
    /// name = "Jon Snow"
    /// aliases = ["Jon", "Lord Snow"]
    /// ```
    pub fn from_toml_str(source: &str) -> RosterResult<Self> {
        let file: RosterFile = toml::from_str(source)?;
        Self::from_entries(file.characters)
    }

    /// Build a roster from entries, assigning slots in order.
    pub fn from_entries(entries: impl IntoIterator<Item = CharacterEntry>) -> RosterResult<Self> {
        let mut roster = Self::new();
        for entry in entries {
            roster.add_entry(entry)?;
        }
        Ok(roster)
    }

    /// Add a character with extra aliases, returning its slot.
    pub fn add_character<I, S>(&mut self, name: impl Into<String>, aliases: I) -> RosterResult<usize>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_entry(CharacterEntry {
            name: name.into(),
            aliases: aliases.into_iter().map(Into::into).collect(),
        })
    }

    /// Add a character entry, returning its slot.
    ///
    /// The roster is left untouched when any alias is empty or already taken.
    pub fn add_entry(&mut self, entry: CharacterEntry) -> RosterResult<usize> {
        let slot = self.characters.len();

        let mut spellings = vec![entry.name.clone()];
        for alias in entry.aliases {
            if !spellings.contains(&alias) {
                spellings.push(alias);
            }
        }

        for alias in &spellings {
            if alias.is_empty() {
                return Err(RosterError::EmptyAlias);
            }
            if let Some(existing) = self.aliases.slot(alias) {
                return Err(RosterError::ConflictingAlias {
                    alias: alias.clone(),
                    existing,
                    requested: slot,
                });
            }
        }

        for alias in spellings {
            self.aliases.insert(alias, slot)?;
        }
        self.characters.push(entry.name);
        Ok(slot)
    }

    /// Canonical names, indexed by slot.
    pub fn characters(&self) -> &[String] {
        &self.characters
    }

    /// The alias index.
    pub fn aliases(&self) -> &AliasIndex {
        &self.aliases
    }

    /// Get the slot an alias refers to.
    pub fn slot_of(&self, alias: &str) -> Option<usize> {
        self.aliases.slot(alias)
    }

    /// Get the canonical name of a slot.
    pub fn name_of(&self, slot: usize) -> Option<&str> {
        self.characters.get(slot).map(String::as_str)
    }

    /// Get the number of characters.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Split the roster into its character list and alias index.
    pub fn into_parts(self) -> (Vec<String>, AliasIndex) {
        (self.characters, self.aliases)
    }
}
