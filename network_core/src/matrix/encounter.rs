//! Encounter records - individual co-mention events behind the matrix counts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One observed co-occurrence of two distinct characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    /// Canonical name of the first character.
    pub character1: String,

    /// The alias the first character was mentioned by.
    pub alias1: String,

    pub character2: String,
    pub alias2: String,

    /// Character offset into the source text at detection time.
    pub position: usize,

    /// Trailing text the first mention was matched against.
    pub context: String,
}

impl Encounter {
    /// Check if this encounter involves a name, either canonical or as mentioned.
    pub fn involves(&self, name: &str) -> bool {
        self.character1 == name
            || self.character2 == name
            || self.alias1 == name
            || self.alias2 == name
    }
}

impl fmt::Display for Encounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({}) & {} ({})",
            self.position, self.character1, self.alias1, self.character2, self.alias2
        )
    }
}
