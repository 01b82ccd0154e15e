use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Roster parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Alias must not be empty")]
    EmptyAlias,

    #[error("Alias '{alias}' already maps to slot {existing}, cannot remap it to slot {requested}")]
    ConflictingAlias {
        alias: String,
        existing: usize,
        requested: usize,
    },

    #[error("Alias '{alias}' points at slot {slot}, but the roster only has {size} characters")]
    SlotOutOfRange {
        alias: String,
        slot: usize,
        size: usize,
    },
}

pub type RosterResult<T> = Result<T, RosterError>;
