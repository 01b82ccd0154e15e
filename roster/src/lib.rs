//! # Roster
//!
//! The "cast sheet" crate - canonical character names, the alias index that maps
//! every known spelling of a character to its slot, and the optional metadata
//! table used when exporting node lists.
//!
//! This crate only holds data. Scanning text and building networks lives in
//! `network_core`.

pub mod characters;
pub mod error;
pub mod metadata;

pub use characters::*;
pub use error::*;
pub use metadata::*;
