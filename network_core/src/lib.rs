//! # Network Core
//!
//! Builds a weighted co-occurrence network of characters from raw narrative
//! text. Two characters "meet" whenever their names appear within a small
//! window of words of each other; every meeting adds one to their shared edge.
//!
//! ## Core Components
//!
//! - **construction**: Streaming scanner that resolves aliases and tallies encounters
//! - **matrix**: The symmetric encounter matrix, its encounter log, and cleaning passes
//! - **export**: Dense CSV/JSON matrices, Gephi-style edge lists, and node lists
//! - **pipeline**: Construction followed by the configured cleaning passes
//!
//! Character names, aliases, and metadata come from the `roster` crate.

pub mod config;
pub mod construction;
pub mod error;
pub mod export;
pub mod matrix;
pub mod pipeline;
pub mod report;

#[cfg(test)]
mod testing;

pub use config::*;
pub use construction::*;
pub use error::*;
pub use export::*;
pub use matrix::*;
pub use pipeline::*;
pub use report::*;
