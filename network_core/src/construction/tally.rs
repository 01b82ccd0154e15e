//! Encounter tally - links a resolved mention to the characters around it.

use std::collections::BTreeMap;

use super::{MentionWindow, NameCandidate};
use crate::error::NetworkResult;
use crate::matrix::EncounterMatrix;

/// Record one encounter between `mention` and each distinct other character in
/// the window. Returns the number of encounters recorded.
///
/// A character mentioned under several aliases counts once, under the alias seen
/// last. When the mention's own character shows up in the window, everything
/// collected before that point is discarded, so a quoted self-introduction
/// ("I am named Mirri Maz Duur") does not link back to names before it.
pub fn tally_neighbors(
    matrix: &mut EncounterMatrix,
    mention: &NameCandidate,
    window: &MentionWindow,
) -> NetworkResult<usize> {
    let index = matrix.character_of(&mention.alias)?;

    let mut neighbors: BTreeMap<usize, &str> = BTreeMap::new();
    for alias in window.mentions() {
        let other = matrix.character_of(alias)?;
        if other == index {
            neighbors.clear();
        } else {
            neighbors.insert(other, alias);
        }
    }

    let mut recorded = 0;
    for alias in neighbors.values() {
        if matrix.add_encounter_with_context(&mention.alias, alias, mention.position, &mention.context)? {
            recorded += 1;
        }
    }
    Ok(recorded)
}
