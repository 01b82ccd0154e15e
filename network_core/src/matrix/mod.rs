//! Encounter matrix - the weighted, symmetric character network.
//!
//! The matrix has two lifecycle stages:
//! - **Construction**: encounters are added and counts grow
//! - **Cleaned**: once any cleaning pass runs, rows may have been removed and the
//!   matrix is read-only for good

mod cleaner;
mod encounter;

pub use cleaner::*;
pub use encounter::*;

use roster::{AliasIndex, Roster};
use std::collections::BTreeSet;

use crate::error::{NetworkError, NetworkResult};

/// Symmetric co-occurrence counts between characters, plus the encounter log
/// the counts summarize.
///
/// Invariants: `weights[i][j] == weights[j][i]` and `weights[i][i] == 0`.
#[derive(Debug, Clone)]
pub struct EncounterMatrix {
    /// Canonical names, indexed by row.
    characters: Vec<String>,

    /// Alias -> slot, fixed at creation. Slots refer to the original roster order.
    aliases: AliasIndex,

    /// Maps an original roster slot to its current row; `None` once removed.
    rows_by_slot: Vec<Option<usize>>,

    weights: Vec<Vec<u32>>,

    encounters: Vec<Encounter>,

    modifiable: bool,
}

impl EncounterMatrix {
    /// Create an empty matrix over a roster.
    pub fn new(roster: Roster) -> Self {
        let (characters, aliases) = roster.into_parts();
        let size = characters.len();
        Self {
            characters,
            aliases,
            rows_by_slot: (0..size).map(Some).collect(),
            weights: vec![vec![0; size]; size],
            encounters: Vec::new(),
            modifiable: true,
        }
    }

    /// Get the number of characters, which is also the matrix height and width.
    pub fn size(&self) -> usize {
        self.characters.len()
    }

    /// Canonical names, indexed by row.
    pub fn characters(&self) -> &[String] {
        &self.characters
    }

    pub fn aliases(&self) -> &AliasIndex {
        &self.aliases
    }

    /// The raw rows of the matrix.
    pub fn weights(&self) -> &[Vec<u32>] {
        &self.weights
    }

    /// Get the weight between two rows.
    pub fn weight(&self, row: usize, col: usize) -> Option<u32> {
        self.weights.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Get the weight between two characters by canonical name.
    pub fn weight_between(&self, name1: &str, name2: &str) -> Option<u32> {
        self.weight(self.index_of(name1)?, self.index_of(name2)?)
    }

    /// Get the row of a character by canonical name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.characters.iter().position(|c| c == name)
    }

    /// Resolve an alias to its current row.
    pub fn character_of(&self, alias: &str) -> NetworkResult<usize> {
        self.aliases
            .slot(alias)
            .and_then(|slot| self.rows_by_slot.get(slot).copied().flatten())
            .ok_or_else(|| NetworkError::UnknownAlias(alias.to_string()))
    }

    /// Whether encounters can still be added.
    pub fn is_modifiable(&self) -> bool {
        self.modifiable
    }

    /// Add an encounter with no context text.
    pub fn add_encounter(&mut self, name1: &str, name2: &str, position: usize) -> NetworkResult<bool> {
        self.add_encounter_with_context(name1, name2, position, "")
    }

    /// Add an encounter to the matrix and encounter log.
    ///
    /// Silently skipped (returns `Ok(false)`) when one alias contains the other,
    /// or when both resolve to the same character. Nothing else is checked, so two
    /// calls at the same position count twice.
    pub fn add_encounter_with_context(
        &mut self,
        name1: &str,
        name2: &str,
        position: usize,
        context: &str,
    ) -> NetworkResult<bool> {
        if !self.modifiable {
            return Err(NetworkError::Frozen);
        }

        // One alias inside the other is the same mention seen twice, not two people.
        if name1.contains(name2) || name2.contains(name1) {
            return Ok(false);
        }

        let index1 = self.character_of(name1)?;
        let index2 = self.character_of(name2)?;
        if index1 == index2 {
            return Ok(false);
        }

        self.weights[index1][index2] += 1;
        self.weights[index2][index1] += 1;
        self.encounters.push(Encounter {
            character1: self.characters[index1].clone(),
            alias1: name1.to_string(),
            character2: self.characters[index2].clone(),
            alias2: name2.to_string(),
            position,
            context: context.to_string(),
        });
        Ok(true)
    }

    /// Every recorded encounter, ordered by position.
    pub fn encounters(&self) -> Vec<&Encounter> {
        let mut encounters: Vec<_> = self.encounters.iter().collect();
        encounters.sort_by_key(|e| e.position);
        encounters
    }

    /// Encounters involving a name (canonical or alias), ordered by position.
    pub fn encounters_for(&self, name: &str) -> Vec<&Encounter> {
        let mut encounters: Vec<_> = self.encounters.iter().filter(|e| e.involves(name)).collect();
        encounters.sort_by_key(|e| e.position);
        encounters
    }

    /// Get the total number of recorded encounters.
    pub fn encounter_count(&self) -> usize {
        self.encounters.len()
    }

    /// Number of positive-weight neighbors of a row.
    pub fn degree(&self, row: usize) -> usize {
        self.weights
            .get(row)
            .map(|r| r.iter().filter(|w| **w > 0).count())
            .unwrap_or(0)
    }

    /// Drop rows and columns, preserving the order of the survivors.
    ///
    /// Freezes the matrix even when nothing is removed. Returns the removed names.
    fn remove_rows(&mut self, removed: &BTreeSet<usize>) -> Vec<String> {
        self.modifiable = false;
        if removed.is_empty() {
            return Vec::new();
        }

        let keep: Vec<usize> = (0..self.size()).filter(|i| !removed.contains(i)).collect();
        let removed_names = removed
            .iter()
            .filter_map(|i| self.characters.get(*i).cloned())
            .collect();

        self.weights = keep
            .iter()
            .map(|&i| keep.iter().map(|&j| self.weights[i][j]).collect())
            .collect();
        self.characters = keep.iter().map(|&i| self.characters[i].clone()).collect();

        for row in self.rows_by_slot.iter_mut() {
            *row = row.and_then(|old| keep.iter().position(|&k| k == old));
        }

        removed_names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::roster;

    fn stark_matrix() -> EncounterMatrix {
        EncounterMatrix::new(roster(&[
            ("Jon Snow", &["Jon"]),
            ("Samwell Tarly", &["Sam"]),
            ("Eddard Stark", &["Ned"]),
        ]))
    }

    fn assert_symmetric(matrix: &EncounterMatrix) {
        for i in 0..matrix.size() {
            assert_eq!(matrix.weight(i, i), Some(0));
            for j in 0..matrix.size() {
                assert_eq!(matrix.weight(i, j), matrix.weight(j, i));
            }
        }
    }

    #[test]
    fn test_new_matrix_is_empty() {
        let matrix = stark_matrix();
        assert_eq!(matrix.size(), 3);
        assert!(matrix.is_modifiable());
        assert_eq!(matrix.encounter_count(), 0);
        assert!(matrix.weights().iter().flatten().all(|w| *w == 0));
    }

    #[test]
    fn test_add_encounter_is_symmetric() {
        let mut matrix = stark_matrix();

        assert!(matrix.add_encounter("Jon", "Samwell Tarly", 10).unwrap());
        assert!(matrix.add_encounter("Sam", "Ned", 20).unwrap());
        assert!(matrix.add_encounter("Jon", "Sam", 30).unwrap());

        assert_eq!(matrix.weight_between("Jon Snow", "Samwell Tarly"), Some(2));
        assert_eq!(matrix.weight_between("Samwell Tarly", "Jon Snow"), Some(2));
        assert_eq!(matrix.weight_between("Samwell Tarly", "Eddard Stark"), Some(1));
        assert_eq!(matrix.weight_between("Jon Snow", "Eddard Stark"), Some(0));
        assert_eq!(matrix.encounter_count(), 3);
        assert_symmetric(&matrix);
    }

    #[test]
    fn test_self_and_substring_encounters_ignored() {
        let mut matrix = stark_matrix();

        assert!(!matrix.add_encounter("Jon", "Jon Snow", 5).unwrap());
        assert!(!matrix.add_encounter("Jon", "Jon", 6).unwrap());

        assert_eq!(matrix.encounter_count(), 0);
        assert!(matrix.weights().iter().flatten().all(|w| *w == 0));
    }

    #[test]
    fn test_unknown_alias_is_an_error() {
        let mut matrix = stark_matrix();
        let err = matrix.add_encounter("Jon", "Ghost", 1).unwrap_err();
        assert!(matches!(err, NetworkError::UnknownAlias(alias) if alias == "Ghost"));
        assert_eq!(matrix.encounter_count(), 0);
    }

    #[test]
    fn test_encounter_records_use_canonical_names() {
        let mut matrix = stark_matrix();
        matrix
            .add_encounter_with_context("Ned", "Jon", 7, "Ned looked at Jon")
            .unwrap();

        let encounter = matrix.encounters()[0];
        assert_eq!(encounter.character1, "Eddard Stark");
        assert_eq!(encounter.alias1, "Ned");
        assert_eq!(encounter.character2, "Jon Snow");
        assert_eq!(encounter.alias2, "Jon");
        assert_eq!(encounter.context, "Ned looked at Jon");
    }

    #[test]
    fn test_encounters_sorted_by_position() {
        let mut matrix = stark_matrix();
        matrix.add_encounter("Sam", "Ned", 50).unwrap();
        matrix.add_encounter("Jon", "Sam", 10).unwrap();
        matrix.add_encounter("Jon", "Ned", 30).unwrap();

        let positions: Vec<_> = matrix.encounters().iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![10, 30, 50]);

        let positions: Vec<_> = matrix.encounters_for("Ned").iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![30, 50]);

        assert_eq!(matrix.encounters_for("Samwell Tarly").len(), 2);
    }

    #[test]
    fn test_remove_rows_compacts_and_freezes() {
        let mut matrix = stark_matrix();
        matrix.add_encounter("Jon", "Sam", 1).unwrap();
        matrix.add_encounter("Sam", "Ned", 2).unwrap();
        matrix.add_encounter("Sam", "Ned", 3).unwrap();

        let removed = matrix.remove_rows(&BTreeSet::from([0]));
        assert_eq!(removed, vec!["Jon Snow".to_string()]);
        assert_eq!(matrix.characters(), ["Samwell Tarly", "Eddard Stark"]);
        assert_eq!(matrix.weights(), [vec![0u32, 2], vec![2, 0]]);
        assert!(!matrix.is_modifiable());

        assert_eq!(matrix.character_of("Ned").unwrap(), 1);
        assert!(matches!(matrix.character_of("Jon"), Err(NetworkError::UnknownAlias(_))));
    }

    #[test]
    fn test_frozen_matrix_rejects_encounters() {
        let mut matrix = stark_matrix();
        matrix.remove_rows(&BTreeSet::new());

        assert_eq!(matrix.size(), 3);
        assert!(matches!(
            matrix.add_encounter("Jon", "Sam", 1),
            Err(NetworkError::Frozen)
        ));
    }
}
