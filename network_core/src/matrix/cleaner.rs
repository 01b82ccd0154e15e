//! Graph cleaning passes - noise, floaters, and singletons.
//!
//! Every pass freezes the matrix, whether or not it removes anyone. Each pass
//! returns a human-readable log of what it removed.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use tracing::info;

use super::EncounterMatrix;
use crate::error::{NetworkError, NetworkResult};
use crate::report::TextLog;

/// Configuration for the cleaning stage of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Edges lighter than this are treated as noise.
    pub noise_threshold: u32,

    /// Row the floater search starts from.
    pub entry_point: usize,

    pub clean_floaters: bool,

    pub clean_singletons: bool,

    /// Fixed number of singleton passes. `None` repeats until nothing changes.
    pub singleton_iterations: Option<usize>,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            noise_threshold: 3,
            entry_point: 0,
            clean_floaters: true,
            clean_singletons: false,
            singleton_iterations: None,
        }
    }
}

impl EncounterMatrix {
    /// Zero every edge lighter than `threshold`, then remove characters left
    /// without any edge.
    pub fn clean_noise(&mut self, threshold: u32) -> TextLog {
        let mut log = TextLog::new();
        log.log("Removing noisy connections:");

        let size = self.size();
        for i in 0..size {
            for j in (i + 1)..size {
                let weight = self.weights[i][j];
                if weight > 0 && weight < threshold {
                    log.log(format!(
                        "{}, {}, {}",
                        self.characters[i], self.characters[j], weight
                    ));
                    self.weights[i][j] = 0;
                    self.weights[j][i] = 0;
                }
            }
            self.weights[i][i] = 0;
        }

        let loners: BTreeSet<usize> = (0..size).filter(|&i| self.degree(i) == 0).collect();
        let removed = self.remove_rows(&loners);
        info!(threshold, removed = removed.len(), "Cleaned noise");
        log.log(format!("Removing loners: {}", removed.join(" ")));
        log
    }

    /// Remove characters not connected to row 0.
    pub fn clean_floaters(&mut self) -> NetworkResult<TextLog> {
        self.clean_floaters_from(0)
    }

    /// Remove characters not reachable from `entry_point` over positive edges.
    ///
    /// On an edgeless graph this removes everyone except the entry point.
    pub fn clean_floaters_from(&mut self, entry_point: usize) -> NetworkResult<TextLog> {
        let size = self.size();
        if entry_point >= size {
            return Err(NetworkError::EntryPointOutOfRange {
                entry: entry_point,
                size,
            });
        }

        let mut reached = vec![false; size];
        let mut queue = VecDeque::from([entry_point]);
        reached[entry_point] = true;

        while let Some(row) = queue.pop_front() {
            for (col, weight) in self.weights[row].iter().enumerate() {
                if *weight > 0 && !reached[col] {
                    reached[col] = true;
                    queue.push_back(col);
                }
            }
        }

        let floaters: BTreeSet<usize> = (0..size).filter(|&i| !reached[i]).collect();
        let removed = self.remove_rows(&floaters);
        info!(entry_point, removed = removed.len(), "Cleaned floaters");

        let mut log = TextLog::new();
        log.log(format!("Removing floating characters: {}", removed.join(" ")));
        Ok(log)
    }

    /// Repeatedly remove characters with fewer than two neighbors until none are left.
    pub fn clean_singletons(&mut self) -> TextLog {
        let mut log = TextLog::new();
        loop {
            let removed = self.remove_singletons();
            log.log(format!("Removing singletons: {}", removed.join(" ")));
            if removed.is_empty() {
                break;
            }
        }
        log
    }

    /// Remove characters with fewer than two neighbors, exactly `iterations` times.
    pub fn clean_singletons_bounded(&mut self, iterations: usize) -> TextLog {
        self.modifiable = false;
        let mut log = TextLog::new();
        for _ in 0..iterations {
            let removed = self.remove_singletons();
            log.log(format!("Removing singletons: {}", removed.join(" ")));
        }
        log
    }

    fn remove_singletons(&mut self) -> Vec<String> {
        let singletons: BTreeSet<usize> = (0..self.size()).filter(|&i| self.degree(i) < 2).collect();
        let removed = self.remove_rows(&singletons);
        info!(removed = removed.len(), "Cleaned singletons");
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::alias_roster;

    /// Matrix over single-letter characters with the given weighted edges.
    fn graph(names: &[&str], edges: &[(&str, &str, u32)]) -> EncounterMatrix {
        let aliases: Vec<(&str, usize)> = names.iter().enumerate().map(|(i, n)| (*n, i)).collect();
        let mut matrix = EncounterMatrix::new(alias_roster(names, &aliases));
        for (a, b, weight) in edges {
            for position in 0..*weight {
                matrix.add_encounter(a, b, position as usize).unwrap();
            }
        }
        matrix
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
    fn test_clean_noise_zeroes_weak_edges_and_drops_loners() {
        let mut matrix = graph(
            &["A", "B", "C", "D"],
            &[("A", "B", 5), ("B", "C", 2), ("C", "D", 1)],
        );

        let log = matrix.clean_noise(3);

        assert_eq!(matrix.characters(), ["A", "B"]);
        assert_eq!(matrix.weight_between("A", "B"), Some(5));
        assert!(!matrix.is_modifiable());
        assert_eq!(
            log.lines(),
            [
                "Removing noisy connections:",
                "B, C, 2",
                "C, D, 1",
                "Removing loners: C D",
            ]
        );
    }

    #[test]
    fn test_clean_noise_postconditions() {
        let mut matrix = graph(
            &["A", "B", "C", "D", "E"],
            &[("A", "B", 4), ("A", "C", 1), ("C", "D", 3), ("D", "E", 2), ("B", "E", 7)],
        );

        matrix.clean_noise(3);

        assert_symmetric(&matrix);
        for i in 0..matrix.size() {
            assert!(matrix.degree(i) >= 1);
            for j in 0..matrix.size() {
                let weight = matrix.weight(i, j).unwrap();
                assert!(weight == 0 || weight >= 3);
            }
        }
        assert_eq!(matrix.size(), 5);
    }

    #[test]
    fn test_clean_noise_freezes_even_without_removals() {
        let mut matrix = graph(&["A", "B"], &[("A", "B", 3)]);
        matrix.clean_noise(1);

        assert_eq!(matrix.size(), 2);
        assert!(matches!(matrix.add_encounter("A", "B", 9), Err(NetworkError::Frozen)));
    }

    #[test]
    fn test_clean_floaters_keeps_reachable_component() {
        let mut matrix = graph(
            &["A", "B", "C", "D", "E"],
            &[("A", "B", 1), ("B", "C", 1), ("D", "E", 1)],
        );

        let log = matrix.clean_floaters().unwrap();

        assert_eq!(matrix.characters(), ["A", "B", "C"]);
        assert_eq!(log.lines(), ["Removing floating characters: D E"]);
        assert_symmetric(&matrix);
    }

    #[test]
    fn test_clean_floaters_from_other_entry_point() {
        let mut matrix = graph(
            &["A", "B", "C", "D", "E"],
            &[("A", "B", 1), ("B", "C", 1), ("D", "E", 2)],
        );

        matrix.clean_floaters_from(4).unwrap();

        assert_eq!(matrix.characters(), ["D", "E"]);
        assert_eq!(matrix.weight_between("D", "E"), Some(2));
    }

    #[test]
    fn test_clean_floaters_on_edgeless_graph_keeps_entry_point() {
        let mut matrix = graph(&["A", "B", "C"], &[]);
        matrix.clean_floaters_from(1).unwrap();
        assert_eq!(matrix.characters(), ["B"]);
    }

    #[test]
    fn test_clean_floaters_rejects_bad_entry_point() {
        let mut matrix = graph(&["A", "B"], &[("A", "B", 1)]);
        assert!(matches!(
            matrix.clean_floaters_from(2),
            Err(NetworkError::EntryPointOutOfRange { entry: 2, size: 2 })
        ));
        assert!(matrix.is_modifiable());
    }

    #[test]
    fn test_clean_singletons_reaches_fixpoint() {
        // Triangle A-B-C with a tail C-D-E. The tail peels off one link per pass.
        let mut matrix = graph(
            &["A", "B", "C", "D", "E"],
            &[("A", "B", 1), ("B", "C", 1), ("A", "C", 1), ("C", "D", 1), ("D", "E", 1)],
        );

        let log = matrix.clean_singletons();

        assert_eq!(matrix.characters(), ["A", "B", "C"]);
        assert_eq!(
            log.lines(),
            [
                "Removing singletons: E",
                "Removing singletons: D",
                "Removing singletons: ",
            ]
        );
        for i in 0..matrix.size() {
            assert!(matrix.degree(i) >= 2);
        }
    }

    #[test]
    fn test_clean_singletons_counts_neighbors_not_weight() {
        let mut matrix = graph(&["A", "B", "C"], &[("A", "B", 10), ("B", "C", 1)]);

        matrix.clean_singletons();

        assert_eq!(matrix.size(), 0);
    }

    #[test]
    fn test_clean_singletons_bounded() {
        let mut matrix = graph(
            &["A", "B", "C", "D", "E"],
            &[("A", "B", 1), ("B", "C", 1), ("A", "C", 1), ("C", "D", 1), ("D", "E", 1)],
        );

        let log = matrix.clean_singletons_bounded(1);

        assert_eq!(matrix.characters(), ["A", "B", "C", "D"]);
        assert_eq!(log.len(), 1);

        let log = matrix.clean_singletons_bounded(3);
        assert_eq!(matrix.characters(), ["A", "B", "C"]);
        assert_eq!(log.len(), 3);
    }
}
