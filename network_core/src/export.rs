//! Exporters - render a matrix as dense matrices, edge lists, and node lists.
//!
//! Row templates use placeholder tokens that are substituted per row:
//! - edge lists: `#C1`, `#C2` (quoted character names), `#W` (weight)
//! - node lists: `#ID`, `#LA`, `#AL`, `#RH`, `#C` (quoted metadata columns)

use roster::CharacterTable;
use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, NetworkResult};
use crate::matrix::EncounterMatrix;
use crate::report::TextLog;

/// Header line plus per-row template for a CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvTemplate {
    pub header: String,
    pub row: String,
}

impl CsvTemplate {
    pub fn new(header: impl Into<String>, row: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            row: row.into(),
        }
    }

    /// Undirected edge table in the layout Gephi imports.
    pub fn edge_list() -> Self {
        Self::new("Source,Target,Weight,Type", "#C1,#C2,#W,undirected")
    }

    pub fn node_list() -> Self {
        Self::new("Id,Label,Allegiance,Royal House,Culture", "#ID,#LA,#AL,#RH,#C")
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value)
}

impl EncounterMatrix {
    /// Dense CSV: a header of character names, then one line per matrix row.
    pub fn to_matrix_csv(&self) -> TextLog {
        let mut log = TextLog::new();
        log.log(self.characters().join(","));
        for row in self.weights() {
            let cells: Vec<String> = row.iter().map(u32::to_string).collect();
            log.log(cells.join(","));
        }
        log
    }

    /// Dense matrix as a JSON array of arrays, in the matrix's own order.
    pub fn to_matrix_json(&self) -> NetworkResult<TextLog> {
        let indices: Vec<usize> = (0..self.size()).collect();
        self.render_matrix_json(&indices)
    }

    /// Dense matrix as a JSON array of arrays, rows and columns in `order`.
    ///
    /// `order` may be a subset or a reordering of the characters. `None` falls
    /// back to the matrix's own order.
    pub fn to_matrix_json_ordered<S: AsRef<str>>(&self, order: Option<&[S]>) -> NetworkResult<TextLog> {
        match order {
            None => self.to_matrix_json(),
            Some(order) => {
                let indices = order
                    .iter()
                    .map(|name| {
                        self.index_of(name.as_ref())
                            .ok_or_else(|| NetworkError::UnknownCharacter(name.as_ref().to_string()))
                    })
                    .collect::<NetworkResult<Vec<_>>>()?;
                self.render_matrix_json(&indices)
            }
        }
    }

    fn render_matrix_json(&self, indices: &[usize]) -> NetworkResult<TextLog> {
        let weights = self.weights();
        let mut log = TextLog::new();
        log.log("[");
        for (a, &i) in indices.iter().enumerate() {
            let row: Vec<u32> = indices
                .iter()
                .enumerate()
                .map(|(b, &j)| if a == b { 0 } else { weights[i][j] })
                .collect();
            let rendered = serde_json::to_string(&row)?;
            if a + 1 == indices.len() {
                log.log(rendered);
            } else {
                log.log(format!("{},", rendered));
            }
        }
        log.log("]");
        Ok(log)
    }

    /// Edge list with the default `Source,Target,Weight,Type` layout.
    pub fn to_edge_list_csv(&self) -> TextLog {
        self.to_edge_list_csv_with(&CsvTemplate::edge_list())
    }

    /// One line per unordered pair with positive weight.
    pub fn to_edge_list_csv_with(&self, template: &CsvTemplate) -> TextLog {
        let mut log = TextLog::new();
        log.log(template.header.as_str());

        let characters = self.characters();
        let weights = self.weights();
        for i in 0..self.size() {
            for j in (i + 1)..self.size() {
                let weight = weights[i][j];
                if weight > 0 {
                    log.log(
                        template
                            .row
                            .replace("#C1", &quote(&characters[i]))
                            .replace("#C2", &quote(&characters[j]))
                            .replace("#W", &format!("{:.1}", f64::from(weight))),
                    );
                }
            }
        }
        log
    }

    /// Node list with the default `Id,Label,Allegiance,Royal House,Culture` layout.
    pub fn to_node_list_csv(&self, table: Option<&CharacterTable>) -> TextLog {
        self.to_node_list_csv_with(&CsvTemplate::node_list(), table)
    }

    /// One line per character, filled from the metadata table.
    ///
    /// Characters missing from the table get a `<name>,missing` line; a missing
    /// table yields a single error line.
    pub fn to_node_list_csv_with(
        &self,
        template: &CsvTemplate,
        table: Option<&CharacterTable>,
    ) -> TextLog {
        let mut log = TextLog::new();
        let table = match table {
            Some(table) => table,
            None => {
                log.log("Error: character data table is missing");
                return log;
            }
        };

        log.log(template.header.as_str());
        for character in self.characters() {
            match table.get(character) {
                Some(record) => log.log(
                    template
                        .row
                        .replace("#ID", &quote(record.id()))
                        .replace("#LA", &quote(record.label()))
                        .replace("#AL", &quote(record.allegiance()))
                        .replace("#RH", &quote(record.royal_house()))
                        .replace("#C", &quote(record.culture())),
                ),
                None => log.log(format!("{},missing", character)),
            }
        }
        log
    }

    /// The encounter log, ordered by position, as pretty-printed JSON.
    pub fn to_encounters_json(&self) -> NetworkResult<String> {
        Ok(serde_json::to_string_pretty(&self.encounters())?)
    }
}
