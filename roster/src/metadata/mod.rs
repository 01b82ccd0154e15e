//! Character metadata - external per-character attributes used for node-list export.
//!
//! Rows are comma-separated with the canonical name in the first column. Only a
//! handful of columns are interpreted; trailing columns may be absent.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const ID_COLUMN: usize = 0;
const LABEL_COLUMN: usize = 1;
const ALLEGIANCE_COLUMN: usize = 5;
const ROYAL_HOUSE_COLUMN: usize = 6;
const CULTURE_COLUMN: usize = 7;

/// One row of the metadata table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    fields: Vec<String>,
}

impl CharacterRecord {
    /// Create a record from raw column values.
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a comma-separated line.
    pub fn parse_line(line: &str) -> Self {
        Self::from_fields(line.split(','))
    }

    /// Get a column value; absent columns read as empty.
    pub fn field(&self, column: usize) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn id(&self) -> &str {
        self.field(ID_COLUMN)
    }

    pub fn label(&self) -> &str {
        self.field(LABEL_COLUMN)
    }

    pub fn allegiance(&self) -> &str {
        self.field(ALLEGIANCE_COLUMN)
    }

    pub fn royal_house(&self) -> &str {
        self.field(ROYAL_HOUSE_COLUMN)
    }

    pub fn culture(&self) -> &str {
        self.field(CULTURE_COLUMN)
    }
}

/// Metadata rows keyed by canonical character name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharacterTable {
    records: HashMap<String, CharacterRecord>,
}

impl CharacterTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a CSV document whose first line is a header.
    ///
    /// Blank lines are skipped. A later row with the same key replaces an earlier one.
    pub fn from_csv_str(source: &str) -> Self {
        let mut table = Self::new();
        for line in source.lines().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            table.insert(CharacterRecord::parse_line(line));
        }
        table
    }

    /// Insert a record under its id column.
    pub fn insert(&mut self, record: CharacterRecord) {
        self.records.insert(record.id().to_string(), record);
    }

    /// Look up a character by canonical name.
    pub fn get(&self, name: &str) -> Option<&CharacterRecord> {
        self.records.get(name)
    }

    /// Get the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
Name,Label,Gender,Born,Died,Allegiance,Royal House,Culture
Jon Snow,Jon,Male,283,,Night's Watch,House Stark,Northmen
Samwell Tarly,Sam,Male,283,,Night's Watch

Brienne,Brienne of Tarth,Female,280,,House Baratheon,,Stormlands
";

    #[test]
    fn test_from_csv_str_skips_header_and_blank_lines() {
        let table = CharacterTable::from_csv_str(TABLE);
        assert_eq!(table.len(), 3);
        assert!(table.get("Name").is_none());
    }

    #[test]
    fn test_record_columns() {
        let table = CharacterTable::from_csv_str(TABLE);

        let jon = table.get("Jon Snow").unwrap();
        assert_eq!(jon.id(), "Jon Snow");
        assert_eq!(jon.label(), "Jon");
        assert_eq!(jon.allegiance(), "Night's Watch");
        assert_eq!(jon.royal_house(), "House Stark");
        assert_eq!(jon.culture(), "Northmen");

        let brienne = table.get("Brienne").unwrap();
        assert_eq!(brienne.royal_house(), "");
        assert_eq!(brienne.culture(), "Stormlands");
    }

    #[test]
    fn test_missing_trailing_columns_read_empty() {
        let table = CharacterTable::from_csv_str(TABLE);

        let sam = table.get("Samwell Tarly").unwrap();
        assert_eq!(sam.allegiance(), "Night's Watch");
        assert_eq!(sam.royal_house(), "");
        assert_eq!(sam.culture(), "");

        let bare = CharacterRecord::parse_line("Hodor");
        assert_eq!(bare.label(), "");
    }

    #[test]
    fn test_later_row_replaces_earlier() {
        let mut table = CharacterTable::new();
        table.insert(CharacterRecord::from_fields(["Arya", "Arry"]));
        table.insert(CharacterRecord::from_fields(["Arya", "Cat of the Canals"]));

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("Arya").unwrap().label(), "Cat of the Canals");
    }
}
