//! Records and the data source backing the master list.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// One entry of the master list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Record {
    pub id: i64,
    pub value: String,
    #[serde(default)]
    pub prop1: String,
    #[serde(default)]
    pub prop2: String,
    #[serde(default)]
    pub prop3: String,
}

impl Record {
    pub fn new(
        id: i64,
        value: impl Into<String>,
        prop1: impl Into<String>,
        prop2: impl Into<String>,
        prop3: impl Into<String>,
    ) -> Self {
        Self {
            id,
            value: value.into(),
            prop1: prop1.into(),
            prop2: prop2.into(),
            prop3: prop3.into(),
        }
    }
}

/// Errors while building a data source.
#[derive(Debug, Error)]
pub enum RecordsError {
    /// The master list needs at least one line.
    #[error("data source has no records")]
    Empty,

    /// Each record owns exactly one master list line.
    #[error("record {index} (id {id}) has a line break in its value")]
    MultilineValue { index: usize, id: i64 },

    #[error("failed to read records file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse records: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Deserialize)]
struct RecordsFile {
    #[serde(default)]
    record: Vec<Record>,
}

/// Ordered, immutable list of records, indexed by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    records: Vec<Record>,
}

impl DataSource {
    /// Build a data source; an empty list and values spanning several lines
    /// are rejected.
    pub fn new(records: Vec<Record>) -> Result<Self, RecordsError> {
        if records.is_empty() {
            return Err(RecordsError::Empty);
        }
        if let Some((index, record)) = records
            .iter()
            .enumerate()
            .find(|(_, r)| r.value.contains(['\n', '\r']))
        {
            return Err(RecordsError::MultilineValue {
                index,
                id: record.id,
            });
        }
        Ok(Self { records })
    }

    /// The five built-in demo records.
    pub fn sample() -> Self {
        Self {
            records: vec![
                Record::new(
                    100,
                    "first",
                    "prop first",
                    "second property",
                    "next very important data",
                ),
                Record::new(4, "next", "test1", "test2", "test3"),
                Record::new(27, "another", "qqq", "www", "eee"),
                Record::new(96, "very long value", "very", "long", "value"),
                Record::new(11, "last", "the", "last", "value"),
            ],
        }
    }

    /// Parse `[[record]]` tables from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, RecordsError> {
        let file: RecordsFile = toml::from_str(content)?;
        Self::new(file.record)
    }

    /// Load records from a TOML file.
    pub fn load(path: &Path) -> Result<Self, RecordsError> {
        let content = std::fs::read_to_string(path).map_err(|source| RecordsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed source; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_records() {
        let source = DataSource::sample();
        assert_eq!(source.len(), 5);
        let ids: Vec<i64> = source.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![100, 4, 27, 96, 11]);
        assert_eq!(source.get(3).unwrap().value, "very long value");
        assert!(source.get(5).is_none());
    }

    #[test]
    fn test_empty_source_rejected() {
        assert!(matches!(DataSource::new(vec![]), Err(RecordsError::Empty)));
        assert!(matches!(
            DataSource::from_toml_str(""),
            Err(RecordsError::Empty)
        ));
    }

    #[test]
    fn test_from_toml_str() {
        let source = DataSource::from_toml_str(
            r#"
            [[record]]
            id = 7
            value = "seven"
            prop1 = "a"
            prop2 = "b"
            prop3 = "c"

            [[record]]
            id = -1
            value = "partial"
            "#,
        )
        .unwrap();

        assert_eq!(source.len(), 2);
        assert_eq!(source.get(0), Some(&Record::new(7, "seven", "a", "b", "c")));
        let partial = source.get(1).unwrap();
        assert_eq!(partial.id, -1);
        assert_eq!(partial.prop1, "");
    }

    #[test]
    fn test_multiline_value_rejected() {
        let result = DataSource::from_toml_str(
            "[[record]]\nid = 1\nvalue = \"two\\nlines\"\n\n[[record]]\nid = 2\nvalue = \"b\"\n",
        );
        assert!(matches!(
            result,
            Err(RecordsError::MultilineValue { index: 0, id: 1 })
        ));

        let result = DataSource::new(vec![
            Record::new(1, "a", "", "", ""),
            Record::new(2, "carriage\rreturn", "", "", ""),
        ]);
        assert!(matches!(
            result,
            Err(RecordsError::MultilineValue { index: 1, id: 2 })
        ));
    }

    #[test]
    fn test_multiline_props_allowed() {
        let source = DataSource::new(vec![Record::new(1, "a", "x\ny", "", "")]).unwrap();
        assert_eq!(source.get(0).unwrap().prop1, "x\ny");
    }

    #[test]
    fn test_missing_required_field() {
        let result = DataSource::from_toml_str("[[record]]\nvalue = \"no id\"\n");
        assert!(matches!(result, Err(RecordsError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.toml");
        std::fs::write(&path, "[[record]]\nid = 1\nvalue = \"one\"\n").unwrap();

        let source = DataSource::load(&path).unwrap();
        assert_eq!(source.get(0).unwrap().value, "one");

        let missing = DataSource::load(&dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(RecordsError::Read { .. })));
    }
}
