use super::{sequence_entry::SequenceEntry, tab_record::TabRecord};
use crate::domain::errors::AutoPhylipError;

use regex::Regex;
use std::{fmt::Display, path::Path};

/// Default name of the identifier column.
pub const DEFAULT_IDENTIFIER_COLUMN: &str = "CLONE";

/// Rule deciding which columns carry sequence data
///
/// The identifier column is never part of the selection, whatever the rule.
#[derive(Clone, Debug, Default)]
pub enum FieldSelection {
    /// Every column but the identifier, in header order.
    #[default]
    AllExceptIdentifier,

    /// Columns whose name matches the pattern anywhere, in header order.
    PatternFilter(Regex),
}

impl FieldSelection {
    /// Build a selection from an optional user supplied pattern.
    pub fn from_pattern(pattern: Option<&str>) -> Result<Self, AutoPhylipError> {
        match pattern {
            None => Ok(Self::AllExceptIdentifier),
            Some(pattern) => Regex::new(pattern)
                .map(Self::PatternFilter)
                .map_err(|source| AutoPhylipError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                }),
        }
    }

    fn accepts(&self, column: &str) -> bool {
        match self {
            Self::AllExceptIdentifier => true,
            Self::PatternFilter(regex) => regex.is_match(column),
        }
    }
}

impl Display for FieldSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllExceptIdentifier => write!(f, "all columns"),
            Self::PatternFilter(regex) => {
                write!(f, "columns matching `{}`", regex.as_str())
            }
        }
    }
}

/// Identifier column plus the field selection rule.
#[derive(Clone, Debug)]
pub struct FieldMatcher {
    identifier_column: String,
    selection: FieldSelection,
}

impl Default for FieldMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_IDENTIFIER_COLUMN, FieldSelection::default())
    }
}

impl FieldMatcher {
    pub fn new<T>(identifier_column: T, selection: FieldSelection) -> Self
    where
        T: Into<String>,
    {
        Self {
            identifier_column: identifier_column.into(),
            selection,
        }
    }

    pub fn identifier_column(&self) -> &str {
        &self.identifier_column
    }

    pub fn selection(&self) -> &FieldSelection {
        &self.selection
    }

    /// Resolve a header into column positions
    ///
    /// Fails when the identifier column is absent or when no column is left
    /// to carry sequence data.
    pub fn resolve(
        &self,
        path: &Path,
        header: &[String],
    ) -> Result<ResolvedColumns, AutoPhylipError> {
        let identifier = header
            .iter()
            .position(|name| *name == self.identifier_column)
            .ok_or_else(|| AutoPhylipError::MissingIdentifierColumn {
                column: self.identifier_column.to_owned(),
                path: path.to_path_buf(),
                headers: header.to_vec(),
            })?;

        let sequence_fields = header
            .iter()
            .enumerate()
            .filter(|(index, name)| {
                *index != identifier && self.selection.accepts(name)
            })
            .map(|(index, _)| index)
            .collect::<Vec<_>>();

        if sequence_fields.is_empty() {
            return Err(AutoPhylipError::NoSequenceColumns {
                path: path.to_path_buf(),
                selection: self.selection.to_string(),
            });
        }

        Ok(ResolvedColumns {
            identifier,
            sequence_fields,
        })
    }
}

/// Column positions for one table header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedColumns {
    identifier: usize,
    sequence_fields: Vec<usize>,
}

impl ResolvedColumns {
    pub fn identifier(&self) -> usize {
        self.identifier
    }

    pub fn sequence_fields(&self) -> &[usize] {
        &self.sequence_fields
    }

    /// Extract the identifier and the ordered matched values of a record.
    pub fn extract<'a>(&self, record: &'a TabRecord) -> (&'a str, Vec<&'a str>) {
        let identifier = record.value_at(self.identifier).unwrap_or_default();

        let fields = self
            .sequence_fields
            .iter()
            .map(|index| record.value_at(*index).unwrap_or_default())
            .collect();

        (identifier, fields)
    }

    /// Assemble the sequence entry of a record.
    pub fn to_entry(&self, record: &TabRecord) -> SequenceEntry {
        let (identifier, fields) = self.extract(record);
        SequenceEntry::assemble(identifier, fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_all_except_identifier_keeps_header_order() {
        let matcher = FieldMatcher::default();
        let columns = matcher
            .resolve(
                &PathBuf::from("t.tab"),
                &header(&["FWR1", "CLONE", "CDR1", "FWR2"]),
            )
            .unwrap();

        assert_eq!(columns.identifier(), 1);
        assert_eq!(columns.sequence_fields(), &[0, 2, 3]);
    }

    #[test]
    fn test_pattern_filter_is_unanchored() {
        let matcher = FieldMatcher::new(
            "SEQUENCE_ID",
            FieldSelection::from_pattern(Some("FWR")).unwrap(),
        );
        let columns = matcher
            .resolve(
                &PathBuf::from("t.tab"),
                &header(&["SEQUENCE_ID", "FWR1_IMGT", "CDR1_IMGT", "FWR2_IMGT"]),
            )
            .unwrap();

        assert_eq!(columns.sequence_fields(), &[1, 3]);
    }

    #[test]
    fn test_pattern_never_selects_identifier() {
        let matcher = FieldMatcher::new(
            "SEQ_ID",
            FieldSelection::from_pattern(Some("^SEQ")).unwrap(),
        );
        let columns = matcher
            .resolve(&PathBuf::from("t.tab"), &header(&["SEQ_ID", "SEQ_A"]))
            .unwrap();

        assert_eq!(columns.sequence_fields(), &[1]);
    }

    #[test]
    fn test_missing_identifier_column() {
        let err = FieldMatcher::default()
            .resolve(&PathBuf::from("t.tab"), &header(&["SEQUENCE_ID", "SEQUENCE"]))
            .unwrap_err();

        assert_eq!(err.kind(), "MissingIdentifierColumn");
    }

    #[test]
    fn test_no_sequence_columns() {
        let matcher = FieldMatcher::new(
            "CLONE",
            FieldSelection::from_pattern(Some("^CDR3$")).unwrap(),
        );
        let err = matcher
            .resolve(&PathBuf::from("t.tab"), &header(&["CLONE", "SEQUENCE"]))
            .unwrap_err();

        assert_eq!(err.kind(), "NoSequenceColumns");
    }

    #[test]
    fn test_invalid_pattern() {
        let err = FieldSelection::from_pattern(Some("FWR(")).unwrap_err();
        assert_eq!(err.kind(), "InvalidPattern");
    }

    #[test]
    fn test_to_entry() {
        let columns = FieldMatcher::default()
            .resolve(&PathBuf::from("t.tab"), &header(&["A", "CLONE", "B"]))
            .unwrap();
        let record = TabRecord::new(
            2,
            vec!["ACG".to_string(), "clone_1".to_string(), "TT".to_string()],
        );

        let entry = columns.to_entry(&record);
        assert_eq!(entry.identifier(), "clone_1");
        assert_eq!(entry.sequence(), "ACGTT");
    }
}
