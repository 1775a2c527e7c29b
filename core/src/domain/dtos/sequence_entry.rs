use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Width of the PHYLIP name field.
pub const PHYLIP_NAME_WIDTH: usize = 10;

/// A sequence name already fitted to the PHYLIP name field
///
/// Names shorter than [`PHYLIP_NAME_WIDTH`] are right-padded with spaces and
/// longer names are truncated to their first [`PHYLIP_NAME_WIDTH`]
/// characters. The stored value is therefore always exactly ten characters
/// wide.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PhylipName(String);

impl PhylipName {
    pub fn new<T>(name: T) -> Self
    where
        T: AsRef<str>,
    {
        PhylipName(format!(
            "{:<width$.width$}",
            name.as_ref(),
            width = PHYLIP_NAME_WIDTH
        ))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for PhylipName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An identifier and sequence pair ready to be written as a PHYLIP row.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SequenceEntry {
    identifier: String,
    name: PhylipName,
    sequence: String,
}

impl SequenceEntry {
    pub fn new<T, S>(identifier: T, sequence: S) -> Self
    where
        T: Into<String>,
        S: Into<String>,
    {
        let identifier = identifier.into();

        Self {
            name: PhylipName::new(&identifier),
            identifier,
            sequence: sequence.into(),
        }
    }

    /// Build an entry by concatenating the matched field values in order.
    pub fn assemble<'a, T, I>(identifier: T, fields: I) -> Self
    where
        T: Into<String>,
        I: IntoIterator<Item = &'a str>,
    {
        Self::new(identifier, fields.into_iter().collect::<String>())
    }

    /// The identifier as read from the source, before fitting.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn name(&self) -> &PhylipName {
        &self.name
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Sequence length in characters.
    pub fn len(&self) -> usize {
        self.sequence.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub(crate) fn pad_to(&mut self, length: usize, gap: char) {
        let missing = length.saturating_sub(self.len());
        self.sequence.extend(std::iter::repeat(gap).take(missing));
    }

    pub fn to_phylip_row(&self) -> String {
        format!("{}{}\n", self.name, self.sequence)
    }
}
