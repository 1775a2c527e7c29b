use super::sequence_entry::SequenceEntry;
use crate::domain::errors::AutoPhylipError;

use serde::{Deserialize, Serialize};
use std::{io::Write, path::Path};

/// Gap character used when padding is requested without an explicit one.
pub const DEFAULT_GAP_CHAR: char = '-';

/// What to do when entries of a document differ in sequence length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LengthPolicy {
    /// Refuse to serialize the document.
    #[default]
    Strict,

    /// Right-pad every shorter sequence with the given character.
    PadToLongest(char),
}

/// An ordered set of sequence entries written in PHYLIP sequential format
///
/// Entries may be pushed from several tabfiles before the document is
/// serialized, so the header is only computed when writing.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhylipDocument {
    entries: Vec<SequenceEntry>,
}

impl PhylipDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: SequenceEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[SequenceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check that the document can be written and return its sequence length
    ///
    /// Under [`LengthPolicy::PadToLongest`] shorter entries are padded in
    /// place before the length is returned.
    pub fn finalize(
        &mut self,
        policy: LengthPolicy,
        destination: &Path,
    ) -> Result<usize, AutoPhylipError> {
        let first = match self.entries.first() {
            None => {
                return Err(AutoPhylipError::EmptyDocument {
                    path: destination.to_path_buf(),
                })
            }
            Some(entry) => entry.len(),
        };

        match policy {
            LengthPolicy::Strict => {
                if let Some(entry) =
                    self.entries.iter().find(|entry| entry.len() != first)
                {
                    return Err(AutoPhylipError::InconsistentSequenceLength {
                        identifier: entry.identifier().to_string(),
                        expected: first,
                        found: entry.len(),
                    });
                }

                Ok(first)
            }
            LengthPolicy::PadToLongest(gap) => {
                let longest = self
                    .entries
                    .iter()
                    .map(SequenceEntry::len)
                    .max()
                    .unwrap_or(first);

                for entry in self.entries.iter_mut() {
                    entry.pad_to(longest, gap);
                }

                Ok(longest)
            }
        }
    }

    /// Header line: entry count and sequence length.
    pub fn header_row(&self, sequence_length: usize) -> String {
        format!("{} {}\n", self.entries.len(), sequence_length)
    }

    /// Write the header and one row per entry
    ///
    /// The document must have been checked with [`PhylipDocument::finalize`],
    /// which provides `sequence_length`.
    pub fn write_to<W: Write>(
        &self,
        writer: &mut W,
        sequence_length: usize,
    ) -> std::io::Result<()> {
        writer.write_all(self.header_row(sequence_length).as_bytes())?;

        for entry in &self.entries {
            writer.write_all(entry.to_phylip_row().as_bytes())?;
        }

        writer.flush()
    }
}

impl Extend<SequenceEntry> for PhylipDocument {
    fn extend<I: IntoIterator<Item = SequenceEntry>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}
