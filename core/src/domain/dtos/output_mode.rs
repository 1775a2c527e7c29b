use std::path::{Path, PathBuf};

/// Extension given to the PHYLIP files written by the converter.
pub const PHYLIP_EXTENSION: &str = "phy";

/// Default destination when combining without an explicit output path.
pub const DEFAULT_COMBINED_OUTPUT: &str = "file.phy";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputMode {
    /// One PHYLIP file next to each input, named after it.
    PerFile,

    /// A single PHYLIP file holding the entries of every input.
    CombinedInto(PathBuf),
}

impl Default for OutputMode {
    fn default() -> Self {
        Self::PerFile
    }
}

impl OutputMode {
    pub fn from_combine(combine: Option<PathBuf>) -> Self {
        match combine {
            None => Self::PerFile,
            Some(path) => Self::CombinedInto(path),
        }
    }
}

/// Destination of the per-file output of `input`
///
/// The last extension of the input is replaced, so `clones.tab` becomes
/// `clones.phy` and an input without extension gets one appended.
pub fn per_file_output_path(input: &Path) -> PathBuf {
    input.with_extension(PHYLIP_EXTENSION)
}
