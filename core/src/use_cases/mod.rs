/// This module contains the use case to read tab-delimited files into
/// records.
mod read_tabfile;

/// This module contains the use case to launch PHYLIP programs on sequence
/// files.
mod run_phylip_program;

/// This module contains the use case to convert tabfiles into PHYLIP
/// sequential files.
mod tab_to_phylip;

/// Elements of shared module are restricted to be used only in this crate.
mod shared;

pub use read_tabfile::*;
pub use run_phylip_program::*;
pub use tab_to_phylip::*;
