use serde::Serialize;
use std::fmt::Display;

#[derive(Clone, Debug, Serialize)]
#[serde(untagged, rename_all = "UPPERCASE")]
pub(crate) enum TelemetryCode {
    // ? -----------------------------------------------------------------------
    // ? Reserved codes to the tab_to_phylip use case
    //
    /// Tabfile conversion started
    ///
    UCTAB0001,
    //
    /// A tabfile was read and its columns resolved
    ///
    UCTAB0002,
    //
    /// A PHYLIP document was written to disk
    ///
    UCTAB0003,
    //
    /// Tabfile conversion ended
    ///
    UCTAB0004,
    //
    /// A tabfile contains no data rows
    ///
    UCTAB0005,
    // ? -----------------------------------------------------------------------

    // ? -----------------------------------------------------------------------
    // ? Reserved codes to the run_phylip_program use case
    //
    /// PHYLIP program launched
    ///
    UCPHY0001,
    //
    /// PHYLIP program exited successfully
    ///
    UCPHY0002,
    //
    /// PHYLIP program exited with an error status
    ///
    UCPHY0003,
    //
    /// Stale PHYLIP outputs removed before launch
    ///
    UCPHY0004,
    //
    /// PHYLIP output renamed after the input file
    ///
    UCPHY0005,
    // ? -----------------------------------------------------------------------
}

impl Display for TelemetryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
