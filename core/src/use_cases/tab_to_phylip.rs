use super::{read_tabfile::read_tabfile, shared::write_phylip_file::write_phylip_file};
use crate::domain::{
    dtos::{
        field_selection::FieldMatcher,
        output_mode::{per_file_output_path, OutputMode},
        phylip_document::{LengthPolicy, PhylipDocument},
        sequence_entry::SequenceEntry,
        telemetry_code::TelemetryCode,
    },
    errors::AutoPhylipError,
};

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Name given to the germline entry prepended to every document.
pub const GERMLINE_NAME: &str = "Germline";

#[derive(Clone, Debug, Default)]
pub struct TabToPhylipOptions {
    /// Identifier column and sequence column selection.
    pub matcher: FieldMatcher,

    /// Write one file per input or a single combined file.
    pub output_mode: OutputMode,

    /// Reference sequence written as the first entry of every document.
    pub germline: Option<String>,

    /// Behaviour on sequences of different lengths.
    pub length_policy: LengthPolicy,
}

impl TabToPhylipOptions {
    fn new_document(&self) -> PhylipDocument {
        let mut document = PhylipDocument::new();

        if let Some(germline) = &self.germline {
            document.push(SequenceEntry::new(GERMLINE_NAME, germline.as_str()));
        }

        document
    }
}

/// Convert tabfiles into PHYLIP sequential files
///
/// Files are processed in order and the first error aborts the run. In
/// per-file mode the outputs of the files converted before the failure are
/// kept. In combined mode every input is read before the single output is
/// written, so a failure leaves no output at all.
///
/// # Returns
/// The paths of the written PHYLIP files.
///
#[tracing::instrument(
    name = "ConvertingTabfiles",
    skip(files, options),
    fields(run_id = Uuid::new_v4().to_string().replace("-", ""))
)]
pub fn tab_to_phylip(
    files: &[PathBuf],
    options: &TabToPhylipOptions,
) -> Result<Vec<PathBuf>, AutoPhylipError> {
    debug!(
        code = TelemetryCode::UCTAB0001.to_string(),
        "Start converting {count} tabfile(s)",
        count = files.len()
    );

    let outputs = match &options.output_mode {
        OutputMode::PerFile => {
            let mut outputs = Vec::with_capacity(files.len());

            for file in files {
                let mut document = options.new_document();
                append_tabfile(&mut document, file, &options.matcher)?;

                let output = per_file_output_path(file);
                write_document(&mut document, options.length_policy, &output)?;
                outputs.push(output);
            }

            outputs
        }
        OutputMode::CombinedInto(output) => {
            let mut document = options.new_document();

            for file in files {
                append_tabfile(&mut document, file, &options.matcher)?;
            }

            write_document(&mut document, options.length_policy, output)?;
            vec![output.to_owned()]
        }
    };

    debug!(
        code = TelemetryCode::UCTAB0004.to_string(),
        "Finished converting {count} tabfile(s)",
        count = files.len()
    );

    Ok(outputs)
}

/// Read a tabfile and append one entry per record to the document.
fn append_tabfile(
    document: &mut PhylipDocument,
    file: &Path,
    matcher: &FieldMatcher,
) -> Result<usize, AutoPhylipError> {
    let table = read_tabfile(file)?;
    let columns = matcher.resolve(table.path(), table.header())?;

    debug!(
        code = TelemetryCode::UCTAB0002.to_string(),
        file = ?file,
        identifier = matcher.identifier_column(),
        "Using {count} sequence column(s)",
        count = columns.sequence_fields().len()
    );

    if table.is_empty() {
        warn!(
            code = TelemetryCode::UCTAB0005.to_string(),
            "No data rows found in {file:?}"
        );
    }

    document.extend(table.records().iter().map(|record| columns.to_entry(record)));

    Ok(table.len())
}

fn write_document(
    document: &mut PhylipDocument,
    policy: LengthPolicy,
    output: &Path,
) -> Result<(), AutoPhylipError> {
    let sequence_length = write_phylip_file(document, policy, output)?;

    info!(
        code = TelemetryCode::UCTAB0003.to_string(),
        "Wrote {count} sequences of length {sequence_length} to {output:?}",
        count = document.len()
    );

    Ok(())
}
