use crate::domain::{
    dtos::phylip_document::{LengthPolicy, PhylipDocument},
    errors::AutoPhylipError,
};

use std::{
    fs::metadata,
    io::BufWriter,
    path::{Path, PathBuf},
};
use tempfile::{Builder, NamedTempFile};
use tracing::error;

/// Validate a document and write it to `output_file`
///
/// Nothing touches the disk until the document is validated. Content is
/// written to a temporary file in the destination directory which then
/// replaces the destination, so a failed write never leaves a truncated
/// PHYLIP file behind.
///
/// An overwritten destination keeps its permissions. A new one gets the
/// permissions of a plainly created file, i.e. `0o666` minus the umask.
pub(crate) fn write_phylip_file(
    document: &mut PhylipDocument,
    policy: LengthPolicy,
    output_file: &Path,
) -> Result<usize, AutoPhylipError> {
    let sequence_length = document.finalize(policy, output_file)?;

    let output_dir = match output_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut temp_file = create_temp_file(&output_dir)
        .map_err(|err| AutoPhylipError::from_io(&output_dir, err))?;

    if let Ok(existing) = metadata(output_file) {
        temp_file
            .as_file()
            .set_permissions(existing.permissions())
            .map_err(|err| AutoPhylipError::from_io(output_file, err))?;
    }

    {
        let mut writer = BufWriter::new(&mut temp_file);

        if let Err(err) = document.write_to(&mut writer, sequence_length) {
            error!("Unexpected error detected on write file: {err}");
            return Err(AutoPhylipError::from_io(output_file, err));
        }
    }

    temp_file
        .persist(output_file)
        .map_err(|err| AutoPhylipError::from_io(output_file, err.error))?;

    Ok(sequence_length)
}

#[cfg(unix)]
fn create_temp_file(dir: &Path) -> std::io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    // The mode goes through open(2), so the umask still applies.
    Builder::new()
        .permissions(std::fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn create_temp_file(dir: &Path) -> std::io::Result<NamedTempFile> {
    Builder::new().tempfile_in(dir)
}
