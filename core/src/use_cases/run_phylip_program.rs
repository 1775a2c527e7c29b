use crate::domain::{
    dtos::{phylip_program_config::PhylipProgramConfig, telemetry_code::TelemetryCode},
    errors::AutoPhylipError,
};

use std::{
    fs::{remove_file, rename},
    io::{self, Write},
    path::{Path, PathBuf},
    process::{Command, Stdio},
};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Input file PHYLIP programs read without prompting when present.
const PHYLIP_INFILE: &str = "infile";

/// Files PHYLIP programs write into their working directory.
const PHYLIP_OUTPUTS: [&str; 2] = ["outfile", "outtree"];

/// Files produced by a single PHYLIP run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhylipRun {
    pub input: PathBuf,
    pub outputs: Vec<PathBuf>,
}

/// Run the configured PHYLIP program on each file, in order
///
/// The first failing file aborts the run. Outputs of the files processed
/// before the failure are kept.
///
#[tracing::instrument(
    name = "RunningPhylipPrograms",
    skip(files, config),
    fields(
        run_id = Uuid::new_v4().to_string().replace("-", ""),
        program = config.program.as_str()
    )
)]
pub fn run_phylip_programs(
    files: &[PathBuf],
    config: &PhylipProgramConfig,
    force: bool,
) -> Result<Vec<PhylipRun>, AutoPhylipError> {
    files
        .iter()
        .map(|file| run_phylip_program(file, config, force))
        .collect()
}

/// Run a PHYLIP program on a single sequence file
///
/// The program is started in the directory of the input, its prompts are
/// answered from the configured responses and the call blocks until it
/// exits. The `outfile` and `outtree` it leaves behind are renamed after the
/// input, so `clones.phy` produces `clones.outfile` and `clones.outtree`.
///
/// Existing `outfile` or `outtree` files in that directory are an error
/// unless `force` is set, in which case they are removed first. A stray
/// `infile` is always an error since PHYLIP would read it instead of the
/// requested input.
///
pub fn run_phylip_program(
    input: &Path,
    config: &PhylipProgramConfig,
    force: bool,
) -> Result<PhylipRun, AutoPhylipError> {
    // ? -----------------------------------------------------------------------
    // ? Validate the input and the working directory
    // ? -----------------------------------------------------------------------

    if !input.is_file() {
        return Err(AutoPhylipError::FileNotFound {
            path: input.to_path_buf(),
        });
    }

    let input_name = match input.file_name().and_then(|name| name.to_str()) {
        Some(name) => name.to_string(),
        None => {
            return Err(AutoPhylipError::Io {
                path: input.to_path_buf(),
                source: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "input file name is not valid UTF-8",
                ),
            })
        }
    };

    let work_dir = match input.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };

    prepare_work_dir(&work_dir, force)?;

    // ? -----------------------------------------------------------------------
    // ? Launch the program and answer its prompts
    // ? -----------------------------------------------------------------------

    let program = absolute_program_path(config.program_path())?;

    info!(
        code = TelemetryCode::UCPHY0001.to_string(),
        "Running {program:?} on {input:?}"
    );

    let mut child = Command::new(&program)
        .current_dir(&work_dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| AutoPhylipError::ExternalProgramNotFound {
            program: program.to_owned(),
            source,
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        match stdin.write_all(config.render_responses(&input_name).as_bytes()) {
            Ok(_) => (),
            //
            // The program may exit before reading every response. Its exit
            // status decides the outcome.
            //
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                debug!("{program:?} closed its stdin early")
            }
            Err(err) => return Err(AutoPhylipError::from_io(&program, err)),
        }
    }

    let output = child
        .wait_with_output()
        .map_err(|err| AutoPhylipError::from_io(&program, err))?;

    for line in String::from_utf8_lossy(&output.stdout).lines() {
        debug!(stream = "stdout", "{line}");
    }

    for line in String::from_utf8_lossy(&output.stderr).lines() {
        debug!(stream = "stderr", "{line}");
    }

    if !output.status.success() {
        warn!(
            code = TelemetryCode::UCPHY0003.to_string(),
            "{program:?} exited with {status}",
            status = output.status
        );

        return Err(AutoPhylipError::ExternalProgramFailure {
            program,
            input: input.to_path_buf(),
            status: output.status.to_string(),
        });
    }

    info!(
        code = TelemetryCode::UCPHY0002.to_string(),
        "{program:?} finished on {input:?}"
    );

    // ? -----------------------------------------------------------------------
    // ? Rename the outputs after the input file
    // ? -----------------------------------------------------------------------

    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(input_name.as_str());

    let mut outputs = Vec::new();

    for name in PHYLIP_OUTPUTS {
        let produced = work_dir.join(name);

        if !produced.exists() {
            continue;
        }

        let target = work_dir.join(format!("{stem}.{name}"));

        rename(&produced, &target)
            .map_err(|err| AutoPhylipError::from_io(&produced, err))?;

        debug!(
            code = TelemetryCode::UCPHY0005.to_string(),
            "Renamed {produced:?} to {target:?}"
        );

        outputs.push(target);
    }

    Ok(PhylipRun {
        input: input.to_path_buf(),
        outputs,
    })
}

fn prepare_work_dir(work_dir: &Path, force: bool) -> Result<(), AutoPhylipError> {
    let infile = work_dir.join(PHYLIP_INFILE);

    if infile.exists() {
        return Err(AutoPhylipError::OutputCollision { path: infile });
    }

    for name in PHYLIP_OUTPUTS {
        let path = work_dir.join(name);

        if !path.exists() {
            continue;
        }

        if !force {
            return Err(AutoPhylipError::OutputCollision { path });
        }

        remove_file(&path).map_err(|err| AutoPhylipError::from_io(&path, err))?;

        warn!(
            code = TelemetryCode::UCPHY0004.to_string(),
            "Removed stale PHYLIP output {path:?}"
        );
    }

    Ok(())
}

/// Anchor relative program paths to the current directory
///
/// The child runs in the input directory, so a relative path such as
/// `bin/dnapars` would otherwise be resolved from there. Bare program names
/// are left alone and looked up through `PATH`.
fn absolute_program_path(program: PathBuf) -> Result<PathBuf, AutoPhylipError> {
    if program.is_absolute() || program.components().count() < 2 {
        return Ok(program);
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(&program))
        .map_err(|err| AutoPhylipError::from_io(&program, err))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::{os::unix::fs::PermissionsExt, sync::Mutex};

    // Writing a script while another test forks may fail its exec with
    // ETXTBSY, so tests spawning programs run one at a time.
    static SPAWN_LOCK: Mutex<()> = Mutex::new(());

    const FAKE_PARS: &str = r#"#!/bin/sh
read name
read answer
[ "$answer" = "Y" ] || exit 2
cp "$name" outfile
echo "(A,B);" > outtree
"#;

    fn install_program(dir: &Path, name: &str, script: &str) {
        let path = dir.join(name);
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .unwrap();
    }

    fn config_for(dir: &Path, program: &str) -> PhylipProgramConfig {
        PhylipProgramConfig {
            program: program.to_string(),
            phylip_dir: Some(dir.to_path_buf()),
            ..Default::default()
        }
    }

    fn write_input(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, "2 4\nA         ACGT\nB         ACGA\n").unwrap();
        path
    }

    #[test]
    fn test_successful_run_renames_outputs() {
        let _guard = SPAWN_LOCK.lock().unwrap_or_else(|err| err.into_inner());

        let bin = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        install_program(bin.path(), "fakepars", FAKE_PARS);

        let first = write_input(data.path(), "first.phy");
        let second = write_input(data.path(), "second.phy");

        let runs = run_phylip_programs(
            &[first.clone(), second],
            &config_for(bin.path(), "fakepars"),
            false,
        )
        .unwrap();

        assert_eq!(runs.len(), 2);
        assert_eq!(
            runs[0].outputs,
            vec![
                data.path().join("first.outfile"),
                data.path().join("first.outtree")
            ]
        );
        assert_eq!(
            std::fs::read_to_string(data.path().join("first.outfile")).unwrap(),
            std::fs::read_to_string(&first).unwrap()
        );
        assert!(data.path().join("second.outtree").exists());
        assert!(!data.path().join("outfile").exists());
    }

    #[test]
    fn test_non_zero_exit_is_a_failure() {
        let _guard = SPAWN_LOCK.lock().unwrap_or_else(|err| err.into_inner());

        let bin = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        install_program(bin.path(), "brokenpars", "#!/bin/sh\nexit 3\n");

        let input = write_input(data.path(), "clones.phy");

        let err = run_phylip_program(&input, &config_for(bin.path(), "brokenpars"), false)
            .unwrap_err();

        assert_eq!(err.kind(), "ExternalProgramFailure");
    }

    #[test]
    fn test_missing_program() {
        let _guard = SPAWN_LOCK.lock().unwrap_or_else(|err| err.into_inner());

        let bin = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        let input = write_input(data.path(), "clones.phy");

        let err = run_phylip_program(&input, &config_for(bin.path(), "dnapars"), false)
            .unwrap_err();

        assert_eq!(err.kind(), "ExternalProgramNotFound");
    }

    #[test]
    fn test_existing_outputs_require_force() {
        let _guard = SPAWN_LOCK.lock().unwrap_or_else(|err| err.into_inner());

        let bin = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        install_program(bin.path(), "fakepars", FAKE_PARS);

        let input = write_input(data.path(), "clones.phy");
        std::fs::write(data.path().join("outfile"), "previous run\n").unwrap();

        let config = config_for(bin.path(), "fakepars");

        let err = run_phylip_program(&input, &config, false).unwrap_err();
        assert_eq!(err.kind(), "OutputCollision");

        let run = run_phylip_program(&input, &config, true).unwrap();
        assert_eq!(run.outputs.len(), 2);
        assert!(!data.path().join("outfile").exists());
    }

    #[test]
    fn test_stray_infile_is_refused() {
        let data = tempfile::tempdir().unwrap();
        let input = write_input(data.path(), "clones.phy");
        std::fs::write(data.path().join("infile"), "1 1\nA         A\n").unwrap();

        let err = run_phylip_program(&input, &PhylipProgramConfig::default(), true)
            .unwrap_err();

        assert_eq!(err.kind(), "OutputCollision");
    }

    #[test]
    fn test_missing_input() {
        let data = tempfile::tempdir().unwrap();
        let err = run_phylip_program(
            &data.path().join("absent.phy"),
            &PhylipProgramConfig::default(),
            false,
        )
        .unwrap_err();

        assert_eq!(err.kind(), "FileNotFound");
    }
}
