use anyhow::Result;
use autophylip_core::{
    domain::{
        dtos::phylip_program_config::PhylipProgramConfig, errors::AutoPhylipError,
    },
    use_cases::run_phylip_programs,
};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct Arguments {
    /// Paths to the sequence files
    ///
    /// The files should be in PHYLIP format.
    #[arg(required = true)]
    pub(super) files: Vec<PathBuf>,

    /// PHYLIP program to run
    ///
    /// Defaults to `dnapars`, or to the program set in the configuration
    /// file.
    #[arg(short, long)]
    pub(super) program: Option<String>,

    /// Directory holding the PHYLIP executables
    ///
    /// When absent the program is looked up through `PATH`.
    #[arg(long)]
    pub(super) phylip_dir: Option<PathBuf>,

    /// Path to the configuration file
    ///
    /// Configuration file in YAML format. Command line options take
    /// precedence over its values.
    #[arg(short, long)]
    pub(super) config_file: Option<PathBuf>,

    /// Remove outputs left by a previous PHYLIP run
    ///
    /// PHYLIP always writes `outfile` and `outtree` in the directory of its
    /// input. Existing ones are an error unless this flag is set.
    #[arg(short, long, default_value = "false")]
    pub(super) force: bool,
}

impl Arguments {
    fn to_config(&self) -> Result<PhylipProgramConfig, AutoPhylipError> {
        let mut config = match &self.config_file {
            Some(file) => PhylipProgramConfig::from_file(file)?,
            None => PhylipProgramConfig::default(),
        };

        if let Some(program) = &self.program {
            config.program = program.to_owned();
        }

        if let Some(phylip_dir) = &self.phylip_dir {
            config.phylip_dir = Some(phylip_dir.to_owned());
        }

        Ok(config)
    }
}

pub(crate) fn run_programs_cmd(args: Arguments) -> Result<()> {
    let config = args.to_config()?;

    for run in run_phylip_programs(&args.files, &config, args.force)? {
        info!(
            "{program} produced {count} file(s) for {input:?}",
            program = config.program,
            count = run.outputs.len(),
            input = run.input
        );

        for output in run.outputs {
            println!("{}", output.display());
        }
    }

    Ok(())
}
