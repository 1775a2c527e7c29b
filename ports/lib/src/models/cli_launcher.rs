use super::LogFormat;

use clap::{Args, CommandFactory, FromArgMatches, Parser};

/// Command line launcher shared by the AutoPHYLIP ports
///
/// The port specific arguments are flattened next to the logging options, so
/// every binary accepts the same `--log-*` flags.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliLauncher<T: Args> {
    #[command(flatten)]
    pub opts: T,

    /// Logging level or filter directives
    ///
    /// Accepts any `tracing` env-filter expression, e.g. `debug` or
    /// `autophylip_core=debug`. Defaults to `info`.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Write logs to a minutely rotated file instead of stderr
    #[arg(long)]
    pub log_file: Option<String>,

    #[arg(long, default_value = "ansi")]
    pub log_format: LogFormat,
}

impl<T: Args> CliLauncher<T> {
    /// Parse the process arguments under the name and description of the
    /// calling binary.
    pub fn parse_as(name: &'static str, about: &'static str) -> Self {
        let matches = Self::command()
            .name(name)
            .bin_name(name)
            .about(about)
            .get_matches();

        match Self::from_arg_matches(&matches) {
            Ok(args) => args,
            Err(err) => err.exit(),
        }
    }
}
