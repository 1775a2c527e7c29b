use anyhow::{Context, Result};
use autophylip_core::{
    domain::{
        dtos::{
            field_selection::{FieldMatcher, FieldSelection, DEFAULT_IDENTIFIER_COLUMN},
            output_mode::{OutputMode, DEFAULT_COMBINED_OUTPUT, PHYLIP_EXTENSION},
            phylip_document::LengthPolicy,
        },
        errors::AutoPhylipError,
    },
    use_cases::{tab_to_phylip, TabToPhylipOptions},
};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct Arguments {
    /// Paths to the tabfiles
    ///
    /// Tab-delimited tables with a header row.
    #[arg(required = true)]
    pub(super) files: Vec<PathBuf>,

    /// Sequence columns pattern
    ///
    /// Regular expression searched in each column name. Matching columns are
    /// concatenated in header order. When absent every column except the
    /// identifier is used.
    #[arg(long = "match", value_name = "PATTERN")]
    pub(super) pattern: Option<String>,

    /// Identifier column name
    #[arg(long, default_value = DEFAULT_IDENTIFIER_COLUMN)]
    pub(super) field: String,

    /// Combine every input into a single PHYLIP file
    ///
    /// Without a value the output is written to `file.phy`. Use
    /// `--combine=OUTPUT` to choose another path. When absent, one `.phy`
    /// file is written next to each input.
    #[arg(
        long,
        value_name = "OUTPUT",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = DEFAULT_COMBINED_OUTPUT
    )]
    pub(super) combine: Option<PathBuf>,

    /// Germline sequence
    ///
    /// Written as the first entry of every output, named `Germline`.
    #[arg(long, value_name = "SEQUENCE")]
    pub(super) germline: Option<String>,

    /// Pad shorter sequences instead of failing
    ///
    /// Sequences are right-padded to the longest one with the given
    /// character, `-` by default. Use `--pad=CHAR` to choose another one.
    #[arg(
        long,
        value_name = "CHAR",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "-"
    )]
    pub(super) pad: Option<char>,
}

impl Arguments {
    fn to_options(&self) -> Result<TabToPhylipOptions, AutoPhylipError> {
        let selection = FieldSelection::from_pattern(self.pattern.as_deref())?;

        Ok(TabToPhylipOptions {
            matcher: FieldMatcher::new(self.field.to_owned(), selection),
            output_mode: OutputMode::from_combine(self.combine.to_owned()),
            germline: self.germline.to_owned(),
            length_policy: match self.pad {
                None => LengthPolicy::Strict,
                Some(gap) => LengthPolicy::PadToLongest(gap),
            },
        })
    }

    /// The missing input that was probably meant as the `--combine` output
    ///
    /// `--combine out.phy a.tab` reads `out.phy` as an input, since the
    /// combined output path is only taken from `--combine=OUTPUT`.
    fn misplaced_combine_output<'a>(&self, err: &'a AutoPhylipError) -> Option<&'a Path> {
        match (err, &self.combine) {
            (AutoPhylipError::FileNotFound { path }, Some(_))
                if self.files.contains(path)
                    && path.extension().is_some_and(|ext| ext == PHYLIP_EXTENSION) =>
            {
                Some(path.as_path())
            }
            _ => None,
        }
    }
}

pub(crate) fn convert_tabfiles_cmd(args: Arguments) -> Result<()> {
    let options = args.to_options()?;

    let outputs = match tab_to_phylip(&args.files, &options) {
        Ok(outputs) => outputs,
        Err(err) => {
            let hint = args.misplaced_combine_output(&err).map(|path| {
                format!(
                    "use `--combine={path}` to write the combined output to {path}",
                    path = path.display()
                )
            });

            return match hint {
                Some(hint) => Err(err).context(hint),
                None => Err(err.into()),
            };
        }
    };

    for output in outputs {
        info!("PHYLIP file written: {output:?}");
        println!("{}", output.display());
    }

    Ok(())
}
