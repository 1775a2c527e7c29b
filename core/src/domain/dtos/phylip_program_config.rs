use crate::domain::errors::AutoPhylipError;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Placeholder replaced by the input file name in stdin responses.
pub const INPUT_TOKEN: &str = "{input}";

/// PHYLIP program launched when nothing else is configured.
pub const DEFAULT_PROGRAM: &str = "dnapars";

fn default_program() -> String {
    DEFAULT_PROGRAM.to_string()
}

fn default_responses() -> Vec<String> {
    vec![INPUT_TOKEN.to_string(), "Y".to_string()]
}

/// How to launch a PHYLIP program
///
/// PHYLIP programs are interactive: they ask for the input file name when no
/// `infile` exists in the working directory and then show a settings menu
/// that is accepted with `Y`. The `responses` are written to the program
/// stdin, one per line, in that order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhylipProgramConfig {
    /// Program name, e.g. `dnapars`, `dnaml` or `protpars`.
    #[serde(default = "default_program")]
    pub program: String,

    /// Directory holding the PHYLIP executables
    ///
    /// When absent the program is resolved through `PATH`.
    #[serde(default)]
    pub phylip_dir: Option<PathBuf>,

    /// Lines written to the program stdin.
    #[serde(default = "default_responses")]
    pub responses: Vec<String>,
}

impl Default for PhylipProgramConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            phylip_dir: None,
            responses: default_responses(),
        }
    }
}

impl PhylipProgramConfig {
    pub fn from_file(file: &Path) -> Result<Self, AutoPhylipError> {
        let content = std::fs::read_to_string(file)
            .map_err(|err| AutoPhylipError::from_io(file, err))?;

        serde_yaml::from_str::<Self>(&content).map_err(|err| {
            AutoPhylipError::Config {
                path: file.to_path_buf(),
                msg: err.to_string(),
            }
        })
    }

    /// Path used to launch the program.
    pub fn program_path(&self) -> PathBuf {
        match &self.phylip_dir {
            Some(dir) => dir.join(&self.program),
            None => PathBuf::from(&self.program),
        }
    }

    /// Stdin content for a given input file name.
    pub fn render_responses(&self, input_name: &str) -> String {
        self.responses
            .iter()
            .map(|line| format!("{}\n", line.replace(INPUT_TOKEN, input_name)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_responses() {
        let config = PhylipProgramConfig::default();
        assert_eq!(config.render_responses("clones.phy"), "clones.phy\nY\n");
        assert_eq!(config.program_path(), PathBuf::from("dnapars"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = serde_yaml::from_str::<PhylipProgramConfig>(
            "program: dnaml\nphylipDir: /opt/phylip/exe\n",
        )
        .unwrap();

        assert_eq!(config.program_path(), PathBuf::from("/opt/phylip/exe/dnaml"));
        assert_eq!(config.responses, default_responses());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phylip.yaml");
        std::fs::write(
            &path,
            "program: protpars\nresponses:\n  - \"{input}\"\n  - J\n  - \"7\"\n  - Y\n",
        )
        .unwrap();

        let config = PhylipProgramConfig::from_file(&path).unwrap();
        assert_eq!(config.program, "protpars");
        assert_eq!(config.render_responses("a.phy"), "a.phy\nJ\n7\nY\n");

        std::fs::write(&path, "responses: 12\n").unwrap();
        let err = PhylipProgramConfig::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), "Config");
    }
}
