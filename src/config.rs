use crate::io::{IoError, OutputFormat};
use crate::selection::NonFinitePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_output() -> PathBuf {
    PathBuf::from("result.csv")
}

fn default_label_columns() -> usize {
    2
}

/// Settings for one scoring run, usually read from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    #[serde(default)]
    pub input: Option<PathBuf>,

    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Trailing columns that form the label.
    #[serde(default = "default_label_columns")]
    pub label_columns: usize,

    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default)]
    pub non_finite: NonFinitePolicy,

    /// Worker threads for scoring; `None` uses every core.
    #[serde(default)]
    pub threads: Option<usize>,

    /// Write entropy, gain and split information next to each ratio.
    #[serde(default)]
    pub breakdown: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: None,
            output: default_output(),
            label_columns: default_label_columns(),
            format: OutputFormat::default(),
            non_finite: NonFinitePolicy::default(),
            threads: None,
            breakdown: false,
        }
    }
}

/// Values given explicitly on the command line; they win over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub label_columns: Option<usize>,
    pub format: Option<OutputFormat>,
    pub non_finite: Option<NonFinitePolicy>,
    pub threads: Option<usize>,
    pub breakdown: bool,
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self, IoError> {
        let text = std::fs::read_to_string(path).map_err(|e| IoError::FileNotFound {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&text).map_err(|e| IoError::Config {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn merge(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(input) = overrides.input {
            self.input = Some(input);
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if let Some(n) = overrides.label_columns {
            self.label_columns = n;
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        if let Some(policy) = overrides.non_finite {
            self.non_finite = policy;
        }
        if let Some(threads) = overrides.threads {
            self.threads = Some(threads);
        }
        self.breakdown |= overrides.breakdown;
        self
    }
}
