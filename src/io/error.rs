use crate::core::RatioError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading datasets, reading configuration and writing results.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("file not found: {path}")]
    FileNotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV parse error in {path} at byte offset {offset}")]
    CsvParse {
        path: PathBuf,
        offset: u64,
        source: csv::Error,
    },

    #[error("missing header row in {path}")]
    MissingHeader { path: PathBuf },

    #[error("{path} has {width} columns, cannot use {label_columns} of them as labels")]
    InvalidLabelColumns {
        path: PathBuf,
        label_columns: usize,
        width: usize,
    },

    #[error("malformed dataset in {path}")]
    Dataset {
        path: PathBuf,
        source: RatioError,
    },

    #[error("invalid configuration in {path}")]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("cannot write file {path}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}
