use crate::core::Dataset;
use crate::io::IoError;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Attribute names and records loaded from a CSV file.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub attribute_names: Vec<String>,
    pub label_names: Vec<String>,
    pub dataset: Dataset,
}

/// Reads a labelled CSV file with a header row.
///
/// The last `label_columns` columns form the composite label and every column
/// before them is a categorical attribute. Empty cells are missing values.
pub struct DatasetReader {
    path: PathBuf,
    label_columns: usize,
}

impl DatasetReader {
    pub fn new(path: &Path, label_columns: usize) -> Self {
        Self {
            path: path.to_path_buf(),
            label_columns,
        }
    }

    #[instrument(skip(self), fields(path = %self.path.display(), label_columns = self.label_columns))]
    pub fn read(&self) -> Result<LoadedDataset, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;
        self.read_from(file)
    }

    /// Parses CSV text from any reader; `path` is only used in errors.
    pub fn read_from<R: Read>(&self, source: R) -> Result<LoadedDataset, IoError> {
        // flexible(true) so short rows surface as RowOutOfRange, not CsvParse.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        let header: Vec<String> = rdr
            .headers()
            .map_err(|e| self.csv_error(e))?
            .iter()
            .map(String::from)
            .collect();
        if header.is_empty() {
            return Err(IoError::MissingHeader {
                path: self.path.clone(),
            });
        }

        let width = header.len();
        if self.label_columns == 0 || self.label_columns > width {
            return Err(IoError::InvalidLabelColumns {
                path: self.path.clone(),
                label_columns: self.label_columns,
                width,
            });
        }
        let attribute_count = width - self.label_columns;
        debug!(width, attribute_count, "read CSV header");

        // The csv reader skips blank lines; each one is kept as an empty row so
        // it fails the width check like any other short row. A record spans
        // one line plus one per newline quoted inside its fields, so any extra
        // lines consumed before it were blank.
        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut record = csv::StringRecord::new();
        let mut line = rdr.position().line();
        while rdr.read_record(&mut record).map_err(|e| self.csv_error(e))? {
            let next = rdr.position().line();
            let quoted_newlines: u64 = record
                .iter()
                .map(|field| field.matches('\n').count() as u64)
                .sum();
            let blank = (next - line).saturating_sub(1 + quoted_newlines);
            rows.extend((0..blank).map(|_| Vec::new()));
            rows.push(record.iter().map(String::from).collect());
            line = next;
        }

        let dataset = Dataset::from_rows(&header, rows, attribute_count).map_err(|e| {
            IoError::Dataset {
                path: self.path.clone(),
                source: e,
            }
        })?;

        let mut attribute_names = header;
        let label_names = attribute_names.split_off(attribute_count);

        info!(
            records = dataset.len(),
            attributes = attribute_names.len(),
            labels = label_names.len(),
            "dataset loaded"
        );

        Ok(LoadedDataset {
            attribute_names,
            label_names,
            dataset,
        })
    }

    fn csv_error(&self, e: csv::Error) -> IoError {
        IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        }
    }
}
