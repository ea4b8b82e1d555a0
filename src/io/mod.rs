mod error;
mod reader;
mod writer;

pub use error::IoError;
pub use reader::{DatasetReader, LoadedDataset};
pub use writer::{OutputFormat, ResultWriter};
