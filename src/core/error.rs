use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatioError {
    #[error("dataset is not valid: it contains no records")]
    EmptyDataset,

    #[error("{names} attribute names supplied but records only have {width} attribute columns")]
    TooManyAttributeNames { names: usize, width: usize },

    #[error("duplicate attribute name \"{0}\"")]
    DuplicateAttributeName(String),

    #[error("row {row} has {got} cells, expected at least {expected}")]
    RowOutOfRange {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("attribute column count {attribute_count} exceeds header width {width}")]
    AttributeCountOutOfRange { attribute_count: usize, width: usize },
}
