pub mod attributes;
mod dataset;
mod error;
mod record;

pub use attributes::AttributeDomainIndex;
pub use dataset::Dataset;
pub use error::RatioError;
pub use record::{Label, Record};
