mod domain_index;

pub use domain_index::AttributeDomainIndex;
