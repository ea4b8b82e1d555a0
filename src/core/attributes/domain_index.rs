use crate::core::dataset::Dataset;
use std::collections::BTreeSet;

static EMPTY_DOMAIN: BTreeSet<String> = BTreeSet::new();

/// Distinct non-empty values observed per attribute column.
///
/// Built in one pass over the dataset and read only afterwards. Domains are
/// ordered so partitions enumerate their buckets deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeDomainIndex {
    domains: Vec<BTreeSet<String>>,
}

impl AttributeDomainIndex {
    /// Indexes the first `width` columns of every record.
    pub fn build(dataset: &Dataset, width: usize) -> Self {
        let mut domains = vec![BTreeSet::new(); width];
        for record in dataset {
            for (i, domain) in domains.iter_mut().enumerate() {
                if let Some(v) = record.value_at_index(i) {
                    if !domain.contains(v) {
                        domain.insert(v.to_string());
                    }
                }
            }
        }
        Self { domains }
    }

    /// Domain of column `index`; empty when nothing was observed there.
    pub fn domain(&self, index: usize) -> &BTreeSet<String> {
        self.domains.get(index).unwrap_or(&EMPTY_DOMAIN)
    }

    pub fn number_of_attributes(&self) -> usize {
        self.domains.len()
    }
}
