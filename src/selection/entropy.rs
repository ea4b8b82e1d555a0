use crate::core::{Label, Record};
use std::collections::HashMap;

/// Base-2 logarithm by change of base. Defined for `x > 0`.
#[inline]
pub fn log2(x: f64) -> f64 {
    x.ln() / std::f64::consts::LN_2
}

/// Shannon sum `-Σ p_k · log2(p_k)` with `p_k = count_k / total`.
///
/// A zero count contributes exactly `0` (the `0 · log2(0) = 0` convention)
/// instead of the NaN plain IEEE evaluation would give. A zero `total` has no
/// outcomes and yields `0`.
pub fn log_sum<I>(counts: I, total: usize) -> f64
where
    I: IntoIterator<Item = usize>,
{
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    counts
        .into_iter()
        .filter(|&c| c > 0)
        .fold(0.0, |acc, c| {
            let p = c as f64 / total;
            acc - p * log2(p)
        })
}

/// Number of records per composite label.
pub fn label_counts<'a, I>(records: I) -> HashMap<&'a Label, usize>
where
    I: IntoIterator<Item = &'a Record>,
{
    records.into_iter().fold(HashMap::new(), |mut counts, r| {
        *counts.entry(r.label()).or_insert(0) += 1;
        counts
    })
}

/// Entropy of the label distribution over `records`; `0` for no records.
pub fn entropy<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a Record>,
{
    let counts = label_counts(records);
    let total: usize = counts.values().sum();
    log_sum(counts.into_values(), total)
}
