use crate::core::{AttributeDomainIndex, Dataset, RatioError, Record};
use crate::selection::entropy::{entropy, log_sum};
use crate::selection::ranking::GainRatios;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, instrument};

/// Breakdown of one attribute's gain ratio.
///
/// `support` is the number of records with a value for the attribute; all
/// other quantities are computed on that filtered subset only. Non-finite
/// values serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeScore {
    pub name: String,
    pub support: usize,
    pub entropy: f64,
    pub conditional_entropy: f64,
    pub gain: f64,
    pub intrinsic_information: f64,
    pub gain_ratio: f64,
}

/// Scores every named attribute of a dataset by gain ratio.
///
/// Attribute name `i` scores raw attribute column `i`. The dataset is never
/// mutated, so scoring can be repeated and attributes are scored in parallel.
pub struct GainRatioCalculator {
    attribute_names: Vec<String>,
    dataset: Dataset,
    domains: AttributeDomainIndex,
}

impl GainRatioCalculator {
    /// # Errors
    ///
    /// - [`RatioError::EmptyDataset`] when `dataset` has no records.
    /// - [`RatioError::TooManyAttributeNames`] when there are more names than
    ///   attribute columns.
    /// - [`RatioError::DuplicateAttributeName`] when two names are equal.
    #[instrument(skip_all, fields(names = attribute_names.len(), records = dataset.len()))]
    pub fn new(attribute_names: Vec<String>, dataset: Dataset) -> Result<Self, RatioError> {
        if dataset.is_empty() {
            return Err(RatioError::EmptyDataset);
        }

        let width = dataset.attribute_width();
        if attribute_names.len() > width {
            return Err(RatioError::TooManyAttributeNames {
                names: attribute_names.len(),
                width,
            });
        }

        let mut seen = HashSet::with_capacity(attribute_names.len());
        if let Some(dup) = attribute_names.iter().find(|n| !seen.insert(n.as_str())) {
            return Err(RatioError::DuplicateAttributeName(dup.clone()));
        }

        // Indexed over the full record width: lookups go by raw column.
        let domains = AttributeDomainIndex::build(&dataset, width);
        debug!(width, "attribute domains indexed");

        Ok(Self {
            attribute_names,
            dataset,
            domains,
        })
    }

    pub fn attribute_names(&self) -> &[String] {
        &self.attribute_names
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn domains(&self) -> &AttributeDomainIndex {
        &self.domains
    }

    /// Gain ratio of every named attribute.
    #[instrument(skip_all)]
    pub fn calc_gain_ratio(&self) -> GainRatios {
        let ratios: BTreeMap<String, f64> = (0..self.attribute_names.len())
            .into_par_iter()
            .map(|i| {
                let score = self.score_column(i);
                (score.name, score.gain_ratio)
            })
            .collect();

        info!(attributes = ratios.len(), "gain ratios computed");
        GainRatios::new(ratios)
    }

    /// Full breakdown for every named attribute, in column order.
    pub fn scores(&self) -> Vec<AttributeScore> {
        (0..self.attribute_names.len())
            .into_par_iter()
            .map(|i| self.score_column(i))
            .collect()
    }

    /// Scores attribute `index`, or `None` when no name covers that column.
    pub fn score_attribute(&self, index: usize) -> Option<AttributeScore> {
        if index < self.attribute_names.len() {
            Some(self.score_column(index))
        } else {
            None
        }
    }

    fn score_column(&self, index: usize) -> AttributeScore {
        let filtered = self.filter_for_attribute(index);
        let buckets = self.partition(&filtered, index);
        let support = filtered.len();

        let entropy_before = entropy(filtered.iter().copied());
        let conditional_entropy = average_entropy(&buckets, support);
        let gain = entropy_before - conditional_entropy;
        let intrinsic_information = log_sum(buckets.values().map(Vec::len), support);
        let gain_ratio = gain / intrinsic_information;

        let name = self.attribute_names[index].clone();
        debug!(
            attribute = %name,
            support,
            gain,
            intrinsic_information,
            gain_ratio,
            "attribute scored"
        );

        AttributeScore {
            name,
            support,
            entropy: entropy_before,
            conditional_entropy,
            gain,
            intrinsic_information,
            gain_ratio,
        }
    }

    fn filter_for_attribute(&self, index: usize) -> Vec<&Record> {
        self.dataset
            .iter()
            .filter(|r| !r.is_missing_at_index(index))
            .collect()
    }

    /// One bucket per domain value, including values absent from `records`.
    fn partition<'a>(
        &'a self,
        records: &[&'a Record],
        index: usize,
    ) -> BTreeMap<&'a str, Vec<&'a Record>> {
        let seeded: BTreeMap<&str, Vec<&Record>> = self
            .domains
            .domain(index)
            .iter()
            .map(|v| (v.as_str(), Vec::new()))
            .collect();

        records.iter().fold(seeded, |mut buckets, &r| {
            if let Some(v) = r.value_at_index(index) {
                buckets.entry(v).or_default().push(r);
            }
            buckets
        })
    }
}

/// Size-weighted mean entropy of the buckets; empty buckets add nothing.
fn average_entropy(buckets: &BTreeMap<&str, Vec<&Record>>, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    buckets
        .values()
        .filter(|b| !b.is_empty())
        .map(|b| (b.len() as f64 / total as f64) * entropy(b.iter().copied()))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Label;
    use crate::testing::dummies::{blank_cell, color, dataset, names, weather};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const EPS: f64 = 1e-6;

    #[test]
    fn rejects_empty_dataset() {
        let err = GainRatioCalculator::new(names(&["a"]), Dataset::default())
            .err()
            .unwrap();
        assert_eq!(err, RatioError::EmptyDataset);
    }

    #[test]
    fn rejects_more_names_than_columns() {
        let ds = dataset(&[(&["x"], &["Yes"])]);
        let err = GainRatioCalculator::new(names(&["a", "b"]), ds)
            .err()
            .unwrap();
        assert_eq!(err, RatioError::TooManyAttributeNames { names: 2, width: 1 });
    }

    #[test]
    fn rejects_duplicate_names() {
        let ds = dataset(&[(&["x", "y"], &["Yes"])]);
        let err = GainRatioCalculator::new(names(&["a", "a"]), ds)
            .err()
            .unwrap();
        assert_eq!(err, RatioError::DuplicateAttributeName("a".into()));
    }

    #[test]
    fn one_entry_per_attribute_name() {
        let ds = dataset(&[
            (&["a", "x", "p"], &["Yes"]),
            (&["b", "y", "p"], &["No"]),
            (&["a", "", "q"], &["No"]),
        ]);
        // Scoring a prefix of the columns is allowed.
        let calc = GainRatioCalculator::new(names(&["first", "second"]), ds).unwrap();
        let result = calc.calc_gain_ratio();
        assert_eq!(result.len(), 2);
        assert!(result.get("first").is_some());
        assert!(result.get("second").is_some());
        assert!(result.get("third").is_none());
    }

    #[test]
    fn weather_scenario() {
        let calc = weather();
        let s = calc.score_attribute(0).unwrap();
        assert_eq!(s.support, 4);
        assert!((s.entropy - 1.0).abs() < EPS);
        assert!((s.conditional_entropy - 1.0).abs() < EPS);
        assert!(s.gain.abs() < EPS);
        assert!((s.intrinsic_information - 1.0).abs() < EPS);
        assert!(s.gain_ratio.abs() < EPS);

        let ratio = calc.calc_gain_ratio().get("Weather").unwrap();
        assert!(ratio.abs() < EPS);
    }

    #[test]
    fn color_scenario_is_nan() {
        let calc = color();
        let s = calc.score_attribute(0).unwrap();
        assert!((s.entropy - 1.0).abs() < EPS);
        assert!((s.conditional_entropy - 1.0).abs() < EPS);
        assert_eq!(s.gain, 0.0);
        assert_eq!(s.intrinsic_information, 0.0);
        assert!(s.gain_ratio.is_nan());
        assert!(calc.calc_gain_ratio().get("Color").unwrap().is_nan());
    }

    #[test]
    fn single_distinct_value_is_non_finite() {
        let ds = dataset(&[
            (&["k", "a"], &["Yes"]),
            (&["k", "b"], &["No"]),
            (&["", "a"], &["No"]),
        ]);
        let calc = GainRatioCalculator::new(names(&["Const", "Other"]), ds).unwrap();
        let s = calc.score_attribute(0).unwrap();
        assert_eq!(s.intrinsic_information, 0.0);
        assert!(!s.gain_ratio.is_finite());
        assert!(calc.calc_gain_ratio().get("Other").unwrap().is_finite());
    }

    #[test]
    fn perfectly_predictive_attribute() {
        let ds = dataset(&[
            (&["Sunny"], &["Yes"]),
            (&["Sunny"], &["Yes"]),
            (&["Rainy"], &["No"]),
            (&["Rainy"], &["No"]),
        ]);
        let calc = GainRatioCalculator::new(names(&["Weather"]), ds).unwrap();
        let s = calc.score_attribute(0).unwrap();
        assert!((s.gain - 1.0).abs() < EPS);
        assert!((s.gain_ratio - 1.0).abs() < EPS);
    }

    #[test]
    fn gain_matches_hand_computation() {
        // Buckets: a -> {Y, Y, N}, b -> {N}.
        // H = 1, H|A = 3/4 * H(2/3, 1/3), IV = H(3/4, 1/4).
        let ds = dataset(&[
            (&["a"], &["Y"]),
            (&["a"], &["Y"]),
            (&["a"], &["N"]),
            (&["b"], &["N"]),
        ]);
        let calc = GainRatioCalculator::new(names(&["A"]), ds).unwrap();
        let s = calc.score_attribute(0).unwrap();

        let h = |ps: &[f64]| -> f64 { ps.iter().map(|p| -p * p.log2()).sum() };
        let conditional = 0.75 * h(&[2.0 / 3.0, 1.0 / 3.0]);
        let gain = 1.0 - conditional;
        let iv = h(&[0.75, 0.25]);

        assert!(s.gain > 0.0);
        assert!((s.conditional_entropy - conditional).abs() < EPS);
        assert!((s.gain - gain).abs() < EPS);
        assert!((s.intrinsic_information - iv).abs() < EPS);
        assert!((s.gain_ratio - gain / iv).abs() < EPS);
    }

    #[test]
    fn gain_is_never_negative_on_random_data() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let rows: usize = rng.random_range(2..40);
            let records: Dataset = (0..rows)
                .map(|_| {
                    let attrs = (0..3)
                        .map(|_| match rng.random_range(0..4) {
                            0 => String::new(),
                            v => format!("v{v}"),
                        })
                        .collect();
                    let label = Label::new(vec![format!("c{}", rng.random_range(0..3))]);
                    Record::new(attrs, label)
                })
                .collect();

            let calc = GainRatioCalculator::new(names(&["a", "b", "c"]), records).unwrap();
            for s in calc.scores() {
                assert!(s.gain >= -1e-9, "{s:?}");
                assert!(s.conditional_entropy <= s.entropy + 1e-9, "{s:?}");
            }
        }
    }

    #[test]
    fn blank_value_only_affects_its_own_attribute() {
        let calc = blank_cell();
        let scores = calc.scores();
        assert_eq!(scores[0].support, 4);
        assert_eq!(scores[1].support, 3);
        assert_eq!(scores[2].support, 4);
    }

    #[test]
    fn score_attribute_out_of_range_is_none() {
        let calc = blank_cell();
        assert!(calc.score_attribute(2).is_some());
        assert!(calc.score_attribute(3).is_none());
        assert!(calc.score_attribute(usize::MAX).is_none());
    }

    #[test]
    fn scores_follow_column_order() {
        let ds = dataset(&[(&["a", "x"], &["Yes"]), (&["b", "y"], &["No"])]);
        let calc = GainRatioCalculator::new(names(&["Zeta", "Alpha"]), ds).unwrap();
        let order: Vec<String> = calc.scores().into_iter().map(|s| s.name).collect();
        assert_eq!(order, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn repeated_calls_are_idempotent() {
        let calc = blank_cell();
        let first = calc.calc_gain_ratio();
        let second = calc.calc_gain_ratio();
        for (name, v) in first.iter() {
            let w = second.get(name).unwrap();
            assert!(v == w || (v.is_nan() && w.is_nan()));
        }
    }

    #[test]
    fn empty_filtered_subset_is_nan() {
        let ds = dataset(&[(&["", "a"], &["Yes"]), (&["", "b"], &["No"])]);
        let calc = GainRatioCalculator::new(names(&["Blank", "Other"]), ds).unwrap();
        let s = calc.score_attribute(0).unwrap();
        assert_eq!(s.support, 0);
        assert_eq!(s.entropy, 0.0);
        assert_eq!(s.conditional_entropy, 0.0);
        assert!(s.gain_ratio.is_nan());
    }

    #[test]
    fn composite_label_is_one_class() {
        // Same first label column, different second column: two classes.
        let ds = dataset(&[
            (&["a"], &["Yes", "Low"]),
            (&["a"], &["Yes", "High"]),
            (&["b"], &["Yes", "Low"]),
            (&["b"], &["Yes", "High"]),
        ]);
        let calc = GainRatioCalculator::new(names(&["A"]), ds).unwrap();
        assert!((calc.score_attribute(0).unwrap().entropy - 1.0).abs() < EPS);
    }
}
