use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Where NaN scores go when ranking. Infinities keep their natural place.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum NonFinitePolicy {
    #[default]
    Last,
    First,
}

/// Gain ratio per attribute name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GainRatios(BTreeMap<String, f64>);

impl GainRatios {
    pub fn new(ratios: BTreeMap<String, f64>) -> Self {
        Self(ratios)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn into_inner(self) -> BTreeMap<String, f64> {
        self.0
    }

    /// Entries ascending by score, ties broken by name.
    pub fn ranked(&self, policy: NonFinitePolicy) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self.iter().collect();
        entries.sort_by(|a, b| compare_scores(a.1, b.1, policy).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

/// Ascending order on scores with NaN placed according to `policy`.
pub fn compare_scores(a: f64, b: f64, policy: NonFinitePolicy) -> Ordering {
    let nan_order = match policy {
        NonFinitePolicy::Last => Ordering::Greater,
        NonFinitePolicy::First => Ordering::Less,
    };
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => nan_order,
        (false, true) => nan_order.reverse(),
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}
