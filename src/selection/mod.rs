pub mod entropy;
mod gain_ratio;
mod ranking;

pub use entropy::{entropy, label_counts, log2, log_sum};
pub use gain_ratio::{AttributeScore, GainRatioCalculator};
pub use ranking::{GainRatios, NonFinitePolicy, compare_scores};
