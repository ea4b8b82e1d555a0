use crate::core::{Dataset, Label, Record};
use crate::selection::GainRatioCalculator;

pub fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// Builds a dataset from `(attribute values, label values)` pairs.
pub fn dataset(rows: &[(&[&str], &[&str])]) -> Dataset {
    rows.iter()
        .map(|(values, label)| {
            Record::new(
                values.iter().map(|v| v.to_string()).collect(),
                label.iter().copied().collect::<Label>(),
            )
        })
        .collect()
}

/// Weather = {Sunny, Sunny, Rainy, Rainy}, label = {Yes, No, Yes, No}.
pub fn weather() -> GainRatioCalculator {
    let ds = dataset(&[
        (&["Sunny"], &["Yes"]),
        (&["Sunny"], &["No"]),
        (&["Rainy"], &["Yes"]),
        (&["Rainy"], &["No"]),
    ]);
    GainRatioCalculator::new(names(&["Weather"]), ds).unwrap()
}

/// Color = {Red, Red}, label = {Yes, No}.
pub fn color() -> GainRatioCalculator {
    let ds = dataset(&[(&["Red"], &["Yes"]), (&["Red"], &["No"])]);
    GainRatioCalculator::new(names(&["Color"]), ds).unwrap()
}

/// Three attributes over four rows; the second row has no "Temp".
pub fn blank_cell() -> GainRatioCalculator {
    let ds = dataset(&[
        (&["Sunny", "Hot", "High"], &["Yes"]),
        (&["Sunny", "", "Low"], &["No"]),
        (&["Rainy", "Mild", "High"], &["Yes"]),
        (&["Rainy", "Hot", "Low"], &["No"]),
    ]);
    GainRatioCalculator::new(names(&["Outlook", "Temp", "Humidity"]), ds).unwrap()
}
