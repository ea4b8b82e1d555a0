mod datasets;

pub use datasets::{blank_cell, color, dataset, names, weather};
