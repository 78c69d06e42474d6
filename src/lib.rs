pub mod dataset;
pub mod schema;
pub mod session;
pub mod split;

pub use medipredict_helpers::{Float, Record, accuracy};

/// Where the shipped training data lives, relative to the workspace root.
pub const DATA_FILEPATH: &str = "data/diabetes.csv";
