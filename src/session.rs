use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

use logistic::{LogisticError, LogisticRegression};
use medipredict_helpers::accuracy;
use ndarray::Array1;

use crate::dataset::{Dataset, DatasetError};
use crate::schema::{FieldSchema, SchemaError};
use crate::split::{SplitError, train_test_split};

/// Training parameters. Defaults mirror the original pipeline: one third of
/// the data held out, seed 42, up to 1000 iterations.
#[derive(Debug, Clone, Copy)]
pub struct TrainConfig {
    pub test_ratio: f64,
    pub seed: u64,
    pub learning_rate: f64,
    pub l2_penalty: f64,
    pub max_iter: u32,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            test_ratio: 0.33,
            seed: 42,
            learning_rate: 0.1,
            l2_penalty: 0.0,
            max_iter: 1000,
        }
    }
}

/// Errors that can occur while building a session.
#[derive(Debug)]
pub enum TrainError {
    Dataset(DatasetError),
    Schema(SchemaError),
    Split(SplitError),
    Model(LogisticError),
}

impl Display for TrainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TrainError::Dataset(err) => write!(f, "{err}"),
            TrainError::Schema(err) => write!(f, "{err}"),
            TrainError::Split(err) => write!(f, "{err}"),
            TrainError::Model(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TrainError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TrainError::Dataset(err) => Some(err),
            TrainError::Schema(err) => Some(err),
            TrainError::Split(err) => Some(err),
            TrainError::Model(err) => Some(err),
        }
    }
}

impl From<DatasetError> for TrainError {
    fn from(err: DatasetError) -> Self {
        TrainError::Dataset(err)
    }
}

impl From<SchemaError> for TrainError {
    fn from(err: SchemaError) -> Self {
        TrainError::Schema(err)
    }
}

impl From<SplitError> for TrainError {
    fn from(err: SplitError) -> Self {
        TrainError::Split(err)
    }
}

impl From<LogisticError> for TrainError {
    fn from(err: LogisticError) -> Self {
        TrainError::Model(err)
    }
}

/// Errors surfaced to the user when a prediction is requested.
///
/// Validation failures are raised before the classifier is touched.
#[derive(Debug)]
pub enum PredictError {
    /// Number of raw values differs from the number of entry fields
    WrongFieldCount { expected: usize, got: usize },
    /// An entry field was left blank
    BlankField { field: &'static str },
    /// An entry field did not parse as a finite number
    NotNumeric { field: &'static str, value: String },
    Model(LogisticError),
}

impl Display for PredictError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictError::WrongFieldCount { expected, got } => {
                write!(f, "Expected {expected} values but got {got}")
            }
            PredictError::BlankField { field } => {
                write!(f, "Please enter a value for {field}")
            }
            PredictError::NotNumeric { field, value } => {
                write!(f, "'{value}' is not a valid number for {field}")
            }
            PredictError::Model(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PredictError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PredictError::Model(err) => Some(err),
            _ => None,
        }
    }
}

/// The binary risk label shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Risk {
    Low,
    High,
}

impl Risk {
    pub fn from_label(label: u8) -> Self {
        if label == 1 { Risk::High } else { Risk::Low }
    }

    pub fn is_high(self) -> bool {
        self == Risk::High
    }
}

impl Display for Risk {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Risk::High => write!(f, "High Risk of Diabetes"),
            Risk::Low => write!(f, "Low Risk of Diabetes"),
        }
    }
}

/// Everything the running application needs after startup: the fitted model,
/// the entry-field schema, the verified field-to-column mapping, and the
/// held-out accuracy. Built once; immutable afterwards.
pub struct Session {
    model: LogisticRegression<f64>,
    schema: FieldSchema,
    /// For each training column, the index of the entry field feeding it.
    column_mapping: Vec<usize>,
    held_out_accuracy: f64,
}

impl Session {
    /// Loads the CSV at `path` and trains a session on it.
    pub fn train(
        path: impl AsRef<Path>,
        schema: FieldSchema,
        config: &TrainConfig,
    ) -> Result<Self, TrainError> {
        let dataset = Dataset::from_path(path)?;
        Self::from_dataset(dataset, schema, config)
    }

    /// Trains a session on an already loaded dataset.
    ///
    /// The schema is verified against the dataset's feature columns before
    /// any fitting happens; a dataset whose columns are not a bijection with
    /// the entry fields is rejected outright.
    pub fn from_dataset(
        dataset: Dataset,
        schema: FieldSchema,
        config: &TrainConfig,
    ) -> Result<Self, TrainError> {
        let column_mapping = schema.column_mapping(dataset.feature_names())?;

        let (train, test) = train_test_split(dataset.into_records(), config.test_ratio, config.seed)?;

        let mut model =
            LogisticRegression::new(config.learning_rate, config.l2_penalty, config.max_iter);
        model.fit(&train)?;

        let predictions = test
            .iter()
            .map(|record| model.predict(record.features.view()))
            .collect::<Result<Vec<u8>, LogisticError>>()?;
        let truths: Vec<u8> = test.iter().map(|record| record.label).collect();
        let held_out_accuracy = accuracy(&predictions, &truths);

        Ok(Session {
            model,
            schema,
            column_mapping,
            held_out_accuracy,
        })
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    /// Fraction of correct predictions on the held-out partition.
    pub fn held_out_accuracy(&self) -> f64 {
        self.held_out_accuracy
    }

    /// Classifies raw user input, given in the schema's presentation order.
    ///
    /// Every value must be non-blank and parse as a finite number; the first
    /// offending field (in presentation order) is reported and the
    /// classifier is not invoked. Values are arranged into training-column
    /// order by name through the verified mapping, never positionally.
    pub fn predict(&self, raw_values: &[&str]) -> Result<Risk, PredictError> {
        let fields = self.schema.fields();
        if raw_values.len() != fields.len() {
            return Err(PredictError::WrongFieldCount {
                expected: fields.len(),
                got: raw_values.len(),
            });
        }

        let mut parsed = Vec::with_capacity(fields.len());
        for (field, raw) in fields.iter().zip(raw_values) {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(PredictError::BlankField { field: field.label });
            }
            let value: f64 = trimmed.parse().map_err(|_| PredictError::NotNumeric {
                field: field.label,
                value: trimmed.to_string(),
            })?;
            if !value.is_finite() {
                return Err(PredictError::NotNumeric {
                    field: field.label,
                    value: trimmed.to_string(),
                });
            }
            parsed.push(value);
        }

        let features: Array1<f64> = self
            .column_mapping
            .iter()
            .map(|&field_index| parsed[field_index])
            .collect();

        let label = self
            .model
            .predict(features.view())
            .map_err(PredictError::Model)?;
        Ok(Risk::from_label(label))
    }
}
