use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use medipredict_helpers::Record;
use ndarray::Array1;

/// Header name of the binary label column.
pub const OUTCOME_COLUMN: &str = "Outcome";

/// Errors that can occur while loading the training CSV.
#[derive(Debug)]
pub enum DatasetError {
    Io(std::io::Error),
    Csv(csv::Error),
    /// No column named `Outcome` in the header row
    MissingOutcomeColumn,
    /// The same column name appears twice in the header
    DuplicateColumn(String),
    /// A predictor cell did not parse as a number
    NonNumericValue { row: usize, column: String },
    /// An outcome cell was not 0 or 1
    InvalidOutcome { row: usize },
    /// The file has a header but no data rows
    Empty,
}

impl Display for DatasetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::Io(err) => write!(f, "Failed to read dataset: {err}"),
            DatasetError::Csv(err) => write!(f, "Malformed CSV: {err}"),
            DatasetError::MissingOutcomeColumn => {
                write!(f, "Dataset has no '{OUTCOME_COLUMN}' column")
            }
            DatasetError::DuplicateColumn(name) => {
                write!(f, "Column '{name}' appears more than once in the header")
            }
            DatasetError::NonNumericValue { row, column } => {
                write!(f, "Row {row}, column '{column}': value is not numeric")
            }
            DatasetError::InvalidOutcome { row } => {
                write!(f, "Row {row}: outcome must be 0 or 1")
            }
            DatasetError::Empty => write!(f, "Dataset contains no records"),
        }
    }
}

impl Error for DatasetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DatasetError::Io(err) => Some(err),
            DatasetError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(err: std::io::Error) -> Self {
        DatasetError::Io(err)
    }
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        DatasetError::Csv(err)
    }
}

/// The training table: named feature columns plus binary-labeled records.
///
/// Loaded once at startup and immutable afterwards. Feature columns keep
/// their file order; the outcome column is lifted out into the record label.
#[derive(Debug, Clone)]
pub struct Dataset {
    feature_names: Vec<String>,
    records: Vec<Record<u8, f64>>,
}

impl Dataset {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers = csv_reader.headers()?.clone();

        let mut seen = HashSet::new();
        for name in headers.iter() {
            if !seen.insert(name) {
                return Err(DatasetError::DuplicateColumn(name.to_string()));
            }
        }

        let outcome_index = headers
            .iter()
            .position(|name| name == OUTCOME_COLUMN)
            .ok_or(DatasetError::MissingOutcomeColumn)?;

        let feature_names: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|&(index, _)| index != outcome_index)
            .map(|(_, name)| name.to_string())
            .collect();

        let mut records = Vec::new();
        for (row_index, result) in csv_reader.records().enumerate() {
            // 1-based, counting data rows only
            let row = row_index + 1;
            let record = result?;

            let mut features = Vec::with_capacity(feature_names.len());
            let mut label = None;
            for (index, value) in record.iter().enumerate() {
                if index == outcome_index {
                    label = Some(parse_outcome(value, row)?);
                } else {
                    let parsed: f64 = value.trim().parse().map_err(|_| {
                        DatasetError::NonNumericValue {
                            row,
                            column: headers.get(index).unwrap_or("").to_string(),
                        }
                    })?;
                    features.push(parsed);
                }
            }

            // The csv reader rejects ragged rows, so the outcome cell is
            // always present by the time we get here.
            let label = label.ok_or(DatasetError::InvalidOutcome { row })?;
            records.push(Record::new(Array1::from(features), label));
        }

        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        Ok(Dataset {
            feature_names,
            records,
        })
    }

    /// Predictor column names in file order, outcome excluded.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn records(&self) -> &[Record<u8, f64>] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record<u8, f64>> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn parse_outcome(value: &str, row: usize) -> Result<u8, DatasetError> {
    match value.trim() {
        "0" => Ok(0),
        "1" => Ok(1),
        other => {
            // Tolerate "0.0" / "1.0" style exports
            match other.parse::<f64>() {
                Ok(v) if v == 0.0 => Ok(0),
                Ok(v) if v == 1.0 => Ok(1),
                _ => Err(DatasetError::InvalidOutcome { row }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_CSV: &str = "\
A,B,Outcome
1.0,2.0,0
3.5,4.5,1
";

    #[test]
    fn test_load_small_dataset() {
        let dataset = Dataset::from_reader(SMALL_CSV.as_bytes()).unwrap();
        assert_eq!(dataset.feature_names(), ["A", "B"]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[0].label, 0);
        assert_eq!(dataset.records()[1].label, 1);
        assert_eq!(dataset.records()[1].features[0], 3.5);
    }

    #[test]
    fn test_outcome_column_not_last() {
        let csv = "A,Outcome,B\n1.0,1,2.0\n3.0,0,4.0\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.feature_names(), ["A", "B"]);
        assert_eq!(dataset.records()[0].label, 1);
        assert_eq!(dataset.records()[0].features.to_vec(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_missing_outcome_column() {
        let csv = "A,B\n1.0,2.0\n";
        let result = Dataset::from_reader(csv.as_bytes());
        assert!(matches!(result, Err(DatasetError::MissingOutcomeColumn)));
    }

    #[test]
    fn test_duplicate_column() {
        let csv = "A,A,Outcome\n1.0,2.0,0\n";
        let result = Dataset::from_reader(csv.as_bytes());
        assert!(matches!(result, Err(DatasetError::DuplicateColumn(name)) if name == "A"));
    }

    #[test]
    fn test_non_numeric_value() {
        let csv = "A,B,Outcome\n1.0,oops,0\n";
        let result = Dataset::from_reader(csv.as_bytes());
        assert!(matches!(
            result,
            Err(DatasetError::NonNumericValue { row: 1, column }) if column == "B"
        ));
    }

    #[test]
    fn test_invalid_outcome() {
        let csv = "A,B,Outcome\n1.0,2.0,2\n";
        let result = Dataset::from_reader(csv.as_bytes());
        assert!(matches!(result, Err(DatasetError::InvalidOutcome { row: 1 })));
    }

    #[test]
    fn test_empty_dataset() {
        let csv = "A,B,Outcome\n";
        let result = Dataset::from_reader(csv.as_bytes());
        assert!(matches!(result, Err(DatasetError::Empty)));
    }

    #[test]
    fn test_float_style_outcome() {
        let csv = "A,B,Outcome\n1.0,2.0,1.0\n3.0,4.0,0.0\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.records()[0].label, 1);
        assert_eq!(dataset.records()[1].label, 0);
    }
}
