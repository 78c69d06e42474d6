use std::error::Error;
use std::fmt::{Display, Formatter};

use medipredict_helpers::Record;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Errors that can occur when partitioning the dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitError {
    /// test_ratio must lie strictly between 0 and 1
    InvalidRatio(f64),
    /// Need at least two records to form non-empty partitions
    TooFewRecords(usize),
}

impl Display for SplitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SplitError::InvalidRatio(ratio) => {
                write!(f, "Test ratio {ratio} is not strictly between 0 and 1")
            }
            SplitError::TooFewRecords(count) => {
                write!(f, "Cannot split {count} record(s) into train and test partitions")
            }
        }
    }
}

impl Error for SplitError {}

/// Shuffles the records with a seeded generator and splits them into
/// `(train, test)` partitions.
///
/// The same records, ratio, and seed always produce the same partitions, so
/// held-out accuracy is reproducible run-to-run. Both partitions are
/// guaranteed non-empty.
///
/// # Errors
///
/// Returns `SplitError::InvalidRatio` unless `0 < test_ratio < 1`, and
/// `SplitError::TooFewRecords` for fewer than two records.
pub fn train_test_split(
    records: Vec<Record<u8, f64>>,
    test_ratio: f64,
    seed: u64,
) -> Result<(Vec<Record<u8, f64>>, Vec<Record<u8, f64>>), SplitError> {
    if !(test_ratio > 0.0 && test_ratio < 1.0) {
        return Err(SplitError::InvalidRatio(test_ratio));
    }
    let total = records.len();
    if total < 2 {
        return Err(SplitError::TooFewRecords(total));
    }

    let mut shuffled = records;
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);

    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    let test_size = ((total as f64 * test_ratio).round() as usize).clamp(1, total - 1);

    let test = shuffled.split_off(total - test_size);
    Ok((shuffled, test))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn records(n: usize) -> Vec<Record<u8, f64>> {
        (0..n)
            .map(|i| Record::new(array![i as f64], (i % 2) as u8))
            .collect()
    }

    #[test]
    fn test_partition_sizes() {
        let (train, test) = train_test_split(records(9), 0.33, 42).unwrap();
        assert_eq!(test.len(), 3);
        assert_eq!(train.len(), 6);
    }

    #[test]
    fn test_same_seed_same_partitions() {
        let (train_a, test_a) = train_test_split(records(20), 0.33, 42).unwrap();
        let (train_b, test_b) = train_test_split(records(20), 0.33, 42).unwrap();

        let ids = |part: &[Record<u8, f64>]| part.iter().map(|r| r.features[0]).collect::<Vec<_>>();
        assert_eq!(ids(&train_a), ids(&train_b));
        assert_eq!(ids(&test_a), ids(&test_b));
    }

    #[test]
    fn test_different_seed_differs() {
        let (train_a, _) = train_test_split(records(20), 0.33, 1).unwrap();
        let (train_b, _) = train_test_split(records(20), 0.33, 2).unwrap();

        let ids = |part: &[Record<u8, f64>]| part.iter().map(|r| r.features[0]).collect::<Vec<_>>();
        assert_ne!(ids(&train_a), ids(&train_b));
    }

    #[test]
    fn test_partitions_are_never_empty() {
        // Ratio small enough to round to zero records without the clamp.
        let (train, test) = train_test_split(records(4), 0.01, 7).unwrap();
        assert_eq!(test.len(), 1);
        assert_eq!(train.len(), 3);
    }

    #[test]
    fn test_invalid_ratio() {
        assert!(matches!(
            train_test_split(records(4), 0.0, 42),
            Err(SplitError::InvalidRatio(_))
        ));
        assert!(matches!(
            train_test_split(records(4), 1.0, 42),
            Err(SplitError::InvalidRatio(_))
        ));
    }

    #[test]
    fn test_too_few_records() {
        assert!(matches!(
            train_test_split(records(1), 0.33, 42),
            Err(SplitError::TooFewRecords(1))
        ));
    }
}
