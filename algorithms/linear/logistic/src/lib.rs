use std::error::Error;
use std::fmt::{Display, Formatter};

// Core components from shared library
use medipredict_helpers::{Float, Record};
use ndarray::{Array1, ArrayView1};

/// Errors that can occur when fitting or querying the logistic model.
#[derive(Debug, Clone, PartialEq)]
pub enum LogisticError {
    /// Cannot fit on an empty training set
    EmptyTrainingSet,
    /// A feature vector has a different length than the rest of the data
    MismatchedDimensions,
    /// A training label was neither 0 nor 1
    InvalidLabel(u8),
    /// A feature value was NaN or infinite
    NonFiniteValue,
    /// predict was called before fit
    NotFitted,
}

impl Display for LogisticError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogisticError::EmptyTrainingSet => {
                write!(f, "Cannot fit on an empty training set")
            }
            LogisticError::MismatchedDimensions => {
                write!(f, "Feature vectors do not all have the same length")
            }
            LogisticError::InvalidLabel(label) => {
                write!(f, "Training label {label} is not a binary outcome (expected 0 or 1)")
            }
            LogisticError::NonFiniteValue => {
                write!(f, "Feature values must be finite (found NaN or infinity)")
            }
            LogisticError::NotFitted => write!(f, "Model has not been fitted yet"),
        }
    }
}

impl Error for LogisticError {}

/// A binary logistic-regression classifier.
///
/// Fitting standardizes each feature column (z-score, learned from the
/// training data) and then runs batch gradient descent on the log-loss with
/// an intercept term. Prediction applies the stored standardization before
/// computing the sigmoid of the linear score; probabilities above 0.5 map to
/// label 1, everything else to label 0.
///
/// Fitting uses no randomness, so two fits on the same data produce the same
/// weights.
#[derive(Debug, Clone)]
pub struct LogisticRegression<F>
where
    F: Float,
{
    learning_rate: F,
    l2_penalty: F,
    max_iter: u32,
    fitted: Option<FittedState<F>>,
}

/// Weights plus the standardization learned from the training partition.
#[derive(Debug, Clone)]
struct FittedState<F>
where
    F: Float,
{
    weights: Array1<F>,
    bias: F,
    means: Array1<F>,
    std_devs: Array1<F>,
}

impl<F> Default for LogisticRegression<F>
where
    F: Float,
{
    /// Learning rate 0.1, no L2 penalty, up to 1000 iterations.
    fn default() -> Self {
        Self::new(F::cast(0.1).unwrap_or_else(F::one), F::zero(), 1000)
    }
}

impl<F> LogisticRegression<F>
where
    F: Float,
{
    pub fn new(learning_rate: F, l2_penalty: F, max_iter: u32) -> Self {
        Self {
            learning_rate,
            l2_penalty,
            max_iter,
            fitted: None,
        }
    }

    /// Fits the model on binary-labeled records.
    ///
    /// # Errors
    ///
    /// Returns `LogisticError::EmptyTrainingSet` if `data` is empty,
    /// `LogisticError::MismatchedDimensions` if the feature vectors differ in
    /// length, `LogisticError::InvalidLabel` if any label is not 0 or 1, and
    /// `LogisticError::NonFiniteValue` if any feature is NaN or infinite.
    pub fn fit(&mut self, data: &[Record<u8, F>]) -> Result<(), LogisticError> {
        if data.is_empty() {
            return Err(LogisticError::EmptyTrainingSet);
        }

        let n_features = data[0].features.len();
        for record in data {
            if record.features.len() != n_features {
                return Err(LogisticError::MismatchedDimensions);
            }
            if record.label > 1 {
                return Err(LogisticError::InvalidLabel(record.label));
            }
            if record.features.iter().any(|v| !v.is_finite()) {
                return Err(LogisticError::NonFiniteValue);
            }
        }

        let (means, std_devs) = column_moments(data, n_features);

        // Standardize once up front; gradient descent then works on
        // unit-variance columns, which keeps one learning rate usable across
        // features with very different scales (e.g. insulin vs. pedigree).
        let standardized: Vec<Array1<F>> = data
            .iter()
            .map(|record| standardize(record.features.view(), &means, &std_devs))
            .collect();

        let n_samples = F::cast(data.len()).unwrap_or_else(F::one);
        let mut weights: Array1<F> = Array1::zeros(n_features);
        let mut bias = F::zero();

        for _ in 0..self.max_iter {
            let mut gradient: Array1<F> = Array1::zeros(n_features);
            let mut bias_gradient = F::zero();

            for (features, record) in standardized.iter().zip(data) {
                let target = if record.label == 1 { F::one() } else { F::zero() };
                let probability = sigmoid(features.dot(&weights) + bias);
                let residual = probability - target;

                gradient.zip_mut_with(features, |g, &value| {
                    *g += value * residual;
                });
                bias_gradient += residual;
            }

            gradient /= n_samples;
            bias_gradient /= n_samples;
            gradient += &(&weights * self.l2_penalty);

            weights = &weights - &(&gradient * self.learning_rate);
            bias -= self.learning_rate * bias_gradient;
        }

        self.fitted = Some(FittedState {
            weights,
            bias,
            means,
            std_devs,
        });
        Ok(())
    }

    /// Probability of label 1 for a single feature vector.
    ///
    /// # Errors
    ///
    /// Returns `LogisticError::NotFitted` before `fit`,
    /// `LogisticError::MismatchedDimensions` if the vector length differs
    /// from the training data, and `LogisticError::NonFiniteValue` for NaN
    /// or infinite inputs.
    pub fn predict_proba(&self, features: ArrayView1<F>) -> Result<F, LogisticError> {
        let state = self.fitted.as_ref().ok_or(LogisticError::NotFitted)?;

        if features.len() != state.weights.len() {
            return Err(LogisticError::MismatchedDimensions);
        }
        if features.iter().any(|v| !v.is_finite()) {
            return Err(LogisticError::NonFiniteValue);
        }

        let standardized = standardize(features, &state.means, &state.std_devs);
        Ok(sigmoid(standardized.dot(&state.weights) + state.bias))
    }

    /// Predicts the binary label for a single feature vector.
    ///
    /// The only possible successes are 0 and 1.
    pub fn predict(&self, features: ArrayView1<F>) -> Result<u8, LogisticError> {
        let probability = self.predict_proba(features)?;
        let threshold = F::cast(0.5).unwrap_or_else(|| F::one() / (F::one() + F::one()));
        Ok(u8::from(probability > threshold))
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Number of features the model was trained on, if fitted.
    pub fn n_features(&self) -> Option<usize> {
        self.fitted.as_ref().map(|state| state.weights.len())
    }
}

fn sigmoid<F: Float>(z: F) -> F {
    F::one() / (F::one() + (-z).exp())
}

/// Per-column mean and standard deviation of the training features.
/// Zero-variance columns get a standard deviation of one, so they
/// standardize to exactly zero instead of dividing by zero.
fn column_moments<F: Float>(data: &[Record<u8, F>], n_features: usize) -> (Array1<F>, Array1<F>) {
    let n = F::cast(data.len()).unwrap_or_else(F::one);

    let mut means: Array1<F> = Array1::zeros(n_features);
    for record in data {
        means += &record.features;
    }
    means /= n;

    let mut variances: Array1<F> = Array1::zeros(n_features);
    for record in data {
        let centered = &record.features - &means;
        variances.zip_mut_with(&centered, |v, &c| *v += c * c);
    }
    variances /= n;

    let std_devs = variances.mapv(|v| {
        let sd = v.sqrt();
        if sd > F::zero() { sd } else { F::one() }
    });

    (means, std_devs)
}

fn standardize<F: Float>(
    features: ArrayView1<F>,
    means: &Array1<F>,
    std_devs: &Array1<F>,
) -> Array1<F> {
    let mut standardized = &features - means;
    standardized.zip_mut_with(std_devs, |value, &sd| *value /= sd);
    standardized
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn separable_data() -> Vec<Record<u8, f64>> {
        vec![
            Record::new(array![1.0, 2.0], 0),
            Record::new(array![2.0, 1.0], 0),
            Record::new(array![1.5, 1.5], 0),
            Record::new(array![2.0, 2.5], 0),
            Record::new(array![8.0, 9.0], 1),
            Record::new(array![9.0, 8.0], 1),
            Record::new(array![8.5, 8.5], 1),
            Record::new(array![9.0, 9.5], 1),
        ]
    }

    #[test]
    fn test_fit_and_predict_separable() {
        let mut model = LogisticRegression::default();
        model.fit(&separable_data()).unwrap();

        assert_eq!(model.predict(array![1.5, 2.0].view()).unwrap(), 0);
        assert_eq!(model.predict(array![8.5, 9.0].view()).unwrap(), 1);
    }

    #[test]
    fn test_predict_proba_is_a_probability() {
        let mut model = LogisticRegression::default();
        model.fit(&separable_data()).unwrap();

        let p = model.predict_proba(array![5.0, 5.0].view()).unwrap();
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn test_fit_is_deterministic() {
        let data = separable_data();

        let mut first = LogisticRegression::default();
        first.fit(&data).unwrap();
        let mut second = LogisticRegression::default();
        second.fit(&data).unwrap();

        let point = array![4.0, 6.0];
        assert_relative_eq!(
            first.predict_proba(point.view()).unwrap(),
            second.predict_proba(point.view()).unwrap(),
        );
    }

    #[test]
    fn test_training_rows_classified_correctly() {
        let data = separable_data();
        let mut model = LogisticRegression::default();
        model.fit(&data).unwrap();

        for record in &data {
            assert_eq!(model.predict(record.features.view()).unwrap(), record.label);
        }
    }

    #[test]
    fn test_zero_variance_column() {
        // Second column is constant; it must not poison the fit.
        let data = vec![
            Record::new(array![1.0, 3.0], 0),
            Record::new(array![2.0, 3.0], 0),
            Record::new(array![8.0, 3.0], 1),
            Record::new(array![9.0, 3.0], 1),
        ];
        let mut model = LogisticRegression::default();
        model.fit(&data).unwrap();

        assert_eq!(model.predict(array![1.5, 3.0].view()).unwrap(), 0);
        assert_eq!(model.predict(array![8.5, 3.0].view()).unwrap(), 1);
    }

    #[test]
    fn test_error_on_empty_training_set() {
        let mut model: LogisticRegression<f64> = LogisticRegression::default();
        let result = model.fit(&[]);
        assert!(matches!(result, Err(LogisticError::EmptyTrainingSet)));
    }

    #[test]
    fn test_error_on_invalid_label() {
        let data = vec![
            Record::new(array![1.0], 0),
            Record::new(array![2.0], 3),
        ];
        let mut model = LogisticRegression::default();
        let result = model.fit(&data);
        assert!(matches!(result, Err(LogisticError::InvalidLabel(3))));
    }

    #[test]
    fn test_error_on_mismatched_dimensions() {
        let data = vec![
            Record::new(array![1.0, 2.0], 0),
            Record::new(array![1.0], 1),
        ];
        let mut model = LogisticRegression::default();
        assert!(matches!(
            model.fit(&data),
            Err(LogisticError::MismatchedDimensions)
        ));

        let mut model = LogisticRegression::default();
        model.fit(&separable_data()).unwrap();
        assert!(matches!(
            model.predict(array![1.0].view()),
            Err(LogisticError::MismatchedDimensions)
        ));
    }

    #[test]
    fn test_error_on_not_fitted() {
        let model: LogisticRegression<f64> = LogisticRegression::default();
        let result = model.predict(array![1.0, 2.0].view());
        assert!(matches!(result, Err(LogisticError::NotFitted)));
    }

    #[test]
    fn test_error_on_non_finite_input() {
        let mut model = LogisticRegression::default();
        model.fit(&separable_data()).unwrap();
        let result = model.predict(array![f64::NAN, 1.0].view());
        assert!(matches!(result, Err(LogisticError::NonFiniteValue)));
    }
}
