use crate::Float;
use ndarray::Array1;
use std::fmt::Debug;

/// One labeled observation: a feature vector plus its outcome label.
///
/// L: The type of the label (e.g., u8 for a binary outcome, or an enum).
/// F: The float type for the features (e.g., f32, f64).
#[derive(Debug, Clone)]
pub struct Record<L, F>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
{
    pub features: Array1<F>,
    pub label: L,
}

impl<L, F> Record<L, F>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
{
    pub fn new(features: Array1<F>, label: L) -> Self {
        Record { features, label }
    }
}
