/// Fraction of predictions that match the true labels.
///
/// Returns 0.0 for empty input; operates on the shorter of the two slices
/// if their lengths differ, so callers should pass equal-length slices.
pub fn accuracy<L: PartialEq>(predicted: &[L], actual: &[L]) -> f64 {
    if predicted.is_empty() || actual.is_empty() {
        return 0.0;
    }

    let paired = predicted.iter().zip(actual.iter());
    let total = predicted.len().min(actual.len());
    let correct = paired.filter(|(p, a)| p == a).count();

    correct as f64 / total as f64
}
