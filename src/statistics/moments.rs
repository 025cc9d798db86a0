//! First and second moments of a sample.

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Population standard deviation (divides by n, not n-1).
///
/// Returns `None` for an empty slice.
///
/// # Formula
///
/// ```text
/// sigma = sqrt(sum((x - mean)^2) / n)
/// ```
pub fn population_std(data: &[f64]) -> Option<f64> {
    let m = mean(data)?;
    let ss: f64 = data.iter().map(|&x| (x - m).powi(2)).sum();
    Some((ss / data.len() as f64).sqrt())
}

/// Subtract the mean from every element.
///
/// Returns an empty vector for empty input.
pub fn centered(data: &[f64]) -> Vec<f64> {
    match mean(data) {
        Some(m) => data.iter().map(|&x| x - m).collect(),
        None => Vec::new(),
    }
}

/// Mean of successive differences, i.e. the representative sampling step.
///
/// Returns `None` when fewer than two points are given.
pub fn mean_step(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let steps: Vec<f64> = data.windows(2).map(|w| w[1] - w[0]).collect();
    mean(&steps)
}
