//! Statistical helper functions for the raingen rainfall generator.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Sample standard deviation with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Coefficient of variation `sd / mean` using the sample standard deviation.
///
/// Returns `None` if fewer than 2 elements, if the mean is zero, or if the
/// result is not finite.
pub fn coefficient_of_variation(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let m = mean(data);
    if m == 0.0 {
        return None;
    }
    let cv = sd(data) / m;
    cv.is_finite().then_some(cv)
}

/// Minimum and maximum of a slice, ignoring NaN. Returns `None` if empty.
pub fn min_max(data: &[f64]) -> Option<(f64, f64)> {
    data.iter().filter(|v| !v.is_nan()).fold(None, |acc, &v| {
        Some(match acc {
            None => (v, v),
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
        })
    })
}
