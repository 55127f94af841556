//! Agreement statistics between a predicted and a reference profile.
//!
//! Degenerate inputs (empty, unequal length, zero variance) yield `0.0`
//! instead of an error so a comparison can always be reported.

/// Pearson product-moment correlation of `a` and `b`.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let da = x - mean_a;
        let db = y - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    let denom_a = var_a.sqrt();
    let denom_b = var_b.sqrt();
    if denom_a == 0.0 || denom_b == 0.0 {
        return 0.0;
    }

    cov / (denom_a * denom_b)
}

/// Root-mean-square error between `a` and `b`.
pub fn rmse(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let sum_sq: f64 = a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum();
    (sum_sq / a.len() as f64).sqrt()
}
