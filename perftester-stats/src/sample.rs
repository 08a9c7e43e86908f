//! Sample Statistics
//!
//! Plain functions over a list of samples. Inputs too short for a statistic
//! produce `NaN` instead of panicking:
//! - `mean`, `minimum`, `maximum`, `percentile` need at least 1 sample
//! - `stddev` needs at least 2 samples

/// Arithmetic mean
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return f64::NAN;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Sample standard deviation (Bessel's correction, `n - 1`)
pub fn stddev(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return f64::NAN;
    }
    // Summation error would otherwise leave a tiny residue for constant input
    if samples.iter().all(|&x| x == samples[0]) {
        return 0.0;
    }
    let mean = mean(samples);
    let variance =
        samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (samples.len() - 1) as f64;
    variance.sqrt()
}

/// Smallest sample
pub fn minimum(samples: &[f64]) -> f64 {
    samples.iter().copied().reduce(f64::min).unwrap_or(f64::NAN)
}

/// Largest sample
pub fn maximum(samples: &[f64]) -> f64 {
    samples.iter().copied().reduce(f64::max).unwrap_or(f64::NAN)
}

/// Percentile in `[0, 100]`, linearly interpolated between nearest ranks
pub fn percentile(samples: &[f64], percentile: f64) -> f64 {
    match samples.len() {
        0 => return f64::NAN,
        1 => return samples[0],
        _ => {}
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let p = (percentile / 100.0).clamp(0.0, 1.0);
    let rank = p * (n - 1) as f64;
    let lower_idx = rank.floor() as usize;
    let upper_idx = (lower_idx + 1).min(n - 1);
    let fraction = rank - lower_idx as f64;

    sorted[lower_idx] + fraction * (sorted[upper_idx] - sorted[lower_idx])
}

/// Median (50th percentile)
pub fn median(samples: &[f64]) -> f64 {
    percentile(samples, 50.0)
}
