//! Robust (trimmed) statistics.
//!
//! [`comp_stats`] sorts its input, drops the lowest and highest 5% by rank,
//! and reports the median and population standard deviation of what is left.

use tracing::trace;

use crate::{Error, Result};

/// Rank fraction below which samples are dropped.
pub const LOWER_CUT: f64 = 0.05;

/// Rank fraction at and above which samples are dropped.
pub const UPPER_CUT: f64 = 0.95;

/// Fewest samples that must survive trimming.
pub const MIN_TRIMMED: usize = 2;

/// Median and standard deviation of the trimmed sample set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub median: f64,
    /// Population standard deviation
    pub stddev: f64,
}

/// Compute the trimmed median and standard deviation of `values`.
///
/// Values are flattened in iteration order (order does not matter), sorted
/// ascending, and sliced to `[floor(0.05 n), floor(0.95 n))`. Fails with
/// [`Error::InsufficientSamples`] when fewer than [`MIN_TRIMMED`] samples remain.
///
/// NaN and infinite samples are rejected with [`Error::Parse`] before
/// sorting, since rank trimming cannot place them.
///
/// ```
/// use driftkit::dsp::stats::comp_stats;
///
/// let rows = vec![vec![1.0f32, 2.0], vec![3.0, 4.0]];
/// let stats = comp_stats(rows.iter().flatten().copied()).unwrap();
/// assert_eq!(stats.median, 2.0);
/// ```
pub fn comp_stats<I, T>(values: I) -> Result<Stats>
where
    I: IntoIterator<Item = T>,
    T: Into<f64>,
{
    let mut sorted = values
        .into_iter()
        .map(Into::<f64>::into)
        .enumerate()
        .map(|(i, v)| {
            if v.is_finite() {
                Ok(v)
            } else {
                Err(Error::parse(format!("sample {i} is not finite: {v}")))
            }
        })
        .collect::<Result<Vec<f64>>>()?;
    sorted.sort_unstable_by(f64::total_cmp);

    let n = sorted.len();
    let lo = (n as f64 * LOWER_CUT) as usize;
    let hi = (n as f64 * UPPER_CUT) as usize;
    let trimmed = sorted.get(lo..hi).unwrap_or(&[]);
    trace!(n, lo, hi, "comp_stats trim");

    if trimmed.len() < MIN_TRIMMED {
        return Err(Error::InsufficientSamples {
            needed: MIN_TRIMMED,
            got: trimmed.len(),
        });
    }

    Ok(Stats {
        median: median_sorted(trimmed),
        stddev: stddev(trimmed),
    })
}

fn median_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn stddev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    var.sqrt()
}
