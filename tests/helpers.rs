//! Test helper utilities for building synthetic spectra and scratch files

use std::path::PathBuf;

/// Generate a flattened `rows x cols` grid whose element at (r, c) is `r * cols + c`
///
/// # Arguments
/// * `rows` - Number of rows (e.g. time samples)
/// * `cols` - Number of elements per row (e.g. channels)
///
/// # Returns
/// Row-major buffer of `rows * cols` samples
pub fn ramp_grid(rows: usize, cols: usize) -> Vec<f64> {
    (0..rows * cols).map(|i| i as f64).collect()
}

/// Generate a noise-free spectrum with strong outliers at both ends
///
/// # Arguments
/// * `clean` - Number of well-behaved samples (values `1..=clean`)
/// * `outliers` - Number of outliers added on each side
///
/// # Returns
/// Vector of `clean + 2 * outliers` samples, outliers interleaved with the ramp
pub fn spectrum_with_outliers(clean: usize, outliers: usize) -> Vec<f64> {
    let mut buffer: Vec<f64> = (1..=clean).map(|v| v as f64).collect();
    for k in 0..outliers {
        // spread the outliers through the buffer so sorting has work to do
        let at = (k * 7) % (buffer.len() + 1);
        buffer.insert(at, 1.0e12);
        buffer.insert(at / 2, -1.0e12);
    }
    buffer
}

/// Unique scratch path in the system temp directory
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("driftkit_it_{}_{}", std::process::id(), name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_grid_length() {
        let grid = ramp_grid(5, 3);
        assert_eq!(grid.len(), 15);
        assert_eq!(grid[14], 14.0);
    }

    #[test]
    fn test_spectrum_with_outliers_counts() {
        let spectrum = spectrum_with_outliers(90, 5);
        assert_eq!(spectrum.len(), 100);
        assert_eq!(spectrum.iter().filter(|v| v.abs() > 1.0e9).count(), 10);
    }

    #[test]
    fn test_temp_path_is_in_temp_dir() {
        assert!(temp_path("x.txt").starts_with(std::env::temp_dir()));
    }
}
