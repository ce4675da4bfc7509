//! Integration tests for buffer reordering and trimmed statistics

#[allow(dead_code)]
mod helpers;

use approx::assert_relative_eq;
use driftkit::Error;
use driftkit::dsp::{Grid, axis_swap, comp_stats, flip_band, flip_x};
use num_complex::Complex;

use helpers::{ramp_grid, spectrum_with_outliers};

#[test]
fn test_flip_x_documented_example() {
    let mut buf: Vec<f64> = (1..=10).map(f64::from).collect();
    flip_x(&mut buf, 5, 2).unwrap();
    assert_eq!(buf, vec![5., 4., 3., 2., 1., 10., 9., 8., 7., 6.]);
}

#[test]
fn test_flip_x_rejects_oversized_grid() {
    let mut buf = ramp_grid(2, 5);
    assert!(matches!(
        flip_x(&mut buf, 5, 3),
        Err(Error::InvalidDimensions(_))
    ));
}

#[test]
fn test_axis_swap_round_trip() {
    let original = ramp_grid(5, 3);
    let mut transposed = vec![0.0; original.len()];
    let mut restored = vec![0.0; original.len()];

    axis_swap(&original, &mut transposed, 3, 5).unwrap();
    assert_ne!(transposed, original);
    let back = Grid::new(5, 3).transposed();
    axis_swap(&transposed, &mut restored, back.cols, back.rows).unwrap();
    assert_eq!(restored, original);
}

#[test]
fn test_flip_band_mutates_in_place() {
    let mut buf = ramp_grid(4, 2);
    flip_band(&mut buf, 4, 2).unwrap();
    assert_eq!(buf, vec![6., 7., 4., 5., 2., 3., 0., 1.]);
}

#[test]
fn test_reorder_complex_samples() {
    // channels x samples of complex voltages
    let mut buf: Vec<Complex<f32>> = (0..6).map(|i| Complex::new(i as f32, -(i as f32))).collect();
    flip_x(&mut buf, 3, 2).unwrap();
    assert_eq!(buf[0], Complex::new(2.0, -2.0));
    assert_eq!(buf[3], Complex::new(5.0, -5.0));

    flip_band(&mut buf, 2, 3).unwrap();
    assert_eq!(buf[0], Complex::new(5.0, -5.0));
    assert_eq!(buf[5], Complex::new(0.0, 0.0));
}

#[test]
fn test_comp_stats_ignores_outliers() {
    let spectrum = spectrum_with_outliers(90, 5);
    let stats = comp_stats(spectrum.iter().copied()).unwrap();

    // independent computation over the clean ramp 1..=90
    let clean: Vec<f64> = (1..=90).map(f64::from).collect();
    let mean = clean.iter().sum::<f64>() / clean.len() as f64;
    let var = clean.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / clean.len() as f64;

    assert_relative_eq!(stats.median, 45.5);
    assert_relative_eq!(stats.stddev, var.sqrt(), epsilon = 1e-9);
}

#[test]
fn test_comp_stats_flattened_rows() {
    let rows: Vec<Vec<f32>> = (0..10)
        .map(|r| (0..10).map(|c| (r * 10 + c) as f32).collect())
        .collect();
    let stats = comp_stats(rows.iter().flatten().copied()).unwrap();
    assert_relative_eq!(stats.median, 49.5);
}

#[test]
fn test_comp_stats_too_small() {
    assert!(matches!(
        comp_stats([42.0f64]),
        Err(Error::InsufficientSamples { .. })
    ));
}
