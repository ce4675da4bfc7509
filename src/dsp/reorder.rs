//! In-place reordering of flattened spectral buffers.
//!
//! Spectra are handled as 1-D buffers that are logically 2-D: a run of
//! time samples per frequency channel, or a run of channels per time step.
//! These routines re-orient such buffers without allocating:
//!
//! - [`axis_swap`]: transpose a row-major grid into a second buffer
//! - [`flip_band`]: reverse the order of equal-length bands
//! - [`flip_x`]: reverse the elements inside each segment
//!
//! All three validate the requested dimensions against the buffer length
//! before touching any element, and fail with [`Error::InvalidDimensions`]
//! instead of indexing out of bounds.
//!
//! # Example
//!
//! ```rust
//! use driftkit::dsp::reorder::flip_x;
//!
//! let mut spectrum: Vec<f64> = (1..=10).map(f64::from).collect();
//! flip_x(&mut spectrum, 5, 2).unwrap();
//! assert_eq!(spectrum, [5., 4., 3., 2., 1., 10., 9., 8., 7., 6.]);
//! ```
use tracing::debug;

use crate::{Error, Result};

/// Shape of a flattened row-major grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    /// Number of rows
    pub rows: usize,
    /// Number of elements per row
    pub cols: usize,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of elements covered by the grid, or
    /// [`Error::InvalidDimensions`] if the product overflows.
    pub fn checked_len(&self) -> Result<usize> {
        self.rows.checked_mul(self.cols).ok_or_else(|| {
            Error::dimensions(format!("{} x {} overflows usize", self.rows, self.cols))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// The same elements seen column-major, i.e. `cols` rows of `rows` elements.
    pub fn transposed(&self) -> Self {
        Self::new(self.cols, self.rows)
    }

    fn check(&self, what: &str, buf_len: usize) -> Result<usize> {
        let len = self.checked_len()?;
        if len > buf_len {
            return Err(Error::dimensions(format!(
                "{what}: {} x {} = {len} exceeds buffer length {buf_len}",
                self.rows, self.cols
            )));
        }
        Ok(len)
    }
}

/// Transpose `inbuf`, read as `ntsamp` rows of `nchans` channels, into
/// `outbuf` laid out as `nchans` rows of `ntsamp` samples.
///
/// `outbuf` must have the same length as `inbuf`, and both must hold at
/// least `nchans * ntsamp` elements. Elements past that count in `outbuf` are
/// left untouched.
pub fn axis_swap<T: Copy>(
    inbuf: &[T],
    outbuf: &mut [T],
    nchans: usize,
    ntsamp: usize,
) -> Result<()> {
    if outbuf.len() != inbuf.len() {
        return Err(Error::dimensions(format!(
            "axis_swap: output length {} differs from input length {}",
            outbuf.len(),
            inbuf.len()
        )));
    }
    let grid = Grid::new(ntsamp, nchans);
    grid.check("axis_swap", inbuf.len())?;
    if grid.is_empty() {
        return Ok(());
    }

    for (t, row) in inbuf.chunks_exact(nchans).take(ntsamp).enumerate() {
        for (c, &sample) in row.iter().enumerate() {
            outbuf[c * ntsamp + t] = sample;
        }
    }
    Ok(())
}

/// Reverse the order of the first `nchans` bands of `ntsamp` elements in
/// `buf`, keeping the element order inside each band.
///
/// The caller's buffer is updated in place; elements past `nchans * ntsamp`
/// are left untouched.
pub fn flip_band<T>(buf: &mut [T], nchans: usize, ntsamp: usize) -> Result<()> {
    let grid = Grid::new(nchans, ntsamp);
    let len = grid.check("flip_band", buf.len())?;
    if grid.is_empty() {
        return Ok(());
    }

    // Reversing the whole span reverses band order and each band's contents;
    // reversing each band again restores the contents.
    let span = &mut buf[..len];
    span.reverse();
    for band in span.chunks_exact_mut(ntsamp) {
        band.reverse();
    }
    Ok(())
}

/// Reverse the elements inside each of the first `ydim` segments of `xdim`
/// elements in `buf`. Segment order is unchanged.
pub fn flip_x<T>(buf: &mut [T], xdim: usize, ydim: usize) -> Result<()> {
    let grid = Grid::new(ydim, xdim);
    let len = grid.check("flip_x", buf.len())?;
    debug!(xdim, ydim, "flip_x");
    if grid.is_empty() {
        return Ok(());
    }

    for segment in buf[..len].chunks_exact_mut(xdim) {
        segment.reverse();
    }
    Ok(())
}
