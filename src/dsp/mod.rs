//! Numeric helpers for spectral buffers.
//!
//! Spectrograms reach the drift search as flattened 1-D buffers. This module
//! groups the routines that re-orient those buffers and summarize them.
//!
//! # Modules
//! - `reorder`: transpose, band flip and segment flip of flattened grids.
//! - `stats`: trimmed median and standard deviation.
//!
//! # Thread Safety
//!
//! Every routine borrows its buffers for the duration of the call; callers
//! sharing a buffer across threads must serialize access themselves.
pub mod reorder;
pub mod stats;

pub use reorder::{Grid, axis_swap, flip_band, flip_x};
pub use stats::{Stats, comp_stats};

use crate::{Error, Result};

/// Parse whitespace-separated samples, e.g. a spectrum dumped one value per line.
pub fn parse_samples(text: &str) -> Result<Vec<f64>> {
    text.split_whitespace()
        .enumerate()
        .map(|(i, tok)| {
            tok.parse::<f64>()
                .map_err(|e| Error::parse(format!("sample {i} '{tok}': {e}")))
        })
        .collect()
}
