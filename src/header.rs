//! Observation header metadata and fine-channel frequency mapping.
//!
//! A [`Header`] is the keyed metadata that accompanies a spectrogram
//! (filterbank or HDF5 product). Only four keys are consumed here:
//!
//! | Key      | Meaning                                  |
//! |----------|------------------------------------------|
//! | `NAXIS1` | samples per coarse channel (FFT length)  |
//! | `FCNTR`  | center frequency of the coarse channel   |
//! | `DELTAF` | fine channel width                       |
//! | `baryv`  | barycentric velocity as a fraction of c  |
//!
//! The header is read-only to this crate: [`chan_freq`] borrows it and fails
//! with [`Error::MissingField`] when a key is absent.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

pub const NAXIS1: &str = "NAXIS1";
pub const FCNTR: &str = "FCNTR";
pub const DELTAF: &str = "DELTAF";
pub const BARYV: &str = "baryv";

/// A single header value. Integers and floats are kept apart so that
/// integer-only fields can be validated. Non-numeric fields such as
/// `source_name` are kept for reporting but never read as numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl HeaderValue {
    /// Numeric value, or `None` for text and boolean fields.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            HeaderValue::Int(v) => Some(v as f64),
            HeaderValue::Float(v) => Some(v),
            HeaderValue::Bool(_) | HeaderValue::Text(_) => None,
        }
    }
}

impl std::fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeaderValue::Int(v) => write!(f, "{}", v),
            HeaderValue::Float(v) => write!(f, "{}", v),
            HeaderValue::Bool(v) => write!(f, "{}", v),
            HeaderValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for HeaderValue {
    fn from(v: i64) -> Self {
        HeaderValue::Int(v)
    }
}

impl From<f64> for HeaderValue {
    fn from(v: f64) -> Self {
        HeaderValue::Float(v)
    }
}

impl From<bool> for HeaderValue {
    fn from(v: bool) -> Self {
        HeaderValue::Bool(v)
    }
}

impl From<String> for HeaderValue {
    fn from(v: String) -> Self {
        HeaderValue::Text(v)
    }
}

impl From<&str> for HeaderValue {
    fn from(v: &str) -> Self {
        HeaderValue::Text(v.to_string())
    }
}

/// Keyed observation metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Header {
    fields: BTreeMap<String, HeaderValue>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a header from a JSON object, e.g. `{"NAXIS1": 1048576, "FCNTR": 8421.38}`.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a JSON header from disk. A leading `~` expands to the home directory.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = crate::expanduser(path.as_ref().to_path_buf());
        debug!(path = %path.display(), "reading header");
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn insert<K: Into<String>, V: Into<HeaderValue>>(&mut self, key: K, value: V) {
        self.fields.insert(key.into(), value.into());
    }

    /// Builder-style [`Header::insert`].
    pub fn with<K: Into<String>, V: Into<HeaderValue>>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&HeaderValue> {
        self.fields.get(key)
    }

    /// Numeric value of `key`. Fails with [`Error::MissingField`] when the
    /// key is absent and [`Error::InvalidField`] when it is not a number.
    pub fn require(&self, key: &str) -> Result<f64> {
        let value = self.get(key).ok_or_else(|| Error::missing(key))?;
        value
            .as_f64()
            .ok_or_else(|| Error::invalid_field(key, format!("expected a number, got '{value}'")))
    }

    /// FFT length (`NAXIS1`). Must be a positive integer.
    pub fn fftlen(&self) -> Result<u64> {
        match self.get(NAXIS1) {
            None => Err(Error::missing(NAXIS1)),
            Some(&HeaderValue::Int(n)) if n > 0 => Ok(n as u64),
            Some(&HeaderValue::Float(n)) if n > 0.0 && n.fract() == 0.0 => Ok(n as u64),
            Some(other) => Err(Error::invalid_field(
                NAXIS1,
                format!("expected a positive integer, got '{other}'"),
            )),
        }
    }

    pub fn fcntr(&self) -> Result<f64> {
        self.require(FCNTR)
    }

    pub fn deltaf(&self) -> Result<f64> {
        self.require(DELTAF)
    }

    pub fn baryv(&self) -> Result<f64> {
        self.require(BARYV)
    }

    /// Fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Reference frame for reported frequencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefFrame {
    /// Observer frame, no correction
    #[default]
    Topocentric,
    /// Solar-system barycenter, scaled by `1 - baryv`
    Barycentric,
}

impl RefFrame {
    /// Map the integer frame code used in search configurations:
    /// `1` is barycentric, anything else topocentric.
    pub fn from_code(code: i64) -> Self {
        if code == 1 {
            RefFrame::Barycentric
        } else {
            RefFrame::Topocentric
        }
    }
}

/// Frequency of fine channel `fine_channel` in a de-drifted spectrum of
/// `tdwidth` channels.
///
/// The de-drifted spectrum is wider than the FFT by `tdwidth - fftlen`
/// channels, split evenly on both sides:
///
/// ```text
/// chan_index = fine_channel - (tdwidth - fftlen) / 2
/// freq       = FCNTR + (chan_index - fftlen / 2) * DELTAF
/// ```
///
/// With [`RefFrame::Barycentric`] the result is scaled by `1 - baryv`.
pub fn chan_freq(
    header: &Header,
    fine_channel: usize,
    tdwidth: usize,
    ref_frame: RefFrame,
) -> Result<f64> {
    let fftlen = header.fftlen()? as f64;
    let chan_index = fine_channel as f64 - (tdwidth as f64 - fftlen) / 2.0;
    let mut freq = header.fcntr()? + (chan_index - fftlen / 2.0) * header.deltaf()?;
    if ref_frame == RefFrame::Barycentric {
        freq *= 1.0 - header.baryv()?;
    }
    Ok(freq)
}
