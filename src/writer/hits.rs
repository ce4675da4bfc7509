use std::path::Path;

use tracing::debug;

use super::{FileMode, GeneralWriter};
use crate::Result;
use crate::header::{Header, RefFrame, chan_freq};

const COLUMNS: &str =
    "Top_Hit_#\tDrift_Rate\tSNR\tUncorrected_Frequency\tCorrected_Frequency\tIndex";

/// One detection, as reported in a hits file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// 1-based rank within the coarse channel
    pub top_hit: usize,
    /// Drift rate, frequency units per second
    pub drift_rate: f64,
    pub snr: f64,
    /// Topocentric frequency
    pub freq: f64,
    /// Barycentric frequency
    pub corrected_freq: f64,
    /// Fine channel index in the de-drifted spectrum
    pub index: usize,
}

impl Hit {
    /// Build a hit for fine channel `index` of a de-drifted spectrum of
    /// `tdwidth` channels, resolving both frequencies from `header`.
    pub fn from_channel(
        header: &Header,
        top_hit: usize,
        drift_rate: f64,
        snr: f64,
        index: usize,
        tdwidth: usize,
    ) -> Result<Self> {
        Ok(Self {
            top_hit,
            drift_rate,
            snr,
            freq: chan_freq(header, index, tdwidth, RefFrame::Topocentric)?,
            corrected_freq: chan_freq(header, index, tdwidth, RefFrame::Barycentric)?,
            index,
        })
    }

    fn to_record(self) -> String {
        format!(
            "{:06}\t{:10.6}\t{:10.6}\t{:14.6}\t{:14.6}\t{}\n",
            self.top_hit, self.drift_rate, self.snr, self.freq, self.corrected_freq, self.index
        )
    }
}

/// Writes a commented preamble followed by one tab-separated row per hit.
#[derive(Debug)]
pub struct HitWriter {
    inner: GeneralWriter,
    hits: usize,
}

impl HitWriter {
    /// Create (or truncate) the hits file at `path` and keep it open.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut inner = GeneralWriter::new(path, FileMode::Write);
        inner.open(None)?;
        Ok(Self { inner, hits: 0 })
    }

    /// Write the preamble: source name, every header field, and the column names.
    pub fn report_header(&mut self, source: &str, header: &Header) -> Result<()> {
        let mut preamble = format!("# Source: {source}\n");
        for (key, value) in header.iter() {
            preamble.push_str(&format!("# {key}: {value}\n"));
        }
        preamble.push_str(&format!("# {COLUMNS}\n"));
        self.inner.write(&preamble)
    }

    pub fn report_hit(&mut self, hit: &Hit) -> Result<()> {
        self.inner.write(&hit.to_record())?;
        self.hits += 1;
        Ok(())
    }

    /// Number of hits written so far.
    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    pub fn close(&mut self) {
        debug!(path = %self.inner.path().display(), hits = self.hits, "closing hits file");
        self.inner.close();
    }
}
