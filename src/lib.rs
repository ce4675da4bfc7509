#![doc = include_str!("../readme.md")]

use std::path::PathBuf;

pub mod bitrev;
pub mod dsp;
pub mod error;
pub mod header;
pub mod writer;

pub use error::{Error, Result};
pub use header::{Header, RefFrame, chan_freq};
pub use writer::{FileMode, GeneralWriter, Hit, HitWriter};

pub(crate) fn expanduser(path: PathBuf) -> PathBuf {
    // Check if the path starts with "~"
    if let Some(stripped) = path.to_str().and_then(|p| p.strip_prefix("~"))
        && let Some(home_dir) = dirs::home_dir()
    {
        // Join the home directory with the rest of the path
        return home_dir.join(stripped.trim_start_matches('/'));
    }
    path
}
