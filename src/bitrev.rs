//! Bit reversal utilities.
//!
//! Reversing the low `nbits` bits of an index is the bookkeeping step behind
//! radix-2 FFT reordering. Every entry point in this module funnels into a
//! single reversal routine so the variants cannot drift apart:
//!
//! - [`bitrev`]: reverse the `nbits` least significant bits, truncating the rest
//! - [`bitrev_width`]: same contract, with an explicit register width check
//! - [`bitrev32`]: full 32-bit reversal, gated behind [`Bitrev32`]
//! - [`bitrev_permute`]: reorder a power-of-two slice into bit-reversed order
//!
//! # Example
//!
//! ```
//! use driftkit::bitrev::bitrev;
//!
//! // 37 = 0b100101, reversed over 6 bits = 0b101001
//! assert_eq!(bitrev(37, 6).unwrap(), 41);
//! // bits above nbits are dropped from the result
//! assert_eq!(bitrev(37, 5).unwrap(), 20);
//! ```

use tracing::trace;

use crate::{Error, Result};

/// Largest field width accepted by [`bitrev`] and [`bitrev_width`].
pub const MAX_BITS: u32 = 32;

/// Largest register width accepted by [`bitrev_width`].
pub const MAX_REGISTER_WIDTH: u32 = u64::BITS;

/// Capability flag for the full-width 32-bit reversal.
///
/// The mask-and-shift ladder behind [`bitrev32`] stays disabled unless the
/// caller opts in with [`Bitrev32::Enabled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bitrev32 {
    /// Refuse to compute and report the routine as untested
    #[default]
    Guarded,
    /// Run the 32-bit ladder
    Enabled,
}

/// A bit reversal request, tagged by the flavour of the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitReversal {
    /// Reverse the `nbits` least significant bits
    Partial { nbits: u32 },
    /// Reverse `nbits` bits of a value held in a `width`-bit register
    Padded { nbits: u32, width: u32 },
    /// Reverse all 32 bits of the low word
    Full32(Bitrev32),
}

impl BitReversal {
    /// Apply the reversal to `value`.
    pub fn apply(&self, value: u64) -> Result<u64> {
        match *self {
            BitReversal::Partial { nbits } => bitrev(value, nbits),
            BitReversal::Padded { nbits, width } => bitrev_width(value, nbits, width),
            BitReversal::Full32(policy) => bitrev32(value, policy).map(u64::from),
        }
    }
}

fn reverse_low_bits(value: u64, nbits: u32) -> u64 {
    debug_assert!((1..=u64::BITS).contains(&nbits));
    value.reverse_bits() >> (u64::BITS - nbits)
}

fn check_nbits(nbits: u32) -> Result<()> {
    if nbits > MAX_BITS {
        return Err(Error::UnsupportedWidth {
            nbits,
            max: MAX_BITS,
        });
    }
    Ok(())
}

/// Reverse the `nbits` least significant bits of `value`.
///
/// Output bit `i` equals input bit `nbits - 1 - i`; bits at positions
/// `>= nbits` are discarded. `nbits == 0` is the degenerate case and returns
/// `value` untouched. Widths above [`MAX_BITS`] are rejected with
/// [`Error::UnsupportedWidth`].
pub fn bitrev(value: u64, nbits: u32) -> Result<u64> {
    check_nbits(nbits)?;
    if nbits == 0 {
        return Ok(value);
    }
    Ok(reverse_low_bits(value, nbits))
}

/// Reverse the `nbits` least significant bits of a value stored in a
/// `width`-bit register.
///
/// Bits at or above `width` never participate. The register must be able to
/// hold the field, so `width < nbits` is an error, as is a register wider than
/// 64 bits.
pub fn bitrev_width(value: u64, nbits: u32, width: u32) -> Result<u64> {
    check_nbits(nbits)?;
    if width > MAX_REGISTER_WIDTH {
        return Err(Error::UnsupportedWidth {
            nbits: width,
            max: MAX_REGISTER_WIDTH,
        });
    }
    if width < nbits {
        return Err(Error::dimensions(format!(
            "{width}-bit register cannot hold a {nbits}-bit field"
        )));
    }
    let register = if width == u64::BITS {
        value
    } else {
        value & ((1u64 << width) - 1)
    };
    bitrev(register, nbits)
}

/// Reverse all 32 bits of the low word of `x`.
///
/// Only the low 32 bits of `x` participate. With [`Bitrev32::Guarded`] the
/// call fails with [`Error::Untested`] before computing anything.
pub fn bitrev32(x: u64, policy: Bitrev32) -> Result<u32> {
    if policy == Bitrev32::Guarded {
        return Err(Error::Untested("bitrev32"));
    }
    let mut x = x as u32;
    x = ((x & 0x5555_5555) << 1) | ((x & 0xAAAA_AAAA) >> 1);
    x = ((x & 0x3333_3333) << 2) | ((x & 0xCCCC_CCCC) >> 2);
    x = ((x & 0x0F0F_0F0F) << 4) | ((x & 0xF0F0_F0F0) >> 4);
    x = ((x & 0x00FF_00FF) << 8) | ((x & 0xFF00_FF00) >> 8);
    x = ((x & 0x0000_FFFF) << 16) | ((x & 0xFFFF_0000) >> 16);
    Ok(x)
}

/// Reorder `data` in place so that element `i` moves to `bitrev(i, log2(len))`.
///
/// The length must be a power of two (empty and single-element slices are
/// left alone). Applying the permutation twice restores the original order.
pub fn bitrev_permute<T>(data: &mut [T]) -> Result<()> {
    let n = data.len();
    if n <= 1 {
        return Ok(());
    }
    if !n.is_power_of_two() {
        return Err(Error::dimensions(format!(
            "bit-reversal permutation needs a power-of-two length, got {n}"
        )));
    }
    let nbits = n.trailing_zeros();
    check_nbits(nbits)?;
    trace!(len = n, nbits, "bit-reversal permutation");

    for i in 0..n {
        let j = reverse_low_bits(i as u64, nbits) as usize;
        if j > i {
            data.swap(i, j);
        }
    }
    Ok(())
}
