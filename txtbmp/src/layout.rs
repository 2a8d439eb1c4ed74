//! The packing contract shared by the encoder and decoder.
//!
//! Three 16-bit characters `(c1, c2, c3)` occupy two pixels, big-endian:
//!
//! ```text
//! pixel A = (hi c1, lo c1, hi c2)
//! pixel B = (lo c2, hi c3, lo c3)
//! ```

use crate::error::EncodeError;
use crate::pixel::Pixel;

/// Character appended to fill the last triple.
pub const PAD_CHAR: u16 = 0x20;

pub const CHARS_PER_PAIR: usize = 3;
pub const PIXELS_PER_PAIR: usize = 2;

/// Requested grid dimensions. Missing values are inferred from the text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct Dimensions {
    #[cfg_attr(feature = "serde", serde(default))]
    pub width: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub height: Option<u32>,
}

impl Dimensions {
    /// Infer both width and height (roughly square, even width).
    pub fn auto() -> Self {
        Self::default()
    }

    /// Fixed width, inferred height.
    pub fn with_width(width: u32) -> Self {
        Self { width: Some(width), height: None }
    }

    /// Fixed width and height.
    pub fn exact(width: u32, height: u32) -> Self {
        Self { width: Some(width), height: Some(height) }
    }
}

/// Number of spaces appended to text of length `len`.
#[inline]
pub fn padding_len(len: usize) -> usize {
    match len % CHARS_PER_PAIR {
        1 => 2,
        2 => 1,
        _ => 0,
    }
}

/// Pixels required to hold `len` characters after padding.
#[inline]
pub fn pixels_needed(len: usize) -> u64 {
    let padded = (len + padding_len(len)) as u64;
    padded / CHARS_PER_PAIR as u64 * PIXELS_PER_PAIR as u64
}

/// Characters a `width x height` grid can hold.
pub fn capacity_chars(width: u32, height: u32) -> u64 {
    let area = width as u64 * height as u64;
    area / PIXELS_PER_PAIR as u64 * CHARS_PER_PAIR as u64
}

/// Split a character triple across a pixel pair.
#[inline]
pub fn pack_triple([c1, c2, c3]: [u16; 3]) -> [Pixel; 2] {
    let [h1, l1] = c1.to_be_bytes();
    let [h2, l2] = c2.to_be_bytes();
    let [h3, l3] = c3.to_be_bytes();
    [Pixel::new(h1, l1, h2), Pixel::new(l2, h3, l3)]
}

/// Inverse of [`pack_triple`].
#[inline]
pub fn unpack_pair([a, b]: [Pixel; 2]) -> [u16; 3] {
    [
        u16::from_be_bytes([a.r, a.g]),
        u16::from_be_bytes([a.b, b.r]),
        u16::from_be_bytes([b.g, b.b]),
    ]
}

/// True when all six channels of the pair are zero.
#[inline]
pub fn is_sentinel(pair: &[Pixel; 2]) -> bool {
    pair[0].is_black() && pair[1].is_black()
}

/// Resolve requested dimensions against the number of pixels needed.
///
/// Rules, in order:
/// - width and height: width must be even and non-zero and the area must fit the text
/// - width only: width must be even and non-zero; height = ceil(needed / width)
/// - height only: rejected
/// - neither: width = ceil(sqrt(needed)) rounded up to even, height = ceil(needed / width)
///
/// In the last case the width is made even before the height is derived from it,
/// so 8 pixels resolve to 4x2 rather than 4x3.
///
/// Grids whose pixel buffer could not be allocated are rejected as [`EncodeError::TooLarge`].
pub fn resolve_dimensions(dims: Dimensions, needed: u64) -> Result<(u32, u32), EncodeError> {
    let (width, height) = resolve_unchecked(dims, needed)?;
    check_area(width, height)?;
    Ok((width, height))
}

fn resolve_unchecked(dims: Dimensions, needed: u64) -> Result<(u32, u32), EncodeError> {
    match (dims.width, dims.height) {
        (Some(width), Some(height)) => {
            check_width(width)?;
            let available = width as u64 * height as u64;
            if available < needed {
                return Err(EncodeError::Capacity { needed, available });
            }
            Ok((width, height))
        }
        (Some(width), None) => {
            check_width(width)?;
            let height = needed.div_ceil(width as u64);
            Ok((width, fit_u32(height, needed)?))
        }
        (None, Some(height)) => Err(EncodeError::HeightWithoutWidth(height)),
        (None, None) => {
            let mut width = ceil_sqrt(needed).max(1);
            if width % 2 == 1 {
                width += 1;
            }
            let height = needed.div_ceil(width);
            Ok((fit_u32(width, needed)?, fit_u32(height, needed)?))
        }
    }
}

fn check_width(width: u32) -> Result<(), EncodeError> {
    if width == 0 {
        return Err(EncodeError::ZeroWidth);
    }
    if width % 2 == 1 {
        return Err(EncodeError::OddWidth(width));
    }
    Ok(())
}

fn check_area(width: u32, height: u32) -> Result<(), EncodeError> {
    let bytes = (width as u64 * height as u64).checked_mul(std::mem::size_of::<Pixel>() as u64);
    match bytes {
        Some(b) if b <= isize::MAX as u64 => Ok(()),
        _ => Err(EncodeError::TooLarge { width, height }),
    }
}

fn fit_u32(v: u64, needed: u64) -> Result<u32, EncodeError> {
    u32::try_from(v).map_err(|_| EncodeError::Capacity {
        needed,
        available: u32::MAX as u64 * u32::MAX as u64,
    })
}

/// Smallest `r` with `r * r >= n`.
fn ceil_sqrt(n: u64) -> u64 {
    let mut r = (n as f64).sqrt() as u64;
    while r > 0 && r.saturating_mul(r) > n {
        r -= 1;
    }
    while r.saturating_mul(r) < n {
        r += 1;
    }
    r
}
