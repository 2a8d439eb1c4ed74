use std::borrow::Cow;

use crate::error::DecodeError;
use crate::grid::PixelGrid;
use crate::layout::{self, PAD_CHAR, PIXELS_PER_PAIR};

/// What an all-zero pixel pair ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SentinelMode {
    /// Skip the rest of the current row; later rows are still read.
    #[default]
    EndOfRow,
    /// Stop decoding entirely.
    EndOfText,
}

/// Grid decoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoder {
    pub sentinel: SentinelMode,
}

impl Decoder {
    pub fn new(sentinel: SentinelMode) -> Self {
        Self { sentinel }
    }

    pub fn decode(&self, grid: &PixelGrid) -> Vec<u16> {
        decode_with(grid, self.sentinel)
    }

    pub fn decode_string(&self, grid: &PixelGrid) -> Result<String, DecodeError> {
        units_to_string(&self.decode(grid))
    }

    pub fn decode_string_lossy(&self, grid: &PixelGrid) -> String {
        units_to_string_lossy(&self.decode(grid))
    }
}

/// Decode a grid with per-row sentinel handling.
pub fn decode(grid: &PixelGrid) -> Vec<u16> {
    decode_with(grid, SentinelMode::EndOfRow)
}

/// Decode a grid into code points.
///
/// Grids with an odd width are read as if a black column were appended,
/// so a pixel pair never straddles two rows. This covers every odd-area grid
/// and also odd-width grids with an even area, such as 3x2.
pub fn decode_with(grid: &PixelGrid, mode: SentinelMode) -> Vec<u16> {
    let grid: Cow<'_, PixelGrid> = if grid.width() % 2 == 1 {
        Cow::Owned(grid.widened())
    } else {
        Cow::Borrowed(grid)
    };

    let mut out = Vec::with_capacity(layout::capacity_chars(grid.width(), grid.height()) as usize);
    'rows: for row in grid.rows() {
        for pair in row.chunks_exact(PIXELS_PER_PAIR) {
            let pair = [pair[0], pair[1]];
            if layout::is_sentinel(&pair) {
                match mode {
                    SentinelMode::EndOfRow => continue 'rows,
                    SentinelMode::EndOfText => break 'rows,
                }
            }
            out.extend(layout::unpack_pair(pair));
        }
    }
    out
}

/// Decode a grid into a `String`, rejecting surrogate code points.
pub fn decode_string(grid: &PixelGrid) -> Result<String, DecodeError> {
    units_to_string(&decode(grid))
}

/// Decode a grid into a `String`, replacing surrogates with U+FFFD.
pub fn decode_string_lossy(grid: &PixelGrid) -> String {
    units_to_string_lossy(&decode(grid))
}

pub fn units_to_string(units: &[u16]) -> Result<String, DecodeError> {
    units
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            char::from_u32(value as u32).ok_or(DecodeError::InvalidCodePoint { index, value })
        })
        .collect()
}

pub fn units_to_string_lossy(units: &[u16]) -> String {
    units
        .iter()
        .map(|&v| char::from_u32(v as u32).unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Strip the (at most two) trailing pad spaces the encoder may have added.
///
/// Only safe when the original text is known not to end in spaces.
pub fn trim_padding(units: &[u16]) -> &[u16] {
    let pad = units
        .iter()
        .rev()
        .take(2)
        .take_while(|&&u| u == PAD_CHAR)
        .count();
    &units[..units.len() - pad]
}
