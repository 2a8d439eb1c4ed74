use crate::error::EncodeError;
use crate::grid::PixelGrid;
use crate::layout::{self, Dimensions, CHARS_PER_PAIR, PAD_CHAR};

/// Largest code point the packing can represent.
pub const MAX_CODE_POINT: u32 = u16::MAX as u32;

/// Text encoder with fixed dimension preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Encoder {
    pub dimensions: Dimensions,
}

impl Encoder {
    pub fn new(dimensions: Dimensions) -> Self {
        Self { dimensions }
    }

    pub fn encode(&self, text: &str) -> Result<PixelGrid, EncodeError> {
        encode(text, self.dimensions)
    }

    pub fn encode_code_points(&self, code_points: &[u32]) -> Result<PixelGrid, EncodeError> {
        encode_code_points(code_points, self.dimensions)
    }
}

/// Encode a string into a new pixel grid.
pub fn encode(text: &str, dims: Dimensions) -> Result<PixelGrid, EncodeError> {
    let code_points: Vec<u32> = text.chars().map(u32::from).collect();
    encode_code_points(&code_points, dims)
}

/// Encode raw code points into a new pixel grid.
///
/// All input is validated before the grid is allocated.
pub fn encode_code_points(code_points: &[u32], dims: Dimensions) -> Result<PixelGrid, EncodeError> {
    if code_points.is_empty() {
        return Err(EncodeError::EmptyText);
    }
    let mut units = to_units(code_points)?;
    units.resize(units.len() + layout::padding_len(units.len()), PAD_CHAR);

    let needed = layout::pixels_needed(code_points.len());
    let (width, height) = layout::resolve_dimensions(dims, needed)?;

    let mut grid = PixelGrid::new(width, height);
    let (mut x, mut y) = (0u32, 0u32);
    for triple in units.chunks_exact(CHARS_PER_PAIR) {
        for pixel in layout::pack_triple([triple[0], triple[1], triple[2]]) {
            grid.set(x, y, pixel);
            if x == width - 1 {
                x = 0;
                y += 1;
            } else {
                x += 1;
            }
        }
    }
    Ok(grid)
}

fn to_units(code_points: &[u32]) -> Result<Vec<u16>, EncodeError> {
    code_points
        .iter()
        .enumerate()
        .map(|(index, &cp)| {
            u16::try_from(cp).map_err(|_| EncodeError::CodePointOutOfRange {
                index,
                code_point: cp,
            })
        })
        .collect()
}
