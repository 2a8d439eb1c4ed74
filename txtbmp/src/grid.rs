use crate::error::GridError;
use crate::pixel::Pixel;

/// RGB pixel grid with row-major pixel data.
///
/// A grid is built once, either by the encoder or from a decoded image
/// buffer, and is read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    /// Create a new grid filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![Pixel::BLACK; len],
        }
    }

    /// Create a grid from existing row-major pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, GridError> {
        let expected = area(width, height)?;
        if pixels.len() != expected {
            return Err(GridError::BufferLength {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// Create a grid from a packed `RGBRGB...` byte buffer.
    ///
    /// `buf` must hold exactly `width * height * 3` bytes.
    pub fn from_rgb_bytes(width: u32, height: u32, buf: Vec<u8>) -> Result<Self, GridError> {
        let expected = area(width, height)?
            .checked_mul(3)
            .ok_or(GridError::TooLarge(width, height))?;
        if buf.len() != expected {
            return Err(GridError::BufferLength {
                width,
                height,
                expected,
                actual: buf.len(),
            });
        }
        let pixels = buf
            .chunks_exact(3)
            .map(|c| Pixel::new(c[0], c[1], c[2]))
            .collect();
        Ok(Self { width, height, pixels })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels.
    #[inline]
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Get the pixel at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Pixel {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub(crate) fn set(&mut self, x: u32, y: u32, val: Pixel) {
        self.pixels[y as usize * self.width as usize + x as usize] = val;
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        // A zero-width grid has no pixels, so the chunk size only has to be non-zero.
        self.pixels.chunks_exact(self.width.max(1) as usize)
    }

    /// Copy of this grid with one black column appended on the right.
    pub fn widened(&self) -> PixelGrid {
        let mut out = PixelGrid::new(self.width + 1, self.height);
        for (y, row) in self.rows().enumerate() {
            for (x, &p) in row.iter().enumerate() {
                out.set(x as u32, y as u32, p);
            }
        }
        out
    }

    /// Flatten into a packed `RGBRGB...` byte buffer.
    pub fn into_rgb_bytes(self) -> Vec<u8> {
        self.pixels.into_iter().flat_map(Pixel::to_array).collect()
    }
}

fn area(width: u32, height: u32) -> Result<usize, GridError> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(GridError::TooLarge(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_black_grid() {
        let grid = PixelGrid::new(10, 8);
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 8);
        assert_eq!(grid.area(), 80);
        assert!(grid.pixels().iter().all(Pixel::is_black));
    }

    #[test]
    fn get_set_pixel() {
        let mut grid = PixelGrid::new(4, 4);
        grid.set(2, 3, Pixel::new(1, 2, 3));
        assert_eq!(grid.get(2, 3), Pixel::new(1, 2, 3));
        assert_eq!(grid.get(0, 0), Pixel::BLACK);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn get_out_of_bounds_panics() {
        let grid = PixelGrid::new(2, 2);
        grid.get(2, 0);
    }

    #[test]
    fn from_rgb_bytes_is_row_major() {
        let buf = vec![
            1, 1, 1, 2, 2, 2, 3, 3, 3, // row 0
            4, 4, 4, 5, 5, 5, 6, 6, 6, // row 1
        ];
        let grid = PixelGrid::from_rgb_bytes(3, 2, buf.clone()).unwrap();
        assert_eq!(grid.get(0, 0), Pixel::new(1, 1, 1));
        assert_eq!(grid.get(2, 0), Pixel::new(3, 3, 3));
        assert_eq!(grid.get(0, 1), Pixel::new(4, 4, 4));
        assert_eq!(grid.get(2, 1), Pixel::new(6, 6, 6));
        assert_eq!(grid.into_rgb_bytes(), buf);
    }

    #[test]
    fn from_rgb_bytes_rejects_wrong_length() {
        let err = PixelGrid::from_rgb_bytes(2, 2, vec![0; 11]).unwrap_err();
        assert_eq!(
            err,
            GridError::BufferLength { width: 2, height: 2, expected: 12, actual: 11 }
        );
    }

    #[test]
    fn from_pixels_rejects_wrong_length() {
        let err = PixelGrid::from_pixels(3, 1, vec![Pixel::BLACK; 2]).unwrap_err();
        assert!(matches!(err, GridError::BufferLength { expected: 3, actual: 2, .. }));
    }

    #[test]
    fn rows_of_zero_width_grid_are_empty() {
        let grid = PixelGrid::new(0, 5);
        assert_eq!(grid.rows().count(), 0);
    }

    #[test]
    fn widened_appends_black_column() {
        let pixels = (0..9u8).map(|v| Pixel::new(v + 1, 0, 0)).collect();
        let grid = PixelGrid::from_pixels(3, 3, pixels).unwrap();
        let wide = grid.widened();
        assert_eq!(wide.width(), 4);
        assert_eq!(wide.height(), 3);
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(wide.get(x, y), grid.get(x, y));
            }
            assert_eq!(wide.get(3, y), Pixel::BLACK);
        }
    }
}
