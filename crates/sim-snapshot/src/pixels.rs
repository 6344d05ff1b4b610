//! Row-major RGB pixel buffer, one pixel per grid cell.

use crate::appearance::Rgb;

/// A `height × width` image where row `y`, column `x` holds the colour of
/// grid cell `(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl PixelBuffer {
    /// Creates a buffer filled with one colour.
    pub fn filled(width: u32, height: u32, colour: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![colour; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, row: u32, col: u32) -> Option<usize> {
        (row < self.height && col < self.width)
            .then(|| row as usize * self.width as usize + col as usize)
    }

    /// Colour at the given row and column.
    pub fn get(&self, row: u32, col: u32) -> Option<Rgb> {
        self.index(row, col).map(|i| self.pixels[i])
    }

    /// Overwrites one pixel. Out-of-range writes are ignored.
    pub fn set(&mut self, row: u32, col: u32, colour: Rgb) {
        if let Some(i) = self.index(row, col) {
            self.pixels[i] = colour;
        }
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Packs the buffer as 8-bit RGBA, row-major, ready for texture upload.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_rgba8()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_dimensions() {
        let buffer = PixelBuffer::filled(3, 2, Rgb::WHITE);
        assert_eq!(buffer.pixels().len(), 6);
        assert_eq!(buffer.get(1, 2), Some(Rgb::WHITE));
        assert_eq!(buffer.get(2, 0), None);
        assert_eq!(buffer.get(0, 3), None);
    }

    #[test]
    fn test_set_is_row_major() {
        let mut buffer = PixelBuffer::filled(3, 2, Rgb::WHITE);
        let red = Rgb::new(1.0, 0.0, 0.0);
        buffer.set(1, 0, red);
        assert_eq!(buffer.pixels()[3], red);
        assert_eq!(&buffer.to_rgba8()[12..16], &[255, 0, 0, 255]);
    }
}
