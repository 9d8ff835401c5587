use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// # FrameBuffer
/// The contents of a single 64x32 monochrome frame.
/// Rows are stored top to bottom and indexed as `[y][x]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    /// Unsets every pixel
    pub fn clear(&mut self) {
        self.pixels = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    /// # Arguments
    /// * `x` column in `0..64`
    /// * `y` row in `0..32`
    ///
    /// # Panics
    /// If `x` or `y` is outside the frame; callers wrap coordinates first.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[y][x]
    }

    /// Sets the pixel at (x, y) to `value`.
    /// This is a plain store; sprite drawing computes the XOR itself.
    ///
    /// # Panics
    /// If `x` or `y` is outside the frame.
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        self.pixels[y][x] = value;
    }

    /// Iterates over the rows of the frame, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[bool; DISPLAY_WIDTH]> {
        self.pixels.iter()
    }

    /// Number of pixels currently set
    pub fn lit(&self) -> usize {
        self.rows().flat_map(|row| row.iter()).filter(|&&p| p).count()
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
