use std::io::{self, Write};

use octet_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use octet_core::FrameBuffer;

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels.
/// This renders them as text, one line per row, to any writer.
/// The display only gets a call to `render` when the Chip-8 FrameBuffer is updated.
pub struct Display<W: Write> {
    out: W,
    on: char,
    off: char,
}

impl<W: Write> Display<W> {
    /// Creates a new display writing to `out`
    pub fn new(out: W) -> Self {
        Display {
            out,
            on: '█',
            off: ' ',
        }
    }

    /// Uses `on` and `off` for lit and unlit pixels
    pub fn with_glyphs(mut self, on: char, off: char) -> Self {
        self.on = on;
        self.off = off;
        self
    }

    /// Formats a Chip-8 FrameBuffer as text.
    ///
    /// Each row of the frame becomes one line of `DISPLAY_WIDTH` glyphs
    /// terminated by a newline.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn frame_to_text(&self, frame: &FrameBuffer) -> String {
        let mut text = String::with_capacity((DISPLAY_WIDTH + 1) * DISPLAY_HEIGHT * 3);
        for row in frame.rows() {
            text.extend(row.iter().map(|&lit| if lit { self.on } else { self.off }));
            text.push('\n');
        }
        text
    }

    /// Writes the frame and flushes
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> io::Result<()> {
        let text = self.frame_to_text(frame);
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }
}
