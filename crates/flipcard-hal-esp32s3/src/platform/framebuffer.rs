//! 1bpp frame for the 400x240 Sharp memory LCD.

use core::convert::Infallible;

use embedded_graphics::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::BinaryColor,
};
use flipcard_core::layout::{PANEL_HEIGHT, PANEL_WIDTH};

pub const WIDTH: usize = PANEL_WIDTH as usize;
pub const HEIGHT: usize = PANEL_HEIGHT as usize;
pub const LINE_BYTES: usize = WIDTH / 8;
pub const BUFFER_SIZE: usize = LINE_BYTES * HEIGHT;

/// Bit 7 of each byte is the leftmost pixel. A set bit is a dark pixel
/// (`BinaryColor::On`); the panel's inverted polarity is handled on flush.
#[derive(Clone)]
pub struct FrameBuffer {
    bytes: [u8; BUFFER_SIZE],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            bytes: [0u8; BUFFER_SIZE],
        }
    }

    pub fn bytes(&self) -> &[u8; BUFFER_SIZE] {
        &self.bytes
    }

    pub fn fill(&mut self, on: bool) {
        self.bytes.fill(if on { 0xFF } else { 0x00 });
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }

        let byte_index = y * LINE_BYTES + (x / 8);
        let bit_mask = 1u8 << (7 - (x % 8));
        if on {
            self.bytes[byte_index] |= bit_mask;
        } else {
            self.bytes[byte_index] &= !bit_mask;
        }
        true
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<bool> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }
        let byte_index = y * LINE_BYTES + (x / 8);
        Some(self.bytes[byte_index] & (1u8 << (7 - (x % 8))) != 0)
    }

    /// Row `y` (0-based) as sent to the panel.
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * LINE_BYTES;
        &self.bytes[start..start + LINE_BYTES]
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let _ = self.set_pixel(point.x as usize, point.y as usize, color.is_on());
        }
        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}
