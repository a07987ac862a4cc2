//! Bit-packed pixel buffer
//!
//! The buffer mirrors the controller's GDDRAM layout: one byte per column per
//! page, bit `n` of a byte is row `page * 8 + n`. When fewer pages are buffered
//! than the panel has, rows fold onto the window with `page % pages_per_buffer`.

use heapless::Vec;

use crate::config::{Geometry, MAX_BUFFER_LEN, PAGE_HEIGHT};

/// Pixel color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Pixel cleared (bit 0)
    #[default]
    Off,
    /// Pixel lit (bit 1)
    On,
}

impl Color {
    /// Byte value with all 8 pixels set to this color
    pub const fn fill_byte(self) -> u8 {
        match self {
            Color::Off => 0x00,
            Color::On => 0xFF,
        }
    }

    /// The opposite color
    pub const fn invert(self) -> Self {
        match self {
            Color::Off => Color::On,
            Color::On => Color::Off,
        }
    }
}

impl core::ops::Not for Color {
    type Output = Color;

    fn not(self) -> Color {
        self.invert()
    }
}

impl From<bool> for Color {
    fn from(on: bool) -> Self {
        if on {
            Color::On
        } else {
            Color::Off
        }
    }
}

/// A pixel write landed outside the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfBounds {
    /// Requested column
    pub x: u8,
    /// Requested row
    pub y: u8,
}

/// In-memory pixel buffer
#[derive(Clone)]
pub struct PixelBuffer {
    bytes: Vec<u8, MAX_BUFFER_LEN>,
    width: u8,
    height: u8,
    pages_per_buffer: u8,
}

impl PixelBuffer {
    /// Create a cleared buffer sized for `geometry`
    pub fn new(geometry: &Geometry) -> Self {
        let mut bytes = Vec::new();
        // Geometry validation caps buffer_len at MAX_BUFFER_LEN
        let _ = bytes.resize(geometry.buffer_len(), Color::Off.fill_byte());

        Self {
            bytes,
            width: geometry.width(),
            height: geometry.height(),
            pages_per_buffer: geometry.pages_per_buffer(),
        }
    }

    /// Set every pixel to `color`
    pub fn clear(&mut self, color: Color) {
        self.bytes.fill(color.fill_byte());
    }

    /// Set or clear a single pixel
    ///
    /// Coordinates outside the panel are rejected and the buffer is left
    /// untouched. Every other bit in the addressed byte is preserved.
    pub fn set_pixel(&mut self, x: u8, y: u8, color: Color) -> Result<(), OutOfBounds> {
        let index = self.index(x, y).ok_or(OutOfBounds { x, y })?;
        let mask = 1u8 << (y % PAGE_HEIGHT);

        if let Some(byte) = self.bytes.get_mut(index) {
            match color {
                Color::On => *byte |= mask,
                Color::Off => *byte &= !mask,
            }
        }
        Ok(())
    }

    /// Read a pixel back, `None` outside the panel
    pub fn pixel(&self, x: u8, y: u8) -> Option<Color> {
        let byte = self.bytes.get(self.index(x, y)?)?;
        Some(Color::from(byte & (1 << (y % PAGE_HEIGHT)) != 0))
    }

    /// Raw buffer contents, in device order
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// One page of the buffer window (`0..pages_per_buffer`)
    pub fn page(&self, window_page: u8) -> Option<&[u8]> {
        if window_page >= self.pages_per_buffer {
            return None;
        }
        let start = usize::from(window_page) * usize::from(self.width);
        self.bytes.get(start..start + usize::from(self.width))
    }

    /// Buffer size in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True for a zero-sized buffer (never the case for a validated geometry)
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Width in pixels
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Pages in the buffer window
    pub fn pages_per_buffer(&self) -> u8 {
        self.pages_per_buffer
    }

    fn index(&self, x: u8, y: u8) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let window_page = (y / PAGE_HEIGHT) % self.pages_per_buffer;
        Some(usize::from(x) + usize::from(window_page) * usize::from(self.width))
    }
}
