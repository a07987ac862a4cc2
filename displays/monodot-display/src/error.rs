//! Driver errors

use crate::buffer::OutOfBounds;

/// Errors reported by display operations
///
/// `E` is the transport's error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError<E> {
    /// Pixel outside the panel
    OutOfBounds {
        /// Requested column
        x: u8,
        /// Requested row
        y: u8,
    },
    /// Character has no glyph and is not a newline
    InvalidCharacter(char),
    /// Bus write failed
    Transport(E),
}

impl<E> From<OutOfBounds> for DisplayError<E> {
    fn from(e: OutOfBounds) -> Self {
        DisplayError::OutOfBounds { x: e.x, y: e.y }
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for DisplayError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DisplayError::OutOfBounds { x, y } => write!(f, "pixel ({}, {}) out of bounds", x, y),
            DisplayError::InvalidCharacter(ch) => write!(f, "no glyph for {:?}", ch),
            DisplayError::Transport(e) => write!(f, "transport error: {:?}", e),
        }
    }
}
