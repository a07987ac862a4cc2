//! Text cursor
//!
//! Tracks where the next glyph goes and which panel page is being written.

use crate::config::PAGE_HEIGHT;

/// Cursor position
///
/// Values are not validated; a cursor placed off the panel only fails once a
/// pixel is actually written there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CursorState {
    /// Column in pixels
    pub x: u8,
    /// Row in pixels
    pub y: u8,
    /// Panel page the buffer window is currently bound to
    pub page: u8,
}

impl CursorState {
    /// Top-left corner, page 0
    pub const fn origin() -> Self {
        Self { x: 0, y: 0, page: 0 }
    }

    /// Absolute positioning; the page follows the row
    pub fn set(&mut self, x: u8, y: u8) {
        self.x = x;
        self.y = y;
        self.page = y / PAGE_HEIGHT;
    }

    /// Position at the start of text line `line`
    pub fn set_line(&mut self, x: u8, line: u8) {
        self.x = x;
        self.y = line.wrapping_mul(PAGE_HEIGHT);
        self.page = line;
    }

    /// Move right by `columns` pixels
    pub fn advance(&mut self, columns: u8) {
        self.x = self.x.saturating_add(columns);
    }

    /// Move to the start of the next page, wrapping after the last one
    pub fn next_page(&mut self, page_count: u8) {
        self.page = if self.page.saturating_add(1) >= page_count {
            0
        } else {
            self.page + 1
        };
        self.x = 0;
        self.y = 0;
    }
}
