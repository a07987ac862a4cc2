//! Text rendering
//!
//! Glyphs are drawn with an explicit background: set bits take the ink color,
//! clear bits take `!color`, so a character always overwrites its cell. Rows
//! are addressed from row 0 of the buffer window, which means text always
//! starts on a page boundary.
//!
//! Line wrapping happens before a character that would not fit and on `'\n'`;
//! each wrap goes through [`Display::new_line`], which writes the finished line
//! to the panel.

use core::fmt;

use crate::buffer::{Color, OutOfBounds};
use crate::display::Display;
use crate::error::DisplayError;
use crate::font::{Font, FONT_6X8};
use crate::interface::DisplayInterface;

/// Decimal digits in `u32::MAX`
pub const MAX_U32_DIGITS: usize = 10;

impl<DI: DisplayInterface> Display<DI> {
    /// Draw one character at the cursor and advance the cursor by its width
    ///
    /// `'\n'` is accepted and draws nothing; line breaks are handled by
    /// [`Display::write_line`]. Drawing stops at the first pixel that falls off
    /// the panel, leaving the cell partly drawn and the cursor unchanged.
    pub fn write_char(
        &mut self,
        ch: char,
        font: &Font,
        color: Color,
    ) -> Result<(), DisplayError<DI::Error>> {
        if ch == '\n' {
            return Ok(());
        }
        let glyph = font.glyph(ch).ok_or(DisplayError::InvalidCharacter(ch))?;

        for (dx, &column) in (0..font.width).zip(glyph.iter()) {
            for y in 0..font.height {
                let x = self
                    .cursor
                    .x
                    .checked_add(dx)
                    .ok_or(OutOfBounds { x: u8::MAX, y })?;
                let ink = column.checked_shr(u32::from(y)).unwrap_or(0) & 0x01 != 0;
                let pixel = if ink { color } else { !color };
                self.buffer.set_pixel(x, y, pixel)?;
            }
        }

        self.cursor.advance(font.width);
        Ok(())
    }

    /// Draw a string, wrapping onto the next line as needed
    ///
    /// - `clear_buffer`: clear the buffer with `!color` first
    /// - `display`: write the cursor's page to the panel afterwards
    ///
    /// Stops at the first character that fails to render; whatever was drawn
    /// before it stays in the buffer.
    pub fn write_line(
        &mut self,
        text: &str,
        font: &Font,
        color: Color,
        clear_buffer: bool,
        display: bool,
    ) -> Result<(), DisplayError<DI::Error>> {
        if clear_buffer {
            self.buffer.clear(!color);
        }

        self.write_wrapped(text.chars(), font, color)?;

        if display {
            self.update_page(self.cursor.page)?;
        }
        Ok(())
    }

    /// Draw an unsigned integer in decimal, with the same wrapping and flags
    /// as [`Display::write_line`]
    pub fn write_int(
        &mut self,
        number: u32,
        font: &Font,
        color: Color,
        clear_buffer: bool,
        display: bool,
    ) -> Result<(), DisplayError<DI::Error>> {
        if clear_buffer {
            self.buffer.clear(!color);
        }

        let mut digits = [0u8; MAX_U32_DIGITS];
        let digits = format_decimal(number, &mut digits);
        self.write_wrapped(digits.iter().map(|&d| char::from(d)), font, color)?;

        if display {
            self.update_page(self.cursor.page)?;
        }
        Ok(())
    }

    fn write_wrapped<I>(
        &mut self,
        chars: I,
        font: &Font,
        color: Color,
    ) -> Result<(), DisplayError<DI::Error>>
    where
        I: IntoIterator<Item = char>,
    {
        for ch in chars {
            if ch == '\n' || self.line_is_full(font) {
                self.new_line(color)?;
            }
            self.write_char(ch, font, color)?;
        }
        Ok(())
    }

    fn line_is_full(&self, font: &Font) -> bool {
        u16::from(self.cursor.x) + u16::from(font.width) > u16::from(self.geometry().width())
    }
}

/// Write the decimal digits of `number` into the tail of `buf`
fn format_decimal(mut number: u32, buf: &mut [u8; MAX_U32_DIGITS]) -> &[u8] {
    let mut start = MAX_U32_DIGITS;
    loop {
        start -= 1;
        buf[start] = b'0' + (number % 10) as u8;
        number /= 10;
        if number == 0 {
            break;
        }
    }
    &buf[start..]
}

/// Plain text output in the built-in 6x8 font, lit pixels on background
impl<DI: DisplayInterface> fmt::Write for Display<DI> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_line(s, &FONT_6X8, Color::On, false, false)
            .map_err(|_| fmt::Error)
    }
}
