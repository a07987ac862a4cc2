//! embedded-graphics integration
//!
//! Drawing goes into the pixel buffer only; call [`Display::flush`] (full-frame
//! buffer) or [`Display::update_page`] to put it on the panel. Pixels outside
//! the panel are clipped.

use core::convert::Infallible;

use embedded_graphics_core::draw_target::DrawTarget;
use embedded_graphics_core::geometry::{OriginDimensions, Size};
use embedded_graphics_core::pixelcolor::BinaryColor;
use embedded_graphics_core::Pixel;

use crate::buffer::Color;
use crate::display::Display;

impl From<BinaryColor> for Color {
    fn from(color: BinaryColor) -> Self {
        match color {
            BinaryColor::Off => Color::Off,
            BinaryColor::On => Color::On,
        }
    }
}

impl From<Color> for BinaryColor {
    fn from(color: Color) -> Self {
        match color {
            Color::Off => BinaryColor::Off,
            Color::On => BinaryColor::On,
        }
    }
}

impl<DI> DrawTarget for Display<DI> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u8::try_from(point.x), u8::try_from(point.y)) else {
                continue;
            };
            // Off-panel pixels are clipped, not errors
            let _ = self.buffer.set_pixel(x, y, color.into());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buffer.clear(color.into());
        Ok(())
    }
}

impl<DI> OriginDimensions for Display<DI> {
    fn size(&self) -> Size {
        Size::new(
            u32::from(self.geometry().width()),
            u32::from(self.geometry().height()),
        )
    }
}
