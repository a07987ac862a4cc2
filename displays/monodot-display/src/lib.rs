//! Text and pixel driver for SSD1306 monochrome OLED panels
//!
//! This crate provides:
//! - `PixelBuffer`, a page-packed 1 bit per pixel frame (or window of pages)
//! - `CursorState`, the text cursor and its line/page arithmetic
//! - `Display`, which owns a transport, the buffer and the cursor and talks
//!   to the controller in page addressing mode
//! - A 6x8 ASCII font and a text renderer with line wrapping
//!
//! # Architecture
//!
//! The controller is reached through the `DisplayInterface` trait, which only
//! knows how to send a command byte or a block of data. `I2cInterface` wraps
//! any `embedded-hal` I2C bus; tests use a recording mock.
//!
//! ## Buffering
//!
//! By default the buffer covers the whole panel and `Display::flush` pushes
//! every page. With `DisplayConfig::line_buffered()` the buffer holds a
//! single page: text is rendered into it and streamed to the panel one line
//! at a time as the cursor wraps.
//!
//! With the `graphics` feature `Display` is also an `embedded-graphics`
//! `DrawTarget`.

#![no_std]
#![deny(unsafe_code)]

pub mod buffer;
pub mod command;
pub mod config;
pub mod cursor;
pub mod display;
pub mod error;
pub mod font;
pub mod interface;
pub mod text;

#[cfg(feature = "graphics")]
pub mod graphics;

#[cfg(test)]
mod mock;

// Re-export key types
pub use buffer::{Color, OutOfBounds, PixelBuffer};
pub use command::{init_sequence, InitSequence};
pub use config::{ConfigError, DisplayConfig, Geometry, Height};
pub use cursor::CursorState;
pub use display::{Display, BOOT_DELAY_MS};
pub use error::DisplayError;
pub use font::{Font, FONT_6X8};
pub use interface::{DisplayInterface, I2cInterface};
pub use text::MAX_U32_DIGITS;
