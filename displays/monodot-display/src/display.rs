//! Display controller
//!
//! Owns the transport, the pixel buffer and the text cursor, and implements
//! the page-write protocol that keeps the panel in sync with the buffer.
//!
//! # Page writes
//!
//! The controller runs in page-addressing mode. A page write selects the page
//! (0xB0 + n), resets the column pointer (0x00, 0x10) and streams the buffer.
//! With a one-page buffer window that is exactly one page of pixels; text output
//! is built around this layout, flushing and reusing the window at each
//! `new_line`. With the whole panel buffered use [`Display::flush`] to push
//! every page from its own slice of the buffer.

use embedded_hal::delay::DelayNs;

use crate::buffer::{Color, PixelBuffer};
use crate::command::{cmd, init_sequence};
use crate::config::{ConfigError, DisplayConfig, Geometry};
use crate::cursor::CursorState;
use crate::error::DisplayError;
use crate::interface::DisplayInterface;

/// Time the panel needs after power-up before it accepts commands
pub const BOOT_DELAY_MS: u32 = 100;

/// Display driver
pub struct Display<DI> {
    interface: DI,
    config: DisplayConfig,
    geometry: Geometry,
    pub(crate) buffer: PixelBuffer,
    pub(crate) cursor: CursorState,
}

impl<DI> Display<DI> {
    /// Create a driver; the panel is not touched until [`Display::init`]
    pub fn new(interface: DI, config: DisplayConfig) -> Result<Self, ConfigError> {
        let geometry = config.validate()?;
        Ok(Self {
            interface,
            config,
            geometry,
            buffer: PixelBuffer::new(&geometry),
            cursor: CursorState::origin(),
        })
    }

    /// Panel geometry
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Configuration the driver was built with
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// In-memory buffer
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Current cursor
    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    /// Set every pixel of the buffer to `color` without touching the panel
    pub fn clear_buffer(&mut self, color: Color) {
        self.buffer.clear(color);
    }

    /// Move the cursor to pixel (`x`, `y`); the page follows the row
    pub fn set_cursor(&mut self, x: u8, y: u8) {
        self.cursor.set(x, y);
    }

    /// Move the cursor to column `x` of text line `line`
    pub fn set_line(&mut self, x: u8, line: u8) {
        self.cursor.set_line(x, line);
    }

    /// Consume the driver and give back the transport
    pub fn release(self) -> DI {
        self.interface
    }
}

impl<DI: DisplayInterface> Display<DI> {
    /// Power-on sequence
    ///
    /// Waits for the panel to boot, sends the configuration commands, blanks
    /// every page and homes the cursor. If any write fails the panel state is
    /// undefined and `init` has to be run again.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), DisplayError<DI::Error>> {
        delay.delay_ms(BOOT_DELAY_MS);

        for &byte in init_sequence(&self.config, self.geometry.height_variant()).iter() {
            self.command(byte)?;
        }

        self.fill(Color::Off)?;
        self.cursor = CursorState::origin();

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "display ready: {}x{}, {} of {} pages buffered",
            self.geometry.width(),
            self.geometry.height(),
            self.geometry.pages_per_buffer(),
            self.geometry.page_count()
        );

        Ok(())
    }

    /// Set one pixel in the buffer
    pub fn draw_pixel(&mut self, x: u8, y: u8, color: Color) -> Result<(), DisplayError<DI::Error>> {
        self.buffer.set_pixel(x, y, color)?;
        Ok(())
    }

    /// Write the buffer to panel page `page`
    ///
    /// Out-of-range pages wrap modulo the page count. The whole buffer goes out
    /// as one data transfer.
    pub fn update_page(&mut self, page: u8) -> Result<(), DisplayError<DI::Error>> {
        let page = page % self.geometry.page_count();
        self.select_page(page)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("page {}: {} bytes", page, self.buffer.len());

        self.interface
            .send_data(self.buffer.as_bytes())
            .map_err(DisplayError::Transport)
    }

    /// Fill the buffer with `color` and write it to every page
    pub fn fill(&mut self, color: Color) -> Result<(), DisplayError<DI::Error>> {
        self.buffer.clear(color);
        for page in 0..self.geometry.page_count() {
            self.update_page(page)?;
        }
        Ok(())
    }

    /// Push the buffer to the panel
    ///
    /// A full-frame buffer is written page by page, each page from its own
    /// slice. A partial window only covers the cursor's page, so that page is
    /// written with [`Display::update_page`].
    pub fn flush(&mut self) -> Result<(), DisplayError<DI::Error>> {
        if !self.geometry.is_full_frame() {
            return self.update_page(self.cursor.page);
        }

        for page in 0..self.geometry.page_count() {
            self.select_page(page)?;
            if let Some(bytes) = self.buffer.page(page) {
                self.interface
                    .send_data(bytes)
                    .map_err(DisplayError::Transport)?;
            }
        }
        Ok(())
    }

    /// Finish the current line and start the next one
    ///
    /// Flushes the cursor's page, moves to column 0 of the next page (wrapping
    /// to page 0 after the last) and clears the buffer with `!color` so the
    /// new line starts on background.
    pub fn new_line(&mut self, color: Color) -> Result<(), DisplayError<DI::Error>> {
        self.update_page(self.cursor.page)?;
        self.cursor.next_page(self.geometry.page_count());
        self.buffer.clear(!color);
        Ok(())
    }

    /// Set panel contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError<DI::Error>> {
        self.command(cmd::SET_CONTRAST)?;
        self.command(contrast)
    }

    /// Turn the panel on or off; GDDRAM contents are kept
    pub fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError<DI::Error>> {
        if on {
            self.command(cmd::DISPLAY_ON)
        } else {
            self.command(cmd::DISPLAY_OFF)
        }
    }

    /// Switch between normal and inverse polarity
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), DisplayError<DI::Error>> {
        if inverted {
            self.command(cmd::SET_INVERSE)
        } else {
            self.command(cmd::SET_NORMAL)
        }
    }

    fn select_page(&mut self, page: u8) -> Result<(), DisplayError<DI::Error>> {
        self.command(cmd::SET_PAGE_ADDR | page)?;
        self.command(cmd::SET_LOW_COLUMN)?;
        self.command(cmd::SET_HIGH_COLUMN)
    }

    fn command(&mut self, byte: u8) -> Result<(), DisplayError<DI::Error>> {
        self.interface
            .send_command(byte)
            .map_err(DisplayError::Transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{BusFault, BusWrite, NoopDelay, RecordingInterface};

    fn display(config: DisplayConfig) -> Display<RecordingInterface> {
        Display::new(RecordingInterface::default(), config).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let result = Display::new(RecordingInterface::default(), DisplayConfig::new().with_height(16));
        assert!(matches!(result, Err(ConfigError::UnsupportedHeight(16))));
    }

    #[test]
    fn test_init_sequence_then_blank_pages() {
        let mut display = display(DisplayConfig::new());
        display.set_cursor(30, 20);
        let mut delay = NoopDelay::default();
        display.init(&mut delay).unwrap();

        assert_eq!(delay.total_ns, 100_000_000);

        let bus = display.release();
        let expected = init_sequence(&DisplayConfig::new(), crate::config::Height::Rows64);
        let commands = bus.commands();
        assert_eq!(&commands[..expected.len()], expected.as_slice());

        // the sequence's own page-address command, then a blank write of every page
        assert_eq!(bus.pages_written(), [0, 0, 1, 2, 3, 4, 5, 6, 7]);
        let data = bus.data_writes();
        assert_eq!(data.len(), 8);
        assert!(data.iter().all(|d| d.len() == 1024 && d.iter().all(|&b| b == 0)));
    }

    #[test]
    fn test_init_homes_cursor() {
        let mut display = display(DisplayConfig::new());
        display.set_cursor(30, 20);
        display.init(&mut NoopDelay::default()).unwrap();
        assert_eq!(display.cursor(), CursorState::origin());
    }

    #[test]
    fn test_update_page_protocol() {
        let mut display = display(DisplayConfig::line_buffered());
        display.draw_pixel(3, 0, Color::On).unwrap();
        display.update_page(2).unwrap();

        let bus = display.release();
        assert_eq!(bus.writes.len(), 4);
        assert_eq!(
            &bus.writes[..3],
            &[
                BusWrite::Command(0xB2),
                BusWrite::Command(0x00),
                BusWrite::Command(0x10)
            ]
        );
        let data = bus.data_writes();
        assert_eq!(data[0].len(), 128);
        assert_eq!(data[0][3], 0x01);
    }

    #[test]
    fn test_update_page_wraps_index() {
        let mut display = display(DisplayConfig::new());
        display.update_page(9).unwrap();
        display.update_page(8).unwrap();
        assert_eq!(display.release().pages_written(), [1, 0]);
    }

    #[test]
    fn test_fill_writes_every_page() {
        let mut display = display(DisplayConfig::new().with_height(32));
        display.fill(Color::On).unwrap();

        assert!(display.buffer().as_bytes().iter().all(|&b| b == 0xFF));
        let bus = display.release();
        assert_eq!(bus.pages_written(), [0, 1, 2, 3]);
        assert!(bus
            .data_writes()
            .iter()
            .all(|d| d.len() == 512 && d.iter().all(|&b| b == 0xFF)));
    }

    #[test]
    fn test_new_line_flushes_then_advances() {
        let mut display = display(DisplayConfig::line_buffered());
        display.set_line(40, 2);
        display.draw_pixel(0, 0, Color::On).unwrap();
        display.new_line(Color::On).unwrap();

        assert_eq!(display.cursor(), CursorState { x: 0, y: 0, page: 3 });
        // drawing in On leaves a buffer cleared to Off
        assert!(display.buffer().as_bytes().iter().all(|&b| b == 0x00));

        let bus = display.release();
        assert_eq!(bus.pages_written(), [2]);
        assert_eq!(bus.data_writes()[0][0], 0x01);
    }

    #[test]
    fn test_new_line_clears_with_inverse_color() {
        let mut display = display(DisplayConfig::line_buffered());
        display.new_line(Color::Off).unwrap();
        assert!(display.buffer().as_bytes().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_new_line_wraps_after_last_page() {
        let mut display = display(DisplayConfig::line_buffered());
        for _ in 0..8 {
            display.new_line(Color::On).unwrap();
        }
        assert_eq!(display.cursor().page, 0);
        assert_eq!(display.release().pages_written(), [0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_flush_full_frame_writes_page_slices() {
        let mut display = display(DisplayConfig::new());
        display.draw_pixel(1, 9, Color::On).unwrap();
        display.flush().unwrap();

        let bus = display.release();
        assert_eq!(bus.pages_written(), [0, 1, 2, 3, 4, 5, 6, 7]);
        let data = bus.data_writes();
        assert_eq!(data.len(), 8);
        assert!(data.iter().all(|d| d.len() == 128));
        assert_eq!(data[1][1], 0b0000_0010);
    }

    #[test]
    fn test_flush_partial_window_writes_cursor_page() {
        let mut display = display(DisplayConfig::line_buffered());
        display.set_line(0, 5);
        display.flush().unwrap();
        assert_eq!(display.release().pages_written(), [5]);
    }

    #[test]
    fn test_runtime_commands() {
        let mut display = display(DisplayConfig::new());
        display.set_contrast(0x7F).unwrap();
        display.set_display_on(false).unwrap();
        display.set_display_on(true).unwrap();
        display.set_inverted(true).unwrap();
        display.set_inverted(false).unwrap();
        assert_eq!(
            display.release().commands(),
            [0x81, 0x7F, 0xAE, 0xAF, 0xA7, 0xA6]
        );
    }

    #[test]
    fn test_transport_failure_is_propagated() {
        let mut display = Display::new(
            RecordingInterface::failing_after(2),
            DisplayConfig::line_buffered(),
        )
        .unwrap();
        assert_eq!(display.update_page(0), Err(DisplayError::Transport(BusFault)));
        // nothing retried
        assert_eq!(display.release().writes.len(), 2);
    }

    #[test]
    fn test_init_stops_at_first_failure() {
        let mut display =
            Display::new(RecordingInterface::failing_after(5), DisplayConfig::new()).unwrap();
        let result = display.init(&mut NoopDelay::default());
        assert_eq!(result, Err(DisplayError::Transport(BusFault)));
        assert_eq!(display.release().writes.len(), 5);
    }
}
