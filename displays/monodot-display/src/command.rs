//! Controller command set and power-on sequence

use heapless::Vec;

use crate::config::{DisplayConfig, Height};

/// SSD1306 commands
pub mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    /// Argument to `SET_MEMORY_MODE`
    pub const PAGE_ADDRESSING: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_COM_SCAN_INC: u8 = 0xC0;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_SEG_REMAP_NORMAL: u8 = 0xA0;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    /// Replaces the multiplex command on 128-row panels
    pub const SET_MUX_TALL_QUIRK: u8 = 0xFF;
    pub const DISPLAY_FOLLOWS_RAM: u8 = 0xA4;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Longest possible power-on sequence
pub const INIT_SEQUENCE_CAPACITY: usize = 32;

/// Power-on command sequence
pub type InitSequence = Vec<u8, INIT_SEQUENCE_CAPACITY>;

/// Build the power-on sequence for a panel
///
/// The byte order is fixed by the controller; only the scan direction,
/// segment remap, polarity, multiplex ratio and COM pin values depend on
/// the configuration.
pub fn init_sequence(config: &DisplayConfig, height: Height) -> InitSequence {
    let com_scan = if config.mirror_vertical {
        cmd::SET_COM_SCAN_INC
    } else {
        cmd::SET_COM_SCAN_DEC
    };
    let seg_remap = if config.mirror_horizontal {
        cmd::SET_SEG_REMAP_NORMAL
    } else {
        cmd::SET_SEG_REMAP
    };
    let polarity = if config.inverse {
        cmd::SET_INVERSE
    } else {
        cmd::SET_NORMAL
    };

    let mut seq = InitSequence::new();
    let mut push = |bytes: &[u8]| {
        // Sequence length is fixed and below INIT_SEQUENCE_CAPACITY
        let _ = seq.extend_from_slice(bytes);
    };

    push(&[cmd::DISPLAY_OFF]);
    push(&[cmd::SET_MEMORY_MODE, cmd::PAGE_ADDRESSING]);
    push(&[cmd::SET_PAGE_ADDR]);
    push(&[com_scan]);
    push(&[cmd::SET_LOW_COLUMN, cmd::SET_HIGH_COLUMN]);
    push(&[cmd::SET_START_LINE]);
    push(&[cmd::SET_CONTRAST, 0xFF]);
    push(&[seg_remap]);
    push(&[polarity]);
    match height.multiplex_ratio() {
        Some(ratio) => push(&[cmd::SET_MUX_RATIO, ratio]),
        None => push(&[cmd::SET_MUX_TALL_QUIRK]),
    }
    push(&[cmd::DISPLAY_FOLLOWS_RAM]);
    push(&[cmd::SET_DISPLAY_OFFSET, 0x00]);
    push(&[cmd::SET_CLOCK_DIV, 0xF0]);
    push(&[cmd::SET_PRECHARGE, 0x22]);
    push(&[cmd::SET_COM_PINS, height.com_pins()]);
    push(&[cmd::SET_VCOM_DETECT, 0x20]);
    push(&[cmd::SET_CHARGE_PUMP, 0x14]);
    push(&[cmd::DISPLAY_ON]);

    seq
}
