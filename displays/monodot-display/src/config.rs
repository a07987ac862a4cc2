//! Display configuration
//!
//! Panel geometry and the mirror/inverse options are fixed when the driver is
//! constructed. [`DisplayConfig`] holds the raw values (so it can be loaded from
//! a config file), [`DisplayConfig::validate`] turns them into a [`Geometry`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default I2C address of the controller (0x3D when SA0 is pulled high)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Default panel width in pixels
pub const DEFAULT_WIDTH: u8 = 128;

/// Default panel height in pixels
pub const DEFAULT_HEIGHT: u8 = 64;

/// Widest panel the controller can address (column pointer is 7 bits)
pub const MAX_WIDTH: u8 = 128;

/// Rows per page
pub const PAGE_HEIGHT: u8 = 8;

/// Most pages any supported panel has (128-row variant)
pub const MAX_PAGES: u8 = 16;

/// Upper bound on the in-memory buffer size in bytes
pub const MAX_BUFFER_LEN: usize = MAX_WIDTH as usize * MAX_PAGES as usize;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Height is not 32, 64 or 128 rows
    UnsupportedHeight(u8),
    /// Width is zero or wider than the controller's column range
    InvalidWidth(u8),
    /// Buffer window is empty or larger than the panel
    InvalidPagesPerBuffer(u8),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::UnsupportedHeight(rows) => {
                write!(f, "unsupported height {} (expected 32, 64 or 128)", rows)
            }
            ConfigError::InvalidWidth(width) => {
                write!(f, "invalid width {} (expected 1..={})", width, MAX_WIDTH)
            }
            ConfigError::InvalidPagesPerBuffer(pages) => {
                write!(f, "invalid pages per buffer {}", pages)
            }
        }
    }
}

/// Supported panel heights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Height {
    /// 128x32 panels
    Rows32,
    /// 128x64 panels
    Rows64,
    /// 128x128 SH1106-style panels (vendor quirk)
    Rows128,
}

impl Height {
    /// Map a pixel height onto a supported variant
    pub const fn from_rows(rows: u8) -> Result<Self, ConfigError> {
        match rows {
            32 => Ok(Height::Rows32),
            64 => Ok(Height::Rows64),
            128 => Ok(Height::Rows128),
            other => Err(ConfigError::UnsupportedHeight(other)),
        }
    }

    /// Height in pixel rows
    pub const fn rows(self) -> u8 {
        match self {
            Height::Rows32 => 32,
            Height::Rows64 => 64,
            Height::Rows128 => 128,
        }
    }

    /// Number of 8-row pages
    pub const fn pages(self) -> u8 {
        self.rows() / PAGE_HEIGHT
    }

    /// Value that follows the multiplex-ratio opcode
    ///
    /// `None` for the 128-row variant, which replaces the whole multiplex
    /// command with a single 0xFF byte.
    pub const fn multiplex_ratio(self) -> Option<u8> {
        match self {
            Height::Rows32 => Some(0x1F),
            Height::Rows64 => Some(0x3F),
            Height::Rows128 => None,
        }
    }

    /// COM pins hardware configuration value
    pub const fn com_pins(self) -> u8 {
        match self {
            Height::Rows32 => 0x02,
            Height::Rows64 | Height::Rows128 => 0x12,
        }
    }
}

/// Raw display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// 7-bit bus address
    pub address: u8,
    /// Width in pixels
    pub width: u8,
    /// Height in pixels (32, 64 or 128)
    pub height: u8,
    /// Pages held in RAM; `None` buffers the whole panel
    pub pages_per_buffer: Option<u8>,
    /// Flip the COM scan direction (0xC0 instead of 0xC8)
    pub mirror_vertical: bool,
    /// Flip the segment remap (0xA0 instead of 0xA1)
    pub mirror_horizontal: bool,
    /// Inverse polarity (0xA7 instead of 0xA6)
    pub inverse: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayConfig {
    /// 128x64 panel at 0x3C with the whole panel buffered
    pub const fn new() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            pages_per_buffer: None,
            mirror_vertical: false,
            mirror_horizontal: false,
            inverse: false,
        }
    }

    /// 128x64 panel that keeps a single page in RAM
    ///
    /// This is the layout line-oriented text output is built around: every
    /// `new_line` pushes the one buffered page and reuses it for the next.
    pub const fn line_buffered() -> Self {
        Self::new().with_pages_per_buffer(1)
    }

    /// Set the bus address
    pub const fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Set the panel width
    pub const fn with_width(mut self, width: u8) -> Self {
        self.width = width;
        self
    }

    /// Set the panel height
    pub const fn with_height(mut self, height: u8) -> Self {
        self.height = height;
        self
    }

    /// Keep only `pages` pages in RAM
    pub const fn with_pages_per_buffer(mut self, pages: u8) -> Self {
        self.pages_per_buffer = Some(pages);
        self
    }

    /// Set the vertical mirror flag
    pub const fn with_mirror_vertical(mut self, mirror: bool) -> Self {
        self.mirror_vertical = mirror;
        self
    }

    /// Set the horizontal mirror flag
    pub const fn with_mirror_horizontal(mut self, mirror: bool) -> Self {
        self.mirror_horizontal = mirror;
        self
    }

    /// Set the inverse polarity flag
    pub const fn with_inverse(mut self, inverse: bool) -> Self {
        self.inverse = inverse;
        self
    }

    /// Check the configuration and derive the panel geometry
    pub const fn validate(&self) -> Result<Geometry, ConfigError> {
        let height = match Height::from_rows(self.height) {
            Ok(height) => height,
            Err(e) => return Err(e),
        };

        if self.width == 0 || self.width > MAX_WIDTH {
            return Err(ConfigError::InvalidWidth(self.width));
        }

        let pages_per_buffer = match self.pages_per_buffer {
            Some(pages) => pages,
            None => height.pages(),
        };
        if pages_per_buffer == 0 || pages_per_buffer > height.pages() {
            return Err(ConfigError::InvalidPagesPerBuffer(pages_per_buffer));
        }

        Ok(Geometry {
            width: self.width,
            height,
            pages_per_buffer,
        })
    }
}

/// Validated panel geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Geometry {
    width: u8,
    height: Height,
    pages_per_buffer: u8,
}

impl Geometry {
    /// Width in pixels
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u8 {
        self.height.rows()
    }

    /// Height variant
    pub const fn height_variant(&self) -> Height {
        self.height
    }

    /// Pages on the panel
    pub const fn page_count(&self) -> u8 {
        self.height.pages()
    }

    /// Pages held in the in-memory buffer
    pub const fn pages_per_buffer(&self) -> u8 {
        self.pages_per_buffer
    }

    /// True when the buffer mirrors the whole panel
    pub const fn is_full_frame(&self) -> bool {
        self.pages_per_buffer == self.page_count()
    }

    /// Buffer size in bytes (`width * pages_per_buffer`)
    pub const fn buffer_len(&self) -> usize {
        self.width as usize * self.pages_per_buffer as usize
    }
}
