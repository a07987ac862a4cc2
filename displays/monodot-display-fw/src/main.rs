//! Monodot demo firmware
//!
//! Drives a 128x64 SSD1306 panel on I2C1 (PB6=SCL, PB7=SDA) of an STM32F042K6.
//! Prints a banner and then an uptime counter, one line per second, scrolling
//! back to the top once the panel is full.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::i2c::{self, I2c};
use embassy_time::{Delay, Duration, Ticker};
use {defmt_rtt as _, panic_probe as _};

use monodot_display::{Color, Display, DisplayConfig, I2cInterface, FONT_6X8};

/// Counter refresh interval
const TICK_MS: u64 = 1000;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Monodot demo starting...");

    let p = embassy_stm32::init(Default::default());

    // Blocking bus; the HAL enforces the timeout on every transfer
    let mut i2c_config = i2c::Config::default();
    i2c_config.timeout = Duration::from_millis(100);

    let i2c = I2c::new_blocking(p.I2C1, p.PB6, p.PB7, i2c_config);

    let config = DisplayConfig::line_buffered();
    let interface = I2cInterface::new(i2c, config.address);
    let mut display = unwrap!(Display::new(interface, config));

    if let Err(e) = display.init(&mut Delay) {
        error!("Failed to initialize display: {}", e);
        return;
    }
    info!("OLED initialized");

    if let Err(e) = display.write_line("monodot\n", &FONT_6X8, Color::On, true, true) {
        warn!("Banner write failed: {}", e);
    }

    let mut ticker = Ticker::every(Duration::from_millis(TICK_MS));
    let mut seconds: u32 = 0;

    loop {
        ticker.next().await;
        seconds = seconds.wrapping_add(1);

        // One number per line: render, then finish the line so it reaches
        // the panel and the cursor moves on
        let result = display
            .write_int(seconds, &FONT_6X8, Color::On, false, false)
            .and_then(|()| display.new_line(Color::On));
        match result {
            Ok(()) => trace!("uptime {}", seconds),
            Err(e) => warn!("Display write failed: {}", e),
        }
    }
}
