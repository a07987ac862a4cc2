//! Transport interface
//!
//! The driver only needs two bus operations: send one command byte and send a
//! block of display data. [`I2cInterface`] implements them over any
//! `embedded-hal` I2C bus; the bus implementation owns the timeout.

use embedded_hal::i2c::{I2c, Operation};

/// Control byte announcing a command
pub const COMMAND_REGISTER: u8 = 0x00;

/// Control byte announcing display data
pub const DATA_REGISTER: u8 = 0x40;

/// Command/data transport to the controller
pub trait DisplayInterface {
    /// Error type for bus operations
    type Error;

    /// Send a single command byte
    fn send_command(&mut self, command: u8) -> Result<(), Self::Error>;

    /// Send a block of display data
    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

/// I2C transport
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> I2cInterface<I2C> {
    /// Create a transport for the device at `address`
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give back the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> DisplayInterface for I2cInterface<I2C> {
    type Error = I2C::Error;

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[COMMAND_REGISTER, command])
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        // Adjacent writes in one transaction go out without a repeated start,
        // so the control byte and the payload form a single bus write.
        self.i2c.transaction(
            self.address,
            &mut [Operation::Write(&[DATA_REGISTER]), Operation::Write(data)],
        )
    }
}
