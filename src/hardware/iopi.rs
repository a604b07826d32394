//! IO Pi Plus driver
//!
//! The board carries two MCP23017 16-bit expanders. Each one sits at its own
//! I2C address (jumper selected, 0x20..=0x27) and exposes 16 pins split over
//! two 8-bit ports. Only the registers needed for polled digital input are
//! driven here.

use rppal::i2c::I2c;
use tracing::{debug, info, trace};

use super::{BusError, PinSource, Port};
use crate::input::button::LogicalButton;

// MCP23017 register map with IOCON.BANK = 0
const IODIRA: u8 = 0x00;
const IODIRB: u8 = 0x01;
const IPOLA: u8 = 0x02;
const IPOLB: u8 = 0x03;
const IOCON: u8 = 0x0A;
const GPPUA: u8 = 0x0C;
const GPPUB: u8 = 0x0D;
const GPIOA: u8 = 0x12;
const GPIOB: u8 = 0x13;

/// Byte mode, interrupt pins open drain
const IOCON_DEFAULT: u8 = 0x22;

/// Lowest and highest address the MCP23017 can be strapped to
pub const MIN_ADDRESS: u8 = 0x20;
pub const MAX_ADDRESS: u8 = 0x27;

/// One expander on the IO Pi Plus board
pub struct IoPiBus {
    i2c: I2c,
    address: u8,
}

impl IoPiBus {
    /// Opens the Raspberry Pi I2C bus and attaches to the expander at `address`
    pub fn open(address: u8) -> Result<Self, BusError> {
        if !(MIN_ADDRESS..=MAX_ADDRESS).contains(&address) {
            return Err(BusError::Unavailable(format!(
                "address {:#04x} outside {:#04x}..={:#04x}",
                address, MIN_ADDRESS, MAX_ADDRESS
            )));
        }

        info!("Opening IO Pi Plus expander at {:#04x}", address);
        let mut i2c = I2c::new()?;
        i2c.set_slave_address(u16::from(address))?;
        i2c.smbus_write_byte(IOCON, IOCON_DEFAULT)?;
        debug!("Expander {:#04x} IOCON set to {:#04x}", address, IOCON_DEFAULT);

        Ok(Self { i2c, address })
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), BusError> {
        trace!(
            "Expander {:#04x} write {:#04x} <- {:#010b}",
            self.address,
            register,
            value
        );
        self.i2c.smbus_write_byte(register, value)?;
        Ok(())
    }
}

impl PinSource for IoPiBus {
    fn read_pin(&mut self, pin: LogicalButton) -> Result<u8, BusError> {
        let (port, bit) = locate(pin)?;
        let register = match port {
            Port::A => GPIOA,
            Port::B => GPIOB,
        };
        let value = self.i2c.smbus_read_byte(register)?;
        Ok((value >> bit) & 0x01)
    }

    fn set_port_direction(&mut self, port: Port, mask: u8) -> Result<(), BusError> {
        let register = match port {
            Port::A => IODIRA,
            Port::B => IODIRB,
        };
        self.write_register(register, mask)
    }

    fn set_port_pullups(&mut self, port: Port, mask: u8) -> Result<(), BusError> {
        let register = match port {
            Port::A => GPPUA,
            Port::B => GPPUB,
        };
        self.write_register(register, mask)
    }

    fn invert_port(&mut self, port: Port, mask: u8) -> Result<(), BusError> {
        let register = match port {
            Port::A => IPOLA,
            Port::B => IPOLB,
        };
        self.write_register(register, mask)
    }
}

/// Maps a 1-based pin number onto its port and bit position
fn locate(pin: LogicalButton) -> Result<(Port, u8), BusError> {
    match pin.number() {
        n @ 1..=8 => Ok((Port::A, n - 1)),
        n @ 9..=16 => Ok((Port::B, n - 9)),
        n => Err(BusError::InvalidPin(n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pins_split_across_ports() {
        assert_eq!(locate(LogicalButton::new(1)).unwrap(), (Port::A, 0));
        assert_eq!(locate(LogicalButton::new(8)).unwrap(), (Port::A, 7));
        assert_eq!(locate(LogicalButton::new(9)).unwrap(), (Port::B, 0));
        assert_eq!(locate(LogicalButton::new(16)).unwrap(), (Port::B, 7));
    }

    #[test]
    fn out_of_range_pins_are_rejected() {
        assert!(matches!(
            locate(LogicalButton::new(0)),
            Err(BusError::InvalidPin(0))
        ));
        assert!(matches!(
            locate(LogicalButton::new(17)),
            Err(BusError::InvalidPin(17))
        ));
    }

    #[test]
    fn open_rejects_addresses_outside_jumper_range() {
        assert!(matches!(
            IoPiBus::open(0x40),
            Err(BusError::Unavailable(_))
        ));
    }
}
