//! Raspberry Pi backends: an MCP3008 on the SPI bus for the vane and the
//! GPIO header for the anemometer reed switch.

use rppal::gpio::{self, Gpio, InputPin, Trigger};
use rppal::spi::{self, Bus, Mode, SlaveSelect, Spi};

use super::{Adc, EdgeSource, PulseHandler};

const MCP3008_CHANNELS: u8 = 8;
const MCP3008_RESOLUTION_BITS: u8 = 10;
const MCP3008_START_BIT: u8 = 0x01;
const MCP3008_SINGLE_ENDED: u8 = 0x08;

#[derive(Debug, thiserror::Error)]
pub enum AdcError {
    #[error(transparent)]
    Spi(#[from] spi::Error),
    #[error("MCP3008 has no channel {0}")]
    InvalidChannel(u8),
    #[error("short SPI transfer: {0} of 3 bytes")]
    ShortTransfer(usize),
}

/// 10-bit, 8 channel SPI ADC.
pub struct Mcp3008 {
    spi: Spi,
}

impl Mcp3008 {
    pub fn new(bus: Bus, slave: SlaveSelect, clock_hz: u32) -> Result<Mcp3008, AdcError> {
        let spi = Spi::new(bus, slave, clock_hz, Mode::Mode0)?;
        Ok(Mcp3008 { spi })
    }

    fn check_channel(channel: u8) -> Result<(), AdcError> {
        if channel < MCP3008_CHANNELS {
            Ok(())
        } else {
            Err(AdcError::InvalidChannel(channel))
        }
    }
}

impl Adc for Mcp3008 {
    type Error = AdcError;

    fn setup_channel(&mut self, channel: u8) -> Result<(), AdcError> {
        // nothing to program, the channel is selected per transfer
        Self::check_channel(channel)
    }

    fn read(&mut self, channel: u8) -> Result<i32, AdcError> {
        Self::check_channel(channel)?;

        let tx = [
            MCP3008_START_BIT,
            (MCP3008_SINGLE_ENDED | channel) << 4,
            0x00,
        ];
        let mut rx = [0u8; 3];
        let n = self.spi.transfer(&mut rx, &tx)?;
        if n != rx.len() {
            return Err(AdcError::ShortTransfer(n));
        }

        Ok((((rx[1] & 0x03) as i32) << 8) | rx[2] as i32)
    }

    fn resolution_bits(&self) -> u8 {
        MCP3008_RESOLUTION_BITS
    }
}

/// Edge interrupts on the GPIO header. Subscribed pins stay armed until this
/// is dropped.
pub struct GpioEdges {
    gpio: Gpio,
    pins: Vec<InputPin>,
}

impl GpioEdges {
    pub fn new() -> Result<GpioEdges, gpio::Error> {
        Ok(GpioEdges {
            gpio: Gpio::new()?,
            pins: Vec::new(),
        })
    }
}

impl EdgeSource for GpioEdges {
    type Error = gpio::Error;

    fn subscribe(&mut self, pin: u8, mut handler: PulseHandler) -> Result<(), gpio::Error> {
        // reed switch pulls to ground, so idle high
        let mut input = self.gpio.get(pin)?.into_input_pullup();
        input.set_async_interrupt(Trigger::Both, move |_level| handler())?;
        self.pins.push(input);
        Ok(())
    }
}
