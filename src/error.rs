use std::error::Error;

/// Boxed driver error, as handed back by the hardware backends.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Station could not be brought up. The station is not constructed.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("failed to configure ADC channel {channel}")]
    AdcChannel {
        channel: u8,
        #[source]
        source: BoxError,
    },
    #[error("failed to subscribe to edges on GPIO {pin}")]
    EdgeSubscribe {
        pin: u8,
        #[source]
        source: BoxError,
    },
    #[error("invalid calibration")]
    Calibration(#[from] CalibrationError),
}

/// A single vane sample could not be taken. Non-fatal, the next read may succeed.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("failed to read ADC channel {channel}")]
    Adc {
        channel: u8,
        #[source]
        source: BoxError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CalibrationError {
    #[error("window period must be non-zero")]
    ZeroWindow,
    #[error("ADC resolution of {bits} bits is outside 1..=16")]
    ResolutionOutOfRange { bits: u8 },
    #[error("vane sample {sample} does not fit at {bits} bits")]
    SampleOverflow { sample: u32, bits: u8 },
}
