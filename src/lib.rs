//! Wind speed and direction from a reed switch anemometer and a
//! potentiometer wind vane.
//!
//! The vane is sampled through an ADC and matched against a 16 sector
//! calibration table. Anemometer edges are counted in fixed windows from the
//! GPIO interrupt, and the count of the last completed window gives the speed.

pub mod error;
pub mod hal;
pub mod station;

// Re-export commonly used types
pub use error::{CalibrationError, InitError, ReadError};
pub use station::{
    CalibrationParams, CompassPoint, SensorStation, WindSpeed, WIND_DIRECTION_UNAVAILABLE,
};

#[cfg(test)]
pub(crate) mod mocks;
