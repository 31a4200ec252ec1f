pub mod anemometer;
pub mod calibration;
pub mod station;
pub mod vane;

pub use anemometer::{WindowState, WindowedPulseCounter};
pub use calibration::{CalibrationParams, CalibrationTable};
pub use station::{SensorStation, WIND_DIRECTION_UNAVAILABLE};

use calibration::{DEGREES_PER_SECTOR, SECTORS};

/// 16 point compass rose, one point per vane sector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompassPoint {
    North,
    NorthNorthEast,
    NorthEast,
    EastNorthEast,
    East,
    EastSouthEast,
    SouthEast,
    SouthSouthEast,
    South,
    SouthSouthWest,
    SouthWest,
    WestSouthWest,
    West,
    WestNorthWest,
    NorthWest,
    NorthNorthWest,
}

impl CompassPoint {
    const ALL: [CompassPoint; SECTORS] = [
        CompassPoint::North,
        CompassPoint::NorthNorthEast,
        CompassPoint::NorthEast,
        CompassPoint::EastNorthEast,
        CompassPoint::East,
        CompassPoint::EastSouthEast,
        CompassPoint::SouthEast,
        CompassPoint::SouthSouthEast,
        CompassPoint::South,
        CompassPoint::SouthSouthWest,
        CompassPoint::SouthWest,
        CompassPoint::WestSouthWest,
        CompassPoint::West,
        CompassPoint::WestNorthWest,
        CompassPoint::NorthWest,
        CompassPoint::NorthNorthWest,
    ];

    /// Nearest point to `degrees`. `None` for the unavailable sentinel or
    /// anything else that is not a heading.
    pub fn from_degrees(degrees: f32) -> Option<CompassPoint> {
        if !degrees.is_finite() || degrees < 0.0 {
            return None;
        }
        let index = (degrees / DEGREES_PER_SECTOR).round() as usize % SECTORS;
        Some(Self::ALL[index])
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            CompassPoint::North => "N",
            CompassPoint::NorthNorthEast => "NNE",
            CompassPoint::NorthEast => "NE",
            CompassPoint::EastNorthEast => "ENE",
            CompassPoint::East => "E",
            CompassPoint::EastSouthEast => "ESE",
            CompassPoint::SouthEast => "SE",
            CompassPoint::SouthSouthEast => "SSE",
            CompassPoint::South => "S",
            CompassPoint::SouthSouthWest => "SSW",
            CompassPoint::SouthWest => "SW",
            CompassPoint::WestSouthWest => "WSW",
            CompassPoint::West => "W",
            CompassPoint::WestNorthWest => "WNW",
            CompassPoint::NorthWest => "NW",
            CompassPoint::NorthNorthWest => "NNW",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindSpeed(f32);
impl WindSpeed {
    pub fn new(km_per_hour: f32) -> WindSpeed {
        WindSpeed(km_per_hour)
    }

    pub fn km_per_hour(&self) -> f32 {
        self.0
    }
    pub fn meters_per_sec(&self) -> f32 {
        self.0 / 3.6
    }
}
