mod cli;
mod log;

use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use tracing::{debug, info};
use wind_station::hal::rpi::{GpioEdges, Mcp3008};
use wind_station::hal::{raw_to_millivolts, SystemClock};
use wind_station::{CalibrationParams, CompassPoint, SensorStation, WindSpeed};

fn main() -> Result<()> {
    let cli = Cli::parse();
    log::init_logging(cli.verbose)?;

    let adc = Mcp3008::new(cli.spi_bus.into(), cli.chip_select.into(), cli.spi_clock_hz)?;
    let edges = GpioEdges::new()?;
    let calibration = CalibrationParams {
        kph_per_count_per_sec: cli.kph_per_count_per_sec,
        window_period_ms: cli.window_ms,
        ..CalibrationParams::default()
    };

    let mut station = SensorStation::initialise_with(
        adc,
        cli.vane_channel,
        edges,
        cli.anemometer_pin,
        SystemClock::new(),
        calibration,
    )?;

    loop {
        let speed = WindSpeed::new(station.get_wind_speed());
        let direction = station.get_wind_direction();

        match CompassPoint::from_degrees(direction) {
            Some(point) => info!(
                kph = speed.km_per_hour(),
                m_s = speed.meters_per_sec(),
                degrees = direction,
                compass = point.abbreviation(),
                "wind"
            ),
            None => info!(
                kph = speed.km_per_hour(),
                m_s = speed.meters_per_sec(),
                "wind, direction unavailable"
            ),
        }

        if cli.verbose {
            if let Ok(raw) = station.read_vane_raw() {
                let mv = raw_to_millivolts(raw, station.resolution_bits(), cli.vref_mv);
                debug!(raw, mv, pulses = station.get_raw_count(), "vane");
            }
        }

        thread::sleep(Duration::from_millis(cli.interval_ms));
    }
}
