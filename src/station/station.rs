use std::sync::Arc;

use tracing::{debug, info, warn};

use super::anemometer::{Rollover, WindowedPulseCounter};
use super::calibration::{CalibrationParams, CalibrationTable, DEFAULT_RESOLUTION_BITS};
use super::vane;
use crate::error::{CalibrationError, InitError, ReadError};
use crate::hal::{Adc, EdgeSource, MonotonicClock};

/// Returned by `get_wind_direction` when the vane could not be read.
pub const WIND_DIRECTION_UNAVAILABLE: f32 = -1.0;

/// Wind vane and anemometer behind one handle.
///
/// The anemometer pin's edge handler holds its own reference to the pulse
/// counter, so any number of stations can run side by side.
pub struct SensorStation<A, G, C> {
    adc: A,
    adc_channel: u8,
    // keeps the edge subscription alive
    _edges: G,
    calibration: CalibrationTable,
    counter: Arc<WindowedPulseCounter<C>>,
}

impl<A, G, C> SensorStation<A, G, C>
where
    A: Adc,
    G: EdgeSource,
    C: MonotonicClock + 'static,
{
    /// Bring up a station with the default calibration.
    pub fn initialise(
        adc: A,
        adc_channel: u8,
        edges: G,
        gpio_pin: u8,
        clock: C,
    ) -> Result<Self, InitError> {
        Self::initialise_with(
            adc,
            adc_channel,
            edges,
            gpio_pin,
            clock,
            CalibrationParams::default(),
        )
    }

    /// Bring up a station. `calibration` vane samples are taken to be at
    /// the default 10 bit resolution and rescaled to whatever the ADC
    /// reports.
    pub fn initialise_with(
        mut adc: A,
        adc_channel: u8,
        mut edges: G,
        gpio_pin: u8,
        clock: C,
        calibration: CalibrationParams,
    ) -> Result<Self, InitError> {
        let calibration = CalibrationTable::new(calibration, DEFAULT_RESOLUTION_BITS)?;
        let adc_bits = adc.resolution_bits();
        if adc_bits != DEFAULT_RESOLUTION_BITS {
            calibration.rescale(adc_bits)?;
            debug!(
                from = DEFAULT_RESOLUTION_BITS,
                to = adc_bits,
                "vane calibration rescaled to ADC resolution"
            );
        }

        adc.setup_channel(adc_channel)
            .map_err(|e| InitError::AdcChannel {
                channel: adc_channel,
                source: Box::new(e),
            })?;

        let params = calibration.get();
        let counter = Arc::new(WindowedPulseCounter::new(
            clock,
            params.window_period_ms,
            params.kph_per_count_per_sec,
        ));
        let handle = Arc::clone(&counter);
        edges
            .subscribe(gpio_pin, Box::new(move || handle.on_pulse()))
            .map_err(|e| InitError::EdgeSubscribe {
                pin: gpio_pin,
                source: Box::new(e),
            })?;

        info!(
            adc_channel,
            gpio_pin,
            resolution_bits = adc_bits,
            "wind station initialised"
        );

        Ok(SensorStation {
            adc,
            adc_channel,
            _edges: edges,
            calibration,
            counter,
        })
    }

    /// Wind speed in km/h over the last completed window.
    pub fn get_wind_speed(&self) -> f32 {
        let reading = self.counter.poll();
        match reading.rollover {
            Rollover::Open => {}
            Rollover::Completed => debug!(pulses = reading.previous_count, "window completed"),
            Rollover::Stale => debug!("no pulses for two windows, counts cleared"),
        }
        reading.kph()
    }

    pub fn read_vane_raw(&mut self) -> Result<i32, ReadError> {
        self.adc
            .read(self.adc_channel)
            .map_err(|e| ReadError::Adc {
                channel: self.adc_channel,
                source: Box::new(e),
            })
    }

    /// Wind direction in degrees, a multiple of 22.5.
    pub fn try_wind_direction(&mut self) -> Result<f32, ReadError> {
        let sample = self.read_vane_raw()?;
        Ok(vane::classify(sample, &self.calibration.get()))
    }

    /// Wind direction in degrees, or `WIND_DIRECTION_UNAVAILABLE` if the
    /// vane could not be read.
    pub fn get_wind_direction(&mut self) -> f32 {
        match self.try_wind_direction() {
            Ok(degrees) => degrees,
            Err(e) => {
                warn!(error = %e, "wind vane read failed");
                WIND_DIRECTION_UNAVAILABLE
            }
        }
    }

    pub fn get_calibration(&self) -> CalibrationParams {
        self.calibration.get()
    }

    pub fn set_calibration(&self, params: CalibrationParams) -> Result<(), CalibrationError> {
        self.calibration.set(params)?;
        self.counter
            .set_rate(params.window_period_ms, params.kph_per_count_per_sec);
        info!(
            kph_per_count_per_sec = params.kph_per_count_per_sec,
            window_period_ms = params.window_period_ms,
            "calibration replaced"
        );
        Ok(())
    }

    pub fn set_resolution_bits(&self, bits: u8) -> Result<(), CalibrationError> {
        let from = self.calibration.resolution_bits();
        self.calibration.rescale(bits)?;
        info!(from, to = bits, "vane calibration rescaled");
        Ok(())
    }

    pub fn resolution_bits(&self) -> u8 {
        self.calibration.resolution_bits()
    }

    pub fn reset_window(&self) {
        self.counter.reset();
        info!("wind speed window reset");
    }

    pub fn get_raw_count(&self) -> u32 {
        self.counter.get_raw_count()
    }
}
