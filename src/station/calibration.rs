use std::sync::{Arc, PoisonError, RwLock};

use crate::error::CalibrationError;

pub const SECTORS: usize = 16;
pub const DEGREES_PER_SECTOR: f32 = 22.5;

pub const DEFAULT_VANE_SAMPLES: [u32; SECTORS] = [
    0, 100, 200, 300, 400, 500, 600, 700, 800, 900, 1000, 1100, 1200, 1300, 1400, 1500,
];
pub const DEFAULT_KPH_PER_COUNT_PER_SEC: f32 = 2.4;
pub const DEFAULT_WINDOW_PERIOD_MS: u32 = 1000;
pub const DEFAULT_RESOLUTION_BITS: u8 = 10;

const MAX_RESOLUTION_BITS: u8 = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationParams {
    /// Expected raw vane reading for sector `i`, i.e. `i * 22.5` degrees.
    pub vane_samples: [u32; SECTORS],
    pub kph_per_count_per_sec: f32,
    pub window_period_ms: u32,
}

impl Default for CalibrationParams {
    fn default() -> Self {
        CalibrationParams {
            vane_samples: DEFAULT_VANE_SAMPLES,
            kph_per_count_per_sec: DEFAULT_KPH_PER_COUNT_PER_SEC,
            window_period_ms: DEFAULT_WINDOW_PERIOD_MS,
        }
    }
}

impl CalibrationParams {
    fn validate(&self) -> Result<(), CalibrationError> {
        if self.window_period_ms == 0 {
            return Err(CalibrationError::ZeroWindow);
        }
        Ok(())
    }
}

#[derive(Debug)]
struct Snapshot {
    params: CalibrationParams,
    resolution_bits: u8,
}

/// Calibration shared between the vane reader and whoever tunes it.
///
/// Every change builds a complete new snapshot and swaps it in, so a reader
/// holds either the old table or the new one, never a mix of both.
#[derive(Debug)]
pub struct CalibrationTable {
    current: RwLock<Arc<Snapshot>>,
}

impl CalibrationTable {
    /// `resolution_bits` is the ADC resolution `params.vane_samples` are expressed in.
    pub fn new(params: CalibrationParams, resolution_bits: u8) -> Result<Self, CalibrationError> {
        params.validate()?;
        check_resolution(resolution_bits)?;
        Ok(CalibrationTable {
            current: RwLock::new(Arc::new(Snapshot {
                params,
                resolution_bits,
            })),
        })
    }

    fn snapshot(&self) -> Arc<Snapshot> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn get(&self) -> CalibrationParams {
        self.snapshot().params
    }

    pub fn resolution_bits(&self) -> u8 {
        self.snapshot().resolution_bits
    }

    /// Replace the whole table. Samples are taken to be at the current resolution.
    pub fn set(&self, params: CalibrationParams) -> Result<(), CalibrationError> {
        params.validate()?;
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let resolution_bits = guard.resolution_bits;
        *guard = Arc::new(Snapshot {
            params,
            resolution_bits,
        });
        Ok(())
    }

    /// Re-express every vane sample at `resolution_bits`. Coarsening drops the
    /// low bits for good.
    pub fn rescale(&self, resolution_bits: u8) -> Result<(), CalibrationError> {
        check_resolution(resolution_bits)?;
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let mut params = guard.params;
        params.vane_samples =
            shift_samples(params.vane_samples, guard.resolution_bits, resolution_bits)?;
        *guard = Arc::new(Snapshot {
            params,
            resolution_bits,
        });
        Ok(())
    }
}

fn check_resolution(bits: u8) -> Result<(), CalibrationError> {
    if (1..=MAX_RESOLUTION_BITS).contains(&bits) {
        Ok(())
    } else {
        Err(CalibrationError::ResolutionOutOfRange { bits })
    }
}

/// Shift samples taken at `from_bits` of resolution to `to_bits`.
pub fn shift_samples(
    samples: [u32; SECTORS],
    from_bits: u8,
    to_bits: u8,
) -> Result<[u32; SECTORS], CalibrationError> {
    let mut shifted = samples;
    for value in shifted.iter_mut() {
        if from_bits > to_bits {
            *value >>= from_bits - to_bits;
        } else {
            let shift = u32::from(to_bits - from_bits);
            if value.leading_zeros() < shift {
                return Err(CalibrationError::SampleOverflow {
                    sample: *value,
                    bits: to_bits,
                });
            }
            *value <<= shift;
        }
    }
    Ok(shifted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::station::vane;

    fn table() -> CalibrationTable {
        CalibrationTable::new(CalibrationParams::default(), DEFAULT_RESOLUTION_BITS).unwrap()
    }

    #[test]
    fn test_get_returns_defaults() {
        let params = table().get();
        assert_eq!(params.vane_samples, DEFAULT_VANE_SAMPLES);
        assert_eq!(params.kph_per_count_per_sec, 2.4);
        assert_eq!(params.window_period_ms, 1000);
    }

    #[test]
    fn test_set_replaces_whole_table() {
        let table = table();
        let mut params = table.get();
        params.vane_samples = [42; SECTORS];
        params.kph_per_count_per_sec = 3.0;
        params.window_period_ms = 500;
        table.set(params).unwrap();

        assert_eq!(table.get(), params);
        assert_eq!(table.resolution_bits(), DEFAULT_RESOLUTION_BITS);
    }

    #[test]
    fn test_set_rejects_zero_window() {
        let table = table();
        let params = CalibrationParams {
            window_period_ms: 0,
            ..CalibrationParams::default()
        };
        assert_eq!(table.set(params), Err(CalibrationError::ZeroWindow));
        assert_eq!(table.get(), CalibrationParams::default());
    }

    #[test]
    fn test_rescale_coarser_and_finer() {
        let table = table();

        table.rescale(8).unwrap();
        assert_eq!(table.resolution_bits(), 8);
        assert_eq!(table.get().vane_samples[1], 25); // 100 >> 2
        assert_eq!(table.get().vane_samples[15], 375); // 1500 >> 2

        table.rescale(12).unwrap();
        assert_eq!(table.get().vane_samples[1], 400); // 25 << 4
    }

    #[test]
    fn test_rescale_same_resolution_is_noop() {
        let table = table();
        table.rescale(DEFAULT_RESOLUTION_BITS).unwrap();
        assert_eq!(table.get().vane_samples, DEFAULT_VANE_SAMPLES);
    }

    #[test]
    fn test_rescale_preserves_other_params() {
        let table = table();
        table.rescale(12).unwrap();
        let params = table.get();
        assert_eq!(params.kph_per_count_per_sec, DEFAULT_KPH_PER_COUNT_PER_SEC);
        assert_eq!(params.window_period_ms, DEFAULT_WINDOW_PERIOD_MS);
    }

    #[test]
    fn test_rescale_round_trip_loses_at_most_one_shift() {
        let original: [u32; SECTORS] = [
            0, 1, 3, 7, 99, 101, 255, 256, 511, 513, 700, 777, 1000, 1021, 1022, 1023,
        ];
        let params = CalibrationParams {
            vane_samples: original,
            ..CalibrationParams::default()
        };
        let table = CalibrationTable::new(params, 10).unwrap();

        table.rescale(7).unwrap();
        table.rescale(10).unwrap();

        let lossy_step = 1 << (10 - 7);
        for (before, after) in original.iter().zip(table.get().vane_samples.iter()) {
            assert!(after <= before);
            assert!(before - after < lossy_step, "{before} -> {after}");
        }
    }

    #[test]
    fn test_rescale_finer_then_back_is_exact() {
        let table = table();
        table.rescale(14).unwrap();
        table.rescale(10).unwrap();
        assert_eq!(table.get().vane_samples, DEFAULT_VANE_SAMPLES);
    }

    #[test]
    fn test_rescale_rejects_out_of_range() {
        let table = table();
        assert_eq!(
            table.rescale(0),
            Err(CalibrationError::ResolutionOutOfRange { bits: 0 })
        );
        assert_eq!(
            table.rescale(17),
            Err(CalibrationError::ResolutionOutOfRange { bits: 17 })
        );
        assert_eq!(table.get().vane_samples, DEFAULT_VANE_SAMPLES);
    }

    #[test]
    fn test_widen_to_16_bits_keeps_sectors_apart() {
        let table = table();
        table.rescale(16).unwrap();

        let widened = table.get().vane_samples;
        assert_eq!(widened[11], 1100 << 6);
        assert_eq!(widened[15], 1500 << 6);
        assert!(widened.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(vane::classify(96_000, &table.get()), 337.5);

        table.rescale(10).unwrap();
        assert_eq!(table.get().vane_samples, DEFAULT_VANE_SAMPLES);
    }

    #[test]
    fn test_widen_overflow_leaves_table_unchanged() {
        let params = CalibrationParams {
            vane_samples: [u32::MAX >> 4; SECTORS],
            ..CalibrationParams::default()
        };
        let table = CalibrationTable::new(params, 10).unwrap();

        assert_eq!(
            table.rescale(16),
            Err(CalibrationError::SampleOverflow {
                sample: u32::MAX >> 4,
                bits: 16
            })
        );
        assert_eq!(table.get(), params);
        assert_eq!(table.resolution_bits(), 10);
    }
}
