use super::calibration::{CalibrationParams, DEGREES_PER_SECTOR, SECTORS};

/// Index of the calibration entry closest to `sample`. The first of several
/// equally close entries wins.
pub fn nearest_sector(sample: i32, vane_samples: &[u32; SECTORS]) -> usize {
    let mut closest_index = 0;
    let mut closest_difference = u64::MAX;

    for (index, &expected) in vane_samples.iter().enumerate() {
        let difference = (expected as i64 - sample as i64).unsigned_abs();
        if difference < closest_difference {
            closest_difference = difference;
            closest_index = index;
        }
    }

    closest_index
}

/// Wind direction in degrees for a raw vane sample.
pub fn classify(sample: i32, params: &CalibrationParams) -> f32 {
    nearest_sector(sample, &params.vane_samples) as f32 * DEGREES_PER_SECTOR
}
