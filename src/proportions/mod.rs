// Topic proportions — per-document and per-time-slice normalization.

pub mod document;
pub mod time_slice;

pub use document::DocumentProportions;
pub use time_slice::{TimeSliceBuckets, TimeSliceProportions};

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Convert a part/total ratio into a percentage rounded to 2 decimals.
pub(crate) fn percent(part: f64, total: f64) -> f64 {
    round_to(part / total * 100.0, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(33.333333, 2), 33.33);
        assert_eq!(round_to(0.12346, 4), 0.1235);
        assert_eq!(round_to(-2.5, 0), -3.0);
    }
}
