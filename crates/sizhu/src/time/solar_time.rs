//! True solar time: clock time corrected for longitude and the equation of time.

use chrono::{Datelike, Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Meridian of UTC+8 civil time.
pub const DEFAULT_STANDARD_MERIDIAN: f64 = 120.0;

/// Minutes of clock time per degree of longitude.
const MINUTES_PER_DEGREE: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrueSolarTime {
    pub corrected_time: NaiveDateTime,
    /// (longitude − standard meridian) × 4, in minutes.
    pub longitude_correction: f64,
    /// Equation-of-time term, in minutes.
    pub eot_correction: f64,
    pub total_correction: f64,
}

/// Equation of time for the day containing `timestamp`, in minutes.
///
/// B = (360/365)·(n − 81)°, E = B + 9.87·sin 2B − 7.53·cos B − 1.5·sin B,
/// evaluated in seconds and returned in minutes.
pub fn equation_of_time(timestamp: NaiveDateTime) -> f64 {
    let day_of_year = timestamp.ordinal() as f64;
    let b = (360.0 / 365.0) * (day_of_year - 81.0);
    let rad = b.to_radians();

    let seconds = b + 9.87 * (2.0 * rad).sin() - 7.53 * rad.cos() - 1.5 * rad.sin();
    seconds / 60.0
}

/// Shift a clock reading to true solar time at `longitude` (east positive).
pub fn true_solar_time(
    clock_time: NaiveDateTime,
    longitude: f64,
    standard_meridian: f64,
) -> TrueSolarTime {
    let longitude_correction = (longitude - standard_meridian) * MINUTES_PER_DEGREE;
    let eot_correction = equation_of_time(clock_time);
    let total_correction = longitude_correction + eot_correction;

    let offset_ms = (total_correction * 60_000.0).round() as i64;
    let corrected_time = clock_time + Duration::milliseconds(offset_ms);

    TrueSolarTime {
        corrected_time,
        longitude_correction,
        eot_correction,
        total_correction,
    }
}
