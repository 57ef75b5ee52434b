//! Apparent geocentric longitude of the Sun (Meeus, ch. 25, low precision).
//!
//! Good to about 0.01°, which places a solar-term crossing within a quarter
//! hour of the high-precision ephemeris.

use chrono::NaiveDateTime;

use crate::time::julian::julian_date;

const J2000: f64 = 2_451_545.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const MINUTES_PER_DAY: f64 = 1_440.0;

/// Normalize an angle into [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    let d = degrees.rem_euclid(360.0);
    if d >= 360.0 {
        0.0
    } else {
        d
    }
}

/// Signed difference `a − b` folded into (−180, 180].
pub fn angle_difference(a: f64, b: f64) -> f64 {
    let d = normalize_degrees(a - b);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// TT − UT in seconds, long-term parabola around 1820.
pub fn delta_t_seconds(decimal_year: f64) -> f64 {
    let u = (decimal_year - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u
}

/// Apparent solar longitude in degrees for a Julian Date on the UT scale.
pub fn apparent_solar_longitude(jd_ut: f64) -> f64 {
    let decimal_year = 2000.0 + (jd_ut - J2000) / 365.25;
    let jde = jd_ut + delta_t_seconds(decimal_year) / SECONDS_PER_DAY;
    let t = (jde - J2000) / DAYS_PER_CENTURY;

    let l0 = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let m = (357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t).to_radians();

    let center = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();

    let true_longitude = l0 + center;

    // nutation and aberration
    let omega = (125.04 - 1_934.136 * t).to_radians();
    normalize_degrees(true_longitude - 0.005_69 - 0.004_78 * omega.sin())
}

/// Julian Date (UT) of a civil timestamp in a zone `utc_offset_minutes` east of Greenwich.
pub fn civil_to_jd_ut(civil: NaiveDateTime, utc_offset_minutes: i32) -> f64 {
    julian_date(civil) - utc_offset_minutes as f64 / MINUTES_PER_DAY
}

/// Apparent solar longitude at a civil timestamp.
pub fn solar_longitude_at(civil: NaiveDateTime, utc_offset_minutes: i32) -> f64 {
    apparent_solar_longitude(civil_to_jd_ut(civil, utc_offset_minutes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn meeus_example_25a() {
        // 1992-10-13 0h TD; the UT correction moves the result by a few thousandths
        let jd_ut = 2_448_908.5 - delta_t_seconds(1992.78) / SECONDS_PER_DAY;
        let lon = apparent_solar_longitude(jd_ut);
        assert!((lon - 199.908_94).abs() < 0.01, "{lon}");
    }

    #[test]
    fn march_equinox_2000_is_near_zero() {
        // 2000-03-20 07:35 UT
        let civil = NaiveDate::from_ymd_opt(2000, 3, 20)
            .unwrap()
            .and_hms_opt(15, 35, 0)
            .unwrap();
        let lon = solar_longitude_at(civil, 480);
        assert!(angle_difference(lon, 0.0).abs() < 0.02, "{lon}");
    }

    #[test]
    fn angle_helpers_wrap() {
        assert_eq!(normalize_degrees(-45.0), 315.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert!((angle_difference(1.0, 359.0) - 2.0).abs() < 1e-12);
        assert!((angle_difference(359.0, 1.0) + 2.0).abs() < 1e-12);
    }
}
