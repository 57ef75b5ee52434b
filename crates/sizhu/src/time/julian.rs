//! Julian Day Number ↔ Gregorian calendar conversion (Meeus, ch. 7).

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::{CalcError, Result};

const MS_PER_DAY: i64 = 86_400_000;

/// Julian Day Number of a Gregorian calendar date (the JDN of that date's noon).
///
/// January and February count as months 13 and 14 of the previous year.
pub fn date_to_julian_day(date: NaiveDate) -> i64 {
    let mut year = date.year() as f64;
    let mut month = date.month() as f64;
    let day = date.day() as f64;

    if month <= 2.0 {
        year -= 1.0;
        month += 12.0;
    }

    let a = (year / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    // Julian Date of the preceding midnight, which ends in .5
    let jd = (365.25 * (year + 4716.0)).floor() + (30.6001 * (month + 1.0)).floor() + day + b
        - 1524.5;

    (jd + 0.5).floor() as i64
}

/// Inverse of [`date_to_julian_day`]; exact for every Gregorian-era date.
pub fn julian_day_to_date(jdn: i64) -> Result<NaiveDate> {
    let z = jdn as f64;

    let a = if jdn >= 2_299_161 {
        let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
        z + 1.0 + alpha - (alpha / 4.0).floor()
    } else {
        z
    };

    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor();
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

    NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
        .ok_or_else(|| CalcError::DateOutOfRange(format!("JDN {jdn}")))
}

/// Fractional Julian Date of a timestamp read on the UT scale.
pub fn julian_date(dt: NaiveDateTime) -> f64 {
    let jdn = date_to_julian_day(dt.date()) as f64;
    let ms_of_day = dt.num_seconds_from_midnight() as f64 * 1000.0
        + (dt.nanosecond() / 1_000_000) as f64;
    jdn - 0.5 + ms_of_day / MS_PER_DAY as f64
}

/// Inverse of [`julian_date`], rounded to the millisecond.
pub fn datetime_from_julian_date(jd: f64) -> Result<NaiveDateTime> {
    if !jd.is_finite() {
        return Err(CalcError::DateOutOfRange(format!("Julian Date {jd}")));
    }
    let total_ms = ((jd + 0.5) * MS_PER_DAY as f64).round() as i64;
    let jdn = total_ms.div_euclid(MS_PER_DAY);
    let ms_of_day = total_ms.rem_euclid(MS_PER_DAY);

    let date = julian_day_to_date(jdn)?;
    let secs = (ms_of_day / 1000) as u32;
    let nanos = ((ms_of_day % 1000) * 1_000_000) as u32;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)
        .ok_or_else(|| CalcError::DateOutOfRange(format!("Julian Date {jd}")))?;
    Ok(date.and_time(time))
}
