//! Closed-form pillar rules.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::error::Result;
use crate::ganzhi::cycle::recover_pillar;
use crate::ganzhi::{index_to_pair, GanZhi, Stem};
use crate::time::julian::date_to_julian_day;

/// JDN of a 甲子 day (1992-08-16).
pub const DAY_ANCHOR_JDN: i64 = 2_448_851;

/// Branch index of the first solar month (寅).
const YIN_MONTH_BRANCH: i64 = 2;

/// BaZi year of an instant: the calendar year, or the one before if 立春 has not arrived.
pub fn effective_year(instant: NaiveDateTime, lichun: NaiveDateTime) -> i32 {
    if instant >= lichun {
        instant.year()
    } else {
        instant.year() - 1
    }
}

/// Year pillar; 4 CE is index 0 (甲子).
pub fn year_pillar(instant: NaiveDateTime, lichun: NaiveDateTime) -> GanZhi {
    index_to_pair(effective_year(instant, lichun) as i64 - 4)
}

/// Five Tigers: the 寅 month of a year with stem s has stem 2s + 2.
pub fn month_pillar(year_stem: Stem, month_branch_index: usize) -> Result<GanZhi> {
    let yin_stem = 2 * year_stem.index() as i64 + 2;
    let month_offset = (month_branch_index as i64 - YIN_MONTH_BRANCH).rem_euclid(12);
    recover_pillar(yin_stem + month_offset, month_branch_index as i64)
}

pub fn day_pillar(date: NaiveDate) -> GanZhi {
    index_to_pair(date_to_julian_day(date) - DAY_ANCHOR_JDN)
}

/// Two-hour branch for minutes past midnight; 23:00–00:59 is 子.
pub fn hour_branch_index(minutes_of_day: u32) -> usize {
    if minutes_of_day >= 23 * 60 || minutes_of_day < 60 {
        0
    } else {
        (((minutes_of_day + 60) / 120) % 12) as usize
    }
}

/// Five Rats: the 子 hour of a day with stem s has stem 2s.
pub fn hour_pillar(solar_time: NaiveDateTime, day_stem: Stem) -> Result<GanZhi> {
    let minutes = solar_time.hour() * 60 + solar_time.minute();
    let branch = hour_branch_index(minutes) as i64;
    recover_pillar(2 * day_stem.index() as i64 + branch, branch)
}
