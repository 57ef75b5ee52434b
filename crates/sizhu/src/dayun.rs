//! DaYun (大運): ten-year fortune cycles stepped from the month pillar.

use chrono::{Datelike, Months, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};
use crate::ganzhi::GanZhi;
use crate::qiyun::FortuneDirection;

pub const YEARS_PER_DAYUN: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaYun {
    pub pillar: GanZhi,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub start_age: i32,
    pub end_age: i32,
}

impl DaYun {
    /// Half-open: the start instant belongs to this cycle, the end instant to the next.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start_date <= instant && instant < self.end_date
    }
}

/// Whole years from `birth` to `at`.
pub fn age_at(birth: NaiveDateTime, at: NaiveDateTime) -> i32 {
    let mut age = at.year() - birth.year();
    if (at.month(), at.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

fn add_years(instant: NaiveDateTime, years: u32) -> Result<NaiveDateTime> {
    years
        .checked_mul(12)
        .and_then(|months| instant.checked_add_months(Months::new(months)))
        .ok_or_else(|| CalcError::DateOutOfRange(format!("{instant} + {years} years")))
}

/// `count` cycles; the first is the month pillar's neighbour in `direction`
/// and starts on the QiYun date.
pub fn generate_dayun(
    month_pillar: GanZhi,
    birth: NaiveDateTime,
    qiyun_date: NaiveDateTime,
    direction: FortuneDirection,
    count: usize,
) -> Result<Vec<DaYun>> {
    let qiyun_age = age_at(birth, qiyun_date);

    (0..count)
        .map(|i| {
            let offset = u32::try_from(i)
                .ok()
                .and_then(|i| i.checked_mul(YEARS_PER_DAYUN))
                .ok_or_else(|| CalcError::DateOutOfRange(format!("DaYun cycle {i}")))?;
            let start_date = add_years(qiyun_date, offset)?;
            let end_date = add_years(start_date, YEARS_PER_DAYUN)?;
            let start_age = qiyun_age + offset as i32;
            Ok(DaYun {
                pillar: month_pillar.offset(direction.step() * (i as i64 + 1)),
                start_date,
                end_date,
                start_age,
                end_age: start_age + YEARS_PER_DAYUN as i32,
            })
        })
        .collect()
}

pub fn current_dayun(cycles: &[DaYun], query: NaiveDateTime) -> Option<&DaYun> {
    cycles.iter().find(|d| d.contains(query))
}
