//! QiYun (起運): when the decade fortune cycles begin.
//!
//! Three days of clock distance between birth and the nearest Jie term
//! count as one year of life, i.e. one day counts as 120.

use chrono::{Datelike, Duration, NaiveDateTime};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::birth::Gender;
use crate::error::{CalcError, Result};
use crate::ganzhi::Stem;
use crate::solar_terms::CalendarOracle;

const MINUTES_PER_DAY: f64 = 1_440.0;
const REAL_DAYS_PER_METABOLIC_DAY: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FortuneDirection {
    Forward,
    Backward,
}

impl FortuneDirection {
    /// Step applied to a Jiazi index per decade cycle.
    pub fn step(self) -> i64 {
        match self {
            FortuneDirection::Forward => 1,
            FortuneDirection::Backward => -1,
        }
    }
}

/// Forward for Yang-year men and Yin-year women, backward otherwise.
pub fn fortune_direction(year_stem: Stem, gender: Gender) -> FortuneDirection {
    match (gender, year_stem.is_yang()) {
        (Gender::Male, true) | (Gender::Female, false) => FortuneDirection::Forward,
        _ => FortuneDirection::Backward,
    }
}

/// First Jie strictly after `birth` (forward) or last strictly before it (backward).
///
/// Searches the birth year together with the following or preceding year.
pub fn nearest_jie_term(
    oracle: &dyn CalendarOracle,
    birth: NaiveDateTime,
    direction: FortuneDirection,
) -> Result<NaiveDateTime> {
    let year = birth.year();
    let years = match direction {
        FortuneDirection::Forward => [year, year + 1],
        FortuneDirection::Backward => [year - 1, year],
    };

    let mut jie = Vec::with_capacity(24);
    for y in years {
        jie.extend(oracle.jie_terms(y)?);
    }
    jie.sort();

    let found = match direction {
        FortuneDirection::Forward => jie.into_iter().find(|t| *t > birth),
        FortuneDirection::Backward => jie.into_iter().rev().find(|t| *t < birth),
    };
    found.ok_or(CalcError::NoJieFound {
        instant: birth,
        direction: match direction {
            FortuneDirection::Forward => "after",
            FortuneDirection::Backward => "before",
        },
    })
}

/// Absolute distance in minutes, millisecond resolution.
pub fn minutes_between(a: NaiveDateTime, b: NaiveDateTime) -> f64 {
    (a - b).num_milliseconds().abs() as f64 / 60_000.0
}

/// Detailed QiYun result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QiYun {
    pub direction: FortuneDirection,
    pub target_jie: NaiveDateTime,
    pub diff_minutes: f64,
    pub qiyun_date: NaiveDateTime,
    pub span: MetabolicSpan,
}

/// Compute direction, target Jie and the QiYun date in one pass.
///
/// `birth_date` is the civil birth instant the offset is added to;
/// `true_solar_birth` is the instant measured against the Jie term.
pub fn qi_yun(
    oracle: &dyn CalendarOracle,
    birth_date: NaiveDateTime,
    year_stem: Stem,
    gender: Gender,
    true_solar_birth: NaiveDateTime,
) -> Result<QiYun> {
    let direction = fortune_direction(year_stem, gender);
    let target_jie = nearest_jie_term(oracle, true_solar_birth, direction)?;

    let diff_minutes = minutes_between(target_jie, true_solar_birth);
    let metabolic_days = diff_minutes / MINUTES_PER_DAY;
    let real_days = metabolic_days * REAL_DAYS_PER_METABOLIC_DAY;

    // whole days only; a fractional remainder is dropped
    let qiyun_date = birth_date + Duration::days(real_days.trunc() as i64);
    debug!(
        "qiyun {:?}: jie {} is {:.1} min away -> {:.2} days -> {}",
        direction, target_jie, diff_minutes, real_days, qiyun_date
    );

    Ok(QiYun {
        direction,
        target_jie,
        diff_minutes,
        qiyun_date,
        span: convert_metabolic_days(diff_minutes),
    })
}

pub fn qi_yun_date(
    oracle: &dyn CalendarOracle,
    birth_date: NaiveDateTime,
    year_stem: Stem,
    gender: Gender,
    true_solar_birth: NaiveDateTime,
) -> Result<NaiveDateTime> {
    qi_yun(oracle, birth_date, year_stem, gender, true_solar_birth).map(|q| q.qiyun_date)
}

/// Display breakdown of a QiYun offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetabolicSpan {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

/// Split a minute distance into years (365 d), months (30 d) and days of life.
pub fn convert_metabolic_days(diff_minutes: f64) -> MetabolicSpan {
    let total_real_days = diff_minutes / MINUTES_PER_DAY * REAL_DAYS_PER_METABOLIC_DAY;
    let years = (total_real_days / 365.0).floor();
    let remaining = total_real_days % 365.0;
    let months = (remaining / 30.0).floor();
    let days = (remaining % 30.0).floor();

    MetabolicSpan {
        years: years as u32,
        months: months as u32,
        days: days as u32,
    }
}
