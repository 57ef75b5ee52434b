//! Four Pillars derivation behind a common strategy trait.

pub mod adapter;
pub mod analytic;
pub mod rules;

pub use adapter::OraclePillars;
pub use analytic::AnalyticPillars;
pub use rules::{
    day_pillar, effective_year, hour_branch_index, hour_pillar, month_pillar, year_pillar,
    DAY_ANCHOR_JDN,
};

use chrono::NaiveDateTime;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};
use crate::ganzhi::GanZhi;

pub const PILLAR_NAMES: [&str; 4] = ["year", "month", "day", "hour"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PillarPosition {
    Year,
    Month,
    Day,
    Hour,
}

impl PillarPosition {
    pub const ALL: [PillarPosition; 4] = [
        PillarPosition::Year,
        PillarPosition::Month,
        PillarPosition::Day,
        PillarPosition::Hour,
    ];

    pub fn name(self) -> &'static str {
        PILLAR_NAMES[self as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FourPillars {
    pub year: GanZhi,
    pub month: GanZhi,
    pub day: GanZhi,
    pub hour: GanZhi,
}

impl FourPillars {
    pub fn to_array(&self) -> [GanZhi; 4] {
        [self.year, self.month, self.day, self.hour]
    }

    /// Pillars paired with their position, year first.
    pub fn positioned(&self) -> impl Iterator<Item = (PillarPosition, GanZhi)> {
        PillarPosition::ALL.into_iter().zip(self.to_array())
    }

    /// Parse year, month, day and hour strings such as `["壬申", "己酉", "己丑", "丁卯"]`.
    pub fn from_strings(pillars: &[String; 4]) -> Result<FourPillars> {
        Ok(FourPillars {
            year: GanZhi::parse(&pillars[0])?,
            month: GanZhi::parse(&pillars[1])?,
            day: GanZhi::parse(&pillars[2])?,
            hour: GanZhi::parse(&pillars[3])?,
        })
    }
}

/// The instant a chart is cast for.
///
/// Year and month are decided on the civil `clock` reading, since solar-term
/// instants are civil. Day and hour are decided on the true-solar reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarInstant {
    pub clock: NaiveDateTime,
    pub solar: NaiveDateTime,
}

impl PillarInstant {
    pub fn new(clock: NaiveDateTime, solar: NaiveDateTime) -> Self {
        Self { clock, solar }
    }

    /// Both readings equal; no true-solar correction.
    pub fn uncorrected(instant: NaiveDateTime) -> Self {
        Self::new(instant, instant)
    }
}

/// A way of deriving the four pillars.
pub trait PillarStrategy {
    fn name(&self) -> &'static str;

    fn four_pillars(&self, instant: &PillarInstant) -> Result<FourPillars>;
}

/// Run two strategies on the same instant and require identical pillars.
///
/// Returns the agreed chart, or [`CalcError::PillarMismatch`] naming the
/// first pillar that differs.
pub fn cross_validate(
    primary: &dyn PillarStrategy,
    reference: &dyn PillarStrategy,
    instant: &PillarInstant,
) -> Result<FourPillars> {
    let ours = primary.four_pillars(instant)?;
    let theirs = reference.four_pillars(instant)?;
    debug!(
        "cross-validate {} vs {} at {}: {:?} / {:?}",
        primary.name(),
        reference.name(),
        instant.clock,
        ours,
        theirs
    );

    for ((name, a), b) in PILLAR_NAMES
        .into_iter()
        .zip(ours.to_array())
        .zip(theirs.to_array())
    {
        if a != b {
            return Err(CalcError::PillarMismatch {
                instant: instant.clock,
                pillar: name,
                analytic: a.to_string(),
                oracle: b.to_string(),
            });
        }
    }
    Ok(ours)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct Fixed(&'static [&'static str; 4]);

    impl PillarStrategy for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn four_pillars(&self, _instant: &PillarInstant) -> Result<FourPillars> {
            FourPillars::from_strings(&(*self.0).map(String::from))
        }
    }

    fn instant() -> PillarInstant {
        PillarInstant::uncorrected(
            NaiveDate::from_ymd_opt(1992, 9, 10)
                .unwrap()
                .and_hms_opt(5, 56, 0)
                .unwrap(),
        )
    }

    #[test]
    fn agreement_returns_the_chart() {
        let a = Fixed(&["壬申", "己酉", "己丑", "丁卯"]);
        let b = Fixed(&["壬申", "己酉", "己丑", "丁卯"]);
        let chart = cross_validate(&a, &b, &instant()).unwrap();
        assert_eq!(chart.day.to_string(), "己丑");
    }

    #[test]
    fn first_difference_is_reported() {
        let a = Fixed(&["壬申", "己酉", "己丑", "丁卯"]);
        let b = Fixed(&["壬申", "己酉", "癸酉", "乙卯"]);
        match cross_validate(&a, &b, &instant()) {
            Err(CalcError::PillarMismatch {
                pillar,
                analytic,
                oracle,
                ..
            }) => {
                assert_eq!(pillar, "day");
                assert_eq!(analytic, "己丑");
                assert_eq!(oracle, "癸酉");
            }
            other => panic!("expected mismatch, got {other:?}"),
        }
    }

    #[test]
    fn malformed_strings_are_rejected() {
        let bad = ["壬申", "己酉", "甲丑", "丁卯"].map(String::from);
        assert!(matches!(
            FourPillars::from_strings(&bad),
            Err(CalcError::ParityMismatch { .. })
        ));
    }
}
