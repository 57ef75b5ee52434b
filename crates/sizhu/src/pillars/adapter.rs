//! Pillars taken verbatim from an external BaZi routine.

use crate::error::Result;
use crate::pillars::{FourPillars, PillarInstant, PillarStrategy};
use crate::solar_terms::PillarOracle;

pub struct OraclePillars<'a> {
    oracle: &'a dyn PillarOracle,
}

impl<'a> OraclePillars<'a> {
    pub fn new(oracle: &'a dyn PillarOracle) -> Self {
        Self { oracle }
    }
}

impl PillarStrategy for OraclePillars<'_> {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn four_pillars(&self, instant: &PillarInstant) -> Result<FourPillars> {
        let by_clock = FourPillars::from_strings(&self.oracle.four_pillar_strings(instant.clock)?)?;
        if instant.solar == instant.clock {
            return Ok(by_clock);
        }
        let by_solar = FourPillars::from_strings(&self.oracle.four_pillar_strings(instant.solar)?)?;

        Ok(FourPillars {
            year: by_clock.year,
            month: by_clock.month,
            day: by_solar.day,
            hour: by_solar.hour,
        })
    }
}
