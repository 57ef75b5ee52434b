//! First-principles pillars: LiChun from the calendar oracle, month from the
//! Sun's longitude, day from the JDN anchor, hour from true solar time.

use chrono::Datelike;
use log::debug;

use crate::error::Result;
use crate::pillars::rules::{day_pillar, hour_pillar, month_pillar, year_pillar};
use crate::pillars::{FourPillars, PillarInstant, PillarStrategy};
use crate::solar_terms::{lichun, month_branch_from_solar_longitude, CalendarOracle};
use crate::time::sun::solar_longitude_at;

pub struct AnalyticPillars<'a> {
    calendar: &'a dyn CalendarOracle,
    utc_offset_minutes: i32,
}

impl<'a> AnalyticPillars<'a> {
    pub fn new(calendar: &'a dyn CalendarOracle, utc_offset_minutes: i32) -> Self {
        Self {
            calendar,
            utc_offset_minutes,
        }
    }
}

impl PillarStrategy for AnalyticPillars<'_> {
    fn name(&self) -> &'static str {
        "analytic"
    }

    fn four_pillars(&self, instant: &PillarInstant) -> Result<FourPillars> {
        let lichun = lichun(self.calendar, instant.clock.year())?;
        let year = year_pillar(instant.clock, lichun);

        let longitude = solar_longitude_at(instant.clock, self.utc_offset_minutes);
        let month_branch = month_branch_from_solar_longitude(longitude);
        let month = month_pillar(year.stem(), month_branch)?;

        let day = day_pillar(instant.solar.date());
        let hour = hour_pillar(instant.solar, day.stem())?;

        debug!(
            "analytic: lon {:.4} -> branch {}, indices {}/{}/{}/{}",
            longitude,
            month_branch,
            year.index(),
            month.index(),
            day.index(),
            hour.index()
        );

        Ok(FourPillars {
            year,
            month,
            day,
            hour,
        })
    }
}
