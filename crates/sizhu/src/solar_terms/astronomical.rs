//! Solar terms computed in-process from the solar theory in [`crate::time::sun`].

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use log::debug;
use sizhu_config::ChartSettings;

use crate::error::{CalcError, Result};
use crate::ganzhi::{index_to_pair, Branch, GanZhi, Stem};
use crate::solar_terms::{CalendarOracle, PillarOracle, SolarTerm};
use crate::time::sun::{
    angle_difference, apparent_solar_longitude, civil_to_jd_ut, solar_longitude_at,
};
use crate::time::julian::datetime_from_julian_date;

const TROPICAL_YEAR_DAYS: f64 = 365.242_2;
const DAYS_PER_TERM: f64 = TROPICAL_YEAR_DAYS / 24.0;
const BRACKET_HALF_WIDTH_DAYS: f64 = 5.0;
const MAX_ITER: u32 = 60;
const CONVERGENCE_DAYS: f64 = 1e-7;
// the converged bracket spans under 9 ms
const MAX_SNAP_STEPS: u32 = 64;

/// 1949-10-01 is a 甲子 day.
const JIAZI_DAY_ANCHOR: (i32, u32, u32) = (1949, 10, 1);

// Five Tigers: stem of the 寅 month, by year stem mod 5 (甲己, 乙庚, 丙辛, 丁壬, 戊癸)
const TIGER_MONTH_STEMS: [Stem; 5] = [Stem::Bing, Stem::Wu, Stem::Geng, Stem::Ren, Stem::Jia];
// Five Rats: stem of the 子 hour, by day stem mod 5
const RAT_HOUR_STEMS: [Stem; 5] = [Stem::Jia, Stem::Bing, Stem::Wu, Stem::Geng, Stem::Ren];

/// Calendar oracle backed by the Meeus solar theory with bisection on the
/// longitude crossing.
#[derive(Debug, Clone, PartialEq)]
pub struct AstronomicalOracle {
    utc_offset_minutes: i32,
    min_year: i32,
    max_year: i32,
}

impl Default for AstronomicalOracle {
    fn default() -> Self {
        Self::from_settings(&ChartSettings::default())
    }
}

impl AstronomicalOracle {
    pub fn new(utc_offset_minutes: i32, min_year: i32, max_year: i32) -> Self {
        Self {
            utc_offset_minutes,
            min_year,
            max_year,
        }
    }

    pub fn from_settings(settings: &ChartSettings) -> Self {
        Self::new(settings.utc_offset_minutes, settings.min_year, settings.max_year)
    }

    pub fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes
    }

    fn supports(&self, year: i32) -> bool {
        (self.min_year..=self.max_year).contains(&year)
    }

    /// Instant of `term` in `year` with no range check; neighbouring years
    /// of the supported era are needed for month lookup.
    fn compute_term(&self, year: i32, term: SolarTerm) -> Result<NaiveDateTime> {
        let target = term.longitude();
        let guess = self.estimate_jd(year, term)?;

        let f_at = |jd: f64| angle_difference(apparent_solar_longitude(jd), target);

        let mut t_a = guess - BRACKET_HALF_WIDTH_DAYS;
        let mut t_b = guess + BRACKET_HALF_WIDTH_DAYS;
        let mut f_a = f_at(t_a);
        let f_b = f_at(t_b);
        if f_a * f_b > 0.0 {
            return Err(CalcError::OracleMiss {
                year,
                term: term.name().to_string(),
            });
        }

        for _ in 0..MAX_ITER {
            let t_mid = 0.5 * (t_a + t_b);
            let f_mid = f_at(t_mid);

            if f_a * f_mid <= 0.0 {
                t_b = t_mid;
            } else {
                t_a = t_mid;
                f_a = f_mid;
            }

            if (t_b - t_a).abs() < CONVERGENCE_DAYS {
                break;
            }
        }

        let civil = datetime_from_julian_date(t_b + self.utc_offset_minutes as f64 / 1440.0)?;
        let civil = self
            .snap_to_crossing(civil, target)
            .ok_or_else(|| CalcError::OracleMiss {
                year,
                term: term.name().to_string(),
            })?;
        debug!("{} {} at {}", year, term, civil);
        Ok(civil)
    }

    /// First whole millisecond whose longitude, read back through
    /// [`solar_longitude_at`], is at or past `target`.
    fn snap_to_crossing(&self, civil: NaiveDateTime, target: f64) -> Option<NaiveDateTime> {
        let reached = |c: NaiveDateTime| {
            angle_difference(solar_longitude_at(c, self.utc_offset_minutes), target) >= 0.0
        };
        let step = Duration::milliseconds(1);

        let mut civil = civil;
        let mut steps = 0;
        while !reached(civil) {
            civil += step;
            steps += 1;
            if steps > MAX_SNAP_STEPS {
                return None;
            }
        }
        while reached(civil - step) {
            civil -= step;
            steps += 1;
            if steps > MAX_SNAP_STEPS {
                return None;
            }
        }
        Some(civil)
    }

    /// Mean-motion estimate: 立春 near Feb 4, one term every ~15.2 days.
    fn estimate_jd(&self, year: i32, term: SolarTerm) -> Result<f64> {
        let feb4 = NaiveDate::from_ymd_opt(year, 2, 4)
            .ok_or_else(|| CalcError::DateOutOfRange(format!("year {year}")))?
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| CalcError::DateOutOfRange(format!("year {year}")))?;

        let mut jd = civil_to_jd_ut(feb4, self.utc_offset_minutes)
            + term.index() as f64 * DAYS_PER_TERM;
        if term.falls_in_january() {
            jd -= TROPICAL_YEAR_DAYS;
        }
        Ok(jd)
    }

    /// Jie terms of `year` and the year before, ascending.
    fn jie_boundaries(&self, year: i32) -> Result<Vec<(NaiveDateTime, SolarTerm)>> {
        let mut out = Vec::with_capacity(24);
        for y in [year - 1, year] {
            for term in SolarTerm::jie_terms() {
                out.push((self.compute_term(y, term)?, term));
            }
        }
        out.sort_by_key(|(instant, _)| *instant);
        Ok(out)
    }

    /// Full BaZi for a civil instant using interval lookup and stem tables.
    pub fn bazi(&self, instant: NaiveDateTime) -> Result<[GanZhi; 4]> {
        let year = instant.year();
        if !self.supports(year) {
            return Err(CalcError::OracleMiss {
                year,
                term: SolarTerm::LiChun.name().to_string(),
            });
        }

        let lichun = self.compute_term(year, SolarTerm::LiChun)?;
        let bazi_year = if instant >= lichun { year } else { year - 1 };
        // 1984 is 甲子
        let year_pillar = index_to_pair(bazi_year as i64 - 1984);

        let boundaries = self.jie_boundaries(year)?;
        let (_, month_term) = boundaries
            .iter()
            .rev()
            .find(|(start, _)| *start <= instant)
            .copied()
            .ok_or(CalcError::NoJieFound {
                instant,
                direction: "at or before",
            })?;
        let month_branch = month_term.month_branch().ok_or(CalcError::NoJieFound {
            instant,
            direction: "at or before",
        })?;
        let tiger = TIGER_MONTH_STEMS[year_pillar.stem().index() % 5];
        let month_offset = (month_branch.index() as i64 - 2).rem_euclid(12);
        let month_pillar = GanZhi::new(
            Stem::from_index(tiger.index() as i64 + month_offset),
            month_branch,
        )?;

        let anchor = NaiveDate::from_ymd_opt(JIAZI_DAY_ANCHOR.0, JIAZI_DAY_ANCHOR.1, JIAZI_DAY_ANCHOR.2)
            .ok_or_else(|| CalcError::DateOutOfRange("day anchor".to_string()))?;
        let day_pillar = index_to_pair((instant.date() - anchor).num_days());

        let hour_branch = ((instant.hour() + 1) / 2) % 12;
        let rat = RAT_HOUR_STEMS[day_pillar.stem().index() % 5];
        let hour_pillar = GanZhi::new(
            Stem::from_index(rat.index() as i64 + hour_branch as i64),
            Branch::from_index(hour_branch as i64),
        )?;

        Ok([year_pillar, month_pillar, day_pillar, hour_pillar])
    }
}

impl CalendarOracle for AstronomicalOracle {
    fn solar_term(&self, year: i32, term: SolarTerm) -> Result<NaiveDateTime> {
        if !self.supports(year) {
            return Err(CalcError::OracleMiss {
                year,
                term: term.name().to_string(),
            });
        }
        self.compute_term(year, term)
    }
}

impl PillarOracle for AstronomicalOracle {
    fn four_pillar_strings(&self, instant: NaiveDateTime) -> Result<[String; 4]> {
        let [y, m, d, h] = self.bazi(instant)?;
        Ok([y.to_string(), m.to_string(), d.to_string(), h.to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn minutes_apart(a: NaiveDateTime, b: NaiveDateTime) -> i64 {
        (a - b).num_minutes().abs()
    }

    #[test]
    fn lichun_2024_matches_almanac() {
        // 2024-02-04 16:27 UTC+8
        let oracle = AstronomicalOracle::default();
        let lichun = oracle.solar_term(2024, SolarTerm::LiChun).unwrap();
        assert!(minutes_apart(lichun, at(2024, 2, 4, 16, 27)) <= 15, "{lichun}");
    }

    #[test]
    fn january_terms_land_in_january() {
        let oracle = AstronomicalOracle::default();
        let xiaohan = oracle.solar_term(2024, SolarTerm::XiaoHan).unwrap();
        assert_eq!((xiaohan.year(), xiaohan.month()), (2024, 1));
        // 2024-01-06 04:49 UTC+8
        assert!(minutes_apart(xiaohan, at(2024, 1, 6, 4, 49)) <= 15, "{xiaohan}");
    }

    #[test]
    fn term_instant_sits_on_its_longitude() {
        let oracle = AstronomicalOracle::default();
        let qiufen = oracle.solar_term(1992, SolarTerm::QiuFen).unwrap();
        let lon = solar_longitude_at(qiufen, 480);
        assert!(angle_difference(lon, 180.0).abs() < 1e-4, "{lon}");
    }

    #[test]
    fn term_instant_is_first_millisecond_past_longitude() {
        let oracle = AstronomicalOracle::default();
        for year in [1900, 1955, 2024, 2099] {
            for term in SolarTerm::jie_terms() {
                let instant = oracle.solar_term(year, term).unwrap();
                let at = angle_difference(solar_longitude_at(instant, 480), term.longitude());
                let before = angle_difference(
                    solar_longitude_at(instant - Duration::milliseconds(1), 480),
                    term.longitude(),
                );
                assert!(at >= 0.0, "{year} {term}: {at}");
                assert!(before < 0.0, "{year} {term}: {before}");
            }
        }
    }

    #[test]
    fn lichun_1900_month_follows_year() {
        let oracle = AstronomicalOracle::default();
        let lichun = oracle.solar_term(1900, SolarTerm::LiChun).unwrap();
        let [year, month, _, _] = oracle.four_pillar_strings(lichun).unwrap();
        assert_eq!(year, "庚子");
        assert_eq!(month, "戊寅");
        let lon = solar_longitude_at(lichun, 480);
        assert_eq!(crate::solar_terms::month_branch_from_solar_longitude(lon), 2);
    }

    #[test]
    fn outside_era_is_an_oracle_miss() {
        let oracle = AstronomicalOracle::new(480, 1900, 2000);
        assert!(matches!(
            oracle.solar_term(2001, SolarTerm::LiChun),
            Err(CalcError::OracleMiss { year: 2001, .. })
        ));
        assert!(oracle.four_pillar_strings(at(1850, 6, 1, 12, 0)).is_err());
    }

    #[test]
    fn bazi_of_known_day() {
        let oracle = AstronomicalOracle::default();
        let [year, month, day, hour] = oracle.four_pillar_strings(at(2024, 1, 1, 12, 0)).unwrap();
        assert_eq!(year, "癸卯");
        assert_eq!(month, "甲子");
        assert_eq!(day, "甲子");
        assert_eq!(hour, "庚午");
    }
}
