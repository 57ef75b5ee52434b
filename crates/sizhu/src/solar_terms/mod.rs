//! Solar-term boundary lookup through an injected calendar oracle.

pub mod astronomical;
pub mod table;
pub mod term;

pub use astronomical::AstronomicalOracle;
pub use table::TermTable;
pub use term::{SolarTerm, SOLAR_TERMS};

use chrono::{Datelike, NaiveDateTime};
use log::{debug, warn};
use sizhu_config::ChartSettings;
use std::io;

use crate::error::Result;
use crate::time::sun::normalize_degrees;

/// Source of solar-term instants.
///
/// Instants are civil timestamps in the engine's configured timezone and
/// fall inside Gregorian year `year`. Years without data answer
/// [`CalcError::OracleMiss`](crate::error::CalcError::OracleMiss).
pub trait CalendarOracle: Send + Sync {
    fn solar_term(&self, year: i32, term: SolarTerm) -> Result<NaiveDateTime>;

    /// The 12 Jie instants of `year`, ascending.
    fn jie_terms(&self, year: i32) -> Result<Vec<NaiveDateTime>> {
        let mut instants = SolarTerm::jie_terms()
            .map(|term| self.solar_term(year, term))
            .collect::<Result<Vec<_>>>()?;
        instants.sort();
        Ok(instants)
    }
}

/// Independent BaZi source: four two-character stem+branch strings
/// (year, month, day, hour) for a civil instant.
pub trait PillarOracle: Send + Sync {
    fn four_pillar_strings(&self, instant: NaiveDateTime) -> Result<[String; 4]>;
}

/// Look up a term by name (traditional, simplified, or pinyin).
pub fn solar_term_time(
    oracle: &dyn CalendarOracle,
    year: i32,
    term_name: &str,
) -> Result<NaiveDateTime> {
    let term: SolarTerm = term_name.parse()?;
    let instant = oracle.solar_term(year, term).map_err(|e| {
        warn!("solar term lookup failed: {}", e);
        e
    })?;
    debug!("{} {} -> {}", year, term, instant);
    Ok(instant)
}

/// Month branch index for a solar longitude: 315°–345° is 寅 (2).
pub fn month_branch_from_solar_longitude(longitude: f64) -> usize {
    let sector = (normalize_degrees(longitude + 45.0) / 30.0).floor() as usize;
    (sector + 2) % 12
}

pub fn lichun(oracle: &dyn CalendarOracle, year: i32) -> Result<NaiveDateTime> {
    oracle.solar_term(year, SolarTerm::LiChun)
}

/// Whether `instant` is at or after its own calendar year's 立春.
pub fn has_passed_lichun(oracle: &dyn CalendarOracle, instant: NaiveDateTime) -> Result<bool> {
    Ok(instant >= lichun(oracle, instant.year())?)
}

/// All 立春 instants within `[start, end]`; empty when the range is reversed.
pub fn lichun_dates_between(
    oracle: &dyn CalendarOracle,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Vec<NaiveDateTime>> {
    if start > end {
        return Ok(Vec::new());
    }
    let mut dates = Vec::new();
    for year in start.year()..=end.year() {
        let instant = lichun(oracle, year)?;
        if instant >= start && instant <= end {
            dates.push(instant);
        }
    }
    Ok(dates)
}

/// The configured term table when one is set, else the astronomical oracle.
pub fn calendar_from_settings(
    settings: &ChartSettings,
) -> io::Result<Box<dyn CalendarOracle>> {
    match &settings.term_table {
        Some(path) => {
            debug!("loading solar-term table from {}", path.display());
            Ok(Box::new(TermTable::load(path)?))
        }
        None => Ok(Box::new(AstronomicalOracle::from_settings(settings))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;
    use chrono::NaiveDate;

    #[test]
    fn month_branch_sectors() {
        assert_eq!(month_branch_from_solar_longitude(315.0), 2);
        assert_eq!(month_branch_from_solar_longitude(344.9), 2);
        assert_eq!(month_branch_from_solar_longitude(345.0), 3);
        assert_eq!(month_branch_from_solar_longitude(0.0), 3);
        assert_eq!(month_branch_from_solar_longitude(165.0), 9);
        assert_eq!(month_branch_from_solar_longitude(285.0), 1);
        assert_eq!(month_branch_from_solar_longitude(314.9), 1);
        assert_eq!(month_branch_from_solar_longitude(-45.0), 2);
        assert_eq!(month_branch_from_solar_longitude(675.0), 2);
    }

    #[test]
    fn unknown_term_name() {
        let oracle = AstronomicalOracle::default();
        assert!(matches!(
            solar_term_time(&oracle, 2024, "中秋"),
            Err(CalcError::UnknownTerm(_))
        ));
        assert!(solar_term_time(&oracle, 2024, "lichun").is_ok());
    }

    #[test]
    fn jie_terms_are_sorted_within_year() {
        let oracle = AstronomicalOracle::default();
        let jie = oracle.jie_terms(2000).unwrap();
        assert_eq!(jie.len(), 12);
        assert!(jie.windows(2).all(|w| w[0] < w[1]));
        assert!(jie.iter().all(|d| d.year() == 2000));
    }

    #[test]
    fn lichun_range() {
        let oracle = AstronomicalOracle::default();
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let dates = lichun_dates_between(&oracle, start, end).unwrap();
        assert_eq!(dates.len(), 4);
        assert!(lichun_dates_between(&oracle, end, start).unwrap().is_empty());
    }

    #[test]
    fn settings_without_table_use_astronomy() {
        let oracle = calendar_from_settings(&ChartSettings::default()).unwrap();
        assert!(oracle.solar_term(2024, SolarTerm::LiChun).is_ok());
    }
}
