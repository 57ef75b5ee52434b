//! Precomputed solar-term table usable as a read-only calendar oracle.

use chrono::NaiveDateTime;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::ops::RangeInclusive;
use std::path::Path;

use crate::error::{CalcError, Result};
use crate::solar_terms::{CalendarOracle, SolarTerm, SOLAR_TERMS};

/// `year -> term -> civil instant`; serialized as nested JSON objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermTable {
    years: BTreeMap<i32, BTreeMap<SolarTerm, NaiveDateTime>>,
}

impl TermTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, year: i32, term: SolarTerm, instant: NaiveDateTime) {
        self.years.entry(year).or_default().insert(term, instant);
    }

    /// Query `source` for every term of every year in `years`.
    pub fn precompute(source: &dyn CalendarOracle, years: RangeInclusive<i32>) -> Result<Self> {
        let mut table = Self::new();
        for year in years {
            for term in SOLAR_TERMS {
                table.insert(year, term, source.solar_term(year, term)?);
            }
        }
        Ok(table)
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::from_json_str(&text)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, self.to_json_string()?)
    }
}

impl CalendarOracle for TermTable {
    fn solar_term(&self, year: i32, term: SolarTerm) -> Result<NaiveDateTime> {
        self.years
            .get(&year)
            .and_then(|terms| terms.get(&term))
            .copied()
            .ok_or_else(|| {
                warn!("term table has no {} for {}", term, year);
                CalcError::OracleMiss {
                    year,
                    term: term.name().to_string(),
                }
            })
    }
}
