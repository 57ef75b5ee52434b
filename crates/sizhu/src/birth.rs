//! Birth input record and its validation.

use chrono::{Datelike, NaiveDateTime};
use log::warn;
use serde::{Deserialize, Serialize};
use sizhu_config::ChartSettings;
use std::fmt;

use crate::error::{CalcError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

/// Civil birth instant plus optional birthplace coordinates (degrees, east/north positive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthInfo {
    pub timestamp: NaiveDateTime,
    pub gender: Gender,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
}

impl BirthInfo {
    pub fn new(timestamp: NaiveDateTime, gender: Gender) -> Self {
        Self {
            timestamp,
            gender,
            longitude: None,
            latitude: None,
        }
    }

    pub fn with_longitude(mut self, longitude: f64) -> Self {
        self.longitude = Some(longitude);
        self
    }

    pub fn with_latitude(mut self, latitude: f64) -> Self {
        self.latitude = Some(latitude);
        self
    }

    /// Reject years outside the supported era and impossible coordinates.
    ///
    /// All problems are reported together.
    pub fn validate(&self, settings: &ChartSettings) -> Result<()> {
        let mut errors = Vec::new();

        let year = self.timestamp.year();
        if !settings.supports_year(year) {
            errors.push(format!(
                "year {} must be between {} and {}",
                year, settings.min_year, settings.max_year
            ));
        }
        if let Some(lon) = self.longitude {
            if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
                errors.push(format!("longitude {lon} must be between -180 and 180 degrees"));
            }
        }
        if let Some(lat) = self.latitude {
            if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
                errors.push(format!("latitude {lat} must be between -90 and 90 degrees"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            let message = errors.join("; ");
            warn!("rejected birth info: {}", message);
            Err(CalcError::InvalidBirthInfo(message))
        }
    }
}
