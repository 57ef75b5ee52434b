use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors that can occur during chart calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Unrecognized stem/branch symbol: {0}")]
    InvalidSymbol(String),
    #[error("{stem}{branch} is not one of the 60 Jiazi pairs (stem and branch parity differ)")]
    ParityMismatch { stem: char, branch: char },
    #[error("Unknown solar term: {0}")]
    UnknownTerm(String),
    #[error("Calendar oracle has no data for {term} in {year}")]
    OracleMiss { year: i32, term: String },
    #[error("No Jie solar term found {direction} {instant}")]
    NoJieFound {
        instant: NaiveDateTime,
        direction: &'static str,
    },
    #[error("Invalid birth info: {0}")]
    InvalidBirthInfo(String),
    #[error("Date out of range: {0}")]
    DateOutOfRange(String),
    #[error("{pillar} pillar mismatch at {instant}: analytic {analytic}, oracle {oracle}")]
    PillarMismatch {
        instant: NaiveDateTime,
        pillar: &'static str,
        analytic: String,
        oracle: String,
    },
}

pub type Result<T> = std::result::Result<T, CalcError>;
