//! Annual pillar and Tai Sui (太歲) conflict detection.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::ganzhi::{Branch, GanZhi};
use crate::pillars::rules::year_pillar;
use crate::solar_terms::{lichun, CalendarOracle};

/// Branch index pairs in 害 (harm) relation.
const HAI_PAIRS: [(usize, usize); 6] = [(0, 7), (1, 6), (2, 5), (3, 4), (8, 11), (9, 10)];

/// Year pillar in force at any instant; the year turns at 立春.
pub fn annual_pillar(oracle: &dyn CalendarOracle, date: NaiveDateTime) -> Result<GanZhi> {
    let lichun = lichun(oracle, date.year())?;
    Ok(year_pillar(date, lichun))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn from_flag_count(count: usize) -> Severity {
        match count {
            0 => Severity::None,
            1 => Severity::Low,
            2 => Severity::Medium,
            _ => Severity::High,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::None => "NONE",
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        };
        f.write_str(s)
    }
}

/// Relationship flags between a birth-year branch and a target-year branch.
///
/// An offset of 9 sets both `xing` and `po`; each counts toward severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaiSuiTypes {
    /// 值: same branch
    pub zhi: bool,
    /// 沖: opposite branch
    pub chong: bool,
    /// 刑: three apart either way
    pub xing: bool,
    /// 破: nine ahead
    pub po: bool,
    /// 害
    pub hai: bool,
    pub severity: Severity,
}

impl TaiSuiTypes {
    pub fn flag_count(&self) -> usize {
        [self.zhi, self.chong, self.xing, self.po, self.hai]
            .iter()
            .filter(|f| **f)
            .count()
    }

    pub fn any(&self) -> bool {
        self.flag_count() > 0
    }
}

pub fn tai_sui_types(birth: Branch, target: Branch) -> TaiSuiTypes {
    let offset = birth.offset_to(target);
    let (b, t) = (birth.index(), target.index());

    let hai = HAI_PAIRS
        .iter()
        .any(|&(x, y)| (b == x && t == y) || (b == y && t == x));

    let mut types = TaiSuiTypes {
        zhi: offset == 0,
        chong: offset == 6,
        xing: offset == 3 || offset == 9,
        po: offset == 9,
        hai,
        severity: Severity::None,
    };
    types.severity = Severity::from_flag_count(types.flag_count());
    types
}

/// Tai Sui flags of the year in force at `query` against the birth year.
pub fn detect_tai_sui(
    oracle: &dyn CalendarOracle,
    birth: NaiveDateTime,
    query: NaiveDateTime,
) -> Result<TaiSuiTypes> {
    let birth_branch = annual_pillar(oracle, birth)?.branch();
    let target_branch = annual_pillar(oracle, query)?.branch();
    Ok(tai_sui_types(birth_branch, target_branch))
}
