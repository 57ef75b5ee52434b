//! The 60-element Jiazi cycle and index ↔ stem-branch conversion.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CalcError, Result};
use crate::ganzhi::types::{Branch, Stem};

pub const JIAZI_CYCLE_LEN: usize = 60;

/// A stem-branch pair; always one of the 60 valid Jiazi combinations.
///
/// Serializes as its two-character name, e.g. `"甲子"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GanZhi {
    stem: Stem,
    branch: Branch,
}

impl GanZhi {
    /// Pair a stem with a branch; fails unless both share cycle parity.
    pub fn new(stem: Stem, branch: Branch) -> Result<GanZhi> {
        pair_to_index(stem, branch)?;
        Ok(GanZhi { stem, branch })
    }

    pub fn from_index(index: i64) -> GanZhi {
        index_to_pair(index)
    }

    /// Parse a two-character pair such as `"甲子"`.
    pub fn parse(s: &str) -> Result<GanZhi> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(stem), Some(branch), None) => {
                GanZhi::new(Stem::from_char(stem)?, Branch::from_char(branch)?)
            }
            _ => Err(CalcError::InvalidSymbol(s.to_string())),
        }
    }

    pub fn stem(&self) -> Stem {
        self.stem
    }

    pub fn branch(&self) -> Branch {
        self.branch
    }

    /// Position in the Jiazi cycle, [0, 59].
    pub fn index(&self) -> usize {
        // Construction guarantees a solution exists.
        pair_to_index(self.stem, self.branch).unwrap_or_default()
    }

    /// The pair `steps` positions further along the cycle (negative steps go back).
    pub fn offset(&self, steps: i64) -> GanZhi {
        index_to_pair(self.index() as i64 + steps)
    }
}

impl fmt::Display for GanZhi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

impl FromStr for GanZhi {
    type Err = CalcError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        GanZhi::parse(s)
    }
}

impl TryFrom<String> for GanZhi {
    type Error = CalcError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        GanZhi::parse(&value)
    }
}

impl From<GanZhi> for String {
    fn from(value: GanZhi) -> String {
        value.to_string()
    }
}

/// Map any integer onto the cycle: stem = i mod 10, branch = i mod 12.
pub fn index_to_pair(index: i64) -> GanZhi {
    let normalized = index.rem_euclid(JIAZI_CYCLE_LEN as i64);
    GanZhi {
        stem: Stem::from_index(normalized),
        branch: Branch::from_index(normalized),
    }
}

/// Solve n ≡ stem (mod 10), n ≡ branch (mod 12) for n in [0, 59].
///
/// A solution exists only when stem and branch indices share parity.
pub fn pair_to_index(stem: Stem, branch: Branch) -> Result<usize> {
    (0..JIAZI_CYCLE_LEN)
        .find(|n| n % 10 == stem.index() && n % 12 == branch.index())
        .ok_or(CalcError::ParityMismatch {
            stem: stem.as_char(),
            branch: branch.as_char(),
        })
}

/// Same as [`pair_to_index`] for raw stem/branch symbols.
pub fn symbols_to_index(stem: &str, branch: &str) -> Result<usize> {
    pair_to_index(stem.parse()?, branch.parse()?)
}

/// Combine computed stem and branch positions back into a pillar.
pub(crate) fn recover_pillar(stem_index: i64, branch_index: i64) -> Result<GanZhi> {
    let stem = Stem::from_index(stem_index);
    let branch = Branch::from_index(branch_index);
    let index = pair_to_index(stem, branch)?;
    Ok(index_to_pair(index as i64))
}
