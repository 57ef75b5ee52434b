//! Ten Gods (十神): relationship of a stem to the day master.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ganzhi::types::Stem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenGod {
    #[serde(rename = "比肩")]
    Companion,
    #[serde(rename = "劫財")]
    RobWealth,
    #[serde(rename = "食神")]
    EatingGod,
    #[serde(rename = "傷官")]
    HurtingOfficer,
    #[serde(rename = "偏財")]
    IndirectWealth,
    #[serde(rename = "正財")]
    DirectWealth,
    #[serde(rename = "七殺")]
    SevenKillings,
    #[serde(rename = "正官")]
    DirectOfficer,
    #[serde(rename = "偏印")]
    IndirectResource,
    #[serde(rename = "正印")]
    DirectResource,
}

impl TenGod {
    pub fn name(self) -> &'static str {
        match self {
            TenGod::Companion => "比肩",
            TenGod::RobWealth => "劫財",
            TenGod::EatingGod => "食神",
            TenGod::HurtingOfficer => "傷官",
            TenGod::IndirectWealth => "偏財",
            TenGod::DirectWealth => "正財",
            TenGod::SevenKillings => "七殺",
            TenGod::DirectOfficer => "正官",
            TenGod::IndirectResource => "偏印",
            TenGod::DirectResource => "正印",
        }
    }
}

impl fmt::Display for TenGod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify `other` against the day master `day`.
pub fn ten_god(day: Stem, other: Stem) -> TenGod {
    let same_polarity = day.polarity() == other.polarity();
    let (me, them) = (day.element(), other.element());

    if me == them {
        if same_polarity {
            TenGod::Companion
        } else {
            TenGod::RobWealth
        }
    } else if me.produces() == them {
        if same_polarity {
            TenGod::EatingGod
        } else {
            TenGod::HurtingOfficer
        }
    } else if me.controls() == them {
        if same_polarity {
            TenGod::IndirectWealth
        } else {
            TenGod::DirectWealth
        }
    } else if them.controls() == me {
        if same_polarity {
            TenGod::SevenKillings
        } else {
            TenGod::DirectOfficer
        }
    } else if same_polarity {
        TenGod::IndirectResource
    } else {
        TenGod::DirectResource
    }
}
