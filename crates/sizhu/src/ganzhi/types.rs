//! Heavenly Stems, Earthly Branches and their element/polarity attributes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CalcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    /// The element this one produces (wood → fire → earth → metal → water → wood).
    pub fn produces(self) -> Element {
        match self {
            Element::Wood => Element::Fire,
            Element::Fire => Element::Earth,
            Element::Earth => Element::Metal,
            Element::Metal => Element::Water,
            Element::Water => Element::Wood,
        }
    }

    /// The element this one controls (wood → earth → water → fire → metal → wood).
    pub fn controls(self) -> Element {
        match self {
            Element::Wood => Element::Earth,
            Element::Earth => Element::Water,
            Element::Water => Element::Fire,
            Element::Fire => Element::Metal,
            Element::Metal => Element::Wood,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Yang,
    Yin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stem {
    #[serde(rename = "甲")]
    Jia,
    #[serde(rename = "乙")]
    Yi,
    #[serde(rename = "丙")]
    Bing,
    #[serde(rename = "丁")]
    Ding,
    #[serde(rename = "戊")]
    Wu,
    #[serde(rename = "己")]
    Ji,
    #[serde(rename = "庚")]
    Geng,
    #[serde(rename = "辛")]
    Xin,
    #[serde(rename = "壬")]
    Ren,
    #[serde(rename = "癸")]
    Gui,
}

pub const STEMS: [Stem; 10] = [
    Stem::Jia,
    Stem::Yi,
    Stem::Bing,
    Stem::Ding,
    Stem::Wu,
    Stem::Ji,
    Stem::Geng,
    Stem::Xin,
    Stem::Ren,
    Stem::Gui,
];

const STEM_CHARS: [char; 10] = ['甲', '乙', '丙', '丁', '戊', '己', '庚', '辛', '壬', '癸'];

impl Stem {
    /// Stem for any integer position, wrapped with floor-modulo semantics.
    pub fn from_index(index: i64) -> Stem {
        STEMS[stem_modulo(index)]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_char(self) -> char {
        STEM_CHARS[self.index()]
    }

    pub fn from_char(c: char) -> Result<Stem, CalcError> {
        STEM_CHARS
            .iter()
            .position(|&s| s == c)
            .map(|i| STEMS[i])
            .ok_or_else(|| CalcError::InvalidSymbol(c.to_string()))
    }

    /// Even positions are Yang, odd positions Yin.
    pub fn polarity(self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }

    pub fn is_yang(self) -> bool {
        self.polarity() == Polarity::Yang
    }

    pub fn element(self) -> Element {
        match self.index() / 2 {
            0 => Element::Wood,
            1 => Element::Fire,
            2 => Element::Earth,
            3 => Element::Metal,
            _ => Element::Water,
        }
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Stem {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Stem::from_char(c),
            _ => Err(CalcError::InvalidSymbol(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Branch {
    #[serde(rename = "子")]
    Zi,
    #[serde(rename = "丑")]
    Chou,
    #[serde(rename = "寅")]
    Yin,
    #[serde(rename = "卯")]
    Mao,
    #[serde(rename = "辰")]
    Chen,
    #[serde(rename = "巳")]
    Si,
    #[serde(rename = "午")]
    Wu,
    #[serde(rename = "未")]
    Wei,
    #[serde(rename = "申")]
    Shen,
    #[serde(rename = "酉")]
    You,
    #[serde(rename = "戌")]
    Xu,
    #[serde(rename = "亥")]
    Hai,
}

pub const BRANCHES: [Branch; 12] = [
    Branch::Zi,
    Branch::Chou,
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
];

const BRANCH_CHARS: [char; 12] = [
    '子', '丑', '寅', '卯', '辰', '巳', '午', '未', '申', '酉', '戌', '亥',
];

impl Branch {
    /// Branch for any integer position, wrapped with floor-modulo semantics.
    pub fn from_index(index: i64) -> Branch {
        BRANCHES[branch_modulo(index)]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_char(self) -> char {
        BRANCH_CHARS[self.index()]
    }

    pub fn from_char(c: char) -> Result<Branch, CalcError> {
        BRANCH_CHARS
            .iter()
            .position(|&b| b == c)
            .map(|i| BRANCHES[i])
            .ok_or_else(|| CalcError::InvalidSymbol(c.to_string()))
    }

    pub fn polarity(self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }

    pub fn element(self) -> Element {
        match self {
            Branch::Yin | Branch::Mao => Element::Wood,
            Branch::Si | Branch::Wu => Element::Fire,
            Branch::Shen | Branch::You => Element::Metal,
            Branch::Hai | Branch::Zi => Element::Water,
            Branch::Chou | Branch::Chen | Branch::Wei | Branch::Xu => Element::Earth,
        }
    }

    /// Number of positions from `self` forward to `other`, in [0, 11].
    pub fn offset_to(self, other: Branch) -> usize {
        branch_modulo(other.index() as i64 - self.index() as i64)
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Branch {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Branch::from_char(c),
            _ => Err(CalcError::InvalidSymbol(s.to_string())),
        }
    }
}

/// Floor-modulo into [0, 9].
pub fn stem_modulo(value: i64) -> usize {
    value.rem_euclid(10) as usize
}

/// Floor-modulo into [0, 11].
pub fn branch_modulo(value: i64) -> usize {
    value.rem_euclid(12) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modulo_helpers_floor_negative_values() {
        assert_eq!(stem_modulo(-1), 9);
        assert_eq!(stem_modulo(-10), 0);
        assert_eq!(stem_modulo(23), 3);
        assert_eq!(branch_modulo(-1), 11);
        assert_eq!(branch_modulo(-13), 11);
        assert_eq!(branch_modulo(25), 1);
    }

    #[test]
    fn polarity_alternates() {
        assert_eq!(Stem::Jia.polarity(), Polarity::Yang);
        assert_eq!(Stem::Yi.polarity(), Polarity::Yin);
        assert_eq!(Stem::Ren.polarity(), Polarity::Yang);
        assert_eq!(Stem::Gui.polarity(), Polarity::Yin);
    }

    #[test]
    fn elements_follow_pairs() {
        assert_eq!(Stem::Bing.element(), Element::Fire);
        assert_eq!(Stem::Xin.element(), Element::Metal);
        assert_eq!(Branch::Chen.element(), Element::Earth);
        assert_eq!(Branch::Hai.element(), Element::Water);
        assert_eq!(Element::Water.produces(), Element::Wood);
        assert_eq!(Element::Fire.controls(), Element::Metal);
    }

    #[test]
    fn parse_rejects_unknown_symbols() {
        assert_eq!("庚".parse::<Stem>().unwrap(), Stem::Geng);
        assert_eq!("酉".parse::<Branch>().unwrap(), Branch::You);
        assert!(matches!("X".parse::<Stem>(), Err(CalcError::InvalidSymbol(_))));
        assert!(matches!("子子".parse::<Branch>(), Err(CalcError::InvalidSymbol(_))));
        assert!(Stem::from_char('子').is_err());
    }

    #[test]
    fn offset_wraps_forward() {
        assert_eq!(Branch::Zi.offset_to(Branch::Wu), 6);
        assert_eq!(Branch::Hai.offset_to(Branch::Zi), 1);
        assert_eq!(Branch::Mao.offset_to(Branch::Zi), 9);
    }
}
