//! The 24 solar terms (節氣).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::CalcError;
use crate::ganzhi::Branch;

/// Solar terms in calendar order from 立春 (solar longitude 315°), 15° apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SolarTerm {
    #[serde(rename = "立春")]
    LiChun,
    #[serde(rename = "雨水")]
    YuShui,
    #[serde(rename = "驚蟄")]
    JingZhe,
    #[serde(rename = "春分")]
    ChunFen,
    #[serde(rename = "清明")]
    QingMing,
    #[serde(rename = "穀雨")]
    GuYu,
    #[serde(rename = "立夏")]
    LiXia,
    #[serde(rename = "小滿")]
    XiaoMan,
    #[serde(rename = "芒種")]
    MangZhong,
    #[serde(rename = "夏至")]
    XiaZhi,
    #[serde(rename = "小暑")]
    XiaoShu,
    #[serde(rename = "大暑")]
    DaShu,
    #[serde(rename = "立秋")]
    LiQiu,
    #[serde(rename = "處暑")]
    ChuShu,
    #[serde(rename = "白露")]
    BaiLu,
    #[serde(rename = "秋分")]
    QiuFen,
    #[serde(rename = "寒露")]
    HanLu,
    #[serde(rename = "霜降")]
    ShuangJiang,
    #[serde(rename = "立冬")]
    LiDong,
    #[serde(rename = "小雪")]
    XiaoXue,
    #[serde(rename = "大雪")]
    DaXue,
    #[serde(rename = "冬至")]
    DongZhi,
    #[serde(rename = "小寒")]
    XiaoHan,
    #[serde(rename = "大寒")]
    DaHan,
}

use SolarTerm::*;

pub const SOLAR_TERMS: [SolarTerm; 24] = [
    LiChun, YuShui, JingZhe, ChunFen, QingMing, GuYu, LiXia, XiaoMan, MangZhong, XiaZhi, XiaoShu,
    DaShu, LiQiu, ChuShu, BaiLu, QiuFen, HanLu, ShuangJiang, LiDong, XiaoXue, DaXue, DongZhi,
    XiaoHan, DaHan,
];

// (traditional, simplified, pinyin) in enum order
const TERM_NAMES: [(&str, &str, &str); 24] = [
    ("立春", "立春", "lichun"),
    ("雨水", "雨水", "yushui"),
    ("驚蟄", "惊蛰", "jingzhe"),
    ("春分", "春分", "chunfen"),
    ("清明", "清明", "qingming"),
    ("穀雨", "谷雨", "guyu"),
    ("立夏", "立夏", "lixia"),
    ("小滿", "小满", "xiaoman"),
    ("芒種", "芒种", "mangzhong"),
    ("夏至", "夏至", "xiazhi"),
    ("小暑", "小暑", "xiaoshu"),
    ("大暑", "大暑", "dashu"),
    ("立秋", "立秋", "liqiu"),
    ("處暑", "处暑", "chushu"),
    ("白露", "白露", "bailu"),
    ("秋分", "秋分", "qiufen"),
    ("寒露", "寒露", "hanlu"),
    ("霜降", "霜降", "shuangjiang"),
    ("立冬", "立冬", "lidong"),
    ("小雪", "小雪", "xiaoxue"),
    ("大雪", "大雪", "daxue"),
    ("冬至", "冬至", "dongzhi"),
    ("小寒", "小寒", "xiaohan"),
    ("大寒", "大寒", "dahan"),
];

lazy_static::lazy_static! {
    static ref TERM_LOOKUP: HashMap<&'static str, SolarTerm> = {
        let mut map = HashMap::new();
        for (term, (traditional, simplified, pinyin)) in SOLAR_TERMS.iter().zip(TERM_NAMES.iter()) {
            map.insert(*traditional, *term);
            map.insert(*simplified, *term);
            map.insert(*pinyin, *term);
        }
        map
    };
}

impl SolarTerm {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<SolarTerm> {
        SOLAR_TERMS.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        TERM_NAMES[self.index()].0
    }

    pub fn simplified_name(self) -> &'static str {
        TERM_NAMES[self.index()].1
    }

    pub fn pinyin(self) -> &'static str {
        TERM_NAMES[self.index()].2
    }

    /// Apparent solar longitude at which the term begins, degrees.
    pub fn longitude(self) -> f64 {
        (315.0 + 15.0 * self.index() as f64) % 360.0
    }

    /// Jie (節) terms open a solar month; the rest are Qi (氣).
    pub fn is_jie(self) -> bool {
        self.index() % 2 == 0
    }

    /// Month branch opened by a Jie term (立春 → 寅 … 小寒 → 丑).
    pub fn month_branch(self) -> Option<Branch> {
        if self.is_jie() {
            Some(Branch::from_index(self.index() as i64 / 2 + 2))
        } else {
            None
        }
    }

    /// 小寒 and 大寒 fall in January, before the year's 立春.
    pub fn falls_in_january(self) -> bool {
        matches!(self, XiaoHan | DaHan)
    }

    pub fn jie_terms() -> impl Iterator<Item = SolarTerm> {
        SOLAR_TERMS.into_iter().filter(|t| t.is_jie())
    }
}

impl fmt::Display for SolarTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolarTerm {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        TERM_LOOKUP
            .get(key)
            .or_else(|| TERM_LOOKUP.get(key.to_ascii_lowercase().as_str()))
            .copied()
            .ok_or_else(|| CalcError::UnknownTerm(s.to_string()))
    }
}
