//! Next-year fortune assessment: fixed risk and action tables keyed by Tai Sui severity.

use chrono::NaiveDateTime;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ganzhi::GanZhi;
use crate::solar_terms::{lichun, CalendarOracle};
use crate::taisui::{annual_pillar, tai_sui_types, Severity, TaiSuiTypes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub health: RiskLevel,
    pub wealth: RiskLevel,
    pub career: RiskLevel,
    pub relationship: RiskLevel,
}

/// 宜 and 忌 for one quarter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterlyPlan {
    pub suitable: Vec<String>,
    pub avoid: Vec<String>,
}

/// Quarters follow the solar year: 立春, 立夏, 立秋, 立冬.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPlan {
    pub q1: QuarterlyPlan,
    pub q2: QuarterlyPlan,
    pub q3: QuarterlyPlan,
    pub q4: QuarterlyPlan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextYearFortune {
    pub year: i32,
    pub pillar: GanZhi,
    pub lichun_date: NaiveDateTime,
    pub tai_sui: TaiSuiTypes,
    pub risks: RiskAssessment,
    pub action_plan: ActionPlan,
}

type QuarterTable = [(&'static [&'static str], &'static [&'static str]); 4];

const OPEN_YEAR_PLAN: QuarterTable = [
    (
        &["事業擴展", "投資理財", "學習新技能", "拓展人脈"],
        &["過度保守", "錯失機會"],
    ),
    (
        &["創新專案", "升遷爭取", "創業規劃", "社交活動"],
        &["固步自封", "猶豫不決"],
    ),
    (
        &["收穫成果", "擴大影響力", "投資增值", "旅遊進修"],
        &["驕傲自滿", "忽視風險"],
    ),
    (
        &["總結規劃", "準備衝刺", "資源整合", "關係深化"],
        &["鬆懈懈怠", "過度樂觀"],
    ),
];

const CAUTIOUS_PLAN: QuarterTable = [
    (
        &["穩健發展", "健康檢查", "關係維護", "學習充電"],
        &["冒險投資", "重大決策", "衝動行事"],
    ),
    (
        &["謹慎理財", "團隊合作", "溝通協調", "內部優化"],
        &["擴張過快", "獨斷專行", "忽視細節"],
    ),
    (
        &["風險管理", "資源整合", "關係修復", "心靈成長"],
        &["激進變革", "過度消費", "情緒化決策"],
    ),
    (
        &["總結反思", "穩定為主", "儲備能量", "感恩惜福"],
        &["急於求成", "過度焦慮", "放棄堅持"],
    ),
];

pub fn assess_risks(severity: Severity) -> RiskAssessment {
    use RiskLevel::*;
    let (health, wealth, career, relationship) = match severity {
        Severity::None => (Low, Low, Low, Low),
        Severity::Low => (Low, Low, Medium, Low),
        Severity::Medium => (Medium, Medium, Medium, Medium),
        Severity::High => (High, Medium, High, High),
    };
    RiskAssessment {
        health,
        wealth,
        career,
        relationship,
    }
}

fn quarter(entry: &(&[&str], &[&str])) -> QuarterlyPlan {
    QuarterlyPlan {
        suitable: entry.0.iter().map(|s| s.to_string()).collect(),
        avoid: entry.1.iter().map(|s| s.to_string()).collect(),
    }
}

/// Any Tai Sui conflict at all switches to the cautious plan.
pub fn action_plan(severity: Severity) -> ActionPlan {
    let table = match severity {
        Severity::None => &OPEN_YEAR_PLAN,
        _ => &CAUTIOUS_PLAN,
    };
    ActionPlan {
        q1: quarter(&table[0]),
        q2: quarter(&table[1]),
        q3: quarter(&table[2]),
        q4: quarter(&table[3]),
    }
}

/// Outlook for `current_year + 1` against the birth year's branch.
pub fn assess_next_year(
    oracle: &dyn CalendarOracle,
    birth: NaiveDateTime,
    current_year: i32,
) -> Result<NextYearFortune> {
    let year = current_year + 1;
    let lichun_date = lichun(oracle, year)?;
    let pillar = annual_pillar(oracle, lichun_date)?;
    let birth_branch = annual_pillar(oracle, birth)?.branch();

    let tai_sui = tai_sui_types(birth_branch, pillar.branch());
    debug!(
        "next year {} {}: birth branch {} -> {}",
        year, pillar, birth_branch, tai_sui.severity
    );

    Ok(NextYearFortune {
        year,
        pillar,
        lichun_date,
        tai_sui,
        risks: assess_risks(tai_sui.severity),
        action_plan: action_plan(tai_sui.severity),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_table() {
        assert_eq!(assess_risks(Severity::None).career, RiskLevel::Low);
        assert_eq!(assess_risks(Severity::Low).career, RiskLevel::Medium);
        assert_eq!(assess_risks(Severity::Low).health, RiskLevel::Low);
        assert_eq!(assess_risks(Severity::Medium).relationship, RiskLevel::Medium);
        let high = assess_risks(Severity::High);
        assert_eq!(high.health, RiskLevel::High);
        assert_eq!(high.wealth, RiskLevel::Medium);
    }

    #[test]
    fn plans_by_severity() {
        let open = action_plan(Severity::None);
        assert_eq!(open.q1.suitable[0], "事業擴展");
        assert_eq!(open.q4.avoid, ["鬆懈懈怠", "過度樂觀"]);
        for severity in [Severity::Low, Severity::Medium, Severity::High] {
            let plan = action_plan(severity);
            assert_eq!(plan.q1.suitable[0], "穩健發展");
            assert_eq!(plan.q3.avoid.len(), 3);
        }
    }
}
