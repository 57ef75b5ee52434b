//! Annual interactions (流年交互): how a year's pillar meets a natal chart.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ganzhi::{Branch, Element, GanZhi, Stem};
use crate::pillars::{FourPillars, PillarPosition};
use crate::solar_terms::CalendarOracle;
use crate::taisui::{annual_pillar, Severity};

// 甲己 earth, 乙庚 metal, 丙辛 water, 丁壬 wood, 戊癸 fire; by stem index mod 5
const COMBINED_ELEMENTS: [Element; 5] = [
    Element::Earth,
    Element::Metal,
    Element::Water,
    Element::Wood,
    Element::Fire,
];

const SAN_HE: [([Branch; 3], Element); 4] = [
    ([Branch::Shen, Branch::Zi, Branch::Chen], Element::Water),
    ([Branch::Hai, Branch::Mao, Branch::Wei], Element::Wood),
    ([Branch::Yin, Branch::Wu, Branch::Xu], Element::Fire),
    ([Branch::Si, Branch::You, Branch::Chou], Element::Metal),
];

const SAN_HUI: [([Branch; 3], Element); 4] = [
    ([Branch::Yin, Branch::Mao, Branch::Chen], Element::Wood),
    ([Branch::Si, Branch::Wu, Branch::Wei], Element::Fire),
    ([Branch::Shen, Branch::You, Branch::Xu], Element::Metal),
    ([Branch::Hai, Branch::Zi, Branch::Chou], Element::Water),
];

/// 五合 partner of a stem and the element the pair transforms into.
pub fn stem_combination(stem: Stem) -> (Stem, Element) {
    let partner = Stem::from_index(stem.index() as i64 + 5);
    (partner, COMBINED_ELEMENTS[stem.index() % 5])
}

/// 六沖 partner: the opposite branch.
pub fn clashing_branch(branch: Branch) -> Branch {
    Branch::from_index(branch.index() as i64 + 6)
}

fn clash_severity(position: PillarPosition) -> Severity {
    match position {
        PillarPosition::Day => Severity::High,
        PillarPosition::Month => Severity::Medium,
        PillarPosition::Year | PillarPosition::Hour => Severity::Low,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StemCombination {
    pub pillar: PillarPosition,
    pub element: Element,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchClash {
    pub pillar: PillarPosition,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HarmonyKind {
    /// 三合
    #[serde(rename = "sanhe")]
    SanHe,
    /// 三會
    #[serde(rename = "sanhui")]
    SanHui,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarmoniousCombination {
    #[serde(rename = "type")]
    pub kind: HarmonyKind,
    pub branches: [Branch; 3],
    pub element: Element,
}

/// Natal stems that combine with the annual stem.
pub fn detect_stem_combinations(annual: Stem, natal: &FourPillars) -> Vec<StemCombination> {
    let (partner, element) = stem_combination(annual);
    natal
        .positioned()
        .filter(|(_, p)| p.stem() == partner)
        .map(|(pillar, _)| StemCombination { pillar, element })
        .collect()
}

/// Natal branches clashed by the annual branch; the day pillar weighs most.
pub fn detect_branch_clashes(annual: Branch, natal: &FourPillars) -> Vec<BranchClash> {
    let opposite = clashing_branch(annual);
    natal
        .positioned()
        .filter(|(_, p)| p.branch() == opposite)
        .map(|(pillar, _)| BranchClash {
            pillar,
            severity: clash_severity(pillar),
        })
        .collect()
}

/// Complete 三合 and 三會 sets among the annual, natal and optional DaYun branches.
pub fn detect_harmonious_combinations(
    annual: Branch,
    natal: &FourPillars,
    dayun: Option<Branch>,
) -> Vec<HarmoniousCombination> {
    let mut present: Vec<Branch> = natal.positioned().map(|(_, p)| p.branch()).collect();
    present.push(annual);
    present.extend(dayun);

    let sets = SAN_HE
        .iter()
        .map(|set| (HarmonyKind::SanHe, set))
        .chain(SAN_HUI.iter().map(|set| (HarmonyKind::SanHui, set)));

    sets.filter(|(_, (branches, _))| branches.iter().all(|b| present.contains(b)))
        .map(|(kind, &(branches, element))| HarmoniousCombination {
            kind,
            branches,
            element,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualInteraction {
    pub annual_pillar: GanZhi,
    pub dayun_pillar: Option<GanZhi>,
    pub stem_combinations: Vec<StemCombination>,
    pub branch_clashes: Vec<BranchClash>,
    pub harmonious_combinations: Vec<HarmoniousCombination>,
}

impl AnnualInteraction {
    pub fn is_quiet(&self) -> bool {
        self.stem_combinations.is_empty()
            && self.branch_clashes.is_empty()
            && self.harmonious_combinations.is_empty()
    }
}

/// Interactions between the pillar in force at `query` and a natal chart.
pub fn annual_interactions(
    oracle: &dyn CalendarOracle,
    natal: &FourPillars,
    query: NaiveDateTime,
    dayun_pillar: Option<GanZhi>,
) -> Result<AnnualInteraction> {
    let annual = annual_pillar(oracle, query)?;
    Ok(AnnualInteraction {
        annual_pillar: annual,
        dayun_pillar,
        stem_combinations: detect_stem_combinations(annual.stem(), natal),
        branch_clashes: detect_branch_clashes(annual.branch(), natal),
        harmonious_combinations: detect_harmonious_combinations(
            annual.branch(),
            natal,
            dayun_pillar.map(|p| p.branch()),
        ),
    })
}
