//! Five Elements (五行) distribution of a chart.
//!
//! Visible stems score 1.0 each. Hidden stems score by weight: a lone
//! primary 1.0, a primary sharing its branch 0.6, middle 0.3, residual 0.1.
//! The sum is scaled by the seasonal strength of the month branch.

use serde::{Deserialize, Serialize};

use crate::ganzhi::{hidden_stems, Branch, Element, HiddenStemWeight, Stem};
use crate::pillars::FourPillars;

pub const ELEMENTS: [Element; 5] = [
    Element::Wood,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Water,
];

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementScores {
    pub wood: f64,
    pub fire: f64,
    pub earth: f64,
    pub metal: f64,
    pub water: f64,
}

impl ElementScores {
    pub fn get(&self, element: Element) -> f64 {
        match element {
            Element::Wood => self.wood,
            Element::Fire => self.fire,
            Element::Earth => self.earth,
            Element::Metal => self.metal,
            Element::Water => self.water,
        }
    }

    fn slot(&mut self, element: Element) -> &mut f64 {
        match element {
            Element::Wood => &mut self.wood,
            Element::Fire => &mut self.fire,
            Element::Earth => &mut self.earth,
            Element::Metal => &mut self.metal,
            Element::Water => &mut self.water,
        }
    }

    pub fn add(&mut self, element: Element, score: f64) {
        *self.slot(element) += score;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Element, f64)> + '_ {
        ELEMENTS.into_iter().map(move |e| (e, self.get(e)))
    }

    pub fn total(&self) -> f64 {
        self.iter().map(|(_, s)| s).sum()
    }

    fn combine(
        &self,
        other: &ElementScores,
        f: impl Fn(Element, f64, f64) -> f64,
    ) -> ElementScores {
        let mut out = ElementScores::default();
        for e in ELEMENTS {
            *out.slot(e) = f(e, self.get(e), other.get(e));
        }
        out
    }
}

/// Season of a month branch. The four 墓 branches are transitional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
    Transitional,
}

impl Season {
    pub fn from_month_branch(branch: Branch) -> Season {
        match branch {
            Branch::Yin | Branch::Mao => Season::Spring,
            Branch::Si | Branch::Wu => Season::Summer,
            Branch::Shen | Branch::You => Season::Autumn,
            Branch::Hai | Branch::Zi => Season::Winter,
            Branch::Chou | Branch::Chen | Branch::Wei | Branch::Xu => Season::Transitional,
        }
    }

    /// The element in command of the season.
    pub fn ruler(self) -> Element {
        match self {
            Season::Spring => Element::Wood,
            Season::Summer => Element::Fire,
            Season::Autumn => Element::Metal,
            Season::Winter => Element::Water,
            Season::Transitional => Element::Earth,
        }
    }

    /// 1.5 for the ruler, 1.3 for what it produces, 1.0 for what produces it,
    /// 0.7 for what it controls, 0.5 for what controls it.
    pub fn coefficient(self, element: Element) -> f64 {
        let ruler = self.ruler();
        if element == ruler {
            1.5
        } else if ruler.produces() == element {
            1.3
        } else if element.produces() == ruler {
            1.0
        } else if ruler.controls() == element {
            0.7
        } else {
            0.5
        }
    }
}

pub fn stem_scores(stems: &[Stem]) -> ElementScores {
    let mut scores = ElementScores::default();
    for stem in stems {
        scores.add(stem.element(), 1.0);
    }
    scores
}

pub fn hidden_stem_scores(branches: &[Branch]) -> ElementScores {
    let mut scores = ElementScores::default();
    for &branch in branches {
        let hidden = hidden_stems(branch);
        for h in hidden {
            let weight = match h.weight {
                HiddenStemWeight::Primary if hidden.len() == 1 => 1.0,
                HiddenStemWeight::Primary => 0.6,
                HiddenStemWeight::Middle => 0.3,
                HiddenStemWeight::Residual => 0.1,
            };
            scores.add(h.stem.element(), weight);
        }
    }
    scores
}

/// `(stems + hidden) × seasonal coefficient` of `month_branch`.
pub fn seasonal_scores(
    stems: &ElementScores,
    hidden: &ElementScores,
    month_branch: Branch,
) -> ElementScores {
    let season = Season::from_month_branch(month_branch);
    stems.combine(hidden, |e, s, h| (s + h) * season.coefficient(e))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WuXingDistribution {
    pub stems: ElementScores,
    pub hidden_stems: ElementScores,
    pub season: Season,
    pub adjusted: ElementScores,
    pub dominant: Element,
    pub deficient: Element,
    /// `1 − σ/μ` of the adjusted scores, floored at 0; 1 is perfectly even.
    pub balance: f64,
}

pub fn wuxing_distribution(pillars: &FourPillars) -> WuXingDistribution {
    let all = pillars.to_array();
    let stems = stem_scores(&all.map(|p| p.stem()));
    let hidden = hidden_stem_scores(&all.map(|p| p.branch()));
    let adjusted = seasonal_scores(&stems, &hidden, pillars.month.branch());

    // ties keep the earlier element in production order
    let mut dominant = Element::Wood;
    let mut deficient = Element::Wood;
    for (element, score) in adjusted.iter().skip(1) {
        if score > adjusted.get(dominant) {
            dominant = element;
        }
        if score < adjusted.get(deficient) {
            deficient = element;
        }
    }

    WuXingDistribution {
        stems,
        hidden_stems: hidden,
        season: Season::from_month_branch(pillars.month.branch()),
        adjusted,
        dominant,
        deficient,
        balance: balance(&adjusted),
    }
}

fn balance(scores: &ElementScores) -> f64 {
    let n = ELEMENTS.len() as f64;
    let mean = scores.total() / n;
    if mean <= 0.0 {
        return 0.0;
    }
    let variance = scores.iter().map(|(_, s)| (s - mean).powi(2)).sum::<f64>() / n;
    (1.0 - variance.sqrt() / mean).max(0.0)
}
