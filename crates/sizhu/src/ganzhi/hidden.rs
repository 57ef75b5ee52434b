//! Hidden stems (藏干) carried by each earthly branch.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ganzhi::types::{Branch, Stem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HiddenStemWeight {
    Primary,
    Middle,
    Residual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenStem {
    pub stem: Stem,
    pub weight: HiddenStemWeight,
    /// Days of the 30-day month the stem governs.
    pub days: u8,
}

use HiddenStemWeight::{Middle, Primary, Residual};

// (branch, [(stem, weight, days)])
const HIDDEN_STEM_TABLE: &[(Branch, &[(Stem, HiddenStemWeight, u8)])] = &[
    (Branch::Zi, &[(Stem::Gui, Primary, 30)]),
    (
        Branch::Chou,
        &[(Stem::Ji, Primary, 9), (Stem::Gui, Middle, 9), (Stem::Xin, Residual, 12)],
    ),
    (
        Branch::Yin,
        &[(Stem::Jia, Primary, 7), (Stem::Bing, Middle, 7), (Stem::Wu, Residual, 16)],
    ),
    (Branch::Mao, &[(Stem::Yi, Primary, 30)]),
    (
        Branch::Chen,
        &[(Stem::Wu, Primary, 9), (Stem::Yi, Middle, 9), (Stem::Gui, Residual, 12)],
    ),
    (
        Branch::Si,
        &[(Stem::Bing, Primary, 7), (Stem::Geng, Middle, 7), (Stem::Wu, Residual, 16)],
    ),
    (Branch::Wu, &[(Stem::Ding, Primary, 10), (Stem::Ji, Residual, 20)]),
    (
        Branch::Wei,
        &[(Stem::Ji, Primary, 9), (Stem::Ding, Middle, 9), (Stem::Yi, Residual, 12)],
    ),
    (
        Branch::Shen,
        &[(Stem::Geng, Primary, 7), (Stem::Ren, Middle, 7), (Stem::Wu, Residual, 16)],
    ),
    (Branch::You, &[(Stem::Xin, Primary, 30)]),
    (
        Branch::Xu,
        &[(Stem::Wu, Primary, 9), (Stem::Xin, Middle, 9), (Stem::Ding, Residual, 12)],
    ),
    (Branch::Hai, &[(Stem::Ren, Primary, 7), (Stem::Jia, Residual, 23)]),
];

lazy_static::lazy_static! {
    static ref HIDDEN_STEMS: HashMap<Branch, Vec<HiddenStem>> = HIDDEN_STEM_TABLE
        .iter()
        .map(|(branch, stems)| {
            let entries = stems
                .iter()
                .map(|&(stem, weight, days)| HiddenStem { stem, weight, days })
                .collect();
            (*branch, entries)
        })
        .collect();
}

/// Hidden stems of a branch, primary first.
pub fn hidden_stems(branch: Branch) -> &'static [HiddenStem] {
    HIDDEN_STEMS
        .get(&branch)
        .map(|v| v.as_slice())
        .unwrap_or(&[])
}

pub fn primary_hidden_stem(branch: Branch) -> Stem {
    hidden_stems(branch)
        .first()
        .map(|h| h.stem)
        .unwrap_or(Stem::Jia)
}

pub fn branch_contains_stem(branch: Branch, stem: Stem) -> bool {
    hidden_stems(branch).iter().any(|h| h.stem == stem)
}
