//! Four Pillars (BaZi) calendrical engine.
//!
//! Pure, synchronous calculations over value types. The only external
//! collaborator is a [`CalendarOracle`] supplying solar-term instants,
//! injected by reference.

pub mod assessment;
pub mod birth;
pub mod chart;
pub mod dayun;
pub mod error;
pub mod ganzhi;
pub mod interaction;
pub mod pillars;
pub mod qiyun;
pub mod solar_terms;
pub mod taisui;
pub mod time;
pub mod wuxing;

pub use assessment::{
    action_plan, assess_next_year, assess_risks, ActionPlan, NextYearFortune, QuarterlyPlan,
    RiskAssessment, RiskLevel,
};
pub use birth::{BirthInfo, Gender};
pub use chart::{BaziChart, ChartEngine, PillarDetail, QiYunChart};
pub use dayun::{current_dayun, generate_dayun, DaYun};
pub use error::{CalcError, Result};
pub use ganzhi::{index_to_pair, pair_to_index, Branch, Element, GanZhi, Stem};
pub use interaction::{
    annual_interactions, detect_branch_clashes, detect_harmonious_combinations,
    detect_stem_combinations, AnnualInteraction, BranchClash, HarmoniousCombination, HarmonyKind,
    StemCombination,
};
pub use pillars::{
    cross_validate, AnalyticPillars, FourPillars, OraclePillars, PillarInstant, PillarPosition,
    PillarStrategy,
};
pub use qiyun::{
    convert_metabolic_days, fortune_direction, nearest_jie_term, qi_yun, qi_yun_date,
    FortuneDirection, MetabolicSpan, QiYun,
};
pub use solar_terms::{
    calendar_from_settings, has_passed_lichun, lichun_dates_between,
    month_branch_from_solar_longitude, solar_term_time, AstronomicalOracle, CalendarOracle,
    PillarOracle, SolarTerm, TermTable,
};
pub use taisui::{annual_pillar, detect_tai_sui, tai_sui_types, Severity, TaiSuiTypes};
pub use time::{
    date_to_julian_day, equation_of_time, julian_day_to_date, true_solar_time, TrueSolarTime,
};

pub use wuxing::{wuxing_distribution, ElementScores, Season, WuXingDistribution};

pub use sizhu_config::ChartSettings;
