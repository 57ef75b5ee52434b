//! Chart entry point: one calendar oracle plus settings.

use chrono::NaiveDateTime;
use log::debug;
use serde::{Deserialize, Serialize};
use sizhu_config::ChartSettings;

use crate::assessment::{assess_next_year, NextYearFortune};
use crate::birth::BirthInfo;
use crate::dayun::{generate_dayun, DaYun};
use crate::error::Result;
use crate::dayun::current_dayun;
use crate::ganzhi::{hidden_stems, ten_god, GanZhi, HiddenStem, Stem, TenGod};
use crate::interaction::{annual_interactions, AnnualInteraction};
use crate::pillars::{AnalyticPillars, FourPillars, PillarInstant, PillarStrategy};
use crate::qiyun::{qi_yun, FortuneDirection, MetabolicSpan};
use crate::solar_terms::CalendarOracle;
use crate::taisui::{annual_pillar, detect_tai_sui, TaiSuiTypes};
use crate::time::{date_to_julian_day, true_solar_time, TrueSolarTime};
use crate::wuxing::{wuxing_distribution, WuXingDistribution};

/// Per-pillar detail: the pair, its hidden stems, and Ten Gods against the day master.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarDetail {
    pub pillar: GanZhi,
    pub hidden_stems: Vec<HiddenStem>,
    /// `None` for the day pillar's own stem.
    pub stem_god: Option<TenGod>,
    pub hidden_gods: Vec<TenGod>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaziChart {
    pub birth: BirthInfo,
    pub instant: PillarInstant,
    pub true_solar_time: TrueSolarTime,
    pub julian_day: i64,
    pub pillars: FourPillars,
    pub details: [PillarDetail; 4],
    pub wuxing: WuXingDistribution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QiYunChart {
    pub direction: FortuneDirection,
    pub target_jie: NaiveDateTime,
    pub qiyun_date: NaiveDateTime,
    pub span: MetabolicSpan,
    pub dayun: Vec<DaYun>,
}

fn pillar_detail(pillar: GanZhi, day_master: Stem, is_day: bool) -> PillarDetail {
    let hidden = hidden_stems(pillar.branch()).to_vec();
    PillarDetail {
        pillar,
        stem_god: (!is_day).then(|| ten_god(day_master, pillar.stem())),
        hidden_gods: hidden.iter().map(|h| ten_god(day_master, h.stem)).collect(),
        hidden_stems: hidden,
    }
}

pub struct ChartEngine<'a> {
    calendar: &'a dyn CalendarOracle,
    settings: ChartSettings,
}

impl<'a> ChartEngine<'a> {
    pub fn new(calendar: &'a dyn CalendarOracle, settings: ChartSettings) -> Self {
        Self { calendar, settings }
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn calendar(&self) -> &'a dyn CalendarOracle {
        self.calendar
    }

    /// The analytic strategy wired to this engine's oracle.
    pub fn analytic(&self) -> AnalyticPillars<'a> {
        AnalyticPillars::new(self.calendar, self.settings.utc_offset_minutes)
    }

    pub fn true_solar_time(&self, birth: &BirthInfo) -> TrueSolarTime {
        let longitude = birth
            .longitude
            .unwrap_or_else(|| self.settings.fallback_longitude());
        true_solar_time(birth.timestamp, longitude, self.settings.standard_meridian)
    }

    pub fn pillar_instant(&self, birth: &BirthInfo) -> (PillarInstant, TrueSolarTime) {
        let tst = self.true_solar_time(birth);
        (PillarInstant::new(birth.timestamp, tst.corrected_time), tst)
    }

    pub fn calculate_chart(&self, birth: &BirthInfo) -> Result<BaziChart> {
        self.calculate_chart_with(&self.analytic(), birth)
    }

    /// Same as [`calculate_chart`](Self::calculate_chart) with a caller-chosen strategy.
    pub fn calculate_chart_with(
        &self,
        strategy: &dyn PillarStrategy,
        birth: &BirthInfo,
    ) -> Result<BaziChart> {
        birth.validate(&self.settings)?;
        let (instant, tst) = self.pillar_instant(birth);
        let pillars = strategy.four_pillars(&instant)?;
        debug!("{} chart for {}: {:?}", strategy.name(), birth.timestamp, pillars);

        let day_master = pillars.day.stem();
        let details = [
            pillar_detail(pillars.year, day_master, false),
            pillar_detail(pillars.month, day_master, false),
            pillar_detail(pillars.day, day_master, true),
            pillar_detail(pillars.hour, day_master, false),
        ];

        Ok(BaziChart {
            birth: birth.clone(),
            instant,
            true_solar_time: tst,
            julian_day: date_to_julian_day(instant.solar.date()),
            pillars,
            details,
            wuxing: wuxing_distribution(&pillars),
        })
    }

    pub fn calculate_qi_yun(&self, birth: &BirthInfo) -> Result<QiYunChart> {
        let chart = self.calculate_chart(birth)?;
        let result = qi_yun(
            self.calendar,
            birth.timestamp,
            chart.pillars.year.stem(),
            birth.gender,
            chart.instant.solar,
        )?;
        let dayun = generate_dayun(
            chart.pillars.month,
            birth.timestamp,
            result.qiyun_date,
            result.direction,
            self.settings.dayun_count,
        )?;

        Ok(QiYunChart {
            direction: result.direction,
            target_jie: result.target_jie,
            qiyun_date: result.qiyun_date,
            span: result.span,
            dayun,
        })
    }

    pub fn annual_pillar(&self, date: NaiveDateTime) -> Result<GanZhi> {
        annual_pillar(self.calendar, date)
    }

    pub fn detect_tai_sui(&self, birth: &BirthInfo, query: NaiveDateTime) -> Result<TaiSuiTypes> {
        birth.validate(&self.settings)?;
        detect_tai_sui(self.calendar, birth.timestamp, query)
    }

    /// The year at `query` against the natal chart, with the DaYun running then.
    pub fn annual_interactions(
        &self,
        birth: &BirthInfo,
        query: NaiveDateTime,
    ) -> Result<AnnualInteraction> {
        let chart = self.calculate_chart(birth)?;
        let fortune = self.calculate_qi_yun(birth)?;
        let dayun = current_dayun(&fortune.dayun, query).map(|d| d.pillar);
        annual_interactions(self.calendar, &chart.pillars, query, dayun)
    }

    pub fn assess_next_year(&self, birth: &BirthInfo, current_year: i32) -> Result<NextYearFortune> {
        birth.validate(&self.settings)?;
        assess_next_year(self.calendar, birth.timestamp, current_year)
    }
}
