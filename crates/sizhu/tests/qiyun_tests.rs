use chrono::{NaiveDate, NaiveDateTime};
use sizhu::qiyun::minutes_between;
use sizhu::{
    convert_metabolic_days, current_dayun, nearest_jie_term, qi_yun, qi_yun_date,
    AstronomicalOracle, BirthInfo, CalcError, CalendarOracle, ChartEngine, ChartSettings,
    FortuneDirection, Gender, SolarTerm, Stem,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
}

#[test]
fn test_yang_male_targets_next_jie() {
    init();
    let oracle = AstronomicalOracle::default();
    let birth = at(1992, 9, 10, 5, 56);
    let result = qi_yun(&oracle, birth, Stem::Ren, Gender::Male, birth).unwrap();

    assert_eq!(result.direction, FortuneDirection::Forward);
    assert!(result.target_jie > birth);
    assert_eq!(result.target_jie, oracle.solar_term(1992, SolarTerm::HanLu).unwrap());
}

#[test]
fn test_yang_female_targets_previous_jie() {
    init();
    let oracle = AstronomicalOracle::default();
    let birth = at(1992, 9, 10, 5, 56);
    let result = qi_yun(&oracle, birth, Stem::Ren, Gender::Female, birth).unwrap();

    assert_eq!(result.direction, FortuneDirection::Backward);
    assert!(result.target_jie < birth);
    assert_eq!(result.target_jie, oracle.solar_term(1992, SolarTerm::BaiLu).unwrap());
}

#[test]
fn test_search_crosses_year_boundary() {
    let oracle = AstronomicalOracle::default();
    let late = at(2001, 12, 30, 12, 0);
    let next = nearest_jie_term(&oracle, late, FortuneDirection::Forward).unwrap();
    assert_eq!(next, oracle.solar_term(2002, SolarTerm::XiaoHan).unwrap());

    let early = at(2002, 1, 2, 12, 0);
    let prev = nearest_jie_term(&oracle, early, FortuneDirection::Backward).unwrap();
    assert_eq!(prev, oracle.solar_term(2001, SolarTerm::DaXue).unwrap());
}

#[test]
fn test_qiyun_date_matches_metabolic_breakdown() {
    let oracle = AstronomicalOracle::default();
    let birth = at(1992, 9, 10, 5, 56);
    let result = qi_yun(&oracle, birth, Stem::Ren, Gender::Male, birth).unwrap();

    let real_days = (result.qiyun_date - birth).num_days();
    let span = convert_metabolic_days(minutes_between(result.target_jie, birth));
    let from_span = span.years as i64 * 365 + span.months as i64 * 30 + span.days as i64;
    assert_eq!(real_days, from_span);
    assert_eq!(
        qi_yun_date(&oracle, birth, Stem::Ren, Gender::Male, birth).unwrap(),
        result.qiyun_date
    );
}

#[test]
fn test_three_days_to_jie_is_one_year() {
    // 白露 1992 three days (4320 minutes) after birth
    let oracle = AstronomicalOracle::default();
    let bailu = oracle.solar_term(1992, SolarTerm::BaiLu).unwrap();
    let birth = bailu - chrono::Duration::days(3);
    let result = qi_yun(&oracle, birth, Stem::Jia, Gender::Male, birth).unwrap();
    assert_eq!(result.target_jie, bailu);
    assert_eq!((result.qiyun_date - birth).num_days(), 360);
}

struct AncientOracle;

impl CalendarOracle for AncientOracle {
    fn solar_term(&self, _year: i32, _term: SolarTerm) -> sizhu::Result<NaiveDateTime> {
        Ok(NaiveDate::from_ymd_opt(1000, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap())
    }
}

#[test]
fn test_missing_jie_is_reported() {
    let err = nearest_jie_term(&AncientOracle, at(2000, 6, 1, 0, 0), FortuneDirection::Forward)
        .unwrap_err();
    assert!(matches!(err, CalcError::NoJieFound { direction: "after", .. }));
}

#[test]
fn test_engine_builds_dayun_from_qiyun() {
    init();
    let oracle = AstronomicalOracle::default();
    let engine = ChartEngine::new(&oracle, ChartSettings::default());
    let birth = BirthInfo::new(at(1992, 9, 10, 5, 56), Gender::Male).with_longitude(120.0);
    let result = engine.calculate_qi_yun(&birth).unwrap();

    assert_eq!(result.direction, FortuneDirection::Forward);
    assert_eq!(result.dayun.len(), 10);
    assert_eq!(result.dayun[0].pillar.to_string(), "庚戌");
    assert_eq!(result.dayun[1].pillar.to_string(), "辛亥");
    assert_eq!(result.dayun[0].start_date, result.qiyun_date);

    let query = result.dayun[3].start_date;
    assert_eq!(current_dayun(&result.dayun, query), Some(&result.dayun[3]));
}

#[test]
fn test_year_past_oracle_range_fails() {
    let oracle = AstronomicalOracle::new(480, 1900, 1992);
    let birth = at(1992, 12, 20, 0, 0);
    // forward search needs 1993
    assert!(matches!(
        nearest_jie_term(&oracle, birth, FortuneDirection::Forward),
        Err(CalcError::OracleMiss { year: 1993, .. })
    ));
}
