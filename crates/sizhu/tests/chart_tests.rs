use chrono::{NaiveDate, NaiveDateTime};
use sizhu::ganzhi::{Stem, TenGod};
use sizhu::{
    calendar_from_settings, has_passed_lichun, lichun_dates_between, solar_term_time,
    AstronomicalOracle, BirthInfo, CalcError, CalendarOracle, ChartEngine, ChartSettings, Element,
    Gender, OraclePillars, Season, SolarTerm, TermTable,
};
use sizhu_config::load_settings_from_str;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
}

#[test]
fn test_chart_details_carry_ten_gods() {
    init();
    let oracle = AstronomicalOracle::default();
    let engine = ChartEngine::new(&oracle, ChartSettings::default());
    let chart = engine
        .calculate_chart(&BirthInfo::new(at(1992, 9, 10, 5, 56), Gender::Male))
        .unwrap();

    // day master 己
    assert_eq!(chart.pillars.day.stem(), Stem::Ji);
    let [year, month, day, hour] = &chart.details;
    assert_eq!(year.stem_god, Some(TenGod::DirectWealth));
    assert_eq!(month.stem_god, Some(TenGod::Companion));
    assert_eq!(day.stem_god, None);
    assert_eq!(hour.stem_god, Some(TenGod::IndirectResource));
    // 丑 hides 己 癸 辛
    assert_eq!(day.hidden_stems.len(), 3);
    assert_eq!(day.hidden_gods[0], TenGod::Companion);
}

#[test]
fn test_chart_with_oracle_strategy_matches_analytic() {
    init();
    let oracle = AstronomicalOracle::default();
    let engine = ChartEngine::new(&oracle, ChartSettings::default());
    let birth = BirthInfo::new(at(1976, 7, 28, 3, 42), Gender::Female).with_longitude(118.2);

    let analytic = engine.calculate_chart(&birth).unwrap();
    let adapted = engine
        .calculate_chart_with(&OraclePillars::new(&oracle), &birth)
        .unwrap();
    assert_eq!(analytic.pillars, adapted.pillars);
}

#[test]
fn test_default_longitude_from_settings() {
    let oracle = AstronomicalOracle::default();
    let settings = load_settings_from_str("[chart]\ndefault_longitude = 90.0\n").unwrap();
    let engine = ChartEngine::new(&oracle, settings);
    let birth = BirthInfo::new(at(2010, 3, 20, 7, 5), Gender::Male);
    let tst = engine.true_solar_time(&birth);
    assert!((tst.longitude_correction + 120.0).abs() < 1e-9);
}

#[test]
fn test_out_of_era_birth_is_rejected() {
    let oracle = AstronomicalOracle::default();
    let engine = ChartEngine::new(&oracle, ChartSettings::default());
    let err = engine
        .calculate_chart(&BirthInfo::new(at(1750, 5, 1, 12, 0), Gender::Male))
        .unwrap_err();
    assert!(matches!(err, CalcError::InvalidBirthInfo(_)));
}

#[test]
fn test_chart_json_shape() {
    let oracle = AstronomicalOracle::default();
    let engine = ChartEngine::new(&oracle, ChartSettings::default());
    let chart = engine
        .calculate_chart(&BirthInfo::new(at(2008, 8, 8, 20, 8), Gender::Female))
        .unwrap();
    let json = serde_json::to_value(&chart).unwrap();
    assert_eq!(json["pillars"]["day"], "庚辰");
    assert!(json["trueSolarTime"]["correctedTime"].is_string());
    assert!(json["julianDay"].is_i64());
    assert_eq!(json["details"].as_array().unwrap().len(), 4);
}

#[test]
fn test_term_table_file_as_oracle() {
    init();
    let source = AstronomicalOracle::default();
    let table = TermTable::precompute(&source, 1987..=1989).unwrap();
    let path = std::env::temp_dir().join(format!("sizhu-terms-{}.json", std::process::id()));
    table.save(&path).unwrap();

    let settings = ChartSettings {
        term_table: Some(path.clone()),
        ..ChartSettings::default()
    };
    let loaded = calendar_from_settings(&settings).unwrap();
    assert_eq!(
        loaded.solar_term(1988, SolarTerm::LiChun).unwrap(),
        source.solar_term(1988, SolarTerm::LiChun).unwrap()
    );
    assert!(matches!(
        loaded.solar_term(1990, SolarTerm::LiChun),
        Err(CalcError::OracleMiss { year: 1990, .. })
    ));

    let engine = ChartEngine::new(loaded.as_ref(), settings);
    let chart = engine
        .calculate_chart(&BirthInfo::new(at(1988, 2, 5, 12, 0), Gender::Male))
        .unwrap();
    assert_eq!(chart.pillars.year.to_string(), "戊辰");

    let _ = std::fs::remove_file(path);
}

#[test]
fn test_lichun_helpers() {
    let oracle = AstronomicalOracle::default();
    assert!(!has_passed_lichun(&oracle, at(2024, 2, 1, 0, 0)).unwrap());
    assert!(has_passed_lichun(&oracle, at(2024, 2, 5, 0, 0)).unwrap());

    let dates = lichun_dates_between(&oracle, at(2024, 2, 5, 0, 0), at(2026, 2, 5, 0, 0)).unwrap();
    assert_eq!(dates.len(), 2);
    assert_eq!(dates[0], solar_term_time(&oracle, 2025, "立春").unwrap());
}

#[test]
fn test_chart_carries_wuxing_distribution() {
    init();
    let oracle = AstronomicalOracle::default();
    let engine = ChartEngine::new(&oracle, ChartSettings::default());
    let chart = engine
        .calculate_chart(&BirthInfo::new(at(1992, 9, 10, 5, 56), Gender::Male))
        .unwrap();

    let wuxing = &chart.wuxing;
    assert_eq!(wuxing.season, Season::Autumn);
    assert_eq!(wuxing.dominant, Element::Earth);
    assert_eq!(wuxing.deficient, Element::Fire);
    assert!((wuxing.adjusted.metal - 2.55).abs() < 1e-9);
    assert!(wuxing.balance > 0.0 && wuxing.balance < 1.0);

    let json = serde_json::to_value(&chart).unwrap();
    assert_eq!(json["wuxing"]["dominant"], "earth");
}
