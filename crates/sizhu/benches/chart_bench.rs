use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sizhu::ganzhi::pair_to_index;
use sizhu::{
    AstronomicalOracle, BirthInfo, Branch, CalendarOracle, ChartEngine, ChartSettings, Gender,
    SolarTerm, Stem, TermTable,
};

fn birth() -> BirthInfo {
    BirthInfo::new(
        NaiveDate::from_ymd_opt(1992, 9, 10)
            .unwrap()
            .and_hms_opt(5, 56, 0)
            .unwrap(),
        Gender::Male,
    )
    .with_longitude(121.5)
}

fn bench_calculate_chart(c: &mut Criterion) {
    let oracle = AstronomicalOracle::default();
    let engine = ChartEngine::new(&oracle, ChartSettings::default());
    let birth = birth();

    c.bench_function("calculate_chart_astronomical", |b| {
        b.iter(|| engine.calculate_chart(black_box(&birth)))
    });

    let table = TermTable::precompute(&oracle, 1991..=1993).unwrap();
    let engine = ChartEngine::new(&table, ChartSettings::default());
    c.bench_function("calculate_chart_term_table", |b| {
        b.iter(|| engine.calculate_chart(black_box(&birth)))
    });
}

fn bench_solar_term(c: &mut Criterion) {
    let oracle = AstronomicalOracle::default();
    c.bench_function("solar_term_lichun", |b| {
        b.iter(|| oracle.solar_term(black_box(2024), black_box(SolarTerm::LiChun)))
    });
}

fn bench_pair_to_index(c: &mut Criterion) {
    c.bench_function("pair_to_index", |b| {
        b.iter(|| pair_to_index(black_box(Stem::Gui), black_box(Branch::Hai)))
    });
}

fn bench_calculate_qi_yun(c: &mut Criterion) {
    let oracle = AstronomicalOracle::default();
    let engine = ChartEngine::new(&oracle, ChartSettings::default());
    let birth = birth();

    c.bench_function("calculate_qi_yun", |b| {
        b.iter(|| engine.calculate_qi_yun(black_box(&birth)))
    });
}

criterion_group!(
    benches,
    bench_calculate_chart,
    bench_solar_term,
    bench_pair_to_index,
    bench_calculate_qi_yun
);
criterion_main!(benches);
