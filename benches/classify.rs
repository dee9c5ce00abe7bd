use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jersey_weather::classify::{classify_current, classify_day, classify_day_signals, ConditionSignals};
use jersey_weather::ForecastDay;
use serde_json::json;

fn bench_classify(c: &mut Criterion) {
    let by_icon = ForecastDay::from_value(&json!({ "dayIcon": "j.svg", "summary": "Thundery showers" }));
    let by_keywords = ForecastDay::from_value(&json!({
        "dayIcon": "unknown.svg",
        "dayToolTip": "Something new",
        "summary": "Cloudy start, rain spreading from the west with the risk of thunder later",
        "morningDescripiton": "Overcast with drizzle",
        "afternoonDescripiton": "Heavy showers, hail possible",
        "nightDescripiton": "Clearing, mist forming",
    }));
    let signals = ConditionSignals::from_day(&by_keywords);

    c.bench_function("classify_current_icon", |b| {
        b.iter(|| classify_current(black_box(&by_icon), black_box(14)))
    });
    c.bench_function("classify_day_keywords", |b| {
        b.iter(|| classify_day(black_box(&by_keywords)))
    });
    c.bench_function("classify_day_signals", |b| {
        b.iter(|| classify_day_signals(black_box(&signals)))
    });
}

criterion_group!(benches, bench_classify);
criterion_main!(benches);
