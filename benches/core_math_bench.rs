use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use telechart_rs::core::{
    ChartData, LineSeries, PrimaryAxis, SeriesId, nearest_index, time_ticks, value_ticks,
};
use telechart_rs::interaction::PointerEvent;
use telechart_rs::render::{Color, NullRenderer};
use telechart_rs::{ChartConfig, ChartEvent, LineChart};

const DAY_MS: f64 = 86_400_000.0;

fn dataset(samples: usize) -> ChartData {
    let axis: Vec<f64> = (0..samples)
        .map(|i| 1_542_412_800_000.0 + i as f64 * DAY_MS)
        .collect();
    let series = (0..4)
        .map(|s| {
            let data = (0..samples)
                .map(|i| {
                    let t = i as f64;
                    1_000.0 + (t * 0.05 + f64::from(s)).sin() * 400.0 + t * f64::from(s)
                })
                .collect();
            LineSeries::new(SeriesId::new(format!("y{s}")), format!("#{s}"), Color::RED, data)
        })
        .collect();
    ChartData {
        primary_axis: PrimaryAxis::new(axis).expect("monotonic axis"),
        series,
    }
}

fn bench_value_ticks(c: &mut Criterion) {
    c.bench_function("value_ticks_6", |b| {
        b.iter(|| value_ticks(black_box(-1_234.5), black_box(98_765.4), black_box(6)))
    });
}

fn bench_time_ticks(c: &mut Criterion) {
    let min = 1_542_412_800_000.0;
    let max = min + 400.0 * DAY_MS;
    c.bench_function("time_ticks_1920px", |b| {
        b.iter(|| time_ticks(black_box(min), black_box(max), black_box(1_920.0)))
    });
}

fn bench_nearest_index_100k(c: &mut Criterion) {
    let coords: Vec<f64> = (0..100_000).map(|i| f64::from(i) * 1.5).collect();
    c.bench_function("nearest_index_100k", |b| {
        b.iter(|| {
            nearest_index(
                black_box(&coords),
                black_box(61_234.7),
                black_box(10_000),
                black_box(90_000),
            )
        })
    });
}

fn bench_main_frame_2k(c: &mut Criterion) {
    let mut chart =
        LineChart::new(dataset(2_000), ChartConfig::default().with_width(1_600)).expect("chart");
    let mut renderer = NullRenderer::default();
    let mut timestamp = 0.0;
    let mut pointer = 0.0;

    c.bench_function("main_frame_2k", |b| {
        b.iter(|| {
            pointer = (pointer + 7.0) % 1_600.0;
            chart.dispatch(ChartEvent::MainPointerMove(PointerEvent::mouse(pointer)));
            timestamp += 16.0;
            chart
                .advance(black_box(timestamp), &mut renderer)
                .expect("frame should render");
        })
    });
}

criterion_group!(
    benches,
    bench_value_ticks,
    bench_time_ticks,
    bench_nearest_index_100k,
    bench_main_frame_2k
);
criterion_main!(benches);
