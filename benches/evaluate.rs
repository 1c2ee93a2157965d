//! Run these benches with `cargo bench --bench evaluate -- --verbose`
use criterion::{black_box, criterion_group, criterion_main, Criterion};

criterion_main!(evaluate_benches);

criterion_group!(evaluate_benches, evaluate_bench, batch_bench);

fn observations() -> Vec<cloud_seeding::Observation> {
    use cloud_seeding::Observation;
    use metfor::{Celsius, Meters, MetersPSec, Mm};

    let mut obs = vec![];
    for &top in &[2000.0, 3800.0, 6000.0] {
        for &refl in &[5.0, 12.0, 25.0] {
            for &precip in &[0.0, 12.0, 25.0] {
                obs.push(
                    Observation::new()
                        .with_cloud_base(Meters(800.0))
                        .with_cloud_top(Meters(top))
                        .with_cloud_top_temperature(Celsius(-8.0))
                        .with_reflectivity(refl)
                        .with_precip_rate(Mm(precip))
                        .with_wind_speed(MetersPSec(4.0))
                        .with_precipitable_water(Mm(8.0)),
                );
            }
        }
    }
    obs
}

fn evaluate_bench(c: &mut Criterion) {
    let obs = observations();

    c.bench_function("evaluate", |b| {
        b.iter(|| {
            for o in &obs {
                let _x = cloud_seeding::evaluate(black_box(o));
            }
        });
    });
}

fn batch_bench(c: &mut Criterion) {
    let input = std::fs::read("test_data/observations.csv").expect("oops");

    c.bench_function("batch", |b| {
        b.iter(|| {
            let mut output = Vec::with_capacity(input.len() * 2);
            let _x = cloud_seeding::batch::process(input.as_slice(), &mut output).expect("oops");
        });
    });
}
