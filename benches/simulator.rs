//! Benchmarks for the snake simulator and strip encoding.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use pixel_strip::{
    animation::{encode_slots_json, encode_strip},
    schema::{GapColor, SimulatorConfig},
    snake::SnakeSimulator,
};

fn bench_simulation_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_run");

    for seconds in [1u64, 8, 33] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}s", seconds)),
            &seconds,
            |b, &seconds| {
                b.iter(|| {
                    let simulator =
                        SnakeSimulator::new(SimulatorConfig::seeded(42), black_box(seconds))
                            .unwrap();
                    simulator.run().unwrap()
                });
            },
        );
    }

    group.finish();
}

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");

    let output = SnakeSimulator::new(SimulatorConfig::seeded(42), 33)
        .unwrap()
        .run()
        .unwrap();

    group.bench_function("strip_full_slot", |b| {
        b.iter(|| encode_strip(black_box(&output.slots[0]), GapColor::Red));
    });

    group.bench_function("json_all_slots", |b| {
        b.iter(|| encode_slots_json(black_box(&output.slots)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_simulation_run, bench_encoding);
criterion_main!(benches);
