//! Performance benchmarks for clinic_core using Criterion.rs.

use bevy_ecs::prelude::World;
use clinic_core::arrivals::ArrivalRateTable;
use clinic_core::clock::{EventKind, SimulationClock};
use clinic_core::distributions::{RandomStreams, ServiceTimeModel};
use clinic_core::runner::{initialize_simulation, run_until_empty, simulation_schedule};
use clinic_core::scenario::{build_replication, ClinicParams, StaffLevels};
use clinic_core::station::Station;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_replication(c: &mut Criterion) {
    let loads = [75u32, 150, 225];

    let mut group = c.benchmark_group("replication");
    for load in loads {
        group.bench_with_input(BenchmarkId::from_parameter(load), &load, |b, &load| {
            b.iter(|| {
                let mut world = World::new();
                let params = ClinicParams::stationary(load as f64)
                    .with_staffing(StaffLevels::for_daily_load(load));
                build_replication(&mut world, params, RandomStreams::new(42))
                    .expect("valid params");
                initialize_simulation(&mut world).expect("resources present");
                let mut schedule = simulation_schedule();
                black_box(run_until_empty(&mut world, &mut schedule, 1_000_000));
            });
        });
    }
    group.bench_function("non_stationary_fallback", |b| {
        b.iter(|| {
            let mut world = World::new();
            let params = ClinicParams::non_stationary(ArrivalRateTable::fallback());
            build_replication(&mut world, params, RandomStreams::new(42)).expect("valid params");
            initialize_simulation(&mut world).expect("resources present");
            let mut schedule = simulation_schedule();
            black_box(run_until_empty(&mut world, &mut schedule, 1_000_000));
        });
    });
    group.finish();
}

fn bench_calendar(c: &mut Criterion) {
    c.bench_function("calendar_schedule_pop_10k", |b| {
        b.iter(|| {
            let mut clock = SimulationClock::default();
            for i in 0..10_000u64 {
                clock.schedule_at((i * 7919 % 10_000) as f64, EventKind::Arrival, None);
            }
            while let Some(event) = clock.pop_next() {
                black_box(event);
            }
        });
    });
}

fn bench_service_sampling(c: &mut Criterion) {
    let model = ServiceTimeModel::default();
    let mut streams = RandomStreams::new(7);
    c.bench_function("service_time_samples", |b| {
        b.iter(|| {
            for station in Station::ALL {
                black_box(model.sample(&mut streams, station, false));
            }
        });
    });
}

criterion_group!(benches, bench_replication, bench_calendar, bench_service_sampling);
criterion_main!(benches);
