use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use bucketlist::{
    config::PlannerConfig,
    core::{progress::Progress, store::DestinationStore},
    destination::{DestinationDraft, DestinationPatch},
    interchange::{export_json, parse_import},
    persist::memory::MemorySlots,
    planner::Planner,
};

fn draft(i: u32) -> DestinationDraft {
    DestinationDraft::at(f64::from(i % 180) - 90.0, f64::from(i % 360) - 180.0).titled(format!("stop {i}"))
}

fn bench_creates(c: &mut Criterion) {
    c.bench_function("store_create_10k", |b| {
        b.iter(|| {
            let mut store = DestinationStore::new();
            for i in 0..10_000u32 {
                let _ = store.create(draft(i)).expect("create");
            }
        });
    });
}

fn bench_persisted_toggles(c: &mut Criterion) {
    let mut group = c.benchmark_group("planner_toggle");
    for n in [10usize, 100, 1000] {
        let mut planner = Planner::hydrate(MemorySlots::new(), PlannerConfig::default());
        for i in 0..n as u32 {
            planner.create(draft(i)).expect("create");
        }
        let id = planner.records()[0].id.clone();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let _ = planner.toggle(&id).expect("toggle");
            });
        });
    }
    group.finish();
}

fn bench_export_import(c: &mut Criterion) {
    let mut store = DestinationStore::new();
    for i in 0..1000u32 {
        let (id, _) = store.create(draft(i)).expect("create");
        if i % 3 == 0 {
            store.update(&id, &DestinationPatch::completion(true));
        }
    }
    let text = export_json(store.records()).expect("export");

    c.bench_function("export_1k", |b| {
        b.iter(|| export_json(store.records()).expect("export"));
    });
    c.bench_function("import_1k", |b| {
        b.iter(|| parse_import(&text, true).expect("import"));
    });
    c.bench_function("progress_1k", |b| {
        b.iter(|| Progress::of(store.records()));
    });
}

criterion_group!(benches, bench_creates, bench_persisted_toggles, bench_export_import);
criterion_main!(benches);
