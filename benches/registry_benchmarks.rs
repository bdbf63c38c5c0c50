//! Registry benchmarks
//!
//! Save/load/render throughput against the in-memory store:
//! - Persisting runs with growing metric counts
//! - Reloading persisted runs
//! - Rendering multi-run comparison reports

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use runreg::compare::compare_runs;
use runreg::persist::{load_run_from_path_with, save_run_to_registry_with};
use runreg::store::MemoryStore;
use runreg::ExperimentRun;

/// Create a run with the given number of logged metrics and one figure
fn create_test_run(run_id: &str, num_metrics: usize) -> ExperimentRun {
    let mut rng = rand::thread_rng();
    let mut run = ExperimentRun::builder("bench-exp").run_id(run_id).build();
    run.log_param("learning_rate", 0.001);
    run.log_param("optimizer", "adam");
    for i in 0..num_metrics {
        run.log_metric(format!("metric_{i}"), rng.gen_range(0.0..1.0));
    }
    run.log_figure(vec![0x89; 4096], "loss_curve");
    run.log_text("benchmark run", "notes");
    run
}

fn bench_save_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("save_run");
    for num_metrics in [10, 100, 1000] {
        let run = create_test_run("run-1", num_metrics);
        group.bench_with_input(
            BenchmarkId::from_parameter(num_metrics),
            &run,
            |b, run| {
                b.iter(|| {
                    let store = MemoryStore::new();
                    black_box(save_run_to_registry_with(run, "registry", &store, false).unwrap())
                });
            },
        );
    }
    group.finish();
}

fn bench_load_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_run");
    for num_metrics in [10, 100, 1000] {
        let run = create_test_run("run-1", num_metrics);
        let store = MemoryStore::new();
        let path = save_run_to_registry_with(&run, "registry", &store, false).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(num_metrics),
            &path,
            |b, path| {
                b.iter(|| black_box(load_run_from_path_with(path, &store).unwrap()));
            },
        );
    }
    group.finish();
}

fn bench_compare_runs(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_runs");
    for num_runs in [2, 4, 8] {
        let runs: Vec<ExperimentRun> = (0..num_runs)
            .map(|i| create_test_run(&format!("run-{i}"), 100))
            .collect();
        let refs: Vec<&ExperimentRun> = runs.iter().collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(num_runs),
            &refs,
            |b, refs| {
                b.iter(|| black_box(compare_runs(refs)));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_save_run, bench_load_run, bench_compare_runs);
criterion_main!(benches);
