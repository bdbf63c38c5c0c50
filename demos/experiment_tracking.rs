//! Experiment Tracking Example
//!
//! Walks the full lifecycle: build two runs, persist them to a local
//! registry, list what the registry holds, reload a run, and export a
//! side-by-side HTML comparison.
//!
//! Run with: cargo run --example experiment_tracking

use anyhow::Result;
use runreg::registry::{latest_run_for_variant, list_experiments, list_runs, list_variants};
use runreg::{
    compare_runs_with, load_run_from_path, save_run_to_registry, CompareOptions, ExperimentRun,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Runreg Experiment Tracking ===\n");

    let registry_dir = tempfile::tempdir()?;
    let registry_uri = registry_dir.path().display().to_string();

    // -------------------------------------------------------------------------
    // 1. Record a baseline run
    // -------------------------------------------------------------------------
    println!("1. Recording baseline run...");

    let mut baseline = ExperimentRun::builder("resnet50-imagenet")
        .variant_id("baseline")
        .build();
    baseline.log_params([
        ("model", "resnet50"),
        ("optimizer", "sgd"),
    ]);
    baseline.log_param("learning_rate", 0.1);
    baseline.log_param("batch_size", 256);
    baseline.log_metric("top1_accuracy", 0.761);
    baseline.log_metric("top5_accuracy", 0.929);
    baseline.log_dict("hardware", [("gpu", "a100"), ("count", "8")]);
    baseline.log_text("baseline recipe, 90 epochs, step decay", "notes");

    println!("   Experiment: {}", baseline.experiment_id());
    println!("   Variant:    {}", baseline.variant_id());
    println!("   Run id:     {}", baseline.run_id());

    // -------------------------------------------------------------------------
    // 2. Record a tuned run
    // -------------------------------------------------------------------------
    println!("\n2. Recording tuned run...");

    let mut tuned = ExperimentRun::builder("resnet50-imagenet")
        .variant_id("cosine-lr")
        .build();
    tuned.log_params([
        ("model", "resnet50"),
        ("optimizer", "sgd"),
    ]);
    tuned.log_param("learning_rate", 0.5);
    tuned.log_param("batch_size", 1024);
    tuned.log_metric("top1_accuracy", 0.778);
    tuned.log_metric("top5_accuracy", 0.938);
    tuned.log_dict("hardware", [("gpu", "a100"), ("count", "8")]);
    tuned.log_text("cosine schedule + label smoothing", "notes");

    // -------------------------------------------------------------------------
    // 3. Persist both runs to the registry
    // -------------------------------------------------------------------------
    println!("\n3. Saving runs to {registry_uri}...");

    let baseline_path = save_run_to_registry(&baseline, &registry_uri)?;
    let tuned_path = save_run_to_registry(&tuned, &registry_uri)?;
    println!("   Saved: {baseline_path}");
    println!("   Saved: {tuned_path}");

    // -------------------------------------------------------------------------
    // 4. Browse the registry
    // -------------------------------------------------------------------------
    println!("\n4. Browsing the registry...");

    println!("   Experiments: {:?}", list_experiments(&registry_uri)?);
    println!(
        "   Variants:    {:?}",
        list_variants(&registry_uri, "resnet50-imagenet")?
    );
    println!(
        "   Runs (baseline): {:?}",
        list_runs(&registry_uri, "resnet50-imagenet", "baseline")?
    );
    println!(
        "   Latest baseline run: {}",
        latest_run_for_variant(&registry_uri, "resnet50-imagenet", "baseline")?
    );

    // -------------------------------------------------------------------------
    // 5. Reload and compare
    // -------------------------------------------------------------------------
    println!("\n5. Reloading baseline and rendering comparison...");

    let reloaded = load_run_from_path(&baseline_path)?;
    assert_eq!(reloaded.metrics(), baseline.metrics());

    let html = compare_runs_with(&[&reloaded, &tuned], &CompareOptions { inject_css: true });
    let report_path = std::env::temp_dir().join("runreg_comparison.html");
    std::fs::write(&report_path, &html)?;
    println!("   Report written to {}", report_path.display());
    println!("   Report size: {} bytes", html.len());

    Ok(())
}
