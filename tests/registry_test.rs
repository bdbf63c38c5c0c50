//! Registry Listing Tests
//!
//! Listing experiments, variants, and runs over saved registries.

use runreg::registry::{
    latest_run_for_variant, list_experiments, list_runs, list_variants,
};
use runreg::store::MemoryStore;
use runreg::{persist, Error, ExperimentRun};

fn save(store: &MemoryStore, experiment_id: &str, variant_id: &str, run_id: &str) {
    let mut run = ExperimentRun::builder(experiment_id)
        .variant_id(variant_id)
        .run_id(run_id)
        .build();
    run.log_metric("loss", 0.5);
    persist::save_run_to_registry_with(&run, "registry", store, false).unwrap();
}

#[test]
fn test_list_experiments() {
    let store = MemoryStore::new();
    save(&store, "exp-b", "main", "run-1");
    save(&store, "exp-a", "main", "run-1");

    let experiments = runreg::registry::list_experiments_with("registry", &store).unwrap();
    assert_eq!(experiments, vec!["exp-a", "exp-b"]);
}

#[test]
fn test_list_variants() {
    let store = MemoryStore::new();
    save(&store, "exp-a", "main", "run-1");
    save(&store, "exp-a", "tuned", "run-1");
    save(&store, "exp-b", "other", "run-1");

    let variants =
        runreg::registry::list_variants_with("registry", "exp-a", &store).unwrap();
    assert_eq!(variants, vec!["main", "tuned"]);
}

#[test]
fn test_list_runs_and_latest() {
    let store = MemoryStore::new();
    save(&store, "exp-a", "main", "2026_01_01__00_00_00");
    save(&store, "exp-a", "main", "2026_02_01__00_00_00");
    save(&store, "exp-a", "tuned", "2026_03_01__00_00_00");

    let runs = runreg::registry::list_runs_with("registry", "exp-a", "main", &store).unwrap();
    assert_eq!(runs, vec!["2026_01_01__00_00_00", "2026_02_01__00_00_00"]);

    let latest =
        runreg::registry::latest_run_for_variant_with("registry", "exp-a", "main", &store)
            .unwrap();
    assert_eq!(latest, "2026_02_01__00_00_00");
}

#[test]
fn test_latest_run_without_runs_errors() {
    let store = MemoryStore::new();
    save(&store, "exp-a", "main", "run-1");

    let err = runreg::registry::latest_run_for_variant_with("registry", "exp-a", "tuned", &store)
        .unwrap_err();
    assert!(matches!(err, Error::NoRuns { .. }));
}

// =============================================================================
// Local Filesystem Registry
// =============================================================================

#[test]
fn test_listing_over_local_registry() {
    let dir = tempfile::tempdir().unwrap();
    let registry_uri = dir.path().display().to_string();

    for (experiment, variant, run_id) in [
        ("vision", "main", "2026_01_10__09_00_00"),
        ("vision", "main", "2026_01_11__09_00_00"),
        ("vision", "augmented", "2026_01_12__09_00_00"),
        ("language", "main", "2026_01_13__09_00_00"),
    ] {
        let run = ExperimentRun::builder(experiment)
            .variant_id(variant)
            .run_id(run_id)
            .build();
        runreg::save_run_to_registry(&run, &registry_uri).unwrap();
    }

    assert_eq!(
        list_experiments(&registry_uri).unwrap(),
        vec!["language", "vision"]
    );
    assert_eq!(
        list_variants(&registry_uri, "vision").unwrap(),
        vec!["augmented", "main"]
    );
    assert_eq!(
        list_runs(&registry_uri, "vision", "main").unwrap(),
        vec!["2026_01_10__09_00_00", "2026_01_11__09_00_00"]
    );
    assert_eq!(
        latest_run_for_variant(&registry_uri, "vision", "main").unwrap(),
        "2026_01_11__09_00_00"
    );
}
