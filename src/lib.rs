//! # Runreg: Lightweight Experiment Tracking
//!
//! Runreg records parameters, metrics, figures, and text for a training run,
//! persists runs to a pluggable object store, and renders side-by-side HTML
//! comparisons.
//!
//! The moving parts compose linearly:
//!
//! ```text
//! ExperimentRun ──save──> registry layout on an ObjectStore ──load──> ExperimentRun
//!       │                                                                  │
//!       └───────────────────────── compare_runs ───────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use runreg::{compare_runs, load_run_from_path, save_run_to_registry, ExperimentRun};
//!
//! let mut run = ExperimentRun::new("mnist-cnn");
//! run.log_param("learning_rate", 0.001);
//! run.log_metric("accuracy", 0.97);
//! run.log_text("converged after 8 epochs", "notes");
//!
//! let run_path = save_run_to_registry(&run, "/data/registry")?;
//! let reloaded = load_run_from_path(&run_path)?;
//!
//! let html = compare_runs(&[&run, &reloaded]);
//! # Ok::<(), runreg::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod compare;
pub mod error;
pub mod persist;
pub mod registry;
pub mod run;
pub mod store;

pub use compare::{compare_runs, compare_runs_with, CompareOptions};
pub use error::{Error, Result};
pub use persist::{
    load_run_from_path, load_run_from_registry, save_run_to_path, save_run_to_registry,
};
pub use run::{Artifact, ArtifactKind, ExperimentRun, LogValue};
pub use store::{LocalStore, MemoryStore, ObjectStore};
