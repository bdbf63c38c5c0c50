//! Run Model
//!
//! In-memory representation of one experiment run's logged artifacts.
//!
//! ## Schema Overview
//!
//! ```text
//! ExperimentRun (experiment_id, variant_id, run_id)
//!     ├── params   (key -> LogValue)
//!     ├── metrics  (key -> LogValue)
//!     ├── dicts    (name -> key -> LogValue)
//!     └── artifacts (id -> Artifact)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use runreg::run::ExperimentRun;
//!
//! let mut run = ExperimentRun::new("exp-001");
//! run.log_param("batch_size", 32);
//! run.log_metric("loss", 0.42);
//! run.log_text("baseline configuration", "notes");
//!
//! assert_eq!(run.variant_id(), "main");
//! ```

mod artifact;
mod experiment_run;
mod value;

pub use artifact::{Artifact, ArtifactKind};
pub use experiment_run::{ExperimentRun, ExperimentRunBuilder};
pub use value::LogValue;
