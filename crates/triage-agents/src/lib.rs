//! Model-facing stages of the incident-triage pipeline.
//!
//! ## Modules
//!
//! | Module      | Purpose                                                   |
//! |-------------|-----------------------------------------------------------|
//! | `config`    | Env-driven model / search / budget configuration          |
//! | `errors`    | `TransportError`, `PipelineError`, `ConfigError`          |
//! | `model`     | `ModelClient` boundary and the Rig-backed implementation  |
//! | `search`    | `SearchProvider` boundary and the Exa implementation      |
//! | `prompts`   | Reasoning and decision prompts, advisory escalation policy|
//! | `reasoner`  | Root-cause hypothesis stage                               |
//! | `knowledge` | Conditional external search stage                         |
//! | `decision`  | Final decision stage with the deterministic override      |
//! | `pipeline`  | `TriagePipeline`: ordering, rejection, top-level fail-safe|
//!
//! Deterministic pieces (classifier, context, extraction, override, recorder)
//! live in the `coordination` crate.

pub mod config;
pub mod decision;
pub mod errors;
pub mod knowledge;
pub mod model;
pub mod pipeline;
pub mod prompts;
pub mod reasoner;
pub mod search;

pub use config::TriageConfig;
pub use decision::DecisionOutcome;
pub use errors::{ConfigError, PipelineError, TransportError};
pub use model::{ModelClient, RigModelClient};
pub use pipeline::{TriagePipeline, TriageReport};
pub use search::{ExaSearch, SearchHit, SearchMode, SearchProvider};
