//! Workflow runner: sequences the stages and reduces each to a step result.

pub mod presets;
pub mod runner;
pub mod types;

pub use presets::Preset;
pub use runner::WorkflowRunner;
pub use types::{StepStatus, WorkflowOptions, WorkflowOutcome, WorkflowReport, WorkflowResult};
