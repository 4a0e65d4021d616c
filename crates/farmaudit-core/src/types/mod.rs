//! Shared value types used by every stage.

pub mod severity;
pub mod status;
pub mod step;
pub mod timestamp;

pub use severity::{Severity, SeverityWeights};
pub use status::{Status, StatusThresholds};
pub use step::WorkflowStep;
pub use timestamp::report_timestamp;
