//! Test generator: introspects services and hooks and writes jest skeletons.

pub mod generator;
pub mod introspect;
pub mod templates;
pub mod types;

pub use generator::TestGenerator;
pub use introspect::{extract_hook_names, extract_methods, extract_return_keys};
pub use types::{
    Coverage, GenerationStatus, TestGenReport, TestGenerationResult, TestKind, TestTemplate,
};
