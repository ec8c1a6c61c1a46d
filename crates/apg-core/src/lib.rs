//! apg-core
//!
//! The form-state-to-template compiler: visibility, validation, record
//! building and prompt rendering. Depends on apg-domain only. No storage,
//! no terminal I/O; every function is synchronous and pure.

pub mod builder;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod validate;
pub mod visibility;

pub use builder::{build, build_with};
pub use error::ValidationFailure;
pub use pipeline::{generate, Generation};
pub use render::render;
pub use validate::{validate, validate_with, ValidationIssue, ValidationResult};
pub use visibility::{apply_visibility, compute_visibility, SchoolBranch, VisibilitySet};

#[cfg(test)]
mod tests;
