//! Flattening of Graph entitlement data into Terraform variables.

pub mod keys;
pub mod model;
pub mod pipeline;

pub use model::{AssignmentVars, ExportBundle};
pub use pipeline::run_export;
