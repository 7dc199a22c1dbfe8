//! Materializing a selection: planning destination paths and copying files.

mod copy;
mod plan;

pub use copy::{copy_documents, CopyFailure, CopyReport};
pub use plan::{ExportPlan, PlannedCopy};
