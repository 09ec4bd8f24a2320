//! Dataset loading and audit-snapshot writing.

mod json;

pub use json::{
    AuditSnapshot, Dataset, ProjectionSettings, load_dataset, parse_dataset, write_snapshot,
};
