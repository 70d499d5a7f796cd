// src/types/mod.rs
pub mod form;
pub mod response;

pub use form::{FieldValue, FormSnapshot, FormSnapshotBuilder};
pub use response::{AnalysisResult, SchemaError, ServiceErrorBody};
