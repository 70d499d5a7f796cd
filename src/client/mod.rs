// src/client/mod.rs
//! Client side of the analysis form: page binding, submission and rendering

pub mod error;
pub mod handler;
pub mod page;
pub mod service_client;
pub mod targets;

pub use error::{BindError, SubmitError};
pub use handler::{Settled, Submission, SubmitHandler};
pub use page::{ElementLookup, FormElement, HtmlPage, ListTarget, MemoryList, MemoryText, TextTarget};
pub use service_client::{AnalyzeBackend, AnalyzeClient, ANALYZE_ENDPOINT};
pub use targets::{
    ResultTargets, FORM_ID, JOB_ROLES_ID, MATCH_PERCENTAGE_ID, MISSING_SKILLS_ID, YOUR_SKILLS_ID,
};
