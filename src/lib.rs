//! Resume matcher: an analysis service that scores a resume against a job
//! description, and the client that submits the analysis form and renders
//! its results.

pub mod analysis;
pub mod cli;
pub mod client;
pub mod config;
pub mod types;
pub mod utils;
pub mod web;

pub use analysis::ResumeAnalyzer;
pub use client::{ResultTargets, SubmitHandler};
pub use config::AppConfig;
pub use types::{AnalysisResult, FormSnapshot};
pub use web::{build_rocket, start_web_server};
