// src/analysis/mod.rs
//! Resume to job description matching

pub mod extract;
pub mod roles;
pub mod similarity;
pub mod skills;

pub use extract::{DocumentKind, ExtractError};

use crate::types::AnalysisResult;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ResumeAnalyzer;

impl ResumeAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Score a resume against a job description and report skill gaps.
    pub fn analyze(&self, resume_text: &str, job_description: &str) -> AnalysisResult {
        let match_percentage = similarity::match_percentage(resume_text, job_description);

        let resume_skills = skills::extract_skills(resume_text);
        let job_skills = skills::extract_skills(job_description);
        let missing_skills = skills::missing_skills(&resume_skills, &job_skills);
        let suggested_roles = roles::suggest_roles(&resume_skills);

        debug!(
            match_percentage,
            resume_skills = resume_skills.len(),
            job_skills = job_skills.len(),
            missing = missing_skills.len(),
            "Resume analyzed"
        );

        AnalysisResult {
            match_percentage,
            resume_skills,
            missing_skills,
            suggested_roles,
        }
    }
}
