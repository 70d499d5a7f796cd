// src/client/targets.rs
use std::sync::Arc;

use super::error::BindError;
use super::page::{ElementLookup, FormElement, ListTarget, TextTarget};
use crate::types::AnalysisResult;

pub const FORM_ID: &str = "analyzeForm";
pub const MATCH_PERCENTAGE_ID: &str = "matchPercentage";
pub const YOUR_SKILLS_ID: &str = "yourSkills";
pub const MISSING_SKILLS_ID: &str = "missingSkills";
pub const JOB_ROLES_ID: &str = "jobRoles";

/// The form a handler submits and the four elements it renders into.
#[derive(Clone)]
pub struct ResultTargets {
    form: FormElement,
    match_percentage: Arc<dyn TextTarget>,
    your_skills: Arc<dyn ListTarget>,
    missing_skills: Arc<dyn ListTarget>,
    job_roles: Arc<dyn ListTarget>,
}

impl ResultTargets {
    pub fn new(
        form: FormElement,
        match_percentage: Arc<dyn TextTarget>,
        your_skills: Arc<dyn ListTarget>,
        missing_skills: Arc<dyn ListTarget>,
        job_roles: Arc<dyn ListTarget>,
    ) -> Self {
        Self {
            form,
            match_percentage,
            your_skills,
            missing_skills,
            job_roles,
        }
    }

    /// Resolve the form and targets by their well-known ids. Fails on the first absent element.
    pub fn bind(page: &impl ElementLookup) -> Result<Self, BindError> {
        Ok(Self::new(
            page.form(FORM_ID)?,
            page.text_target(MATCH_PERCENTAGE_ID)?,
            page.list_target(YOUR_SKILLS_ID)?,
            page.list_target(MISSING_SKILLS_ID)?,
            page.list_target(JOB_ROLES_ID)?,
        ))
    }

    pub fn form(&self) -> &FormElement {
        &self.form
    }

    /// Write a validated result into every target.
    pub fn render(&self, result: &AnalysisResult) {
        self.match_percentage
            .set_text(&result.match_percentage_label());
        fill(self.your_skills.as_ref(), &result.resume_skills);
        fill(self.missing_skills.as_ref(), &result.missing_skills);
        fill(self.job_roles.as_ref(), &result.suggested_roles);
    }
}

fn fill(list: &dyn ListTarget, entries: &[String]) {
    list.clear();
    for entry in entries {
        list.append_item(entry);
    }
}
