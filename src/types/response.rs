// src/types/response.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body returned by `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub match_percentage: f64,
    pub resume_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub suggested_roles: Vec<String>,
}

/// Error body returned by the service for rejected requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("response does not match the analysis schema: {0}")]
    Shape(#[from] serde_json::Error),
    #[error("match_percentage out of range: {0}")]
    PercentageOutOfRange(f64),
}

impl AnalysisResult {
    /// Validate a decoded JSON document against the analysis schema.
    ///
    /// Every field is required; unknown fields are ignored.
    pub fn from_value(value: serde_json::Value) -> Result<Self, SchemaError> {
        let result: AnalysisResult = serde_json::from_value(value)?;
        result.validate()?;
        Ok(result)
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        let pct = self.match_percentage;
        if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
            return Err(SchemaError::PercentageOutOfRange(pct));
        }
        Ok(())
    }

    /// Text shown in the match percentage target.
    pub fn match_percentage_label(&self) -> String {
        // Adding zero turns -0.0 into 0.0.
        format!("Match Percentage: {}%", self.match_percentage + 0.0)
    }
}
