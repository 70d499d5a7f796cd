// src/client/service_client.rs
//! HTTP client for the analysis service

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{debug, info, trace};

use super::error::SubmitError;
use crate::types::{AnalysisResult, FieldValue, FormSnapshot, ServiceErrorBody};

pub const ANALYZE_ENDPOINT: &str = "/analyze";
const PAGE_ENDPOINT: &str = "/";

/// Turns a captured form into a validated analysis.
#[async_trait]
pub trait AnalyzeBackend: Send + Sync + 'static {
    async fn analyze(&self, snapshot: &FormSnapshot) -> Result<AnalysisResult, SubmitError>;
}

pub struct AnalyzeClient {
    client: reqwest::Client,
    base_url: String,
}

impl AnalyzeClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the analysis page markup.
    pub async fn fetch_page(&self) -> Result<String> {
        let url = format!("{}{}", self.base_url, PAGE_ENDPOINT);
        info!("Fetching analysis page: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to GET {}", url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("HTTP {} fetching {}", status, url);
        }

        response
            .text()
            .await
            .context("Failed to read page body")
    }
}

#[async_trait]
impl AnalyzeBackend for AnalyzeClient {
    async fn analyze(&self, snapshot: &FormSnapshot) -> Result<AnalysisResult, SubmitError> {
        let url = format!("{}{}", self.base_url, ANALYZE_ENDPOINT);
        let form = multipart_form(snapshot)?;

        debug!("POST {} with {} fields", url, snapshot.len());
        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        trace!("Response status: {}", status);
        let body = response.text().await?;

        if !status.is_success() {
            return Err(SubmitError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        parse_analysis(&body)
    }
}

/// Decode then validate a response body.
pub fn parse_analysis(body: &str) -> Result<AnalysisResult, SubmitError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    Ok(AnalysisResult::from_value(value)?)
}

/// The service's `error` field when the body carries one, the raw body otherwise.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ServiceErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) if body.trim().is_empty() => "empty response".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

fn multipart_form(snapshot: &FormSnapshot) -> Result<Form, SubmitError> {
    let mut form = Form::new();
    for (name, value) in snapshot.fields() {
        form = match value {
            FieldValue::Text(text) => form.text(name.clone(), text.clone()),
            FieldValue::File {
                file_name,
                content_type,
                bytes,
            } => {
                let part = Part::bytes(bytes.clone())
                    .file_name(file_name.clone())
                    .mime_str(content_type)
                    .map_err(|e| SubmitError::Form {
                        field: name.clone(),
                        reason: e.to_string(),
                    })?;
                form.part(name.clone(), part)
            }
        };
    }
    Ok(form)
}
