// src/web/types.rs

use chrono::{DateTime, Utc};
use rocket::form::FromForm;
use rocket::fs::TempFile;
use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::serde::Serialize;
use rocket::{Request, Response};
use std::path::PathBuf;

use crate::analysis::ResumeAnalyzer;
use crate::types::ServiceErrorBody;

/// Multipart body of `POST /analyze`.
///
/// Both fields are optional at the form layer so that a missing resume is
/// reported with the service's own error body instead of a bare 422.
#[derive(FromForm)]
pub struct AnalyzeForm<'f> {
    pub resume: Option<TempFile<'f>>,
    pub job_description: Option<String>,
}

pub struct ServerState {
    pub upload_dir: PathBuf,
    pub analyzer: ResumeAnalyzer,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

/// `{"error": ...}` body with an HTTP status.
#[derive(Debug)]
pub struct ApiError {
    pub status: Status,
    pub message: String,
}

impl ApiError {
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(Status::BadRequest, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(Status::UnprocessableEntity, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(Status::InternalServerError, message)
    }

    pub fn body(&self) -> ServiceErrorBody {
        ServiceErrorBody {
            error: self.message.clone(),
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status;
        Response::build_from(Json(self.body()).respond_to(request)?)
            .status(status)
            .ok()
    }
}
