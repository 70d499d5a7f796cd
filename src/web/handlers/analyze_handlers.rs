// src/web/handlers/analyze_handlers.rs
//! Resume upload and analysis handler

use crate::analysis::DocumentKind;
use crate::types::AnalysisResult;
use crate::utils::{ensure_directory, unique_upload_name};
use crate::web::types::{AnalyzeForm, ApiError, ServerState};

use rocket::form::error::ErrorKind;
use rocket::form::{Errors, Form};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, info_span, warn, Instrument};

/// Maps a rejected multipart body to the service's error. Only an overrun of a
/// configured limit is reported as too large; any other unreadable body means
/// the resume part never arrived.
fn form_rejection(errors: &Errors<'_>) -> ApiError {
    let over_limit = errors
        .iter()
        .any(|e| matches!(e.kind, ErrorKind::InvalidLength { max: Some(_), .. }));

    if over_limit {
        warn!("Analyze request exceeds the upload limit: {}", errors);
        ApiError::new(Status::PayloadTooLarge, "Uploaded file is too large")
    } else {
        warn!("Analyze request without a readable resume part: {}", errors);
        ApiError::bad_request("No file uploaded")
    }
}

pub async fn analyze_handler(
    form: Result<Form<AnalyzeForm<'_>>, Errors<'_>>,
    state: &State<ServerState>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let mut form = form.map_err(|errors| form_rejection(&errors))?;
    let job_description = form.job_description.take().unwrap_or_default();

    let Some(resume) = form.resume.as_mut() else {
        warn!("Analyze request without a resume part");
        return Err(ApiError::bad_request("No file uploaded"));
    };

    // A part without a filename is a plain field, not an upload.
    let Some(raw_name) = resume.raw_name() else {
        warn!("Analyze request with a resume field that is not a file");
        return Err(ApiError::bad_request("No file uploaded"));
    };
    let file_name = raw_name.dangerous_unsafe_unsanitized_raw().as_str().to_string();

    if file_name.trim().is_empty() {
        warn!("Analyze request with an empty file name");
        return Err(ApiError::bad_request("Empty file name"));
    }

    let Some(kind) = DocumentKind::from_file_name(&file_name) else {
        warn!("Rejected resume with unsupported format: {}", file_name);
        return Err(ApiError::bad_request("Unsupported file format"));
    };

    let span = info_span!("analyze", kind = kind.extension(), size = resume.len());

    async move {
        info!(
            "Analyzing resume ({} bytes) against job description ({} chars)",
            resume.len(),
            job_description.len()
        );

        if let Err(e) = ensure_directory(&state.upload_dir).await {
            error!("Failed to create upload directory: {:#}", e);
            return Err(ApiError::internal("Failed to store uploaded file"));
        }

        let upload_path = state.upload_dir.join(unique_upload_name(kind.extension()));
        if let Err(e) = resume.move_copy_to(&upload_path).await {
            error!("Failed to save uploaded file: {}", e);
            return Err(ApiError::internal("Failed to store uploaded file"));
        }

        let bytes = tokio::fs::read(&upload_path).await;
        if let Err(e) = tokio::fs::remove_file(&upload_path).await {
            warn!("Failed to remove upload {}: {}", upload_path.display(), e);
        }
        let bytes = bytes.map_err(|e| {
            error!("Failed to read stored upload: {}", e);
            ApiError::internal("Failed to read uploaded file")
        })?;

        let resume_text = match tokio::task::spawn_blocking(move || kind.extract_text(&bytes)).await
        {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!("Text extraction failed: {}", e);
                return Err(ApiError::unprocessable(format!(
                    "Could not read resume: {}",
                    e
                )));
            }
            Err(e) => {
                error!("Text extraction task failed: {}", e);
                return Err(ApiError::unprocessable(
                    "Could not read resume: extraction aborted",
                ));
            }
        };

        let result = state.analyzer.analyze(&resume_text, &job_description);
        info!(
            "Resume analyzed: {}% match, {} skills, {} missing",
            result.match_percentage,
            result.resume_skills.len(),
            result.missing_skills.len()
        );

        Ok(Json(result))
    }
    .instrument(span)
    .await
}
