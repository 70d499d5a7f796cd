// src/utils.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Content type sent with a multipart file part
pub fn content_type_for(filename: &str) -> &'static str {
    match get_file_extension(filename).as_deref() {
        Some("pdf") => PDF_CONTENT_TYPE,
        Some("docx") => DOCX_CONTENT_TYPE,
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Unique on-disk name for an uploaded file. Client-supplied names never reach the file system.
pub fn unique_upload_name(extension: &str) -> String {
    format!("resume_{}.{}", uuid::Uuid::new_v4(), extension)
}

/// Ensure directory exists
pub async fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        tokio::fs::create_dir_all(path)
            .await
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Resolve a possibly relative path against the current working directory
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Ok(current_dir.join(path))
    }
}
