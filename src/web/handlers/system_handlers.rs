// src/web/handlers/system_handlers.rs
use crate::web::types::HealthResponse;

use rocket::response::content::{RawHtml, RawJavaScript};
use rocket::serde::json::Json;
use tracing::debug;

/// Analysis page served at `/`. Carries the form and result targets the
/// submit handler binds to.
pub const INDEX_HTML: &str = include_str!("../../../static/index.html");

pub async fn index_handler() -> RawHtml<&'static str> {
    debug!("Serving analysis page");
    RawHtml(INDEX_HTML)
}

/// Submit handler for the analysis page. The form's `action` only applies
/// when scripts are disabled.
pub const SCRIPT_JS: &str = include_str!("../../../static/script.js");

pub async fn script_handler() -> RawJavaScript<&'static str> {
    debug!("Serving page script");
    RawJavaScript(SCRIPT_JS)
}

pub async fn health_handler() -> Json<HealthResponse> {
    debug!("Health check");
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: chrono::Utc::now(),
    })
}
