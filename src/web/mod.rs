// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use crate::analysis::ResumeAnalyzer;
use crate::config::ServerSettings;
use crate::types::AnalysisResult;
use crate::utils::ensure_directory;
use anyhow::Result;
use rocket::data::{Limits, ToByteUnit};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::form::{Errors, Form};
use rocket::http::{Header, Status};
use rocket::response::content::{RawHtml, RawJavaScript};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::{error, info};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[get("/")]
pub async fn index() -> RawHtml<&'static str> {
    handlers::index_handler().await
}

#[get("/static/script.js")]
pub async fn script() -> RawJavaScript<&'static str> {
    handlers::script_handler().await
}

#[post("/analyze", data = "<form>")]
pub async fn analyze(
    form: Result<Form<AnalyzeForm<'_>>, Errors<'_>>,
    state: &State<ServerState>,
) -> Result<Json<AnalysisResult>, ApiError> {
    handlers::analyze_handler(form, state).await
}

#[get("/health")]
pub async fn health() -> Json<HealthResponse> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<crate::types::ServiceErrorBody> {
    Json(ApiError::bad_request("Invalid request format").body())
}

#[rocket::catch(404)]
pub fn not_found() -> Json<crate::types::ServiceErrorBody> {
    Json(ApiError::new(Status::NotFound, "Not found").body())
}

#[rocket::catch(413)]
pub fn payload_too_large() -> Json<crate::types::ServiceErrorBody> {
    Json(ApiError::new(Status::PayloadTooLarge, "Uploaded file is too large").body())
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<crate::types::ServiceErrorBody> {
    Json(ApiError::unprocessable("Malformed form submission").body())
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<crate::types::ServiceErrorBody> {
    Json(ApiError::internal("Internal server error").body())
}

/// Assemble the application without launching it.
pub fn build_rocket(settings: &ServerSettings) -> Rocket<Build> {
    let upload_limit = settings.max_upload_mb.mebibytes();
    let limits = Limits::default()
        .limit("file", upload_limit)
        .limit("data-form", upload_limit + 1.mebibytes());

    let figment = rocket::Config::figment()
        .merge(("address", settings.address))
        .merge(("port", settings.port))
        .merge(("limits", limits));

    let state = ServerState {
        upload_dir: settings.upload_dir.clone(),
        analyzer: ResumeAnalyzer::new(),
    };

    rocket::custom(figment)
        .attach(Cors)
        .manage(state)
        .register(
            "/",
            catchers![
                bad_request,
                not_found,
                payload_too_large,
                unprocessable,
                internal_error
            ],
        )
        .mount("/", routes![index, script, analyze, health, options])
}

// Main server start function
pub async fn start_web_server(settings: ServerSettings) -> Result<()> {
    ensure_directory(&settings.upload_dir).await?;

    info!("Starting resume matcher API server");
    info!("Uploads: {}", settings.upload_dir.display());
    info!("Server: http://{}:{}", settings.address, settings.port);

    if let Err(e) = build_rocket(&settings).launch().await {
        error!("Server stopped with error: {}", e);
        return Err(anyhow::anyhow!("Rocket failed: {}", e));
    }

    Ok(())
}
