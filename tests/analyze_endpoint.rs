use std::io::{Cursor, Write};

use resume_matcher::client::{HtmlPage, ResultTargets, FORM_ID};
use resume_matcher::config::ServerSettings;
use resume_matcher::types::{AnalysisResult, ServiceErrorBody};
use resume_matcher::web::build_rocket;
use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use zip::write::SimpleFileOptions;

const BOUNDARY: &str = "X-RESUME-MATCHER-BOUNDARY";
const DOCX_TYPE: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

struct Part<'a> {
    name: &'a str,
    file: Option<(&'a str, &'a str)>,
    body: &'a [u8],
}

fn multipart(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part.file {
            Some((file_name, content_type)) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                    part.name, file_name, content_type
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name).as_bytes(),
            ),
        }
        body.extend_from_slice(part.body);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn docx(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
        .collect();
    let xml = format!(
        "<w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\"><w:body>{}</w:body></w:document>",
        body
    );
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

async fn client(upload_dir: &std::path::Path) -> Client {
    let settings = ServerSettings {
        upload_dir: upload_dir.to_path_buf(),
        ..ServerSettings::default()
    };
    Client::tracked(build_rocket(&settings))
        .await
        .expect("valid rocket instance")
}

fn multipart_type() -> ContentType {
    ContentType::new("multipart", "form-data").with_params(("boundary", BOUNDARY))
}

#[rocket::async_test]
async fn analyze_docx_resume() {
    let uploads = tempfile::tempdir().unwrap();
    let client = client(uploads.path()).await;

    let resume = docx(&[
        "Python developer building Flask services",
        "SQL, Docker",
    ]);
    let body = multipart(&[
        Part {
            name: "resume",
            file: Some(("cv.docx", DOCX_TYPE)),
            body: &resume,
        },
        Part {
            name: "job_description",
            file: None,
            body: b"Python developer with SQL, AWS and React",
        },
    ]);

    let response = client
        .post("/analyze")
        .header(multipart_type())
        .body(body)
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    let result: AnalysisResult = response.into_json().await.expect("analysis body");
    assert_eq!(result.resume_skills, vec!["python", "flask", "sql", "docker"]);
    assert_eq!(result.missing_skills, vec!["react", "aws"]);
    assert_eq!(
        result.suggested_roles,
        vec!["Python Developer", "Backend Developer", "Cloud Engineer"]
    );
    assert!(result.match_percentage > 0.0 && result.match_percentage <= 100.0);

    // Uploads are removed once the text has been extracted.
    assert_eq!(std::fs::read_dir(uploads.path()).unwrap().count(), 0);
}

#[rocket::async_test]
async fn analyze_without_resume_is_rejected() {
    let uploads = tempfile::tempdir().unwrap();
    let client = client(uploads.path()).await;

    let body = multipart(&[Part {
        name: "job_description",
        file: None,
        body: b"Rust engineer",
    }]);
    let response = client
        .post("/analyze")
        .header(multipart_type())
        .body(body)
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::BadRequest);
    let error: ServiceErrorBody = response.into_json().await.unwrap();
    assert_eq!(error.error, "No file uploaded");
}

async fn post_analyze(client: &Client, parts: &[Part<'_>]) -> (Status, ServiceErrorBody) {
    let response = client
        .post("/analyze")
        .header(multipart_type())
        .body(multipart(parts))
        .dispatch()
        .await;
    let status = response.status();
    (status, response.into_json().await.expect("error body"))
}

#[rocket::async_test]
async fn analyze_empty_multipart_body_is_missing_file() {
    let uploads = tempfile::tempdir().unwrap();
    let client = client(uploads.path()).await;

    let (status, error) = post_analyze(&client, &[]).await;
    assert_eq!(status, Status::BadRequest);
    assert_eq!(error.error, "No file uploaded");
}

#[rocket::async_test]
async fn analyze_resume_sent_as_text_field_is_missing_file() {
    let uploads = tempfile::tempdir().unwrap();
    let client = client(uploads.path()).await;

    let (status, error) = post_analyze(
        &client,
        &[Part {
            name: "resume",
            file: None,
            body: b"Python developer",
        }],
    )
    .await;
    assert_eq!(status, Status::BadRequest);
    assert_eq!(error.error, "No file uploaded");
}

#[rocket::async_test]
async fn analyze_empty_file_name_is_rejected() {
    let uploads = tempfile::tempdir().unwrap();
    let client = client(uploads.path()).await;

    let (status, error) = post_analyze(
        &client,
        &[Part {
            name: "resume",
            file: Some(("", "application/octet-stream")),
            body: b"",
        }],
    )
    .await;
    assert_eq!(status, Status::BadRequest);
    assert_eq!(error.error, "Empty file name");
}

#[rocket::async_test]
async fn analyze_unsupported_format_is_rejected() {
    let uploads = tempfile::tempdir().unwrap();
    let client = client(uploads.path()).await;

    let body = multipart(&[Part {
        name: "resume",
        file: Some(("cv.txt", "text/plain")),
        body: b"Python developer",
    }]);
    let response = client
        .post("/analyze")
        .header(multipart_type())
        .body(body)
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::BadRequest);
    let error: ServiceErrorBody = response.into_json().await.unwrap();
    assert_eq!(error.error, "Unsupported file format");
}

#[rocket::async_test]
async fn analyze_unreadable_document_is_unprocessable() {
    let uploads = tempfile::tempdir().unwrap();
    let client = client(uploads.path()).await;

    let body = multipart(&[Part {
        name: "resume",
        file: Some(("cv.docx", DOCX_TYPE)),
        body: b"this is not a zip archive",
    }]);
    let response = client
        .post("/analyze")
        .header(multipart_type())
        .body(body)
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::UnprocessableEntity);
    let error: ServiceErrorBody = response.into_json().await.unwrap();
    assert!(error.error.starts_with("Could not read resume"));
}

#[rocket::async_test]
async fn index_page_carries_form_and_targets() {
    let uploads = tempfile::tempdir().unwrap();
    let client = client(uploads.path()).await;

    let response = client.get("/").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.content_type(), Some(ContentType::HTML));

    let html = response.into_string().await.unwrap();
    assert!(html.contains(r#"<script src="/static/script.js""#));
    let page = HtmlPage::parse(&html);
    let targets = ResultTargets::bind(&page).expect("page binds");
    assert_eq!(targets.form().id, FORM_ID);

    let response = client.get("/static/script.js").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.content_type(), Some(ContentType::JavaScript));
    let script = response.into_string().await.unwrap();
    assert!(script.contains("preventDefault()"));
    assert!(script.contains(r#"fetch("/analyze""#));
}

#[rocket::async_test]
async fn health_and_unknown_routes() {
    let uploads = tempfile::tempdir().unwrap();
    let client = client(uploads.path()).await;

    let response = client.get("/health").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body: serde_json::Value = response.into_json().await.unwrap();
    assert_eq!(body["status"], "OK");
    assert!(body["timestamp"].is_string());

    let response = client.get("/nope").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
    let error: ServiceErrorBody = response.into_json().await.unwrap();
    assert_eq!(error.error, "Not found");
}
