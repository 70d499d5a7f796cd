// src/cli.rs
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::analysis::{DocumentKind, ResumeAnalyzer};
use crate::client::{
    AnalyzeClient, HtmlPage, ResultTargets, Settled, SubmitHandler, JOB_ROLES_ID,
    MATCH_PERCENTAGE_ID, MISSING_SKILLS_ID, YOUR_SKILLS_ID,
};
use crate::config::AppConfig;
use crate::types::FieldValue;

#[derive(Parser)]
#[command(name = "resume-matcher")]
#[command(about = "Match resumes against job descriptions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the analysis API server
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Submit a resume to a running server and print the rendered result
    Submit {
        #[arg(long)]
        resume: PathBuf,
        #[command(flatten)]
        job: JobDescriptionArgs,
        /// Server base URL (defaults to the configured client URL)
        #[arg(long)]
        url: Option<String>,
    },
    /// Analyze a resume locally and print the result as JSON
    Analyze {
        #[arg(long)]
        resume: PathBuf,
        #[command(flatten)]
        job: JobDescriptionArgs,
    },
}

#[derive(Args)]
#[group(multiple = false)]
pub struct JobDescriptionArgs {
    /// Job description text
    #[arg(long)]
    pub job_description: Option<String>,
    /// File holding the job description
    #[arg(long)]
    pub job_file: Option<PathBuf>,
}

impl JobDescriptionArgs {
    pub async fn read(&self) -> Result<String> {
        match (&self.job_description, &self.job_file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read job description: {}", path.display())),
            (None, None) => Ok(String::new()),
        }
    }
}

pub async fn handle_command(cli: Cli, mut config: AppConfig) -> Result<()> {
    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            crate::web::start_web_server(config.server).await
        }
        Command::Submit { resume, job, url } => {
            let base_url = url.unwrap_or(config.client.base_url);
            let timeout = Duration::from_secs(config.client.timeout_seconds);
            submit(&resume, &job.read().await?, &base_url, timeout).await
        }
        Command::Analyze { resume, job } => analyze_locally(&resume, &job.read().await?).await,
    }
}

async fn read_resume(path: &Path) -> Result<(String, Vec<u8>)> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid resume path: {}", path.display()))?
        .to_string();
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read resume: {}", path.display()))?;
    Ok((file_name, bytes))
}

async fn submit(resume: &Path, job_description: &str, base_url: &str, timeout: Duration) -> Result<()> {
    let client = AnalyzeClient::new(base_url, timeout)?;
    let html = client
        .fetch_page()
        .await
        .context("Failed to load analysis page")?;
    let page = HtmlPage::parse(&html);
    let targets = ResultTargets::bind(&page).context("Analysis page is incomplete")?;

    let (file_name, bytes) = read_resume(resume).await?;
    let snapshot = targets.form().capture(vec![
        ("resume".to_string(), FieldValue::file(file_name, bytes)),
        (
            "job_description".to_string(),
            FieldValue::text(job_description),
        ),
    ]);

    info!("Submitting {} to {}", resume.display(), base_url);
    let handler = SubmitHandler::new(client, targets);
    match handler.submit(snapshot).settled().await {
        Settled::Rendered(_) => {
            print_page(&page);
            Ok(())
        }
        Settled::Failed(e) => Err(e).context("Submission failed"),
        Settled::Superseded | Settled::Cancelled => anyhow::bail!("Submission did not complete"),
    }
}

fn print_page(page: &HtmlPage) {
    println!("{}", page.text(MATCH_PERCENTAGE_ID).unwrap_or_default());
    for (title, id) in [
        ("Your Skills", YOUR_SKILLS_ID),
        ("Missing Skills", MISSING_SKILLS_ID),
        ("Suggested Roles", JOB_ROLES_ID),
    ] {
        println!("\n{}:", title);
        for item in page.list_items(id).unwrap_or_default() {
            println!("  - {}", item);
        }
    }
}

async fn analyze_locally(resume: &Path, job_description: &str) -> Result<()> {
    let (file_name, bytes) = read_resume(resume).await?;
    let kind = DocumentKind::from_file_name(&file_name)
        .ok_or_else(|| anyhow::anyhow!("Unsupported file format: {}", file_name))?;

    let text = tokio::task::spawn_blocking(move || kind.extract_text(&bytes))
        .await
        .context("Extraction task failed")?
        .with_context(|| format!("Could not read resume: {}", resume.display()))?;

    let result = ResumeAnalyzer::new().analyze(&text, job_description);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
