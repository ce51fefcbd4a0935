use anyhow::{bail, Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_client::models::UploadedFile;
use resume_client::notice::{Notice, NoticeLevel};
use resume_client::{Config, SessionController, SessionError};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resume_client={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let Some(resume_path) = args.next() else {
        bail!("usage: resume-client <resume.pdf|.doc|.docx> [job-description.txt]");
    };
    let job_description_path = args.next();

    info!(
        "Starting resume client v{} against {}",
        env!("CARGO_PKG_VERSION"),
        config.api_url
    );

    let session = SessionController::from_config(&config)?;

    let file = UploadedFile::from_path(&resume_path).await?;
    session.select_file(file).map_err(report)?;

    let resume = session.process_resume().await.map_err(report)?;
    show(&Notice::resume_processed());
    println!("{}", serde_json::to_string_pretty(&resume)?);

    if let Some(path) = job_description_path {
        let job_description = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read job description '{path}'"))?;
        let result = session.request_match(&job_description).await.map_err(report)?;
        show(&Notice::analysis_complete());
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}

/// Logs the user-facing notice for a failed operation and passes the error on.
fn report(err: SessionError) -> anyhow::Error {
    if let Some(notice) = Notice::from_error(&err) {
        show(&notice);
    }
    err.into()
}

fn show(notice: &Notice) {
    match notice.level {
        NoticeLevel::Success => info!("{}: {}", notice.title, notice.description),
        NoticeLevel::Error => error!("{}: {}", notice.title, notice.description),
    }
}
