//! MedAssist CLI
//!
//! Runs the analyses in-process against the configured backends.

#![allow(clippy::print_stdout)]

mod progress;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use application::ApplicationError;
use clap::{Parser, Subcommand};
use domain::{AnalysisReport, SymptomRecord, UploadedFile};
use infrastructure::{AppConfig, TelemetryAppConfig, build_services, init_telemetry};

use crate::progress::ConsoleProgress;

/// MedAssist CLI
#[derive(Debug, Parser)]
#[command(name = "medassist-cli")]
#[command(author, version, about = "MedAssist medical document and symptom assistant", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, env = "MEDASSIST_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Summarize a lab report (PDF, JPEG or PNG)
    LabReport {
        /// Path to the report
        file: PathBuf,
    },

    /// Explain a doctor's prescription (JPEG or PNG)
    Prescription {
        /// Path to the prescription image
        file: PathBuf,
    },

    /// Suggest a diagnosis from symptoms
    ///
    /// Example: medassist-cli diagnose --age 34 --gender Female --symptoms "fever, cough"
    Diagnose {
        /// Age in years (5-100)
        #[arg(long)]
        age: i64,

        /// Male, Female or Other
        #[arg(long)]
        gender: String,

        /// Free-text symptom description
        #[arg(long)]
        symptoms: String,
    },

    /// Check that both backends are reachable
    Status,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Read a file from disk as an upload named after its last path component
async fn upload_from_path(path: &std::path::Path) -> anyhow::Result<UploadedFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    UploadedFile::new(&name, bytes, None)
        .map_err(|e| anyhow::anyhow!(ApplicationError::from(e).user_message()))
}

fn print_report(report: &AnalysisReport) {
    println!();
    println!("📋 {}", report.task.title());
    println!();
    println!("{}", report.formatted.as_html());
    println!();
    println!("🤖 {} · ⏱️  {}ms", report.model, report.latency_ms);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.config.as_deref())
        .with_context(|| "Failed to load configuration")?;

    init_telemetry(&TelemetryAppConfig {
        log_filter: log_filter_from_verbosity(cli.verbose).to_string(),
        ..config.telemetry.clone()
    })?;

    let services = build_services(&config, Arc::new(ConsoleProgress))
        .map_err(|e| anyhow::anyhow!("Failed to initialize services: {e}"))?;

    let outcome = match cli.command {
        Commands::LabReport { file } => {
            let upload = upload_from_path(&file).await?;
            println!("🔬 Analyzing {}...", upload.file_name());
            services.assistant.summarize_lab_report(upload).await
        },

        Commands::Prescription { file } => {
            let upload = upload_from_path(&file).await?;
            println!("💊 Reading {}...", upload.file_name());
            services.assistant.summarize_prescription(upload).await
        },

        Commands::Diagnose {
            age,
            gender,
            symptoms,
        } => match SymptomRecord::new(age, &gender, symptoms) {
            Ok(record) => services.assistant.diagnose(record).await,
            Err(e) => Err(e.into()),
        },

        Commands::Status => {
            let report = services.health.check_all().await;
            for (name, status) in &report.services {
                if status.healthy {
                    println!("✅ {name}: {}", status.info.as_deref().unwrap_or("ok"));
                } else {
                    println!("❌ {name}: {}", status.error.as_deref().unwrap_or("unhealthy"));
                }
            }
            if !report.healthy {
                std::process::exit(1);
            }
            return Ok(());
        },
    };

    match outcome {
        Ok(report) => print_report(&report),
        Err(e) => {
            tracing::debug!(error = %e, "Analysis failed");
            println!("❌ {}", e.user_message());
            std::process::exit(1);
        },
    }

    Ok(())
}
