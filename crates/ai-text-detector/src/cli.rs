use std::{io::Read, net::SocketAddr, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    artifacts::{ArtifactCache, DetectorConfig, DEFAULT_MODEL_PATH, DEFAULT_VECTORIZER_PATH},
    presentation::{self, View},
    server,
};

#[derive(Parser, Debug)]
#[command(name = "ai-text-detector")]
#[command(author, version, about = "Detect whether text was written by AI or a human")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Classifier artifact (`.onnx`, or a bincode logistic regression)
    #[arg(long, global = true, env = "DETECTOR_MODEL", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Fitted TF-IDF vectorizer artifact
    #[arg(
        long,
        global = true,
        env = "DETECTOR_VECTORIZER",
        default_value = DEFAULT_VECTORIZER_PATH
    )]
    pub vectorizer: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web UI
    Serve {
        /// Listen address
        #[arg(short, long, default_value = "127.0.0.1")]
        address: String,

        /// Listen port
        #[arg(short, long, default_value = "8501")]
        port: u16,
    },

    /// Analyze one text from the command line, a file, or stdin
    Check {
        /// Text to analyze (if not provided, reads from stdin)
        #[arg(value_name = "TEXT")]
        text: Option<String>,

        /// Read text from file
        #[arg(short, long, value_name = "PATH", conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Output format
        #[arg(short = 'o', long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Label, confidence and probability breakdown
    Human,
    /// The result view as JSON
    Json,
}

impl Cli {
    #[must_use]
    pub fn detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            model_path: self.model.clone(),
            vectorizer_path: self.vectorizer.clone(),
        }
    }
}

pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        "ai_text_detector=debug,detector_preprocessing=debug,tower_http=debug"
    } else {
        "ai_text_detector=info,tower_http=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    // Load both artifacts before doing anything else; failure is fatal.
    let detector = ArtifactCache::new(cli.detector_config())
        .get_or_load()
        .context("failed to load model artifacts")?;

    match cli.command {
        Commands::Serve { address, port } => {
            let addr: SocketAddr = format!("{address}:{port}")
                .parse()
                .with_context(|| format!("invalid listen address {address}:{port}"))?;
            server::run_server(detector, addr).await
        }
        Commands::Check { text, file, format } => {
            let text = read_input(text, file)?;
            let view = presentation::present(&detector, &text);
            println!("{}", render(&view, format)?);
            if view.is_error() {
                anyhow::bail!("analysis failed");
            }
            Ok(())
        }
    }
}

/// Priority: text arg > file > stdin
fn read_input(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {}", path.display()));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read from stdin")?;
    Ok(buffer)
}

/// Format a view for the terminal.
pub fn render(view: &View, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string(view)?);
    }

    Ok(match view {
        View::Idle => String::new(),
        View::Warning { message } => format!("Warning: {message}"),
        View::Error { message } => format!("Error: {message}"),
        View::Result {
            label,
            confidence,
            human,
            ai,
            ..
        } => format!(
            "Result: {label}\nConfidence: {confidence}\nProbability Breakdown:\n  Human: {human}\n  AI:    {ai}"
        ),
    })
}
