//! transfer-scout
//!
//! ```text
//!   universities.json ──▶ catalog ──▶ harvest runner ──▶ colleges/{name}.txt
//!                                        │
//!                                        ▼
//!                                 gemini client
//!                                        │
//!                                        ▼
//!                       retrying executor ──▶ generateContent (HTTPS)
//! ```

use std::path::PathBuf;

use clap::Parser;

use transfer_scout::catalog::load_universities;
use transfer_scout::config::{self, ConfigError, ScoutConfig};
use transfer_scout::gemini::ReportClient;
use transfer_scout::observability::{logging, metrics};
use transfer_scout::report::ReportWriter;
use transfer_scout::HarvestRunner;

#[derive(Parser)]
#[command(name = "transfer-scout")]
#[command(about = "Collect transfer admission requirements for a list of universities", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON file listing universities
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory for the per-university reports
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Seconds to pause between universities
    #[arg(long)]
    delay_secs: Option<u64>,

    /// Attempts per university before writing a failure stub
    #[arg(long)]
    max_retries: Option<u32>,

    /// Emit JSON log lines
    #[arg(long)]
    log_json: bool,

    /// Write a Prometheus text snapshot of run metrics to this file
    #[arg(long)]
    metrics_out: Option<PathBuf>,
}

impl Cli {
    fn apply(&self, config: &mut ScoutConfig) {
        if let Some(input) = &self.input {
            config.harvest.input_path = input.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.harvest.output_dir = dir.clone();
        }
        if let Some(delay) = self.delay_secs {
            config.harvest.politeness_delay_secs = delay;
        }
        if let Some(max_retries) = self.max_retries {
            config.retries.max_retries = max_retries;
        }
        if self.log_json {
            config.observability.json_logs = true;
        }
        if let Some(path) = &self.metrics_out {
            config.observability.metrics_path = path.display().to_string();
        }
    }
}

fn load(cli: &Cli) -> Result<ScoutConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => config::parse_config(path)?,
        None => ScoutConfig::default(),
    };
    cli.apply(&mut config);
    config::validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load(&cli)?;

    logging::init_logging(&config.observability)?;
    tracing::info!("transfer-scout v{} starting", env!("CARGO_PKG_VERSION"));

    let metrics_handle = if config.observability.metrics_path.is_empty() {
        None
    } else {
        Some(metrics::install_recorder()?)
    };

    tracing::info!(
        endpoint = %config.api.endpoint(),
        max_retries = config.retries.max_retries,
        initial_delay_ms = config.retries.initial_delay_ms,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let api_key = config::api_key_from_env(&config);
    if api_key.is_none() {
        tracing::error!(
            env = %config.api.api_key_env,
            "API key is missing; every university will get a failure stub"
        );
    }

    let records = match load_universities(&config.harvest.input_path) {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(error = %e, "Script stopped due to missing or invalid university data");
            tracing::error!(
                "Please ensure '{}' is present and lists universities",
                config.harvest.input_path.display()
            );
            return Err(e.into());
        }
    };

    let writer = ReportWriter::create(&config.harvest.output_dir)?;
    let client = ReportClient::from_config(&config, api_key);
    let runner = HarvestRunner::new(client, writer, config.harvest.politeness_delay());

    let summary = runner.run(&records).await;

    tracing::info!(
        processed = summary.processed,
        written = summary.written(),
        failed = summary.failed,
        "Output saved to {}",
        config.harvest.output_dir.display()
    );

    if let Some(handle) = metrics_handle {
        let path = PathBuf::from(&config.observability.metrics_path);
        metrics::write_snapshot(&handle, &path)?;
        tracing::info!(path = %path.display(), "Metrics snapshot written");
    }

    Ok(())
}
