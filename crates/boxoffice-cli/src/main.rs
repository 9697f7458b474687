//! `boxoffice <scenario.json>`
//!
//! Replays a scenario and prints the JSON report on stdout. Logs go to
//! stderr as JSON lines; set `RUST_LOG` to change the filter.

use std::process::ExitCode;

use boxoffice_cli::run_scenario;
use boxoffice_types::ScenarioConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: boxoffice <scenario.json>");
        return ExitCode::from(2);
    };

    let report = match ScenarioConfig::from_json_file(&path).and_then(|s| run_scenario(&s)) {
        Ok(report) => report,
        Err(err) => {
            tracing::error!(path = %path, error = %err, "Scenario failed");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "Could not render report");
            ExitCode::FAILURE
        }
    }
}
