mod app;
mod config;
mod lookup;
mod users;
mod util;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, Args};
use crate::lookup::{HttpTransport, Transport};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("score_graph=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> ExitCode {
    init_tracing();

    let config = match AppConfig::from_args(Args::parse()) {
        Ok(config) => config,
        Err(err) => {
            error!("invalid configuration: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    let transport: Arc<dyn Transport> = match HttpTransport::new(config.request_timeout) {
        Ok(transport) => Arc::new(transport),
        Err(err) => {
            error!("failed to build http client: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1100.0, 900.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "score-graph",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::ScoreGraphApp::new(
                cc,
                config,
                transport,
            )))
        }),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("ui exited with an error: {err}");
            ExitCode::FAILURE
        }
    }
}
