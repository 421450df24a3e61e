mod alerts;
mod config;
mod fetch;
mod poller;
mod snapshot;

use alerts::StdoutSink;
use clap::Parser;
use config::Config;
use fetch::HttpStatsSource;
use poller::Poller;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "statwatch")]
#[command(version)]
struct Cli {
    #[arg(long, default_value = "./config.yaml")]
    config: String,
    #[arg(long)]
    print_default_config: bool,
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    interval_secs: Option<u64>,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    if cli.print_default_config {
        println!("{}", Config::example_yaml());
        return;
    }

    let mut cfg = match Config::load_from_file(&cli.config) {
        Ok(cfg) => cfg,
        Err(err) => {
            error!(error = %err, "не удалось загрузить конфигурацию");
            std::process::exit(1);
        }
    };
    if let Some(host) = cli.host {
        cfg.host = host;
    }
    if let Some(interval_secs) = cli.interval_secs {
        cfg.interval_secs = interval_secs;
    }
    if let Err(err) = cfg.validate() {
        error!(error = %err, "некорректная конфигурация после переопределений");
        std::process::exit(1);
    }

    let source = match HttpStatsSource::new(&cfg) {
        Ok(source) => source,
        Err(err) => {
            error!(error = %err, "не удалось создать HTTP-клиент");
            std::process::exit(1);
        }
    };
    info!(
        url = %source.url(),
        interval = %humantime::format_duration(Duration::from_secs(cfg.interval_secs)),
        failure_budget = cfg.failure_budget,
        "запуск statwatch"
    );

    Poller::new(&cfg, source, StdoutSink).run().await;

    std::process::exit(1);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
