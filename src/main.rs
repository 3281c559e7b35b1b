use clap::Parser as _;
use heatpump_json::commands;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(clap::Parser)]
#[clap(version, about, author)]
enum Commands {
    Settings(commands::settings::Args),
    Status(commands::status::Args),
}

fn end<E: std::error::Error>(r: Result<(), E>) {
    std::process::exit(match r {
        Ok(_) => 0,
        Err(e) => {
            eprintln!("error: {e}");
            let mut cause = e.source();
            while let Some(e) = cause {
                eprintln!("  because: {e}");
                cause = e.source();
            }
            1
        }
    });
}

fn log_filter() -> tracing_subscriber::filter::Targets {
    let default = || {
        DEFAULT_LOG_FILTER
            .parse::<tracing_subscriber::filter::Targets>()
            .unwrap_or_default()
    };
    let Ok(description) = std::env::var("HEATPUMP_JSON_LOG") else {
        return default();
    };
    match description.parse() {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("warning: ignoring malformed HEATPUMP_JSON_LOG ({e})");
            default()
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(log_filter())
        .init();
    match Commands::parse() {
        Commands::Settings(args) => end(commands::settings::run(args)),
        Commands::Status(args) => end(commands::status::run(args)),
    }
}
