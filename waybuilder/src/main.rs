use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};

use waybuilder::config::{API_KEY_ENV, AppConfig};
use waybuilder::points::{PointDirectory, PointStore};
use waybuilder::rasp::RaspClient;
use waybuilder::repl::Session;

/// Console route finder for the public transport timetable service
#[derive(Parser)]
#[command(name = "waybuilder")]
#[command(about = "Find routes between places by name", version)]
struct Cli {
    /// Path to the JSON config file
    #[arg(long, short = 'c', default_value = "config.json")]
    config: PathBuf,

    /// Directory for log files (overrides the config file)
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config {}: {e}", cli.config.display());
            return ExitCode::FAILURE;
        }
    };

    let log_dir = cli.log_dir.clone().unwrap_or_else(|| config.log_dir.clone());
    let log_path = match waybuilder::logging::init(&log_dir) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Failed to set up logging: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(config = %cli.config.display(), "starting");

    let client = match RaspClient::new(config.rasp_config()) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to create timetable client");
            eprintln!(
                "Failed to create timetable client: {e} (set api_key in the config or {API_KEY_ENV})"
            );
            return ExitCode::FAILURE;
        }
    };

    let directory = match PointStore::new(&config.point_list_path).load() {
        Ok(Some(list)) => {
            let directory = PointDirectory::from_list(list);
            println!(
                "Loaded {} settlements and {} stations",
                directory.settlement_records().len(),
                directory.station_records().len()
            );
            directory
        }
        Ok(None) => {
            println!("No point list yet, run [scan points]");
            PointDirectory::default()
        }
        Err(e) => {
            warn!(error = %e, "ignoring stored point list");
            println!("Stored point list is unreadable, run [scan points]");
            PointDirectory::default()
        }
    };

    let mut session = Session::new(client, config, cli.config, io::stdin().lock(), io::stdout())
        .with_points(directory)
        .with_log_path(log_path);

    match session.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "console i/o failed");
            eprintln!("Console error: {e}");
            ExitCode::FAILURE
        }
    }
}
