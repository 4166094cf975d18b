use env_logger::{Builder, Env, Target};
use log::{error, info, warn};
use mangadex_dl::{run, ApiClient, Cli, DownloadRequest, RunOutcome, Settings};
use std::process;

/// Conventional exit status after SIGINT.
const INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() {
    // Init logging
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.target(Target::Stdout);
    builder.init();

    // Parse Args
    let cli = Cli::new();

    // Parse Settings
    let settings = match Settings::new(&cli.config_file) {
        Ok(s) => s,
        Err(e) => {
            error!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    let client = match ApiClient::from_settings(&settings) {
        Ok(c) => c,
        Err(e) => {
            error!("Client error: {}", e);
            process::exit(1);
        }
    };

    // Run
    let request = DownloadRequest::from(&cli);
    let running = run(&settings, &client, &request);
    tokio::pin!(running);

    let res = tokio::select! {
        res = &mut running => res,
        interrupt = tokio::signal::ctrl_c() => match interrupt {
            Ok(()) => {
                println!("\nInterrupted.");
                process::exit(INTERRUPTED);
            }
            Err(e) => {
                warn!("Unable to listen for Ctrl-C: {}", e);
                running.await
            }
        },
    };

    match res {
        // `run` already reported the missing chapter.
        Ok(RunOutcome::ChapterNotFound(_)) => {}
        Ok(RunOutcome::Completed(summary)) => {
            info!(
                "{} chapters, {} pages written, {} already present",
                summary.chapters, summary.pages_written, summary.pages_skipped
            );
        }
        Err(e) => {
            error!("Application error: {:#}", e);
            process::exit(1);
        }
    }
}
