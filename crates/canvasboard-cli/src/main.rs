//! Command-line entry point.

use canvasboard_cli::{App, AppConfig, Cli};
use canvasboard_core::{Notice, RemoteConfig};
use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    log::info!("Starting Canvas Board");

    let cli = Cli::parse();
    let mut app = App::open(AppConfig {
        drawing_path: cli.drawing,
        remote: RemoteConfig::with_base_url(cli.server),
    })?;

    let notices = app.execute(cli.command).await;
    let mut failed = false;
    for notice in &notices {
        match notice {
            Notice::Info(msg) => println!("{}", msg),
            Notice::Error(msg) => {
                failed = true;
                eprintln!("error: {}", msg);
            }
        }
    }

    // Failed events never touch the drawing, so anything that did change is kept
    if app.persist()? {
        log::debug!("Drawing written");
    }
    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}
