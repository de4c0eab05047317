use std::fs::File;
use std::sync::Arc;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use wayfarer::chat::HttpChatBackend;
use wayfarer::core::config;
use wayfarer::core::session;
use wayfarer::core::state::App;
use wayfarer::route::DirectionsApi;
use wayfarer::tui;

#[derive(Parser)]
#[command(name = "wayfarer", about = "Terminal travel-assistant chat client")]
struct Args {
    /// Base URL of the travel-assistant server
    #[arg(short, long)]
    server_url: Option<String>,

    /// Platform agent string for the navigation handoff
    #[arg(long)]
    agent: Option<String>,

    /// Resume the most recently saved session
    #[arg(short, long)]
    resume: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to wayfarer.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("wayfarer.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("wayfarer: {e}");
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, e));
        }
    };
    let resolved = config::resolve(
        &file_config,
        args.server_url.as_deref(),
        args.agent.as_deref(),
    );

    log::info!("Wayfarer starting up, server: {}", resolved.server_url);

    let backend = Arc::new(HttpChatBackend::new(resolved.server_url.clone()));
    let planner = Arc::new(DirectionsApi::new(
        resolved.directions_base_url.clone(),
        resolved.directions_api_key.clone().unwrap_or_default(),
    ));

    let mut app = App::from_config(backend, planner, &resolved);
    if args.resume
        && let Some(data) = session::load_latest_session()
    {
        log::info!("Resuming session {}", data.meta.id);
        session::restore_session(&mut app, data);
    }

    tui::run(app)
}
