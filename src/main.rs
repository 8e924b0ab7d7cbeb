//! Hoglet entry point

use hoglet::app::App;
use hoglet::config::AppConfig;

fn main() {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.clone()),
    )
    .init();
    log::info!("Starting Hoglet");

    let app = App::new(config);
    if let Err(e) = app.run() {
        log::error!("event loop error: {}", e);
        std::process::exit(1);
    }
}
