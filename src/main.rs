use std::fs::File;
use std::sync::Mutex;

use anyhow::Result;
use tracing::Level;

use slider_puzzle::{app, Config};

fn main() -> Result<()> {
    let config = Config::default();
    init_logging(&config);

    app::run(&config)
}

/// Logs go to a file since the terminal is taken by the game screen.
fn init_logging(config: &Config) {
    let Ok(file) = File::create(&config.log_path) else {
        return;
    };

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();
}
