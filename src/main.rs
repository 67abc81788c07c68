//! smog-radar CLI entry point
//!
//! Air quality lookup - CLI + web API

use smog_radar::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
