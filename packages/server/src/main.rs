use clap::Parser;
use tracing_subscriber::EnvFilter;

use bailey_server::Config;

#[tokio::main]
async fn main() {
    let config = Config::parse();

    let default_filter = if config.verbose {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = bailey_server::run(config).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
