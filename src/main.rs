use std::process;

use clap::Parser;
use log::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stepflow::cli::{run, Cli};
use stepflow::config::AppConfig;

fn main() {
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
                                  .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                                  .init();

    let cli = Cli::parse();
    let result = AppConfig::load().and_then(|config| run(cli, config));
    match result.and_then(|value| serde_json::to_string_pretty(&value).map_err(Into::into)) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            error!("{}", e);
            process::exit(e.exit_code());
        }
    }
}
