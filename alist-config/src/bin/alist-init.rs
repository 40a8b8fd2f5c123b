//! `alist-init`: write the alist `config.json` from the environment.
//!
//! Exits non-zero when the previous config cannot be read or the new one
//! cannot be written.

use std::{path::PathBuf, process::ExitCode};

use alist_config::{
    cli::{self, InitOptions},
    constants::DEFAULT_CONFIG_PATH,
};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "alist-init",
    version,
    about = "Generate the alist config.json from the environment"
)]
struct Cli {
    /// Config file to refresh; its jwt_secret is kept across runs
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Dotenv file read before the process environment
    #[arg(long)]
    env_file: Option<PathBuf>,
    /// Print the generated JSON without writing the config file
    #[arg(long)]
    print_only: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let opts = InitOptions {
        config_path: cli.config,
        env_file: cli.env_file,
        print_only: cli.print_only,
    };

    match cli::run_config_init(&opts) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("config init failed: {err:#}");
            ExitCode::FAILURE
        }
    }
}
