use std::process::ExitCode;

use clap::Parser;
use skyview_app::{AppError, PlatformDirs, run};
use skyview_config::{CliArgs, Config};
use tracing::{error, info};

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("skyview: {e}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<(), AppError> {
    let args = CliArgs::parse();

    let mut dirs = PlatformDirs::resolve()?;
    if let Some(config_dir) = args.config.clone() {
        dirs = dirs.with_config_dir(config_dir);
    }

    let (mut config, origin) = Config::load_or_create_with_origin(&dirs.config_dir)?;
    config.apply_cli_overrides(&args);

    skyview_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config))?;
    info!(
        config_file = %Config::file_path(&dirs.config_dir).display(),
        config = origin.as_str(),
        log_dir = %dirs.log_dir.display(),
        "Starting skyview"
    );

    run(config, dirs.config_dir)
}
