use std::process::ExitCode;

use clap::Parser;
use log::error;

use gyral_zones::cli::Cli;
use gyral_zones::Config;

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    match gyral_zones::run(&Config::from(cli)) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
