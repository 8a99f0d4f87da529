mod config;
mod platform;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = config::Cli::parse();
    engine_logging::initialize(cli.log_destination(), cli.log_level);
    platform::run_app(cli)
}
