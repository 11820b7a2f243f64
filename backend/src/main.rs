use anyhow::Result;
use log::info;

use fund_tracker_backend::cli::Cli;
use fund_tracker_backend::Backend;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::init();

    let backend = match &cli.data_dir {
        Some(data_dir) => Backend::new(data_dir)?,
        None => Backend::new_default()?,
    };
    info!("Using data directory {:?}", cli.data_dir);

    cli.command.run(&backend)
}
