use std::fs::File;

use clap::Parser;
use pathfinder_lib::{App, Args, Config};
use pathgrid_crossterm::CrosstermDriver;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = Config::try_from(args)?;

    // The terminal is in raw mode while running, so logs only go to a file.
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match &config.log_file {
        Some(path) => {
            logger.target(env_logger::Target::Pipe(Box::new(File::create(path)?)));
        }
        None => {
            logger.filter_level(log::LevelFilter::Off);
        }
    }
    logger.init();

    log::info!(
        "starting: {0}x{0} grid, step delay {1:?}",
        config.size,
        config.step_delay
    );
    let mut app = App::new(&config, CrosstermDriver::new());
    app.run()?;
    Ok(())
}
