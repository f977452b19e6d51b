use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use mines::{Args, Session, Settings};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

fn init_log(level: LevelFilter) -> Result<()> {
    let config = ConfigBuilder::new().add_filter_allow_str("mines").build();
    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)
        .context("Error initializing logger")
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_log(args.verbose.log_level_filter())?;

    let settings = Settings::from_args(&args).context("Could not load settings")?;
    log::debug!("settings: {:?}", settings);

    let mut session = Session::new(settings, io::stdin().lock(), io::stdout().lock());
    session.run()
}
