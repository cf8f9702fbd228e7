//! This crate contains the source code for the binary for the game coinmaze.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use clap::Parser as _;
use coinmaze::{
    config::{Cli, Config},
    logging, App,
};
use color_eyre::{eyre::Result, install};

fn main() -> Result<()> {
    install()?;

    let config = Config::from(Cli::parse());
    logging::init(&config.log_file)?;
    let mut app = App::new(config)?;

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result
}
