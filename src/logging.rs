//! Log setup.
//!
//! The terminal belongs to the user interface while the game runs, so log records go to a file.
//! The filter follows `RUST_LOG` and defaults to `info`.

use std::{fs::File, path::Path};

use color_eyre::eyre::Result;
use env_logger::{Builder, Env, Target};

/// Installs the global logger, writing to the file at `path`.
///
/// # Errors
///
/// This function returns an error when the log file cannot be created or a logger is already
/// installed.
pub fn init(path: &Path) -> Result<()> {
    let file = File::create(path)?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()?;

    Ok(())
}
