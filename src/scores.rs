//! Best completion times, stored as a plain text score list.
//!
//! Every finished game appends one `name,seconds` line to the score file. Reading keeps the lines
//! with at least two comma separated fields whose second field is a number, sorts them by time and
//! keeps the ten fastest.

use std::{
    fs::{self, OpenOptions},
    io::{self, BufRead, BufReader, Write},
    path::Path,
    time::Duration,
};

use color_eyre::eyre::Result;
use log::{info, warn};

/// Number of entries kept on the score board.
pub const MAX_ENTRIES: usize = 10;

/// One finished game.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEntry {
    /// Name the player registered with.
    pub name: String,
    /// Completion time in seconds.
    pub seconds: f64,
}

impl ScoreEntry {
    /// Creates an entry for `name`, rounding `elapsed` to hundredths of a second.
    #[must_use]
    pub fn new(name: &str, elapsed: Duration) -> Self {
        Self {
            name: name.to_owned(),
            seconds: round_seconds(elapsed),
        }
    }
}

/// Rounds `elapsed` to hundredths of a second.
#[must_use]
pub fn round_seconds(elapsed: Duration) -> f64 {
    let hundredths = rounded_div::u128(elapsed.as_millis(), 10);

    f64::from(u32::try_from(hundredths).unwrap_or(u32::MAX)) / 100.
}

/// Sorts `entries` by ascending time and keeps the fastest [`MAX_ENTRIES`].
pub fn rank(entries: &mut Vec<ScoreEntry>) {
    entries.sort_by(|first, second| first.seconds.total_cmp(&second.seconds));
    entries.truncate(MAX_ENTRIES);
}

/// Reads a score list, returning the fastest [`MAX_ENTRIES`] entries in ascending time order.
///
/// Lines with fewer than two fields are ignored. Lines whose time is not a number are skipped with
/// a warning.
///
/// # Errors
///
/// This function returns an error when reading from `reader` fails.
pub fn parse<R: BufRead>(reader: R) -> Result<Vec<ScoreEntry>> {
    let mut entries = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let mut fields = line.trim().split(',');

        let (Some(name), Some(seconds)) = (fields.next(), fields.next()) else {
            continue;
        };

        match seconds.trim().parse::<f64>() {
            Ok(seconds) if seconds.is_finite() => entries.push(ScoreEntry {
                name: name.to_owned(),
                seconds,
            }),
            _ => warn!("skipping malformed score on line {}: {line:?}", idx + 1),
        }
    }

    rank(&mut entries);

    Ok(entries)
}

/// Writes one `name,seconds` record.
///
/// # Errors
///
/// This function returns an error when writing to `writer` fails.
pub fn write_entry<W: Write>(writer: &mut W, entry: &ScoreEntry) -> Result<()> {
    writeln!(writer, "{},{}", entry.name, entry.seconds)?;

    Ok(())
}

/// Loads the score board from `path`. A missing file is an empty board.
///
/// # Errors
///
/// This function returns an error when the file exists but cannot be read.
pub fn load(path: &Path) -> Result<Vec<ScoreEntry>> {
    match fs::File::open(path) {
        Ok(file) => parse(BufReader::new(file)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(err) => Err(err.into()),
    }
}

/// Appends `entry` to the score file at `path`, creating it if needed.
///
/// # Errors
///
/// This function returns an error when the file cannot be opened or written.
pub fn append(path: &Path, entry: &ScoreEntry) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    write_entry(&mut file, entry)?;

    info!(
        "saved score {}s for {} to {}",
        entry.seconds,
        entry.name,
        path.display()
    );

    Ok(())
}
