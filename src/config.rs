//! Command line options and the runtime configuration built from them.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use ratatui::style::Color;

use crate::pathfinding::OVERLAY_FRAME_DELAY_MS;

/// Default side length of the maze grid.
pub const DEFAULT_GRID_SIZE: u16 = 12;

/// Default number of coins placed in a maze.
pub const DEFAULT_COIN_COUNT: usize = 15;

/// Command line interface of the game.
///
/// Collect every coin, then reach the exit as fast as possible.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Side length of the square maze.
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE, value_parser = clap::value_parser!(u16).range(1..))]
    pub size: u16,
    /// Number of coins to place; clamped to the open cells available.
    #[arg(long, default_value_t = DEFAULT_COIN_COUNT)]
    pub coins: usize,
    /// File the best times are appended to.
    #[arg(long, default_value = "scores.txt")]
    pub scores: PathBuf,
    /// Seed for reproducible mazes; a fresh seed is drawn when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// File log records are written to.
    #[arg(long, default_value = "coinmaze.log")]
    pub log_file: PathBuf,
}

/// Colour a player can pick for their marker before starting a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerColor {
    /// Yellow marker.
    #[default]
    Yellow,
    /// Blue marker.
    Blue,
    /// Red marker.
    Red,
    /// Green marker.
    Green,
}

impl PlayerColor {
    /// Every colour in the order offered on the registration screen.
    pub const ALL: [Self; 4] = [Self::Yellow, Self::Blue, Self::Red, Self::Green];

    /// Returns the display name of the colour.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Yellow => "Yellow",
            Self::Blue => "Blue",
            Self::Red => "Red",
            Self::Green => "Green",
        }
    }

    /// Returns the colour after this one, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Yellow => Self::Blue,
            Self::Blue => Self::Red,
            Self::Red => Self::Green,
            Self::Green => Self::Yellow,
        }
    }

    /// Returns the colour before this one, wrapping around.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Yellow => Self::Green,
            Self::Blue => Self::Yellow,
            Self::Red => Self::Blue,
            Self::Green => Self::Red,
        }
    }
}

/// Colours used to draw the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Menu borders and text.
    pub accent: Color,
    /// Text of the highlighted menu entry.
    pub highlight: Color,
    /// Maze walls.
    pub wall: Color,
    /// Start cell.
    pub start: Color,
    /// End cell while coins are left.
    pub end_locked: Color,
    /// End cell once every coin is collected.
    pub end_open: Color,
    /// Coins.
    pub coin: Color,
    /// Solution overlay.
    pub solution: Color,
    /// Marker colour for each player colour choice.
    pub players: [(PlayerColor, Color); 4],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            accent: Color::Green,
            highlight: Color::White,
            wall: Color::Blue,
            start: Color::Green,
            end_locked: Color::Gray,
            end_open: Color::Red,
            coin: Color::Yellow,
            solution: Color::Magenta,
            players: [
                (PlayerColor::Yellow, Color::LightYellow),
                (PlayerColor::Blue, Color::LightBlue),
                (PlayerColor::Red, Color::LightRed),
                (PlayerColor::Green, Color::LightGreen),
            ],
        }
    }
}

impl Palette {
    /// Returns the terminal colour a player colour is drawn with.
    #[must_use]
    pub fn player(&self, color: PlayerColor) -> Color {
        self.players
            .iter()
            .find_map(|&(choice, shade)| (choice == color).then_some(shade))
            .unwrap_or(self.highlight)
    }
}

/// Runtime configuration passed to the application at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Side length of the square maze.
    pub grid_size: usize,
    /// Number of coins to place.
    pub coin_count: usize,
    /// File the best times are appended to.
    pub score_file: PathBuf,
    /// Seed for reproducible mazes.
    pub seed: Option<u64>,
    /// File log records are written to.
    pub log_file: PathBuf,
    /// Delay between two reveal steps of the solution overlay.
    pub overlay_frame_delay: Duration,
    /// Colours used to draw the game.
    pub palette: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE.into(),
            coin_count: DEFAULT_COIN_COUNT,
            score_file: PathBuf::from("scores.txt"),
            seed: None,
            log_file: PathBuf::from("coinmaze.log"),
            overlay_frame_delay: Duration::from_millis(OVERLAY_FRAME_DELAY_MS),
            palette: Palette::default(),
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            grid_size: cli.size.into(),
            coin_count: cli.coins,
            score_file: cli.scores,
            seed: cli.seed,
            log_file: cli.log_file,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["coinmaze"]).expect("no arguments should parse");
        let config = Config::from(cli);

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from([
            "coinmaze",
            "--size",
            "21",
            "--coins",
            "3",
            "--scores",
            "best.txt",
            "--seed",
            "99",
        ])
        .expect("valid arguments should parse");
        let config = Config::from(cli);

        assert_eq!(config.grid_size, 21);
        assert_eq!(config.coin_count, 3);
        assert_eq!(config.score_file, PathBuf::from("best.txt"));
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn test_player_color_cycle() {
        let mut color = PlayerColor::default();
        for expected in [PlayerColor::Blue, PlayerColor::Red, PlayerColor::Green] {
            color = color.next();
            assert_eq!(color, expected);
        }

        assert_eq!(color.next(), PlayerColor::Yellow);
        assert_eq!(PlayerColor::Yellow.previous(), PlayerColor::Green);
        assert_eq!(PlayerColor::Red.name(), "Red");
    }

    #[test]
    fn test_cli_rejects_zero_size() {
        let result = Cli::try_parse_from(["coinmaze", "--size", "0"]);

        assert!(result.is_err(), "a zero sized maze is rejected");
    }
}
