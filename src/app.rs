//! Core application state and logic for the maze game.

use color_eyre::eyre::Result;
use log::{info, warn};
use ratatui::DefaultTerminal;

use crate::{
    config::{Config, PlayerColor},
    events,
    maze::Maze,
    pathfinding::SolutionOverlay,
    player::Session,
    scores::{self, ScoreEntry},
    shuffle::RandomShuffle,
    types::{MainMenuItem, Screen},
    ui,
};

/// Longest name accepted on the registration screen.
pub(crate) const MAX_NAME_LEN: usize = 12;

/// Application state container for the maze game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    pub(crate) screen: Screen,
    /// Configuration the application was started with.
    pub(crate) config: Config,
    /// Randomness every new maze is drawn from.
    pub(crate) shuffle: RandomShuffle,
    /// Game in progress, if any.
    pub(crate) session: Option<Session>,
    /// Reveal state of the solution overlay for the current session.
    pub(crate) overlay: SolutionOverlay,
    /// Best times loaded from the score file.
    pub(crate) scores: Vec<ScoreEntry>,
    /// Time of the last finished game, shown on the score board.
    pub(crate) last_result: Option<ScoreEntry>,
    /// Text typed so far on the registration screen.
    pub(crate) name_input: String,
    /// Name of the registered player.
    pub(crate) player_name: String,
    /// Colour chosen on the registration screen.
    pub(crate) player_color: PlayerColor,
}

impl App {
    /// Creates the application from its configuration.
    ///
    /// The score board is loaded right away so that it can be shown before any game is played.
    ///
    /// # Errors
    ///
    /// This function returns an error when the score file exists but cannot be read.
    pub fn new(config: Config) -> Result<Self> {
        let shuffle = config
            .seed
            .map_or_else(RandomShuffle::from_entropy, RandomShuffle::seeded);
        let scores = scores::load(&config.score_file)?;
        let overlay = SolutionOverlay::new(config.overlay_frame_delay);

        Ok(Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::StartGame),
            config,
            shuffle,
            session: None,
            overlay,
            scores,
            last_result: None,
            name_input: String::new(),
            player_name: String::new(),
            player_color: PlayerColor::default(),
        })
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues until
    /// the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// This function returns an error when drawing or reading input fails.
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame).map_err(std::io::Error::other)
            })?;
            events::handle_events(self)?;
            self.update();
        }

        Ok(())
    }

    /// Builds a fresh maze and switches to the in-game screen.
    ///
    /// # Errors
    ///
    /// This function returns an error when the configured maze size is invalid.
    pub(crate) fn start_session(&mut self) -> Result<()> {
        let maze = Maze::build_with(
            self.config.grid_size,
            self.config.coin_count,
            &mut self.shuffle,
        )?;
        info!(
            "{} starts a {size}x{size} maze with {} coins",
            self.player_name,
            maze.coins_remaining(),
            size = maze.size()
        );

        self.session = Some(Session::new(maze));
        self.name_input.clear();
        self.overlay.reset();
        self.screen = Screen::InGame;

        Ok(())
    }

    /// Leaves the current game without recording a score.
    pub(crate) fn abandon_session(&mut self) {
        if self.session.take().is_some() {
            info!("{} left the maze", self.player_name);
        }
        self.screen = Screen::MainMenu(MainMenuItem::StartGame);
    }

    /// Advances time-driven state between two input polls.
    ///
    /// This function animates the solution overlay and, once the session is complete, records the
    /// score and switches to the score board.
    pub(crate) fn update(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if session.show_solution() {
            self.overlay.update(session.maze().solution_path().len());
        }

        if let Some(elapsed) = session.finish() {
            let entry = ScoreEntry::new(&self.player_name, elapsed);
            self.record_score(&entry);
            self.last_result = Some(entry);
            self.session = None;
            self.screen = Screen::ScoreBoard;
        }
    }

    /// Saves `entry` and reloads the board from the score file.
    ///
    /// A score file that cannot be written or read back is logged, and the entry is ranked into
    /// the board in memory instead.
    fn record_score(&mut self, entry: &ScoreEntry) {
        let saved = scores::append(&self.config.score_file, entry)
            .and_then(|()| scores::load(&self.config.score_file));

        match saved {
            Ok(board) => self.scores = board,
            Err(err) => {
                warn!(
                    "failed to update the score file {}: {err}",
                    self.config.score_file.display()
                );
                self.scores.push(entry.clone());
                scores::rank(&mut self.scores);
            }
        }
    }
}
