//! Player movement, coin collection and the play session.
//!
//! A [`Player`] only knows where it stands; validating a move needs the maze it walks through. The
//! [`Session`] ties one maze to one player, collects coins as the player steps on them, and keeps
//! the clock that becomes the score once the end is reached with every coin collected.

use std::time::{Duration, Instant};

use log::info;

use crate::maze::{Direction, Maze, Position};

/// Position of the player inside a maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    /// Cell the player stands on.
    position: Position,
}

impl Player {
    /// Places a new player on the start of `maze`.
    #[must_use]
    pub const fn new(maze: &Maze) -> Self {
        Self {
            position: maze.start(),
        }
    }

    /// Returns the cell the player stands on.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns whether the player stands on `cell`.
    #[must_use]
    pub fn position_equals(&self, cell: Position) -> bool {
        self.position == cell
    }

    /// Moves one cell in `direction` if the target is inside `maze` and open.
    ///
    /// Blocked moves leave the position untouched. Returns whether the player moved.
    pub fn step(&mut self, maze: &Maze, direction: Direction) -> bool {
        match direction.offset(self.position, 1, maze.size()) {
            Some(candidate) if maze.is_open(candidate) => {
                self.position = candidate;
                true
            }
            _ => false,
        }
    }
}

/// Result of asking the session to move the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The target was a wall, outside the grid, or the session is already finished.
    Blocked,
    /// The player moved onto a cell without a coin.
    Moved,
    /// The player moved onto a coin and collected it.
    CoinCollected,
}

/// One game played on one maze.
#[derive(Debug, Clone)]
pub struct Session {
    /// Maze being played, whose coin set drains as coins are collected.
    maze: Maze,
    /// The player walking the maze.
    player: Player,
    /// When the session began.
    started: Instant,
    /// Elapsed time frozen when the session was completed.
    finish_time: Option<Duration>,
    /// Whether the solution overlay is requested.
    show_solution: bool,
}

impl Session {
    /// Starts a session with the player on the start of `maze`.
    #[must_use]
    pub fn new(maze: Maze) -> Self {
        Self::started_at(maze, Instant::now())
    }

    /// Starts a session whose clock began at `started`.
    #[must_use]
    pub fn started_at(maze: Maze, started: Instant) -> Self {
        let player = Player::new(&maze);

        Self {
            maze,
            player,
            started,
            finish_time: None,
            show_solution: false,
        }
    }

    /// Returns the maze being played.
    #[must_use]
    pub const fn maze(&self) -> &Maze {
        &self.maze
    }

    /// Returns the player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Moves the player and collects the coin it lands on, if any.
    ///
    /// Once the session is finished every move is [`MoveOutcome::Blocked`].
    pub fn move_player(&mut self, direction: Direction) -> MoveOutcome {
        if self.finish_time.is_some() || !self.player.step(&self.maze, direction) {
            return MoveOutcome::Blocked;
        }

        if self.maze.collect_coin(self.player.position()) {
            MoveOutcome::CoinCollected
        } else {
            MoveOutcome::Moved
        }
    }

    /// Returns whether the player stands on the end.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.player.position_equals(self.maze.end())
    }

    /// Returns whether every coin has been collected.
    #[must_use]
    pub fn all_coins_collected(&self) -> bool {
        self.maze.coins().is_empty()
    }

    /// Returns whether the player stands on the end with no coin left.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.at_end() && self.all_coins_collected()
    }

    /// Freezes the clock the first time the session is found complete.
    ///
    /// Returns the elapsed time on that first call only, [`None`] before completion and on every
    /// later call.
    pub fn finish(&mut self) -> Option<Duration> {
        if self.finish_time.is_some() || !self.is_complete() {
            return None;
        }

        let elapsed = self.started.elapsed();
        self.finish_time = Some(elapsed);
        info!("maze completed in {:.2}s", elapsed.as_secs_f64());

        Some(elapsed)
    }

    /// Returns the frozen completion time, if the session is finished.
    #[must_use]
    pub const fn finish_time(&self) -> Option<Duration> {
        self.finish_time
    }

    /// Returns the time spent so far, or the completion time once finished.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.finish_time.unwrap_or_else(|| self.started.elapsed())
    }

    /// Returns whether the solution overlay is requested.
    #[must_use]
    pub const fn show_solution(&self) -> bool {
        self.show_solution
    }

    /// Flips the solution overlay request, returning the new state.
    pub fn toggle_solution(&mut self) -> bool {
        self.show_solution = !self.show_solution;
        self.show_solution
    }
}
