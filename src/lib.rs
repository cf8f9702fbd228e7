//! This crate contains the library for the coin maze game.
//!
//! A perfect maze is carved on a square grid, coins are scattered over its open cells and the
//! player has to collect all of them before the exit accepts them. The [`maze`], [`player`] and
//! [`scores`] modules hold the game rules, while the terminal user interface lives behind [`App`].

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
pub mod config;
pub mod error;
mod events;
pub mod logging;
pub mod maze;
pub mod pathfinding;
pub mod player;
pub mod scores;
pub mod shuffle;
mod types;
mod ui;

pub use app::App;
