//! Event handling functions for user input and application state updates.

use std::time::Duration;

use color_eyre::eyre::Result;
use log::debug;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::{
    app::MAX_NAME_LEN,
    maze::Direction,
    player::MoveOutcome,
    types::{MainMenuItem, Screen},
    App,
};

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches them to the appropriate handler
/// functions based on the key pressed. It uses a timeout to avoid blocking the UI.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(50))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key.code)?;
            }
        }
    }

    Ok(())
}

/// Dispatches one key press to the handler of the current screen.
///
/// The 'q' key quits from every screen except the registration screen, where it is typed into the
/// name instead.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) -> Result<()> {
    match app.screen {
        Screen::Register => handle_register_keys(app, code)?,
        _ if code == KeyCode::Char('q') => app.exit = true,
        Screen::MainMenu(item) => handle_main_menu_keys(app, item, code),
        Screen::HowToPlay => handle_info_keys(app, MainMenuItem::HowToPlay, code),
        Screen::ScoreBoard => handle_info_keys(app, MainMenuItem::ScoreBoard, code),
        Screen::InGame => handle_in_game_keys(app, code),
    }

    Ok(())
}

/// Handles menu navigation with 'j'/'k' or the arrow keys and selection with 'l' or enter.
fn handle_main_menu_keys(app: &mut App, item: MainMenuItem, code: KeyCode) {
    match code {
        KeyCode::Char('j') | KeyCode::Down => app.screen = Screen::MainMenu(item.next()),
        KeyCode::Char('k') | KeyCode::Up => app.screen = Screen::MainMenu(item.previous()),
        KeyCode::Char('l') | KeyCode::Enter => match item {
            MainMenuItem::StartGame => app.screen = Screen::Register,
            MainMenuItem::HowToPlay => app.screen = Screen::HowToPlay,
            MainMenuItem::ScoreBoard => {
                app.last_result = None;
                app.screen = Screen::ScoreBoard;
            }
            MainMenuItem::Quit => app.exit = true,
        },
        KeyCode::Esc => app.exit = true,
        _ => {}
    }
}

/// Handles the read-only screens, which return to the menu entry they were opened from.
fn handle_info_keys(app: &mut App, origin: MainMenuItem, code: KeyCode) {
    if matches!(
        code,
        KeyCode::Char('h') | KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace
    ) {
        app.screen = Screen::MainMenu(origin);
    }
}

/// Handles name typing, colour selection and the start of a game.
fn handle_register_keys(app: &mut App, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char(ch) => {
            if app.name_input.chars().count() < MAX_NAME_LEN && !ch.is_control() && ch != ',' {
                app.name_input.push(ch);
            }
        }
        KeyCode::Backspace => {
            let _ = app.name_input.pop();
        }
        KeyCode::Right | KeyCode::Tab => app.player_color = app.player_color.next(),
        KeyCode::Left | KeyCode::BackTab => app.player_color = app.player_color.previous(),
        KeyCode::Enter => {
            let name = app.name_input.trim();
            if !name.is_empty() {
                app.player_name = name.to_owned();
                app.start_session()?;
            }
        }
        KeyCode::Esc => app.screen = Screen::MainMenu(MainMenuItem::StartGame),
        _ => {}
    }

    Ok(())
}

/// Handles movement with the arrow keys or 'h'/'j'/'k'/'l', the solution toggle on space and
/// leaving the game on escape.
fn handle_in_game_keys(app: &mut App, code: KeyCode) {
    let direction = match code {
        KeyCode::Up | KeyCode::Char('k') => Direction::Up,
        KeyCode::Down | KeyCode::Char('j') => Direction::Down,
        KeyCode::Left | KeyCode::Char('h') => Direction::Left,
        KeyCode::Right | KeyCode::Char('l') => Direction::Right,
        KeyCode::Char(' ') => {
            if let Some(session) = app.session.as_mut() {
                if session.toggle_solution() {
                    app.overlay.reset();
                }
            }
            return;
        }
        KeyCode::Esc => {
            app.abandon_session();
            return;
        }
        _ => return,
    };

    if let Some(session) = app.session.as_mut() {
        if session.move_player(direction) == MoveOutcome::CoinCollected {
            debug!(
                "coin collected at {:?}, {} left",
                session.player().position(),
                session.maze().coins_remaining()
            );
        }
    }
}
