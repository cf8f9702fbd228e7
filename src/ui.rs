//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{
    config::{Palette, PlayerColor},
    maze::{Cell, Position},
    pathfinding,
    player::Session,
    types::{MainMenuItem, Screen},
    App,
};

/// Rules listed on the how-to-play screen.
const RULES: [&str; 7] = [
    "Move with the arrow keys or h/j/k/l.",
    "Collect every coin in the maze.",
    "The exit stays closed while coins are left.",
    "Pick your own marker colour before you start.",
    "The fastest runs make the score board!",
    "Press space to show the way to the exit.",
    "Press esc to leave a game.",
];

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from drawing operations or data conversion failures.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    match app.screen {
        Screen::MainMenu(item) => main_menu(frame, item, &app.config.palette),
        Screen::HowToPlay => how_to_play(frame, &app.config.palette),
        Screen::Register => register(app, frame),
        Screen::InGame => in_game(app, frame)?,
        Screen::ScoreBoard => score_board(app, frame)?,
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Returns the plain and the highlighted style of menu content.
const fn content_styles(palette: &Palette) -> (Style, Style) {
    (
        Style::new().fg(palette.accent),
        Style::new().fg(palette.highlight).bg(palette.accent),
    )
}

/// Renders the generic bordered box shared by every menu-like screen.
///
/// This function centres a rounded block `rows` lines high, titles it, prints the key hint on its
/// bottom border and returns one single-line area per row inside it.
pub(crate) fn init_menu(
    frame: &mut Frame,
    title: &str,
    hint: &str,
    rows: u16,
    palette: &Palette,
) -> Rc<[Rect]> {
    let [_, space, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(rows.saturating_add(2)),
        Constraint::Fill(1),
    ])
    .areas(frame.area());
    let [_, layout, _] = Layout::horizontal([
        Constraint::Percentage(20),
        Constraint::Percentage(60),
        Constraint::Percentage(20),
    ])
    .areas(space);

    let block = Block::bordered()
        .title(title.to_owned())
        .title_bottom(hint.to_owned())
        .title_alignment(Alignment::Center)
        .style(palette.accent)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); rows.into()]).split(inner_space)
}

/// Renders `lines` into a menu box, one per row.
///
/// # Errors
///
/// This function returns an error when there are more lines than a terminal can hold.
fn render_lines(
    frame: &mut Frame,
    title: &str,
    hint: &str,
    lines: Vec<Line<'_>>,
    palette: &Palette,
) -> Result<()> {
    let rows = u16::try_from(lines.len())?;
    let inner_layout = init_menu(frame, title, hint, rows, palette);

    for (line, area) in lines.into_iter().zip(inner_layout.iter()) {
        frame.render_widget(line, *area);
    }

    Ok(())
}

/// Renders the main menu screen with navigation options.
///
/// This function lists every [`MainMenuItem`] and highlights the currently selected one.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem, palette: &Palette) {
    clear(frame);

    let inner_layout = init_menu(
        frame,
        "Coin Maze",
        "(j) down / (k) up / (l) select / (q) quit",
        4,
        palette,
    );
    let (content_style, active_content_style) = content_styles(palette);

    for (entry, area) in MainMenuItem::ALL.into_iter().zip(inner_layout.iter()) {
        let style = if entry == item {
            active_content_style
        } else {
            content_style
        };
        frame.render_widget(Line::styled(entry.repr(), style).centered(), *area);
    }
}

/// Renders the rules of the game.
pub(crate) fn how_to_play(frame: &mut Frame, palette: &Palette) {
    clear(frame);

    let inner_layout = init_menu(frame, "How to Play", "(h) return", 7, palette);
    let (content_style, _) = content_styles(palette);

    for (rule, area) in RULES.into_iter().zip(inner_layout.iter()) {
        frame.render_widget(Line::styled(format!("- {rule}"), content_style), *area);
    }
}

/// Renders the name entry and the colour choice shown before a game starts.
pub(crate) fn register(app: &App, frame: &mut Frame) {
    clear(frame);

    let palette = &app.config.palette;
    let (content_style, active_content_style) = content_styles(palette);
    let inner_layout = init_menu(
        frame,
        "New Game",
        "(enter) start / (left, right) colour / (esc) return",
        5,
        palette,
    );

    let name = if app.name_input.is_empty() {
        Span::styled("Your name...", content_style.add_modifier(Modifier::DIM))
    } else {
        Span::styled(app.name_input.clone(), active_content_style)
    };

    let mut colours = vec![Span::styled("Colour: ", content_style)];
    for color in PlayerColor::ALL {
        let shade = palette.player(color);
        let style = if color == app.player_color {
            Style::new().fg(Color::Black).bg(shade)
        } else {
            Style::new().fg(shade)
        };
        colours.push(Span::styled(format!(" {} ", color.name()), style));
        colours.push(Span::raw(" "));
    }

    let lines = [
        Line::styled("Enter your name and pick a colour", content_style).centered(),
        Line::default(),
        Line::from(vec![Span::styled("Name: ", content_style), name]).centered(),
        Line::default(),
        Line::from(colours).centered(),
    ];

    for (line, area) in lines.into_iter().zip(inner_layout.iter()) {
        frame.render_widget(line, *area);
    }
}

/// Renders the best completion times, preceded by the time of the game just finished.
///
/// # Errors
///
/// This function returns an error when the board does not fit the layout computations.
pub(crate) fn score_board(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let palette = &app.config.palette;
    let (content_style, active_content_style) = content_styles(palette);
    let mut lines = Vec::new();

    if let Some(last) = &app.last_result {
        lines.push(
            Line::styled(format!("Finished! Time: {}s", last.seconds), active_content_style)
                .centered(),
        );
        lines.push(Line::default());
    }

    if app.scores.is_empty() {
        lines.push(Line::styled("No scores yet.", content_style).centered());
    }

    for (rank, entry) in app.scores.iter().enumerate() {
        lines.push(Line::styled(
            format!("{}. {}: {}s", rank + 1, entry.name, entry.seconds),
            content_style,
        ));
    }

    render_lines(
        frame,
        "Score Board (Top 10)",
        "(h) return",
        lines,
        palette,
    )
}

/// Computes the canvas points of every maze layer, bottom first, with the colour of each layer.
///
/// # Errors
///
/// This function returns an error when a coordinate does not fit the screen conversion.
fn maze_layers(app: &App, session: &Session) -> Result<[(Vec<(f64, f64)>, Color); 6]> {
    let maze = session.maze();
    let palette = &app.config.palette;
    let size = maze.size();

    let walls: Vec<Position> = (0..size)
        .flat_map(|row| (0..size).map(move |col| (col, row)))
        .filter(|&cell| maze.cell(cell) == Some(Cell::Wall))
        .collect();
    let solution = if session.show_solution() {
        app.overlay.visible(maze.solution_path())
    } else {
        &[]
    };
    let coins: Vec<Position> = maze.coins().iter().copied().collect();
    let end_color = if session.all_coins_collected() {
        palette.end_open
    } else {
        palette.end_locked
    };

    Ok([
        (pathfinding::transform_maze_to_screen_coords(&walls, size)?, palette.wall),
        (pathfinding::transform_maze_to_screen_coords(solution, size)?, palette.solution),
        (pathfinding::transform_maze_to_screen_coords(&coins, size)?, palette.coin),
        (
            pathfinding::transform_maze_to_screen_coords(&[maze.start()], size)?,
            palette.start,
        ),
        (
            pathfinding::transform_maze_to_screen_coords(&[maze.end()], size)?,
            end_color,
        ),
        (
            pathfinding::transform_maze_to_screen_coords(&[session.player().position()], size)?,
            palette.player(app.player_color),
        ),
    ])
}

/// Splits `area` into a `side` by `side` maze area centred above a three line status area.
fn maze_layout(area: Rect, side: u16) -> (Rect, Rect) {
    let [maze_content_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).areas(area);

    let [_, maze_area, _] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(side),
        Constraint::Min(1),
    ])
    .areas(maze_content_area);
    let [_, space, _] = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(side),
        Constraint::Min(1),
    ])
    .areas(maze_area);

    (space, status_area)
}

/// Returns canvas bounds that put each of the `side` cells of a maze row on its own terminal cell.
///
/// Cells sit at integer offsets from `-(side - 1) / 2` to `(side - 1) / 2`, and the canvas scales
/// its bounds onto `side - 1` terminal steps, so the bounds span exactly `side - 1`. A single cell
/// maze gets a unit span to keep the canvas from collapsing.
fn canvas_bounds(side: u16) -> [f64; 2] {
    let half_span = f64::from(side.saturating_sub(1).max(1)) / 2.;

    [-half_span, half_span]
}

/// Renders the in-game screen with the maze, the coins, the player and the optional solution.
///
/// This function draws the grid on a [`Canvas`], one terminal cell per maze cell, layering walls,
/// the revealed part of the solution, coins, both endpoints and finally the player. A status line
/// with the coins left and the running time sits below the maze.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations or when no game is in
/// progress.
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let session = app
        .session
        .as_ref()
        .ok_or_eyre("failed to retrieve the game in progress")?;
    let maze = session.maze();
    let palette = &app.config.palette;
    let size = maze.size();
    let side = u16::try_from(size)?;

    let (space, status_area) = maze_layout(frame.area(), side);

    // Pre-compute screen coordinates to handle errors before the paint closure
    let layers = maze_layers(app, session)?;

    let canvas = Canvas::default()
        .x_bounds(canvas_bounds(side))
        .y_bounds(canvas_bounds(side))
        .marker(Marker::Block)
        .paint(|ctx| {
            for (coords, color) in &layers {
                ctx.draw(&Points {
                    coords,
                    color: *color,
                });
                ctx.layer();
            }
        });

    frame.render_widget(canvas, space);

    // Render status as a block at the bottom with a top border
    let status_block = Block::bordered()
        .title("(arrows) move / (space) solution / (esc) menu")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(palette.accent))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);
    let status_inner = status_block.inner(status_area);

    let status = Line::styled(
        format!(
            "{}   Coins left: {}   Time: {:.1}s",
            app.player_name,
            maze.coins_remaining(),
            session.elapsed().as_secs_f64()
        ),
        Style::default().fg(palette.accent),
    )
    .centered();

    frame.render_widget(status_block, status_area);
    frame.render_widget(status, status_inner);

    Ok(())
}
