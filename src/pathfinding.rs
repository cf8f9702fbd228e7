//! Shortest path solving and solution overlay module.
//!
//! This module contains the breadth-first solver used when a maze is built, the reveal animation
//! for the "show solution" overlay, and the coordinate transformation from maze cells to the
//! canvas space the in-game screen draws on.

use std::{
    collections::{HashMap, HashSet, VecDeque},
    time::{Duration, Instant},
};

use color_eyre::eyre::Result;

use crate::maze::{Direction, Maze, Position};

/// Default delay between two reveal steps of the solution overlay, in milliseconds.
pub const OVERLAY_FRAME_DELAY_MS: u64 = 40;

/// Finds the shortest path from the start of `maze` to its end.
///
/// This function runs a breadth-first search over 4-connected open cells, exploring neighbours in
/// [`Direction::ALL`] order and recording the predecessor of every cell the first time it is
/// reached. The returned path starts at the start and finishes at the end; it is empty when the
/// end cannot be reached.
#[must_use]
pub fn solve(maze: &Maze) -> Vec<Position> {
    let start = maze.start();
    let end = maze.end();

    if !maze.is_open(start) || !maze.is_open(end) {
        return Vec::new();
    }

    let mut previous: HashMap<Position, Position> = HashMap::new();
    let mut visited = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        if current == end {
            return rebuild_path(&previous, start, end);
        }

        for direction in Direction::ALL {
            let Some(next) = direction.offset(current, 1, maze.size()) else {
                continue;
            };

            if maze.is_open(next) && visited.insert(next) {
                let _ = previous.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    Vec::new()
}

/// Walks predecessor links back from `end` to `start`.
fn rebuild_path(
    previous: &HashMap<Position, Position>,
    start: Position,
    end: Position,
) -> Vec<Position> {
    let mut path = vec![end];
    let mut current = end;

    while current != start {
        let Some(&prior) = previous.get(&current) else {
            return Vec::new();
        };
        path.push(prior);
        current = prior;
    }

    path.reverse();
    path
}

/// Reveal state for the solution overlay.
///
/// This structure tracks how much of the solution path is currently drawn. While the overlay is
/// shown, each update past the frame delay reveals one more cell until the whole path is visible.
#[derive(Debug, Clone)]
pub struct SolutionOverlay {
    /// Number of path cells currently revealed.
    revealed: usize,
    /// Minimum time between two reveal steps.
    frame_delay: Duration,
    /// Timestamp of the last reveal step.
    last_update_time: Instant,
}

impl Default for SolutionOverlay {
    fn default() -> Self {
        Self::new(Duration::from_millis(OVERLAY_FRAME_DELAY_MS))
    }
}

impl SolutionOverlay {
    /// Creates an overlay with nothing revealed.
    #[must_use]
    pub fn new(frame_delay: Duration) -> Self {
        Self {
            revealed: 0,
            frame_delay,
            last_update_time: Instant::now(),
        }
    }

    /// Hides the whole path again and restarts the frame timer.
    pub fn reset(&mut self) {
        self.revealed = 0;
        self.last_update_time = Instant::now();
    }

    /// Reveals the next cell of a path of `path_len` cells once the frame delay has passed.
    pub fn update(&mut self, path_len: usize) {
        if self.revealed >= path_len {
            return;
        }

        if self.last_update_time.elapsed() >= self.frame_delay {
            self.last_update_time = Instant::now();
            self.revealed += 1;
        }
    }

    /// Returns the number of revealed cells.
    #[must_use]
    pub const fn revealed(&self) -> usize {
        self.revealed
    }

    /// Returns the revealed prefix of `path`.
    #[must_use]
    pub fn visible<'path>(&self, path: &'path [Position]) -> &'path [Position] {
        path.get(..self.revealed).unwrap_or(path)
    }
}

/// Transforms maze coordinates to screen coordinates for canvas rendering.
///
/// This function converts maze coordinates (col, row) of a `size` by `size` maze to screen
/// coordinates (x, y) using coordinate[i] = (n - 1) / 2 - i for rows and
/// coordinate[i] = i - (n - 1) / 2 for columns, which centres the maze on the canvas origin.
///
/// # Errors
///
/// This function returns an error when the size or a coordinate does not fit in a `u16`.
pub fn transform_maze_to_screen_coords(
    maze_coords: &[Position],
    size: usize,
) -> Result<Vec<(f64, f64)>> {
    let size = f64::from(u16::try_from(size)?);

    maze_coords
        .iter()
        .map(|&(col, row)| {
            let screen_y = (size - 1.) / 2. - f64::from(u16::try_from(row)?);
            let screen_x = f64::from(u16::try_from(col)?) - (size - 1.) / 2.;

            Ok((screen_x, screen_y))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::shuffle::{IdentityShuffle, RandomShuffle};

    /// Computes the BFS distance of every cell from the start, independently of [`solve`].
    fn distances_from_start(maze: &Maze) -> Vec<Option<usize>> {
        let size = maze.size();
        let mut distances = vec![None; size * size];
        let mut frontier = vec![maze.start()];
        let mut depth = 0;

        if let Some(slot) = distances.get_mut(0) {
            *slot = Some(0);
        }

        while !frontier.is_empty() {
            depth += 1;
            let mut next_frontier = Vec::new();
            for (col, row) in frontier {
                let neighbours = [
                    (col + 1, row),
                    (col, row + 1),
                    (col.wrapping_sub(1), row),
                    (col, row.wrapping_sub(1)),
                ];
                for (ncol, nrow) in neighbours {
                    if !maze.is_open((ncol, nrow)) {
                        continue;
                    }
                    let slot = distances
                        .get_mut(nrow * size + ncol)
                        .expect("open cells are in bounds");
                    if slot.is_none() {
                        *slot = Some(depth);
                        next_frontier.push((ncol, nrow));
                    }
                }
            }
            frontier = next_frontier;
        }

        distances
    }

    /// Returns whether two cells are 4-adjacent.
    const fn adjacent(first: Position, second: Position) -> bool {
        first.0.abs_diff(second.0) + first.1.abs_diff(second.1) == 1
    }

    #[test]
    fn test_solve_fixed_maze() {
        let maze = Maze::build_with(4, 0, &mut IdentityShuffle).expect("size is positive");

        assert_eq!(
            solve(&maze),
            vec![(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]
        );
    }

    #[test]
    fn test_solve_start_equals_end() {
        let maze = Maze::build_with(2, 0, &mut IdentityShuffle).expect("size is positive");

        assert_eq!(solve(&maze), vec![(0, 0)]);
    }

    #[test]
    fn test_rebuild_path_with_missing_link() {
        let previous = HashMap::from([((2, 0), (1, 0))]);

        assert!(
            rebuild_path(&previous, (0, 0), (2, 0)).is_empty(),
            "a broken chain yields no path"
        );
    }

    #[test]
    fn test_overlay_reveals_one_cell_per_update() {
        let path = [(0, 0), (0, 1), (0, 2)];
        let mut overlay = SolutionOverlay::new(Duration::ZERO);

        assert!(overlay.visible(&path).is_empty(), "nothing shown at first");

        overlay.update(path.len());
        assert_eq!(overlay.visible(&path), &[(0, 0)]);

        overlay.update(path.len());
        overlay.update(path.len());
        overlay.update(path.len());
        assert_eq!(overlay.revealed(), 3);
        assert_eq!(overlay.visible(&path), &path);
    }

    #[test]
    fn test_overlay_waits_for_frame_delay() {
        let mut overlay = SolutionOverlay::new(Duration::from_secs(3600));

        overlay.update(5);
        assert_eq!(overlay.revealed(), 0);
    }

    #[test]
    fn test_overlay_reset() {
        let mut overlay = SolutionOverlay::new(Duration::ZERO);
        overlay.update(4);
        overlay.update(4);
        overlay.reset();

        assert_eq!(overlay.revealed(), 0);
    }

    #[test]
    fn test_transform_coords_centres_maze() {
        let coords = transform_maze_to_screen_coords(&[(0, 0), (2, 2), (1, 1)], 3)
            .expect("small coordinates should convert");

        assert_eq!(coords, vec![(-1., 1.), (1., -1.), (0., 0.)]);
    }

    #[test]
    fn test_transform_coords_rejects_huge_size() {
        let result = transform_maze_to_screen_coords(&[(0, 0)], 70_000);

        assert!(result.is_err(), "size beyond u16 should fail");
    }

    proptest! {
        #[test]
        fn test_solution_is_shortest_open_walk(size in 1_usize..20, seed in any::<u64>()) {
            let maze = Maze::build_with(size, 0, &mut RandomShuffle::seeded(seed))
                .expect("positive size should build");
            let path = maze.solution_path();

            prop_assert_eq!(path.first().copied(), Some(maze.start()));
            prop_assert_eq!(path.last().copied(), Some(maze.end()));
            prop_assert!(path.iter().all(|&cell| maze.is_open(cell)));
            let steps_adjacent = path.windows(2).all(|pair| match pair {
                [first, second] => adjacent(*first, *second),
                _ => false,
            });
            prop_assert!(steps_adjacent);

            let (end_col, end_row) = maze.end();
            let distance = distances_from_start(&maze)
                .get(end_row * size + end_col)
                .copied()
                .flatten();
            prop_assert_eq!(distance, Some(path.len() - 1));
        }
    }
}
