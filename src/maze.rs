//! Maze generation, endpoint selection and coin placement.
//!
//! This module contains the [`Maze`] model: a square grid of [`Cell`] values carved by a randomized
//! depth-first backtracker, the fixed start in the top-left corner, the end picked near the
//! opposite corner, the shortest solution path between them and the set of coins still waiting to
//! be collected.

use std::{collections::BTreeSet, fmt};

use log::{debug, warn};

use crate::{
    error::MazeError,
    pathfinding,
    shuffle::{RandomShuffle, Shuffle},
};

/// Grid coordinate stored as `(col, row)`.
pub type Position = (usize, usize);

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Impassable cell.
    Wall,
    /// Passable cell.
    Open,
}

/// Cardinal directions on the grid.
///
/// The declaration order, down, right, up and left, is the order in which both the generator and
/// the solver enumerate neighbours before any shuffling takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the last row.
    Down,
    /// Towards the last column.
    Right,
    /// Towards the first row.
    Up,
    /// Towards the first column.
    Left,
}

impl Direction {
    /// Every direction in neighbour enumeration order.
    pub const ALL: [Self; 4] = [Self::Down, Self::Right, Self::Up, Self::Left];

    /// Returns the unit `(dx, dy)` step of the direction.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Down => (0, 1),
            Self::Right => (1, 0),
            Self::Up => (0, -1),
            Self::Left => (-1, 0),
        }
    }

    /// Moves `distance` cells away from `origin`, staying inside a `size` by `size` grid.
    ///
    /// Returns [`None`] when the target would fall outside the grid on any side.
    #[must_use]
    pub fn offset(self, origin: Position, distance: usize, size: usize) -> Option<Position> {
        let distance = isize::try_from(distance).ok()?;
        let (dx, dy) = self.delta();

        let col = origin.0.checked_add_signed(dx.checked_mul(distance)?)?;
        let row = origin.1.checked_add_signed(dy.checked_mul(distance)?)?;

        (col < size && row < size).then_some((col, row))
    }
}

/// One pending cell of the iterative backtracker.
///
/// Each frame remembers the shuffled direction order drawn when the cell was entered and how many
/// of those directions have already been tried, so backtracking resumes exactly where a recursive
/// call would.
struct CarveFrame {
    /// Cell the frame carves from.
    cell: Position,
    /// Direction order drawn on entry.
    directions: [Direction; 4],
    /// Index of the next direction to try.
    next: usize,
}

/// Generated maze together with its endpoints, solution and coins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    /// Side length of the square grid.
    size: usize,
    /// Cells in row-major order.
    grid: Vec<Cell>,
    /// Entry cell, always the top-left corner.
    start: Position,
    /// Exit cell picked by the corner scan.
    end: Position,
    /// Shortest path from start to end, empty when the end cannot be reached.
    solution_path: Vec<Position>,
    /// Coins that have not been collected yet.
    coins: BTreeSet<Position>,
}

impl Maze {
    /// Builds a `size` by `size` maze with up to `coin_count` coins, drawing randomness from the
    /// operating system.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidConfiguration`] when `size` is zero.
    pub fn build(size: usize, coin_count: usize) -> Result<Self, MazeError> {
        Self::build_with(size, coin_count, &mut RandomShuffle::from_entropy())
    }

    /// Builds a `size` by `size` maze with up to `coin_count` coins using the given shuffle source.
    ///
    /// Generation carves the grid, picks the end, solves the maze and finally places the coins, in
    /// that order. A fixed shuffle source therefore yields a fixed maze.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidConfiguration`] when `size` is zero or the grid would not fit in
    /// memory addressing.
    pub fn build_with<S: Shuffle>(
        size: usize,
        coin_count: usize,
        shuffle: &mut S,
    ) -> Result<Self, MazeError> {
        let cells = size
            .checked_mul(size)
            .filter(|&cells| cells > 0)
            .ok_or(MazeError::InvalidConfiguration { size })?;

        let mut maze = Self {
            size,
            grid: vec![Cell::Wall; cells],
            start: (0, 0),
            end: (0, 0),
            solution_path: Vec::new(),
            coins: BTreeSet::new(),
        };

        maze.carve(shuffle);
        maze.end = maze.find_end();

        maze.solution_path = pathfinding::solve(&maze);
        if maze.solution_path.is_empty() {
            warn!(
                "end {:?} is unreachable from start {:?}; no solution overlay",
                maze.end, maze.start
            );
        }

        maze.coins = maze.place_coins(coin_count, shuffle);

        debug!(
            "built {size}x{size} maze: end {:?}, solution length {}, {} coins",
            maze.end,
            maze.solution_path.len(),
            maze.coins.len()
        );

        Ok(maze)
    }

    /// Carves passages with a randomized depth-first backtracker.
    ///
    /// The walk moves two cells at a time so that only even offsets become junctions, opening the
    /// cell in between as the passage. An explicit stack replaces recursion.
    fn carve<S: Shuffle>(&mut self, shuffle: &mut S) {
        let mut stack = vec![self.enter(self.start, shuffle)];

        while let Some(frame) = stack.last_mut() {
            let Some(&direction) = frame.directions.get(frame.next) else {
                let _ = stack.pop();
                continue;
            };
            frame.next += 1;
            let origin = frame.cell;

            let Some(target) = direction.offset(origin, 2, self.size) else {
                continue;
            };
            if self.cell(target) != Some(Cell::Wall) {
                continue;
            }

            if let Some(passage) = direction.offset(origin, 1, self.size) {
                self.open(passage);
            }
            stack.push(self.enter(target, shuffle));
        }
    }

    /// Opens `cell` and draws the order in which its neighbours will be visited.
    fn enter<S: Shuffle>(&mut self, cell: Position, shuffle: &mut S) -> CarveFrame {
        self.open(cell);

        let mut directions = Direction::ALL;
        shuffle.shuffle(&mut directions);

        CarveFrame {
            cell,
            directions,
            next: 0,
        }
    }

    /// Marks `cell` as open.
    fn open(&mut self, cell: Position) {
        if let Some(slot) = self.index_of(cell).and_then(|idx| self.grid.get_mut(idx)) {
            *slot = Cell::Open;
        }
    }

    /// Picks the end near the bottom-right corner.
    ///
    /// For every distance `d` from the corner, the scan tries the last column `d` rows up, the last
    /// row `d` columns left and the diagonal `d` steps up-left, in that order, and keeps the first
    /// open cell. At the largest distance the diagonal reaches the start, which is always open, so
    /// the fallback never runs. It returns the start rather than the bottom-right corner, which may
    /// be a wall, so the end stays open either way.
    fn find_end(&self) -> Position {
        let last = self.size - 1;

        (0..self.size)
            .flat_map(|distance| {
                let near = last - distance;
                [(last, near), (near, last), (near, near)]
            })
            .find(|&candidate| self.is_open(candidate))
            .unwrap_or(self.start)
    }

    /// Draws `coin_count` distinct open cells, never the start or the end.
    fn place_coins<S: Shuffle>(&self, coin_count: usize, shuffle: &mut S) -> BTreeSet<Position> {
        let mut candidates: Vec<Position> = self
            .open_cells()
            .filter(|&cell| cell != self.start && cell != self.end)
            .collect();

        shuffle.shuffle(&mut candidates);
        candidates.truncate(coin_count);

        candidates.into_iter().collect()
    }

    /// Converts a coordinate into an index into the row-major grid.
    fn index_of(&self, (col, row): Position) -> Option<usize> {
        self.in_bounds((col, row)).then(|| row * self.size + col)
    }

    /// Returns the side length of the grid.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the entry cell.
    #[must_use]
    pub const fn start(&self) -> Position {
        self.start
    }

    /// Returns the exit cell.
    #[must_use]
    pub const fn end(&self) -> Position {
        self.end
    }

    /// Returns the shortest path from start to end, or an empty slice when there is none.
    #[must_use]
    pub fn solution_path(&self) -> &[Position] {
        &self.solution_path
    }

    /// Returns the coins that have not been collected yet.
    #[must_use]
    pub const fn coins(&self) -> &BTreeSet<Position> {
        &self.coins
    }

    /// Returns how many coins are left.
    #[must_use]
    pub fn coins_remaining(&self) -> usize {
        self.coins.len()
    }

    /// Returns whether a coin lies on `cell`.
    #[must_use]
    pub fn has_coin(&self, cell: Position) -> bool {
        self.coins.contains(&cell)
    }

    /// Removes the coin on `cell`, returning whether there was one.
    pub fn collect_coin(&mut self, cell: Position) -> bool {
        self.coins.remove(&cell)
    }

    /// Returns whether `cell` lies inside the grid.
    #[must_use]
    pub const fn in_bounds(&self, (col, row): Position) -> bool {
        col < self.size && row < self.size
    }

    /// Returns the state of `cell`, or [`None`] when it lies outside the grid.
    #[must_use]
    pub fn cell(&self, cell: Position) -> Option<Cell> {
        self.index_of(cell)
            .and_then(|idx| self.grid.get(idx))
            .copied()
    }

    /// Returns whether `cell` is inside the grid and passable.
    #[must_use]
    pub fn is_open(&self, cell: Position) -> bool {
        self.cell(cell) == Some(Cell::Open)
    }

    /// Iterates over every open cell in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.grid
            .iter()
            .enumerate()
            .filter(|&(_, cell)| *cell == Cell::Open)
            .map(|(idx, _)| (idx % self.size, idx / self.size))
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.grid.chunks(self.size).enumerate() {
            if idx > 0 {
                writeln!(formatter)?;
            }
            for cell in row {
                let glyph = match cell {
                    Cell::Wall => '#',
                    Cell::Open => '.',
                };
                write!(formatter, "{glyph}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use proptest::prelude::*;

    use super::*;
    use crate::shuffle::IdentityShuffle;

    /// Builds a maze with the direction order fixed.
    fn fixed_maze(size: usize, coin_count: usize) -> Maze {
        Maze::build_with(size, coin_count, &mut IdentityShuffle).expect("size is positive")
    }

    /// Builds a maze from `#`/`.` rows, starting in the top-left corner and ending at `end`.
    fn hand_made(rows: &[&str], end: Position) -> Maze {
        let grid = rows
            .iter()
            .copied()
            .flat_map(str::chars)
            .map(|ch| if ch == '#' { Cell::Wall } else { Cell::Open })
            .collect();

        Maze {
            size: rows.len(),
            grid,
            start: (0, 0),
            end,
            solution_path: Vec::new(),
            coins: BTreeSet::new(),
        }
    }

    /// Counts passages between horizontally or vertically adjacent open cells.
    fn count_passages(maze: &Maze) -> usize {
        maze.open_cells()
            .map(|cell| {
                [Direction::Right, Direction::Down]
                    .into_iter()
                    .filter_map(|direction| direction.offset(cell, 1, maze.size()))
                    .filter(|&neighbour| maze.is_open(neighbour))
                    .count()
            })
            .sum()
    }

    /// Collects every open cell reachable from the start.
    fn reachable_from_start(maze: &Maze) -> HashSet<Position> {
        let mut seen = HashSet::from([maze.start()]);
        let mut queue = VecDeque::from([maze.start()]);

        while let Some(cell) = queue.pop_front() {
            for direction in Direction::ALL {
                if let Some(next) = direction.offset(cell, 1, maze.size()) {
                    if maze.is_open(next) && seen.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        seen
    }

    #[test]
    fn test_solve_walled_off_end_is_empty() {
        let maze = hand_made(&[".#.", "##.", "..."], (2, 2));

        assert_eq!(maze.to_string(), ".#.\n##.\n...");
        assert!(maze.is_open(maze.end()), "end itself is open");
        assert!(pathfinding::solve(&maze).is_empty(), "no path to the end");
    }

    #[test]
    fn test_solve_end_on_wall_is_empty() {
        let maze = hand_made(&["..", ".#"], (1, 1));

        assert!(!maze.is_open(maze.end()), "end is a wall");
        assert!(pathfinding::solve(&maze).is_empty(), "no path onto a wall");
    }

    #[test]
    fn test_solve_hand_made_detour() {
        let maze = hand_made(&["...", "##.", "..."], (0, 2));

        assert_eq!(
            pathfinding::solve(&maze),
            vec![(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (1, 2), (0, 2)]
        );
    }

    #[test]
    fn test_build_rejects_zero_size() {
        let result = Maze::build_with(0, 3, &mut IdentityShuffle);

        assert_eq!(result, Err(MazeError::InvalidConfiguration { size: 0 }));
    }

    #[test]
    fn test_build_entropy_source_succeeds() {
        let maze = Maze::build(9, 4).expect("positive size should build");

        assert_eq!(maze.size(), 9);
        assert!(maze.is_open(maze.start()), "start should be open");
        assert_eq!(maze.coins_remaining(), 4);
    }

    #[test]
    fn test_fixed_order_size_four_layout() {
        let maze = fixed_maze(4, 0);

        assert_eq!(maze.to_string(), ".#.#\n.#.#\n...#\n####");
        assert_eq!(maze.start(), (0, 0));
        assert_eq!(maze.end(), (2, 2));
        assert_eq!(
            maze.solution_path(),
            &[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]
        );
    }

    #[test]
    fn test_fixed_order_size_five_layout() {
        let maze = fixed_maze(5, 0);

        assert_eq!(maze.to_string(), ".#...\n.#.#.\n.#.#.\n.###.\n.....");
        assert_eq!(maze.end(), (4, 4));
        assert_eq!(
            maze.solution_path(),
            &[
                (0, 0),
                (0, 1),
                (0, 2),
                (0, 3),
                (0, 4),
                (1, 4),
                (2, 4),
                (3, 4),
                (4, 4)
            ]
        );
    }

    #[test]
    fn test_fixed_order_coins_follow_row_major_order() {
        let maze = fixed_maze(4, 3);

        let coins: Vec<Position> = maze.coins().iter().copied().collect();
        assert_eq!(coins, vec![(0, 1), (2, 0), (2, 1)]);
    }

    #[test]
    fn test_single_cell_maze() {
        let maze = fixed_maze(1, 5);

        assert_eq!(maze.to_string(), ".");
        assert_eq!(maze.end(), (0, 0));
        assert_eq!(maze.solution_path(), &[(0, 0)]);
        assert_eq!(maze.coins_remaining(), 0);
    }

    #[test]
    fn test_two_cell_maze_ends_on_start() {
        let maze = fixed_maze(2, 5);

        assert_eq!(maze.to_string(), ".#\n##");
        assert_eq!(maze.end(), maze.start());
        assert_eq!(maze.coins_remaining(), 0);
    }

    #[test]
    fn test_coin_count_is_clamped() {
        let maze = fixed_maze(4, 100);

        // open cells minus start and end
        assert_eq!(maze.coins_remaining(), 5);
        assert!(!maze.has_coin(maze.start()), "no coin on the start");
        assert!(!maze.has_coin(maze.end()), "no coin on the end");
    }

    #[test]
    fn test_collect_coin_removes_only_that_coin() {
        let mut maze = fixed_maze(5, 4);
        let coins: Vec<Position> = maze.coins().iter().copied().collect();
        let first = *coins.first().expect("maze should hold coins");

        assert!(maze.collect_coin(first), "first collection should succeed");
        assert!(!maze.collect_coin(first), "second collection is a no-op");
        assert_eq!(maze.coins_remaining(), coins.len() - 1);
        for coin in coins.iter().skip(1) {
            assert!(maze.has_coin(*coin), "other coins stay in place");
        }
    }

    #[test]
    fn test_queries_outside_grid() {
        let maze = fixed_maze(4, 0);

        assert!(maze.in_bounds((3, 3)), "last cell is in bounds");
        assert!(!maze.in_bounds((4, 0)), "column past the edge");
        assert!(!maze.in_bounds((0, 4)), "row past the edge");
        assert_eq!(maze.cell((4, 4)), None);
        assert!(!maze.is_open((9, 9)), "outside cells are never open");
        assert_eq!(maze.cell((1, 0)), Some(Cell::Wall));
    }

    #[test]
    fn test_direction_offset_bounds() {
        assert_eq!(Direction::Up.offset((0, 0), 1, 4), None);
        assert_eq!(Direction::Left.offset((0, 2), 1, 4), None);
        assert_eq!(Direction::Right.offset((2, 0), 2, 4), None);
        assert_eq!(Direction::Down.offset((1, 1), 2, 4), Some((1, 3)));
    }

    #[test]
    fn test_large_maze_builds_without_recursion() {
        let maze = Maze::build_with(401, 0, &mut RandomShuffle::seeded(3))
            .expect("positive size should build");

        assert_eq!(maze.size(), 401);
        assert_eq!(maze.end(), (400, 400));
        assert!(!maze.solution_path().is_empty(), "end should be reachable");
    }

    proptest! {
        #[test]
        fn test_generated_maze_is_perfect(size in 1_usize..24, seed in any::<u64>()) {
            let maze = Maze::build_with(size, 0, &mut RandomShuffle::seeded(seed))
                .expect("positive size should build");

            let open = maze.open_cells().count();
            prop_assert!(maze.is_open(maze.start()));
            prop_assert!(maze.is_open(maze.end()));
            prop_assert_eq!(reachable_from_start(&maze).len(), open);
            prop_assert_eq!(count_passages(&maze), open - 1);
        }

        #[test]
        fn test_coins_avoid_endpoints(
            size in 1_usize..16,
            coin_count in 0_usize..80,
            seed in any::<u64>(),
        ) {
            let maze = Maze::build_with(size, coin_count, &mut RandomShuffle::seeded(seed))
                .expect("positive size should build");

            let available = maze
                .open_cells()
                .filter(|&cell| cell != maze.start() && cell != maze.end())
                .count();
            prop_assert_eq!(maze.coins_remaining(), coin_count.min(available));
            prop_assert!(!maze.has_coin(maze.start()));
            prop_assert!(!maze.has_coin(maze.end()));
            prop_assert!(maze.coins().iter().all(|&coin| maze.is_open(coin)));
        }

        #[test]
        fn test_same_seed_same_maze(size in 1_usize..20, seed in any::<u64>()) {
            let first = Maze::build_with(size, 6, &mut RandomShuffle::seeded(seed))
                .expect("positive size should build");
            let second = Maze::build_with(size, 6, &mut RandomShuffle::seeded(seed))
                .expect("positive size should build");

            prop_assert_eq!(first, second);
        }
    }
}
