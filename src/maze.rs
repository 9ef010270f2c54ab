//! Randomized recursive-backtracking maze carver.
//!
//! Carving walks a half-resolution lattice: from the start cell every
//! neighbour considered is two cells away, so untouched walls stay between
//! parallel corridors. Each passage may be widened across its direction of
//! travel, which lets wide passages merge into rooms.
//!
//! Per visited cell the random source is consumed in a fixed order: one
//! shuffle of the four directions when the cell is entered, then one width
//! sample for every passage carved out of it. A fixed seed therefore
//! reproduces the same grid for the same dimensions and width range.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::ConfigError;
use crate::grid::{Cell, Dir, Grid, Pos};

pub const START: Pos = Pos::new(1, 1);

/// Chance that a passage samples a wider width instead of the minimum.
const WIDE_CHANCE: f64 = 0.4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HallwayWidths {
    min: usize,
    max: usize,
}

impl HallwayWidths {
    pub fn new(min: usize, max: usize) -> Result<Self, ConfigError> {
        if min == 0 || min > max {
            return Err(ConfigError::HallwayWidth { min, max });
        }
        Ok(HallwayWidths { min, max })
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// Picks `min` most of the time; otherwise a width from the full range
    /// where `w` has weight `max + 1 - w`.
    pub fn sample(&self, rng: &mut impl Rng) -> usize {
        if !rng.gen_bool(WIDE_CHANCE) {
            return self.min;
        }
        let total: usize = (self.min..=self.max).map(|w| self.max + 1 - w).sum();
        let mut roll = rng.gen_range(0..total);
        for w in self.min..=self.max {
            let weight = self.max + 1 - w;
            if roll < weight {
                return w;
            }
            roll -= weight;
        }
        self.min
    }
}

impl Default for HallwayWidths {
    fn default() -> Self {
        HallwayWidths { min: 1, max: 1 }
    }
}

pub struct MazeGenerator {
    widths: HallwayWidths,
}

struct Frame {
    cell: Pos,
    dirs: [Dir; 4],
    next: usize,
}

impl Frame {
    fn enter(cell: Pos, rng: &mut impl Rng) -> Frame {
        let mut dirs = Dir::ALL;
        dirs.shuffle(rng);
        Frame { cell, dirs, next: 0 }
    }
}

impl MazeGenerator {
    pub fn new(widths: HallwayWidths) -> Self {
        MazeGenerator { widths }
    }

    /// Resets every cell to a wall and carves a fresh maze from [`START`].
    ///
    /// Uses an explicit stack of frames instead of recursion; frames consume
    /// their shuffled directions in order, which visits cells in the same
    /// order as the recursive formulation.
    pub fn generate(&self, grid: &mut Grid, rng: &mut impl Rng) {
        grid.fill(Cell::Wall);
        if !grid.contains(START) {
            debug!(
                width = grid.width(),
                height = grid.height(),
                "grid too small to carve"
            );
            return;
        }
        grid.set(START, Cell::Floor);

        let mut stack = vec![Frame::enter(START, rng)];
        let mut passages = 0usize;
        while let Some(frame) = stack.last_mut() {
            if frame.next == frame.dirs.len() {
                stack.pop();
                continue;
            }
            let cell = frame.cell;
            let dir = frame.dirs[frame.next];
            frame.next += 1;

            let target = cell.offset(dir, 2);
            if grid.get(target) != Some(Cell::Wall) {
                continue;
            }
            let width = self.widths.sample(rng);
            carve_passage(grid, cell, dir, width);
            passages += 1;
            stack.push(Frame::enter(target, rng));
        }

        debug!(
            width = grid.width(),
            height = grid.height(),
            passages,
            "maze carved"
        );
    }
}

/// Carves current cell, midpoint and target, each spread `width / 2` cells
/// to either side of the travel axis. Cells past the grid edge are skipped.
fn carve_passage(grid: &mut Grid, from: Pos, dir: Dir, width: usize) {
    let half = (width / 2) as i32;
    let across = dir.perpendicular();
    for step in 0..=2 {
        let center = from.offset(dir, step);
        for o in -half..=half {
            grid.set(center.offset(across, o), Cell::Floor);
        }
    }
}

pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Builds and carves a `width` x `height` maze. `None` draws a fresh seed.
pub fn generate(
    width: usize,
    height: usize,
    seed: Option<u64>,
    widths: HallwayWidths,
) -> Result<Grid, ConfigError> {
    let mut grid = Grid::new(width, height)?;
    let mut rng = seeded_rng(seed);
    MazeGenerator::new(widths).generate(&mut grid, &mut rng);
    Ok(grid)
}
