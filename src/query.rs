//! Stateless spatial queries. Every movement decision in the game goes
//! through [`is_wall`].

use crate::grid::{Cell, Grid, Pos};

pub fn is_wall(grid: &Grid, pos: Pos) -> bool {
    matches!(grid.get(pos), None | Some(Cell::Wall))
}

/// Plain floor cells in row-major order. Cells holding items are left out.
pub fn find_open_spaces(grid: &Grid) -> Vec<Pos> {
    grid.iter()
        .filter(|(_, cell)| *cell == Cell::Floor)
        .map(|(pos, _)| pos)
        .collect()
}

/// Straight-line sight along a row or a column only. Cells strictly between
/// the two ends must be open; the ends themselves are not checked.
pub fn line_of_sight(grid: &Grid, origin: Pos, target: Pos, max_distance: i32) -> bool {
    let (dx, dy) = (target.x - origin.x, target.y - origin.y);
    if dx != 0 && dy != 0 {
        return false;
    }
    let distance = dx.abs().max(dy.abs());
    if distance > max_distance {
        return false;
    }
    let (sx, sy) = (dx.signum(), dy.signum());
    (1..distance).all(|i| !is_wall(grid, Pos::new(origin.x + sx * i, origin.y + sy * i)))
}
