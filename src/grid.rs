use crate::error::ConfigError;
use crate::item::ItemId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Wall,
    Floor,
    Item(ItemId),
}

/// Grid coordinates. Signed so that callers can look past the edges;
/// anything outside the grid reads as a wall through [`crate::query`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Pos { x, y }
    }

    pub fn step(self, dir: Dir) -> Pos {
        self.offset(dir, 1)
    }

    pub fn offset(self, dir: Dir, n: i32) -> Pos {
        let (dx, dy) = dir.delta();
        Pos {
            x: self.x + dx * n,
            y: self.y + dy * n,
        }
    }

    pub fn chebyshev(self, other: Pos) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }

    /// Unit vector across the direction of travel.
    pub fn perpendicular(self) -> Dir {
        match self {
            Dir::Up | Dir::Down => Dir::Right,
            Dir::Left | Dir::Right => Dir::Down,
        }
    }
}

/// Flat row-major cell storage. Dimensions are fixed at construction and
/// the grid has no opinion about out-of-range coordinates: `get` reports
/// them as `None` and `set` ignores them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Result<Grid, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroDimension { width, height });
        }
        // coordinates are handed out as i32
        let too_large = ConfigError::GridTooLarge { width, height };
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(too_large);
        }
        let len = width.checked_mul(height).ok_or(too_large)?;
        Ok(Grid {
            width,
            height,
            cells: vec![Cell::Wall; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.index(pos).is_some()
    }

    pub fn get(&self, pos: Pos) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    pub fn set(&mut self, pos: Pos, cell: Cell) {
        if let Some(idx) = self.index(pos) {
            self.cells[idx] = cell;
        }
    }

    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Cells in row-major order together with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, Cell)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(idx, cell)| {
            let pos = Pos::new((idx % width) as i32, (idx / width) as i32);
            (pos, *cell)
        })
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }
}
