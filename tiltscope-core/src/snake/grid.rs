//! Play field geometry

/// Cells across
pub const GRID_WIDTH: u8 = 16;
/// Cells down
pub const GRID_HEIGHT: u8 = 7;
/// Cell edge in pixels
pub const CELL_SIZE: i32 = 5;
/// Pixel row where the play field starts, below the score line
pub const AREA_TOP: i32 = 2 * CELL_SIZE;
/// Longest possible snake: every cell
pub const MAX_LEN: usize = GRID_WIDTH as usize * GRID_HEIGHT as usize;

/// A grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cell {
    pub x: u8,
    pub y: u8,
}

impl Cell {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Top-left pixel of the cell
    pub fn origin(&self) -> (i32, i32) {
        (
            self.x as i32 * CELL_SIZE,
            self.y as i32 * CELL_SIZE + AREA_TOP,
        )
    }

    /// Cell at a linear index, row-major
    pub(crate) fn from_index(index: usize) -> Self {
        Self::new(
            (index % GRID_WIDTH as usize) as u8,
            (index / GRID_WIDTH as usize) as u8,
        )
    }
}

/// Direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    pub const fn opposite(self) -> Heading {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }

    /// Neighbouring cell in this direction, wrapping at the edges
    pub fn step(self, cell: Cell) -> Cell {
        let Cell { x, y } = cell;
        match self {
            Heading::Up => Cell::new(x, (y + GRID_HEIGHT - 1) % GRID_HEIGHT),
            Heading::Down => Cell::new(x, (y + 1) % GRID_HEIGHT),
            Heading::Left => Cell::new((x + GRID_WIDTH - 1) % GRID_WIDTH, y),
            Heading::Right => Cell::new((x + 1) % GRID_WIDTH, y),
        }
    }
}
