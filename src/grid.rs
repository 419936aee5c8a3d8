use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::coord::Coord2;
use crate::room::Room;

/// State of a single grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Wall,
    Floor,
}

/// Caller-defined prop category. The mapping to visual assets lives with the
/// renderer.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PropKind(pub u16);

/// Point annotation stamped onto a Floor cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    Waypoint,
    Prop(PropKind),
}

/// Fixed-size Wall/Floor grid backed by a flat row-major Vec, with a sparse
/// marker overlay.
///
/// Every marked cell is Floor: `set_marker` refuses Wall targets and
/// `set_cell` drops the marker of a cell that turns into Wall.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    markers: BTreeMap<Coord2, Marker>,
    width: u32,
    height: u32,
}

impl Grid {
    /// All-Wall grid.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            cells: alloc::vec![Cell::Wall; len],
            markers: BTreeMap::new(),
            width,
            height,
        }
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self, coord: Coord2) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && coord.x < self.width as i32
            && coord.y < self.height as i32
    }

    /// True for cells at least one cell away from the outer edge.
    #[inline]
    pub fn in_interior(&self, coord: Coord2) -> bool {
        coord.x >= 1
            && coord.y >= 1
            && coord.x <= self.width as i32 - 2
            && coord.y <= self.height as i32 - 2
    }

    fn index(&self, coord: Coord2) -> Option<usize> {
        if !self.in_bounds(coord) {
            return None;
        }
        coord.to_index(self.width)
    }

    /// Out-of-bounds reads are Wall.
    #[inline]
    pub fn cell(&self, coord: Coord2) -> Cell {
        self.index(coord)
            .and_then(|i| self.cells.get(i).copied())
            .unwrap_or(Cell::Wall)
    }

    #[inline]
    pub fn is_floor(&self, coord: Coord2) -> bool {
        self.cell(coord) == Cell::Floor
    }

    /// Out-of-bounds writes are ignored.
    pub fn set_cell(&mut self, coord: Coord2, cell: Cell) {
        if let Some(index) = self.index(coord) {
            self.cells[index] = cell;
            if cell == Cell::Wall {
                self.markers.remove(&coord);
            }
        }
    }

    /// Sets every in-bounds cell of the room's footprint to Floor and
    /// returns how many cells changed.
    pub fn carve_rect(&mut self, room: &Room) -> usize {
        let mut carved = 0;
        for y in room.y..room.y + room.height as i32 {
            for x in room.x..room.x + room.width as i32 {
                let c = Coord2::new(x, y);
                if self.in_bounds(c) && !self.is_floor(c) {
                    self.set_cell(c, Cell::Floor);
                    carved += 1;
                }
            }
        }
        carved
    }

    /// Stamps a marker, replacing any previous one. Returns `false` and
    /// leaves the overlay untouched when the target is not Floor.
    pub fn set_marker(&mut self, coord: Coord2, marker: Marker) -> bool {
        if !self.is_floor(coord) {
            return false;
        }
        self.markers.insert(coord, marker);
        true
    }

    #[inline]
    pub fn marker_at(&self, coord: Coord2) -> Option<Marker> {
        self.markers.get(&coord).copied()
    }

    /// Markers in coordinate order.
    pub fn markers(&self) -> impl Iterator<Item = (Coord2, Marker)> + '_ {
        self.markers.iter().map(|(c, m)| (*c, *m))
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn clear_markers(&mut self) {
        self.markers.clear();
    }

    pub fn floor_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == Cell::Floor).count()
    }

    /// Floor coordinates in row-major order.
    pub fn floor_cells(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Floor)
            .map(move |(i, _)| Coord2::from_index(i, self.width))
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let c = Coord2::new(x, y);
                let glyph = match (self.cell(c), self.marker_at(c)) {
                    (_, Some(Marker::Waypoint)) => 'w',
                    (_, Some(Marker::Prop(_))) => 'p',
                    (Cell::Floor, None) => '.',
                    (Cell::Wall, None) => '#',
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
