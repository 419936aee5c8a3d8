use alloc::vec::Vec;

use crate::coord::Coord2;
use crate::grid::Grid;
use crate::neighborhood::Dir4;
use crate::room::Room;

/// 4-connected block of Floor cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    pub cells: Vec<Coord2>,
    /// Inclusive bounding box corners.
    pub min: Coord2,
    pub max: Coord2,
}

impl Region {
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bounding box as a room record. Irregular shapes are approximated.
    pub fn bounding_room(&self) -> Room {
        Room::from_bounds(self.min, self.max)
    }
}

/// Iterative 4-connected fill over Floor cells, explicit stack so large caves
/// cannot exhaust the call stack. Marks every reached cell in `visited`.
fn fill_region(grid: &Grid, start: Coord2, visited: &mut [bool]) -> Region {
    let mut region = Region {
        cells: Vec::new(),
        min: start,
        max: start,
    };
    if !grid.is_floor(start) {
        return region;
    }
    let Some(start_index) = start.to_index(grid.width()) else {
        return region;
    };
    if visited[start_index] {
        return region;
    }

    let mut stack = alloc::vec![start];
    visited[start_index] = true;

    while let Some(current) = stack.pop() {
        region.cells.push(current);
        region.min = Coord2::new(region.min.x.min(current.x), region.min.y.min(current.y));
        region.max = Coord2::new(region.max.x.max(current.x), region.max.y.max(current.y));

        for dir in Dir4::ALL {
            let next = current + dir.offset();
            if !grid.is_floor(next) {
                continue;
            }
            let Some(index) = next.to_index(grid.width()) else {
                continue;
            };
            if visited[index] {
                continue;
            }
            visited[index] = true;
            stack.push(next);
        }
    }

    region
}

/// All Floor cells 4-connected to `start`. Empty if `start` is not Floor.
pub fn flood_fill(grid: &Grid, start: Coord2) -> Vec<Coord2> {
    let mut visited = alloc::vec![false; grid.len()];
    fill_region(grid, start, &mut visited).cells
}

/// Every Floor region, discovered in row-major order of their first cell.
pub fn floor_regions(grid: &Grid) -> Vec<Region> {
    let mut visited = alloc::vec![false; grid.len()];
    let mut regions = Vec::new();
    for start in grid.floor_cells() {
        let already = start
            .to_index(grid.width())
            .map(|i| visited[i])
            .unwrap_or(true);
        if already {
            continue;
        }
        regions.push(fill_region(grid, start, &mut visited));
    }
    regions
}

/// Registers a room for each region with at least `min_cells` cells whose
/// bounding box is at least `min_width`×`min_height`. The grid is not
/// modified.
pub fn extract_rooms(grid: &Grid, min_cells: usize, min_width: u32, min_height: u32) -> Vec<Room> {
    let regions = floor_regions(grid);
    let total = regions.len();
    let rooms: Vec<Room> = regions
        .into_iter()
        .filter(|region| region.len() >= min_cells)
        .map(|region| region.bounding_room())
        .filter(|room| room.width >= min_width && room.height >= min_height)
        .collect();
    log::debug!(
        "region extraction: {} regions, {} registered as rooms",
        total,
        rooms.len()
    );
    rooms
}

/// True if every target is reachable from `from` through Floor cells.
pub fn reaches_all(grid: &Grid, from: Coord2, targets: &[Coord2]) -> bool {
    let mut visited = alloc::vec![false; grid.len()];
    let region = fill_region(grid, from, &mut visited);
    if region.is_empty() {
        return targets.is_empty();
    }
    targets.iter().all(|t| {
        grid.in_bounds(*t)
            && t.to_index(grid.width())
                .map(|i| visited[i])
                .unwrap_or(false)
    })
}

/// True when all Floor cells form a single region (or there is at most one).
pub fn is_connected(grid: &Grid) -> bool {
    let total = grid.floor_count();
    if total <= 1 {
        return true;
    }
    match grid.floor_cells().next() {
        Some(start) => flood_fill(grid, start).len() == total,
        None => true,
    }
}
