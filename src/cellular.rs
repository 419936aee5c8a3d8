use rand_core::RngCore;
use serde::{Deserialize, Serialize};

use crate::config::GenerationConfig;
use crate::coord::Coord2;
use crate::flood::extract_rooms;
use crate::grid::{Cell, Grid};
use crate::neighborhood::Dir8;
use crate::rng::roll;
use crate::strategy::{Algorithm, Layout, Strategy};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellularConfig {
    /// Chance an interior cell starts as Floor.
    pub floor_chance: f32,
    pub smoothing_passes: u32,
    /// A Floor cell with at least this many wall neighbours becomes Wall.
    pub floor_to_wall_min: u32,
    /// A Wall cell with at most this many wall neighbours becomes Floor.
    pub wall_to_floor_max: u32,
    /// Regions smaller than this are never registered as rooms.
    pub min_region_cells: usize,
}

impl Default for CellularConfig {
    fn default() -> Self {
        Self {
            floor_chance: 0.55,
            smoothing_passes: 5,
            floor_to_wall_min: 5,
            wall_to_floor_max: 3,
            min_region_cells: 20,
        }
    }
}

pub struct CellularAutomata;

impl Strategy for CellularAutomata {
    fn algorithm(&self) -> Algorithm {
        Algorithm::CellularAutomata
    }

    fn generate(&self, config: &GenerationConfig, rng: &mut dyn RngCore) -> Layout {
        cellular_generate(config, rng)
    }
}

/// Random noise smoothed into caves, then one room per sizeable cave.
pub fn cellular_generate<R: RngCore + ?Sized>(config: &GenerationConfig, rng: &mut R) -> Layout {
    let ca = &config.cellular;
    let mut grid = Grid::new(config.width, config.height);
    for y in 0..config.height as i32 {
        for x in 0..config.width as i32 {
            let c = Coord2::new(x, y);
            if grid.in_interior(c) && roll(rng, ca.floor_chance) {
                grid.set_cell(c, Cell::Floor);
            }
        }
    }

    for _ in 0..ca.smoothing_passes {
        grid = smooth(&grid, ca);
    }

    let rooms = extract_rooms(
        &grid,
        ca.min_region_cells,
        config.room_min_width,
        config.room_min_height,
    );
    log::debug!(
        "cellular: {} floor cells after {} passes, {} rooms",
        grid.floor_count(),
        ca.smoothing_passes,
        rooms.len()
    );

    Layout {
        grid,
        rooms,
        exhausted: false,
    }
}

/// One majority-rule pass. Reads only `prev`, so cells updated earlier in
/// the pass never influence later ones. The border stays Wall.
fn smooth(prev: &Grid, ca: &CellularConfig) -> Grid {
    let mut next = Grid::new(prev.width(), prev.height());
    for y in 1..prev.height() as i32 - 1 {
        for x in 1..prev.width() as i32 - 1 {
            let c = Coord2::new(x, y);
            let walls = wall_neighbors(prev, c);
            let floor = match prev.cell(c) {
                Cell::Floor => walls < ca.floor_to_wall_min,
                Cell::Wall => walls <= ca.wall_to_floor_max,
            };
            if floor {
                next.set_cell(c, Cell::Floor);
            }
        }
    }
    next
}

fn wall_neighbors(grid: &Grid, coord: Coord2) -> u32 {
    Dir8::ALL
        .iter()
        .filter(|dir| grid.cell(coord + dir.offset()) == Cell::Wall)
        .count() as u32
}
