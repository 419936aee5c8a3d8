use rand::Rng;
use rand_core::RngCore;
use serde::{Deserialize, Serialize};

use crate::config::GenerationConfig;
use crate::coord::Coord2;
use crate::flood::extract_rooms;
use crate::grid::{Cell, Grid};
use crate::neighborhood::Dir4;
use crate::rng::roll;
use crate::room::Room;
use crate::strategy::{Algorithm, Layout, Strategy};

/// Maximum distance between the walker and the center of a mid-walk room.
/// Also capped per room so the room still covers the walker's cell.
const ROOM_JITTER: i32 = 2;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrunkardConfig {
    /// Fraction of the grid area that should end up Floor.
    pub coverage: f32,
    /// Step ceiling as a multiple of the grid area.
    pub step_ceiling_factor: u32,
    /// Per-step chance of trying to carve a room around the walker.
    pub room_chance: f32,
    pub min_region_cells: usize,
}

impl Default for DrunkardConfig {
    fn default() -> Self {
        Self {
            coverage: 0.30,
            step_ceiling_factor: 10,
            room_chance: 0.02,
            min_region_cells: 20,
        }
    }
}

pub struct DrunkardsWalk;

impl Strategy for DrunkardsWalk {
    fn algorithm(&self) -> Algorithm {
        Algorithm::DrunkardsWalk
    }

    fn generate(&self, config: &GenerationConfig, rng: &mut dyn RngCore) -> Layout {
        drunkard_generate(config, rng)
    }
}

/// Single walker from the grid center, with occasional rooms dropped along
/// the way. Rooms are registered afterwards from the connected floor regions.
pub fn drunkard_generate<R: RngCore + ?Sized>(config: &GenerationConfig, rng: &mut R) -> Layout {
    let dk = &config.drunkard;
    let mut grid = Grid::new(config.width, config.height);
    let target = coverage_target(config.area(), dk.coverage);
    let ceiling = (config.area() as u64).saturating_mul(u64::from(dk.step_ceiling_factor));

    let center = Coord2::new(config.width as i32 / 2, config.height as i32 / 2);
    let seed_room = fit_inside(
        Room::new(
            center.x - config.room_min_width as i32 / 2,
            center.y - config.room_min_height as i32 / 2,
            config.room_min_width,
            config.room_min_height,
        ),
        &grid,
    );
    let mut floor = grid.carve_rect(&seed_room);
    // Mid-walk rooms are checked against this list only, never against the
    // unregistered trail.
    let mut tracked = alloc::vec![seed_room];

    let lo = Coord2::new(1, 1);
    let hi = Coord2::new(config.width as i32 - 2, config.height as i32 - 2);
    let mut pos = center.clamp_within(lo, hi);
    let mut steps = 0u64;

    while floor < target && steps < ceiling {
        steps += 1;
        pos = (pos + Dir4::random(rng).offset()).clamp_within(lo, hi);
        if !grid.is_floor(pos) {
            grid.set_cell(pos, Cell::Floor);
            floor += 1;
        }

        if roll(rng, dk.room_chance) {
            if let Some(room) = propose_room(pos, config, &grid, &tracked, rng) {
                floor += grid.carve_rect(&room);
                tracked.push(room);
            }
        }
    }

    let exhausted = floor < target;
    if exhausted {
        log::warn!(
            "drunkard: step ceiling {} hit at {}/{} floor cells",
            ceiling,
            floor,
            target
        );
    }

    let rooms = extract_rooms(
        &grid,
        dk.min_region_cells,
        config.room_min_width,
        config.room_min_height,
    );
    log::debug!(
        "drunkard: {} steps, {} floor cells, {} walk rooms, {} registered rooms",
        steps,
        floor,
        tracked.len(),
        rooms.len()
    );

    Layout {
        grid,
        rooms,
        exhausted,
    }
}

/// Smallest cell count that is at least `coverage` of `area`, with the
/// fraction taken to four decimal places.
fn coverage_target(area: usize, coverage: f32) -> usize {
    let per_10k = (coverage.clamp(0.0, 1.0) * 10_000.0 + 0.5) as u64;
    (area as u64 * per_10k).div_ceil(10_000) as usize
}

/// Random-size room centered near `pos` and covering it, or `None` if it
/// runs into a tracked room (padding 1).
fn propose_room<R: RngCore + ?Sized>(
    pos: Coord2,
    config: &GenerationConfig,
    grid: &Grid,
    tracked: &[Room],
    rng: &mut R,
) -> Option<Room> {
    let w = rng.gen_range(config.room_min_width..=config.room_max_width);
    let h = rng.gen_range(config.room_min_height..=config.room_max_height);
    let jx = ROOM_JITTER.min((w as i32 - 1) / 2);
    let jy = ROOM_JITTER.min((h as i32 - 1) / 2);
    let cx = pos.x + rng.gen_range(-jx..=jx);
    let cy = pos.y + rng.gen_range(-jy..=jy);
    let room = fit_inside(Room::new(cx - w as i32 / 2, cy - h as i32 / 2, w, h), grid);
    if tracked.iter().any(|other| room.intersects(other, 1)) {
        return None;
    }
    Some(room)
}

/// Shifts `room` so it keeps the one-cell margin. Rooms wider than the
/// interior are left pinned to the top-left of it.
fn fit_inside(mut room: Room, grid: &Grid) -> Room {
    let max_x = (grid.width() as i32 - 1 - room.width as i32).max(1);
    let max_y = (grid.height() as i32 - 1 - room.height as i32).max(1);
    room.x = room.x.clamp(1, max_x);
    room.y = room.y.clamp(1, max_y);
    room
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flood::flood_fill;
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;

    fn config(width: u32, height: u32) -> GenerationConfig {
        GenerationConfig::default()
            .with_algorithm(Algorithm::DrunkardsWalk)
            .with_size(width, height)
            .with_room_bounds(4, 8)
    }

    #[test]
    fn coverage_target_rounds_up() {
        assert_eq!(coverage_target(1600, 0.30), 480);
        assert_eq!(coverage_target(10, 0.25), 3);
        assert_eq!(coverage_target(10, 0.0), 0);
    }

    #[test]
    fn reaches_coverage_target() {
        let cfg = config(40, 40);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let layout = drunkard_generate(&cfg, &mut rng);
        assert!(!layout.exhausted);
        assert!(layout.grid.floor_count() >= 480);
    }

    #[test]
    fn walk_is_one_connected_cave() {
        let cfg = config(40, 30);
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let layout = drunkard_generate(&cfg, &mut rng);
        let center = Coord2::new(20, 15);
        assert_eq!(
            flood_fill(&layout.grid, center).len(),
            layout.grid.floor_count()
        );
        assert_eq!(layout.rooms.len(), 1);
    }

    #[test]
    fn walk_never_touches_border() {
        let cfg = config(24, 18);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let layout = drunkard_generate(&cfg, &mut rng);
        for c in layout.grid.floor_cells() {
            assert!(layout.grid.in_interior(c));
        }
    }

    #[test]
    fn step_ceiling_flags_exhaustion() {
        let mut cfg = config(40, 40);
        cfg.drunkard.step_ceiling_factor = 0;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let layout = drunkard_generate(&cfg, &mut rng);
        assert!(layout.exhausted);
        assert_eq!(layout.grid.floor_count(), 16);
    }

    #[test]
    fn proposals_reject_tracked_overlap() {
        let cfg = config(40, 40);
        let grid = Grid::new(40, 40);
        let tracked = [Room::new(1, 1, 38, 38)];
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..20 {
            assert!(propose_room(Coord2::new(20, 20), &cfg, &grid, &tracked, &mut rng).is_none());
        }
    }

    #[test]
    fn proposals_ignore_untracked_floor() {
        let cfg = config(40, 40);
        let mut grid = Grid::new(40, 40);
        grid.carve_rect(&Room::new(1, 1, 38, 38));
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let room = propose_room(Coord2::new(20, 20), &cfg, &grid, &[], &mut rng);
        assert!(room.is_some_and(|r| r.within_margin(40, 40)));
    }
}
