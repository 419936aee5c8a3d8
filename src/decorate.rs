use alloc::vec::Vec;

use rand::seq::SliceRandom;
use rand_core::RngCore;
use serde::{Deserialize, Serialize};

use crate::config::PropEntry;
use crate::coord::Coord2;
use crate::grid::{Grid, Marker};
use crate::rng::roll;
use crate::room::Room;

/// Rooms at least this big on both sides are preferred for spawning.
pub const SPAWN_MIN_ROOM: u32 = 6;
/// Side of the square spawn sub-area checked around a room center.
pub const SPAWN_AREA: u32 = 4;

/// Which qualifying room hosts the spawn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnPolicy {
    #[default]
    First,
    Last,
    Random,
}

/// Chosen spawn location.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    pub position: Coord2,
    /// Verified all-Floor sub-area around `position`, if there is one.
    pub area: Option<Room>,
    /// Index into the dungeon's room list.
    pub room: Option<usize>,
}

/// Stamps a Waypoint on each Floor cell with probability `probability`.
/// Returns the number placed.
pub fn place_waypoints<R: RngCore + ?Sized>(
    grid: &mut Grid,
    probability: f32,
    rng: &mut R,
) -> usize {
    let floors: Vec<Coord2> = grid.floor_cells().collect();
    let mut placed = 0;
    for c in floors {
        if roll(rng, probability) && grid.set_marker(c, Marker::Waypoint) {
            placed += 1;
        }
    }
    placed
}

/// Walks the prop table in order for every unmarked Floor cell and stamps the
/// first prop whose roll succeeds. Returns the number placed.
pub fn place_props<R: RngCore + ?Sized>(
    grid: &mut Grid,
    props: &[PropEntry],
    rng: &mut R,
) -> usize {
    if props.is_empty() {
        return 0;
    }
    let floors: Vec<Coord2> = grid.floor_cells().collect();
    let mut placed = 0;
    for c in floors {
        if grid.marker_at(c).is_some() {
            continue;
        }
        let hit = props.iter().find(|entry| roll(rng, entry.probability));
        if let Some(entry) = hit {
            if grid.set_marker(c, Marker::Prop(entry.kind)) {
                placed += 1;
            }
        }
    }
    placed
}

/// Picks the spawn room by `policy` and verifies a centered 4x4 Floor
/// sub-area inside it. Without one the spawn falls back to the room's
/// Floor cell nearest its center.
pub fn choose_spawn<R: RngCore + ?Sized>(
    grid: &Grid,
    rooms: &[Room],
    policy: SpawnPolicy,
    rng: &mut R,
) -> Spawn {
    let qualifying: Vec<usize> = rooms
        .iter()
        .enumerate()
        .filter(|(_, room)| room.width >= SPAWN_MIN_ROOM && room.height >= SPAWN_MIN_ROOM)
        .map(|(i, _)| i)
        .collect();
    let candidates: Vec<usize> = if qualifying.is_empty() {
        (0..rooms.len()).collect()
    } else {
        qualifying
    };

    let picked = match policy {
        SpawnPolicy::First => candidates.first().copied(),
        SpawnPolicy::Last => candidates.last().copied(),
        SpawnPolicy::Random => candidates.choose(rng).copied(),
    };

    let Some(index) = picked else {
        return roomless_spawn(grid);
    };
    let room = &rooms[index];
    let center = room.center();
    let half = SPAWN_AREA as i32 / 2;
    let area = Room::new(center.x - half, center.y - half, SPAWN_AREA, SPAWN_AREA);
    if area_is_clear(grid, room, &area) {
        return Spawn {
            position: center,
            area: Some(area),
            room: Some(index),
        };
    }

    let position = nearest_floor_in(grid, room, center)
        .unwrap_or_else(|| roomless_spawn(grid).position);
    Spawn {
        position,
        area: None,
        room: Some(index),
    }
}

/// Floor cell of `room` closest to `target` by Manhattan distance, first in
/// row-major order on ties.
fn nearest_floor_in(grid: &Grid, room: &Room, target: Coord2) -> Option<Coord2> {
    if grid.is_floor(target) {
        return Some(target);
    }
    (room.y..=room.bottom())
        .flat_map(|y| (room.x..=room.right()).map(move |x| Coord2::new(x, y)))
        .filter(|c| grid.is_floor(*c))
        .min_by_key(|c| c.manhattan_distance(target))
}

fn area_is_clear(grid: &Grid, room: &Room, area: &Room) -> bool {
    if !room.contains_point(Coord2::new(area.x, area.y))
        || !room.contains_point(Coord2::new(area.right(), area.bottom()))
    {
        return false;
    }
    (area.y..=area.bottom())
        .all(|y| (area.x..=area.right()).all(|x| grid.is_floor(Coord2::new(x, y))))
}

/// First Floor cell in row-major order, else the grid center.
fn roomless_spawn(grid: &Grid) -> Spawn {
    let position = grid.floor_cells().next().unwrap_or(Coord2::new(
        grid.width() as i32 / 2,
        grid.height() as i32 / 2,
    ));
    Spawn {
        position,
        area: None,
        room: None,
    }
}
