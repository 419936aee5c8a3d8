use alloc::vec::Vec;

use rand::Rng;
use rand_core::RngCore;
use serde::{Deserialize, Serialize};

use crate::coord::Coord2;
use crate::grid::{Cell, Grid};
use crate::room::Room;

/// Straight run of carved corridor between two cells on the same row or
/// column. An L-shaped connection is two of these.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corridor {
    pub from: Coord2,
    pub to: Coord2,
}

/// Which leg of an L-shaped corridor is dug first.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Bend {
    HorizontalFirst,
    VerticalFirst,
}

impl Bend {
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Bend {
        if rng.gen_bool(0.5) {
            Bend::HorizontalFirst
        } else {
            Bend::VerticalFirst
        }
    }
}

/// Greedy nearest-neighbour connection of every room.
///
/// Rooms are sorted by center x and the first is the seed of the connected
/// set. Each unconnected room is then joined to the closest connected room
/// (Manhattan distance between centers, earliest room on ties). Fewer than
/// two rooms leaves grid and rooms untouched.
pub fn connect_rooms<R: RngCore + ?Sized>(
    grid: &mut Grid,
    rooms: &mut [Room],
    corridor_width: u32,
    rng: &mut R,
) -> Vec<Corridor> {
    let mut corridors = Vec::new();
    if rooms.len() < 2 {
        return corridors;
    }

    rooms.sort_by_key(|room| room.center().x);
    for room in rooms.iter_mut() {
        room.connected = false;
    }
    rooms[0].connected = true;

    while rooms.iter().any(|room| !room.connected) {
        for i in 0..rooms.len() {
            if rooms[i].connected {
                continue;
            }
            let target = rooms[i].center();
            let nearest = rooms
                .iter()
                .filter(|room| room.connected)
                .map(Room::center)
                .min_by_key(|center| center.manhattan_distance(target));
            let Some(anchor) = nearest else {
                continue;
            };
            let bend = Bend::random(rng);
            carve_l_corridor(grid, anchor, target, corridor_width, bend, &mut corridors);
            rooms[i].connected = true;
        }
    }

    log::debug!(
        "connectivity: {} rooms joined by {} corridor segments",
        rooms.len(),
        corridors.len()
    );
    corridors
}

/// Digs `from` → corner → `to` and records the non-empty segments.
pub fn carve_l_corridor(
    grid: &mut Grid,
    from: Coord2,
    to: Coord2,
    width: u32,
    bend: Bend,
    out: &mut Vec<Corridor>,
) {
    let corner = match bend {
        Bend::HorizontalFirst => Coord2::new(to.x, from.y),
        Bend::VerticalFirst => Coord2::new(from.x, to.y),
    };
    for (a, b) in [(from, corner), (corner, to)] {
        if a == b {
            continue;
        }
        carve_segment(grid, a, b, width);
        out.push(Corridor { from: a, to: b });
    }
    if from == to {
        carve_segment(grid, from, to, width);
    }
}

/// Carves a band `width` cells wide centered on the axis between `a` and
/// `b`, extended past both ends by the band so corners are filled. The band
/// is clipped to the grid interior.
fn carve_segment(grid: &mut Grid, a: Coord2, b: Coord2, width: u32) {
    let max_x = grid.width() as i32 - 2;
    let max_y = grid.height() as i32 - 2;
    if max_x < 1 || max_y < 1 {
        return;
    }
    let width = width.clamp(1, grid.width().max(grid.height())) as i32;
    let lo = -((width - 1) / 2);
    let hi = width / 2;

    let (x0, x1, y0, y1) = if a.y == b.y {
        (a.x.min(b.x) + lo, a.x.max(b.x) + hi, a.y + lo, a.y + hi)
    } else {
        (a.x + lo, a.x + hi, a.y.min(b.y) + lo, a.y.max(b.y) + hi)
    };

    for y in y0.max(1)..=y1.min(max_y) {
        for x in x0.max(1)..=x1.min(max_x) {
            grid.set_cell(Coord2::new(x, y), Cell::Floor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flood::reaches_all;
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;

    fn carved(rooms: &[Room], width: u32, height: u32) -> Grid {
        let mut grid = Grid::new(width, height);
        for room in rooms {
            grid.carve_rect(room);
        }
        grid
    }

    #[test]
    fn single_room_is_untouched() {
        let mut rooms = alloc::vec![Room::new(3, 3, 4, 4)];
        let mut grid = carved(&rooms, 12, 12);
        let before = grid.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(connect_rooms(&mut grid, &mut rooms, 1, &mut rng).is_empty());
        assert_eq!(grid, before);
        assert!(!rooms[0].connected);
    }

    #[test]
    fn empty_room_list_is_noop() {
        let mut grid = Grid::new(8, 8);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(connect_rooms(&mut grid, &mut [], 2, &mut rng).is_empty());
        assert_eq!(grid.floor_count(), 0);
    }

    #[test]
    fn every_room_reaches_every_other() {
        let mut rooms = alloc::vec![
            Room::new(40, 2, 5, 5),
            Room::new(2, 2, 5, 5),
            Room::new(20, 20, 6, 4),
            Room::new(3, 22, 4, 4),
            Room::new(30, 10, 3, 3),
        ];
        let mut grid = carved(&rooms, 50, 30);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let corridors = connect_rooms(&mut grid, &mut rooms, 1, &mut rng);

        assert!(rooms.iter().all(|r| r.connected));
        assert!(corridors.len() >= 4);
        let centers: Vec<Coord2> = rooms.iter().map(Room::center).collect();
        for start in &centers {
            assert!(reaches_all(&grid, *start, &centers));
        }
    }

    #[test]
    fn rooms_sorted_by_center_x() {
        let mut rooms = alloc::vec![
            Room::new(30, 2, 4, 4),
            Room::new(2, 2, 4, 4),
            Room::new(16, 2, 4, 4),
        ];
        let mut grid = carved(&rooms, 40, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        connect_rooms(&mut grid, &mut rooms, 1, &mut rng);
        let xs: Vec<i32> = rooms.iter().map(|r| r.x).collect();
        assert_eq!(xs, alloc::vec![2, 16, 30]);
    }

    #[test]
    fn nearest_connected_room_is_used() {
        // Sorted order: A(x=2), B(x=10), C(x=30). B joins A, then C joins
        // B, not A.
        let mut rooms = alloc::vec![
            Room::new(2, 4, 3, 3),
            Room::new(10, 4, 3, 3),
            Room::new(30, 4, 3, 3),
        ];
        let mut grid = carved(&rooms, 40, 12);
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let corridors = connect_rooms(&mut grid, &mut rooms, 1, &mut rng);
        assert_eq!(
            corridors,
            alloc::vec![
                Corridor {
                    from: Coord2::new(3, 5),
                    to: Coord2::new(11, 5)
                },
                Corridor {
                    from: Coord2::new(11, 5),
                    to: Coord2::new(31, 5)
                },
            ]
        );
    }

    #[test]
    fn l_corridor_bends_at_expected_corner() {
        let mut grid = Grid::new(20, 20);
        let mut out = Vec::new();
        let from = Coord2::new(2, 3);
        let to = Coord2::new(10, 12);
        carve_l_corridor(&mut grid, from, to, 1, Bend::HorizontalFirst, &mut out);
        assert_eq!(out[0].to, Coord2::new(10, 3));
        assert!(grid.is_floor(Coord2::new(10, 3)));
        assert!(!grid.is_floor(Coord2::new(2, 12)));

        let mut grid = Grid::new(20, 20);
        out.clear();
        carve_l_corridor(&mut grid, from, to, 1, Bend::VerticalFirst, &mut out);
        assert_eq!(out[0].to, Coord2::new(2, 12));
        assert!(grid.is_floor(Coord2::new(2, 12)));
        assert_eq!(grid.floor_count(), 8 + 9 + 1);
    }

    #[test]
    fn wide_band_is_centered() {
        let mut grid = Grid::new(20, 11);
        let mut out = Vec::new();
        carve_l_corridor(
            &mut grid,
            Coord2::new(3, 5),
            Coord2::new(15, 5),
            3,
            Bend::HorizontalFirst,
            &mut out,
        );
        for y in 4..=6 {
            assert!(grid.is_floor(Coord2::new(9, y)));
        }
        assert!(!grid.is_floor(Coord2::new(9, 3)));
        assert!(!grid.is_floor(Coord2::new(9, 7)));
    }

    #[test]
    fn band_never_breaks_the_border() {
        let mut grid = Grid::new(12, 6);
        let mut out = Vec::new();
        carve_l_corridor(
            &mut grid,
            Coord2::new(1, 1),
            Coord2::new(10, 1),
            4,
            Bend::HorizontalFirst,
            &mut out,
        );
        for x in 0..12 {
            assert!(!grid.is_floor(Coord2::new(x, 0)));
        }
        assert!(grid.is_floor(Coord2::new(10, 1)));
        assert!(grid.is_floor(Coord2::new(5, 3)));
    }

    #[test]
    fn oversized_band_fills_only_the_interior() {
        for width in [1 << 31, u32::MAX] {
            let mut grid = Grid::new(10, 8);
            let mut out = Vec::new();
            carve_l_corridor(
                &mut grid,
                Coord2::new(2, 2),
                Coord2::new(7, 5),
                width,
                Bend::VerticalFirst,
                &mut out,
            );
            assert_eq!(grid.floor_count(), 8 * 6);
            assert!(!grid.is_floor(Coord2::new(0, 0)));
            assert!(!grid.is_floor(Coord2::new(9, 7)));
        }
    }
}
