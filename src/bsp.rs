use alloc::collections::VecDeque;
use alloc::vec::Vec;

use rand::Rng;
use rand_core::RngCore;
use serde::{Deserialize, Serialize};

use crate::config::GenerationConfig;
use crate::grid::Grid;
use crate::room::Room;
use crate::strategy::{Algorithm, Layout, Strategy};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BspConfig {
    /// Upper bound on containers popped from the work queue.
    pub max_iterations: u32,
}

impl Default for BspConfig {
    fn default() -> Self {
        Self {
            max_iterations: 4096,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Rect {
    x: i32,
    y: i32,
    w: u32,
    h: u32,
}

impl Rect {
    /// Halves along the longer axis; square containers split their width.
    fn split(self) -> (Rect, Rect) {
        if self.w >= self.h {
            let left = self.w / 2;
            (
                Rect { w: left, ..self },
                Rect {
                    x: self.x + left as i32,
                    w: self.w - left,
                    ..self
                },
            )
        } else {
            let top = self.h / 2;
            (
                Rect { h: top, ..self },
                Rect {
                    y: self.y + top as i32,
                    h: self.h - top,
                    ..self
                },
            )
        }
    }
}

pub struct BinarySpacePartition;

impl Strategy for BinarySpacePartition {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Bsp
    }

    fn generate(&self, config: &GenerationConfig, rng: &mut dyn RngCore) -> Layout {
        bsp_generate(config, rng)
    }
}

/// Splits the grid interior through a FIFO work queue of containers and
/// carves one room into every container that stops splitting.
pub fn bsp_generate<R: RngCore + ?Sized>(config: &GenerationConfig, rng: &mut R) -> Layout {
    let mut grid = Grid::new(config.width, config.height);
    let mut rooms = Vec::new();
    let mut exhausted = false;

    let leaf_limit = config
        .room_max_width
        .max(config.room_max_height)
        .saturating_mul(2)
        .saturating_add(2);

    let mut queue = VecDeque::new();
    queue.push_back(Rect {
        x: 1,
        y: 1,
        w: config.width.saturating_sub(2),
        h: config.height.saturating_sub(2),
    });

    let mut iterations = 0u32;
    let mut discarded = 0usize;
    while !queue.is_empty() {
        if iterations >= config.bsp.max_iterations {
            exhausted = true;
            break;
        }
        iterations += 1;
        let Some(rect) = queue.pop_front() else {
            break;
        };

        if rect.w < leaf_limit && rect.h < leaf_limit {
            match carve_room(rect, config, rng) {
                Some(room) => {
                    grid.carve_rect(&room);
                    rooms.push(room);
                }
                None => discarded += 1,
            }
            continue;
        }

        let (a, b) = rect.split();
        queue.push_back(a);
        queue.push_back(b);
    }

    if exhausted {
        log::warn!(
            "bsp: iteration ceiling {} reached with {} containers pending",
            config.bsp.max_iterations,
            queue.len()
        );
    }
    log::debug!(
        "bsp: {} rooms, {} containers discarded, {} iterations",
        rooms.len(),
        discarded,
        iterations
    );

    Layout {
        grid,
        rooms,
        exhausted,
    }
}

/// Random room inside `rect` with at least one cell of padding on every side.
/// `None` when the container cannot hold a minimum-sized room.
fn carve_room<R: RngCore + ?Sized>(
    rect: Rect,
    cfg: &GenerationConfig,
    rng: &mut R,
) -> Option<Room> {
    let avail_w = rect.w.checked_sub(2)?;
    let avail_h = rect.h.checked_sub(2)?;
    if avail_w < cfg.room_min_width || avail_h < cfg.room_min_height {
        return None;
    }

    let room_w = rng.gen_range(cfg.room_min_width..=cfg.room_max_width.min(avail_w));
    let room_h = rng.gen_range(cfg.room_min_height..=cfg.room_max_height.min(avail_h));
    let x_off = rng.gen_range(0..=avail_w - room_w);
    let y_off = rng.gen_range(0..=avail_h - room_h);

    Some(Room::new(
        rect.x + 1 + x_off as i32,
        rect.y + 1 + y_off as i32,
        room_w,
        room_h,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;

    fn config(width: u32, height: u32, min: u32, max: u32) -> GenerationConfig {
        GenerationConfig::default()
            .with_algorithm(Algorithm::Bsp)
            .with_size(width, height)
            .with_room_bounds(min, max)
    }

    #[test]
    fn split_longer_axis() {
        let wide = Rect { x: 1, y: 1, w: 40, h: 18 };
        let (a, b) = wide.split();
        assert_eq!((a.x, a.w, b.x, b.w), (1, 20, 21, 20));
        assert_eq!((a.h, b.h), (18, 18));

        let tall = Rect { x: 1, y: 1, w: 9, h: 19 };
        let (a, b) = tall.split();
        assert_eq!((a.y, a.h, b.y, b.h), (1, 9, 10, 10));
    }

    #[test]
    fn small_grid_rooms_stay_in_bounds() {
        let cfg = config(20, 20, 6, 8);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let layout = bsp_generate(&cfg, &mut rng);
        assert!(!layout.rooms.is_empty());
        for room in &layout.rooms {
            assert!((6..=8).contains(&room.width));
            assert!((6..=8).contains(&room.height));
            assert!(room.within_margin(20, 20));
        }
        assert!(!layout.exhausted);
    }

    #[test]
    fn sibling_rooms_keep_padding() {
        let cfg = config(96, 64, 5, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let layout = bsp_generate(&cfg, &mut rng);
        assert!(layout.rooms.len() > 4);
        for i in 0..layout.rooms.len() {
            for j in (i + 1)..layout.rooms.len() {
                assert!(!layout.rooms[i].intersects(&layout.rooms[j], 1));
            }
        }
    }

    #[test]
    fn carved_floor_matches_rooms() {
        let cfg = config(64, 48, 6, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let layout = bsp_generate(&cfg, &mut rng);
        let area: u32 = layout.rooms.iter().map(Room::area).sum();
        assert_eq!(layout.grid.floor_count(), area as usize);
    }

    #[test]
    fn unfittable_container_yields_no_rooms() {
        let cfg = config(10, 10, 8, 8);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let layout = bsp_generate(&cfg, &mut rng);
        assert!(layout.rooms.is_empty());
        assert_eq!(layout.grid.floor_count(), 0);
        assert!(!layout.exhausted);
    }

    #[test]
    fn iteration_ceiling_flags_exhaustion() {
        let mut cfg = config(96, 64, 5, 10);
        cfg.bsp.max_iterations = 3;
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let layout = bsp_generate(&cfg, &mut rng);
        assert!(layout.exhausted);
    }
}
