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
pub struct RandomRoomsConfig {
    pub max_attempts: u32,
    pub max_rooms: usize,
}

impl Default for RandomRoomsConfig {
    fn default() -> Self {
        Self {
            max_attempts: 300,
            max_rooms: 30,
        }
    }
}

pub struct RandomRooms;

impl Strategy for RandomRooms {
    fn algorithm(&self) -> Algorithm {
        Algorithm::RandomRooms
    }

    fn generate(&self, config: &GenerationConfig, rng: &mut dyn RngCore) -> Layout {
        random_rooms_generate(config, rng)
    }
}

/// Rejection-sampled room scatter. No corridors are dug here.
pub fn random_rooms_generate<R: RngCore + ?Sized>(
    config: &GenerationConfig,
    rng: &mut R,
) -> Layout {
    let limits = &config.random_rooms;
    let mut grid = Grid::new(config.width, config.height);
    let mut rooms: Vec<Room> = Vec::new();
    let mut attempts = 0u32;

    while rooms.len() < limits.max_rooms && attempts < limits.max_attempts {
        attempts += 1;
        let Some(candidate) = propose(config, rng) else {
            continue;
        };
        if rooms.iter().any(|room| room.intersects(&candidate, 1)) {
            continue;
        }
        grid.carve_rect(&candidate);
        rooms.push(candidate);
    }

    let exhausted = rooms.len() < limits.max_rooms;
    if exhausted {
        log::warn!(
            "random rooms: {} attempts spent, {}/{} rooms placed",
            attempts,
            rooms.len(),
            limits.max_rooms
        );
    } else {
        log::debug!("random rooms: {} rooms in {} attempts", rooms.len(), attempts);
    }

    Layout {
        grid,
        rooms,
        exhausted,
    }
}

/// Random room inside the one-cell margin, `None` if the bounds cannot fit.
fn propose<R: RngCore + ?Sized>(config: &GenerationConfig, rng: &mut R) -> Option<Room> {
    let w = rng.gen_range(config.room_min_width..=config.room_max_width);
    let h = rng.gen_range(config.room_min_height..=config.room_max_height);
    let max_x = config.width as i32 - 1 - w as i32;
    let max_y = config.height as i32 - 1 - h as i32;
    if max_x < 1 || max_y < 1 {
        return None;
    }
    Some(Room::new(rng.gen_range(1..=max_x), rng.gen_range(1..=max_y), w, h))
}
