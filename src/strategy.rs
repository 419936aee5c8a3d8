use alloc::vec::Vec;

use rand_core::RngCore;
use serde::{Deserialize, Serialize};

use crate::bsp::BinarySpacePartition;
use crate::cellular::CellularAutomata;
use crate::config::GenerationConfig;
use crate::drunkard::DrunkardsWalk;
use crate::grid::Grid;
use crate::random_rooms::RandomRooms;
use crate::room::Room;

/// Populated grid and room list produced by one strategy run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub grid: Grid,
    pub rooms: Vec<Room>,
    /// The strategy stopped on its iteration ceiling before reaching its
    /// nominal target. The layout is still valid, only sparser.
    pub exhausted: bool,
}

/// A room-and-floor synthesis algorithm.
pub trait Strategy {
    fn algorithm(&self) -> Algorithm;

    fn generate(&self, config: &GenerationConfig, rng: &mut dyn RngCore) -> Layout;
}

/// Selects which strategy a run uses.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    #[default]
    Bsp,
    CellularAutomata,
    DrunkardsWalk,
    RandomRooms,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Bsp,
        Algorithm::CellularAutomata,
        Algorithm::DrunkardsWalk,
        Algorithm::RandomRooms,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Bsp => "bsp",
            Algorithm::CellularAutomata => "cellular_automata",
            Algorithm::DrunkardsWalk => "drunkards_walk",
            Algorithm::RandomRooms => "random_rooms",
        }
    }

    pub fn strategy(self) -> &'static dyn Strategy {
        match self {
            Algorithm::Bsp => &BinarySpacePartition,
            Algorithm::CellularAutomata => &CellularAutomata,
            Algorithm::DrunkardsWalk => &DrunkardsWalk,
            Algorithm::RandomRooms => &RandomRooms,
        }
    }
}
