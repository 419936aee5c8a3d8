use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::bsp::BspConfig;
use crate::cellular::CellularConfig;
use crate::decorate::SpawnPolicy;
use crate::drunkard::DrunkardConfig;
use crate::error::DelveError;
use crate::grid::PropKind;
use crate::random_rooms::RandomRoomsConfig;
use crate::strategy::Algorithm;

/// One row of the prop table, evaluated in order per Floor cell.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropEntry {
    pub kind: PropKind,
    pub probability: f32,
}

impl PropEntry {
    pub const fn new(kind: PropKind, probability: f32) -> Self {
        Self { kind, probability }
    }
}

/// Everything one generation run reads. Never mutated by the pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub width: u32,
    pub height: u32,
    pub algorithm: Algorithm,
    pub room_min_width: u32,
    pub room_max_width: u32,
    pub room_min_height: u32,
    pub room_max_height: u32,
    pub corridor_width: u32,
    pub waypoint_probability: f32,
    pub props: Vec<PropEntry>,
    pub spawn_policy: SpawnPolicy,
    pub bsp: BspConfig,
    pub cellular: CellularConfig,
    pub drunkard: DrunkardConfig,
    pub random_rooms: RandomRoomsConfig,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 50,
            algorithm: Algorithm::Bsp,
            room_min_width: 6,
            room_max_width: 12,
            room_min_height: 6,
            room_max_height: 10,
            corridor_width: 1,
            waypoint_probability: 0.02,
            props: alloc::vec![
                PropEntry::new(PropKind(0), 0.01),
                PropEntry::new(PropKind(1), 0.005),
            ],
            spawn_policy: SpawnPolicy::First,
            bsp: BspConfig::default(),
            cellular: CellularConfig::default(),
            drunkard: DrunkardConfig::default(),
            random_rooms: RandomRoomsConfig::default(),
        }
    }
}

impl GenerationConfig {
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Same room bounds on both axes.
    pub fn with_room_bounds(mut self, min: u32, max: u32) -> Self {
        self.room_min_width = min;
        self.room_min_height = min;
        self.room_max_width = max;
        self.room_max_height = max;
        self
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Rejects configurations that cannot produce a meaningful grid.
    pub fn validate(&self) -> Result<(), DelveError> {
        if self.width < 3 || self.height < 3 {
            return Err(DelveError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        check_axis("width", self.room_min_width, self.room_max_width, self.width)?;
        check_axis("height", self.room_min_height, self.room_max_height, self.height)?;
        // A corridor may be at most as wide as the interior.
        let max_corridor = self.width.min(self.height) - 2;
        if self.corridor_width == 0 || self.corridor_width > max_corridor {
            return Err(DelveError::InvalidCorridorWidth {
                width: self.corridor_width,
                max: max_corridor,
            });
        }

        check_probability("waypoint", self.waypoint_probability)?;
        for entry in &self.props {
            check_probability("prop", entry.probability)?;
        }
        check_probability("cellular floor", self.cellular.floor_chance)?;
        check_probability("drunkard coverage", self.drunkard.coverage)?;
        check_probability("drunkard room", self.drunkard.room_chance)?;
        Ok(())
    }
}

fn check_axis(axis: &'static str, min: u32, max: u32, grid: u32) -> Result<(), DelveError> {
    if min == 0 || min > max {
        return Err(DelveError::InvalidRoomBounds { axis, min, max });
    }
    if max.saturating_add(2) > grid {
        return Err(DelveError::RoomBoundsExceedGrid { axis, max, grid });
    }
    Ok(())
}

fn check_probability(field: &'static str, value: f32) -> Result<(), DelveError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(DelveError::ProbabilityOutOfRange { field, value })
    }
}
