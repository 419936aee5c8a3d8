#![no_std]

extern crate alloc;

pub mod bsp;
pub mod cellular;
pub mod config;
pub mod coord;
pub mod corridor;
pub mod decorate;
pub mod drunkard;
pub mod error;
pub mod flood;
pub mod generator;
pub mod grid;
pub mod neighborhood;
pub mod observer;
pub mod random_rooms;
pub mod rng;
pub mod room;
pub mod strategy;

pub use bsp::{bsp_generate, BinarySpacePartition, BspConfig};
pub use cellular::{cellular_generate, CellularAutomata, CellularConfig};
pub use config::{GenerationConfig, PropEntry};
pub use coord::Coord2;
pub use corridor::{connect_rooms, Bend, Corridor};
pub use decorate::{choose_spawn, place_props, place_waypoints, Spawn, SpawnPolicy};
pub use drunkard::{drunkard_generate, DrunkardConfig, DrunkardsWalk};
pub use error::DelveError;
pub use flood::{extract_rooms, flood_fill, floor_regions, is_connected, reaches_all, Region};
pub use generator::{generate, generate_seeded, Dungeon, Generator};
pub use grid::{Cell, Grid, Marker, PropKind};
pub use neighborhood::{Dir4, Dir8};
pub use observer::{GenerationObserver, NoOpGenerationObserver};
pub use random_rooms::{random_rooms_generate, RandomRooms, RandomRoomsConfig};
pub use rng::{LevelRng, RngSource};
pub use room::Room;
pub use strategy::{Algorithm, Layout, Strategy};
