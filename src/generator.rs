use alloc::vec::Vec;

use rand_core::RngCore;

use crate::config::GenerationConfig;
use crate::corridor::{connect_rooms, Corridor};
use crate::decorate::{choose_spawn, place_props, place_waypoints, Spawn};
use crate::error::DelveError;
use crate::grid::Grid;
use crate::observer::{GenerationObserver, NoOpGenerationObserver};
use crate::rng::{LevelRng, RngSource};
use crate::room::Room;
use crate::strategy::{Algorithm, Layout};

/// Finished level handed to the caller. The generator keeps no reference to
/// it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dungeon {
    pub grid: Grid,
    /// Sorted by center x by the connectivity pass.
    pub rooms: Vec<Room>,
    pub corridors: Vec<Corridor>,
    pub spawn: Spawn,
    pub algorithm: Algorithm,
    /// The strategy stopped on its iteration ceiling.
    pub exhausted: bool,
    /// Seed of the rng, when the generator created it.
    pub seed: Option<u64>,
}

/// Validated configuration ready to produce dungeons.
#[derive(Clone, Debug)]
pub struct Generator {
    config: GenerationConfig,
}

impl Generator {
    pub fn new(config: GenerationConfig) -> Result<Self, DelveError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn generate<R: RngCore>(&self, rng: &mut R) -> Dungeon {
        self.generate_with_observer(rng, &mut NoOpGenerationObserver)
    }

    pub fn generate_seeded(&self, seed: u64) -> Dungeon {
        self.generate_from(RngSource::Seeded(seed))
    }

    pub fn generate_from(&self, source: RngSource) -> Dungeon {
        let mut rng = source.build();
        self.generate_level_rng(&mut rng, &mut NoOpGenerationObserver)
    }

    pub fn generate_level_rng<O: GenerationObserver + ?Sized>(
        &self,
        rng: &mut LevelRng,
        observer: &mut O,
    ) -> Dungeon {
        let mut dungeon = self.generate_with_observer(rng, observer);
        dungeon.seed = Some(rng.seed());
        log::info!(
            "{}: level seed {}",
            dungeon.algorithm.name(),
            rng.seed()
        );
        dungeon
    }

    /// Strategy → connectivity pass → post-processor, reporting each stage's
    /// results to `observer` in that order.
    pub fn generate_with_observer<R: RngCore, O: GenerationObserver + ?Sized>(
        &self,
        rng: &mut R,
        observer: &mut O,
    ) -> Dungeon {
        let config = &self.config;
        let strategy = config.algorithm.strategy();

        let Layout {
            mut grid,
            mut rooms,
            exhausted,
        } = strategy.generate(config, rng);
        for room in &rooms {
            observer.on_room_placed(room);
        }
        if exhausted {
            observer.on_exhausted(config.algorithm);
        }

        let corridors = connect_rooms(&mut grid, &mut rooms, config.corridor_width, rng);
        for corridor in &corridors {
            observer.on_corridor_carved(corridor.from, corridor.to);
        }

        let waypoints = place_waypoints(&mut grid, config.waypoint_probability, rng);
        let props = place_props(&mut grid, &config.props, rng);
        for (coord, marker) in grid.markers() {
            observer.on_marker_placed(coord, marker);
        }

        let spawn = choose_spawn(&grid, &rooms, config.spawn_policy, rng);
        observer.on_spawn_chosen(&spawn);

        log::info!(
            "{}: {}x{} level, {} rooms, {} corridor segments, {} waypoints, {} props, spawn at ({}, {}){}",
            config.algorithm.name(),
            config.width,
            config.height,
            rooms.len(),
            corridors.len(),
            waypoints,
            props,
            spawn.position.x,
            spawn.position.y,
            if exhausted { ", exhausted" } else { "" }
        );

        Dungeon {
            grid,
            rooms,
            corridors,
            spawn,
            algorithm: config.algorithm,
            exhausted,
            seed: None,
        }
    }
}

/// Validates `config` and runs one generation pass with `rng`.
pub fn generate<R: RngCore>(config: &GenerationConfig, rng: &mut R) -> Result<Dungeon, DelveError> {
    Ok(Generator::new(config.clone())?.generate(rng))
}

/// Validates `config` and runs one generation pass seeded with `seed`.
pub fn generate_seeded(config: &GenerationConfig, seed: u64) -> Result<Dungeon, DelveError> {
    Ok(Generator::new(config.clone())?.generate_seeded(seed))
}
