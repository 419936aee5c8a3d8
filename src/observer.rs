use crate::coord::Coord2;
use crate::decorate::Spawn;
use crate::grid::Marker;
use crate::room::Room;
use crate::strategy::Algorithm;

pub trait GenerationObserver {
    fn on_room_placed(&mut self, _room: &Room) {}
    fn on_corridor_carved(&mut self, _from: Coord2, _to: Coord2) {}
    fn on_marker_placed(&mut self, _coord: Coord2, _marker: Marker) {}
    fn on_spawn_chosen(&mut self, _spawn: &Spawn) {}
    fn on_exhausted(&mut self, _algorithm: Algorithm) {}
}

pub struct NoOpGenerationObserver;
impl GenerationObserver for NoOpGenerationObserver {}
