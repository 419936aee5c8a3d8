use core::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// 2D integer cell coordinate, `x` to the right and `y` downwards.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Coord2 {
    pub x: i32,
    pub y: i32,
}

impl Coord2 {
    pub const ZERO: Coord2 = Coord2 { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn manhattan_distance(self, other: Coord2) -> u32 {
        (self.x - other.x).unsigned_abs() + (self.y - other.y).unsigned_abs()
    }

    /// Clamps both axes into the inclusive box `[min, max]`.
    #[inline]
    pub fn clamp_within(self, min: Coord2, max: Coord2) -> Coord2 {
        Coord2::new(self.x.clamp(min.x, max.x), self.y.clamp(min.y, max.y))
    }

    /// Row-major index into a `width`-wide buffer. `None` for negative or
    /// past-the-row coordinates.
    #[inline]
    pub fn to_index(self, width: u32) -> Option<usize> {
        if width == 0 || self.x < 0 || self.y < 0 || self.x >= width as i32 {
            return None;
        }
        Some((self.y as usize) * (width as usize) + (self.x as usize))
    }

    #[inline]
    pub fn from_index(index: usize, width: u32) -> Self {
        if width == 0 {
            return Coord2::ZERO;
        }
        Self {
            x: (index % width as usize) as i32,
            y: (index / width as usize) as i32,
        }
    }
}

impl Add for Coord2 {
    type Output = Coord2;

    fn add(self, rhs: Self) -> Self::Output {
        Coord2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord2 {
    type Output = Coord2;

    fn sub(self, rhs: Self) -> Self::Output {
        Coord2::new(self.x - rhs.x, self.y - rhs.y)
    }
}
