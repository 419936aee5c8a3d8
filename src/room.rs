use serde::{Deserialize, Serialize};

use crate::coord::Coord2;

/// Rectangular room record registered during generation.
///
/// A room does not own grid cells. Its footprint matches a block of Floor
/// when it is carved, but later passes may change the grid without touching
/// the record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Only meaningful while the connectivity pass runs.
    pub connected: bool,
}

impl Room {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            connected: false,
        }
    }

    /// Room spanning the inclusive corners `min` and `max`.
    pub fn from_bounds(min: Coord2, max: Coord2) -> Self {
        Self::new(
            min.x,
            min.y,
            (max.x - min.x + 1).max(0) as u32,
            (max.y - min.y + 1).max(0) as u32,
        )
    }

    #[inline]
    pub fn center(&self) -> Coord2 {
        Coord2::new(self.x + self.width as i32 / 2, self.y + self.height as i32 / 2)
    }

    /// Inclusive right column.
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width as i32 - 1
    }

    /// Inclusive bottom row.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32 - 1
    }

    #[inline]
    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    /// True if both rectangles, each grown by `padding` cells on every side,
    /// overlap.
    pub fn intersects(&self, other: &Room, padding: u32) -> bool {
        let p = padding as i32;
        let a_left = self.x - p;
        let a_right = self.right() + p;
        let a_top = self.y - p;
        let a_bottom = self.bottom() + p;

        let b_left = other.x - p;
        let b_right = other.right() + p;
        let b_top = other.y - p;
        let b_bottom = other.bottom() + p;

        !(a_right < b_left || a_left > b_right || a_bottom < b_top || a_top > b_bottom)
    }

    #[inline]
    pub fn contains_point(&self, coord: Coord2) -> bool {
        coord.x >= self.x && coord.x <= self.right() && coord.y >= self.y && coord.y <= self.bottom()
    }

    /// True if the room keeps a one-cell margin from the edge of a
    /// `width`×`height` grid.
    pub fn within_margin(&self, width: u32, height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.x >= 1
            && self.y >= 1
            && self.right() <= width as i32 - 2
            && self.bottom() <= height as i32 - 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_rounds_down() {
        assert_eq!(Room::new(2, 4, 6, 5).center(), Coord2::new(5, 6));
    }

    #[test]
    fn intersects_overlap() {
        let a = Room::new(0, 0, 4, 4);
        let b = Room::new(3, 3, 4, 4);
        assert!(a.intersects(&b, 0));
        assert!(b.intersects(&a, 0));
    }

    #[test]
    fn adjacent_rooms_touch_only_with_padding() {
        let a = Room::new(1, 1, 4, 4);
        let b = Room::new(5, 1, 4, 4);
        assert!(!a.intersects(&b, 0));
        assert!(a.intersects(&b, 1));
    }

    #[test]
    fn padding_one_needs_two_cell_gap() {
        let a = Room::new(1, 1, 4, 4);
        let one_gap = Room::new(6, 1, 4, 4);
        let two_gap = Room::new(7, 1, 4, 4);
        assert!(a.intersects(&one_gap, 1));
        assert!(!a.intersects(&two_gap, 1));
    }

    #[test]
    fn contains_point_edges() {
        let r = Room::new(2, 2, 3, 3);
        assert!(r.contains_point(Coord2::new(2, 2)));
        assert!(r.contains_point(Coord2::new(4, 4)));
        assert!(!r.contains_point(Coord2::new(5, 4)));
        assert!(!r.contains_point(Coord2::new(1, 3)));
    }

    #[test]
    fn from_bounds_is_inclusive() {
        let r = Room::from_bounds(Coord2::new(3, 4), Coord2::new(7, 4));
        assert_eq!((r.width, r.height), (5, 1));
        assert_eq!(r.right(), 7);
    }

    #[test]
    fn margin_check() {
        assert!(Room::new(1, 1, 8, 8).within_margin(10, 10));
        assert!(!Room::new(0, 1, 8, 8).within_margin(10, 10));
        assert!(!Room::new(1, 1, 9, 8).within_margin(10, 10));
    }
}
