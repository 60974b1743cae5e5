use std::collections::BTreeSet;

use crate::geometry::Coord;
use crate::ids::{HeadlandEdge, HeadlandRef, IslandId};
use crate::settings::RidgeMarker;

/// A waypoint in the output polyline, or an intersection between a row and
/// a boundary/headland polygon. Carries every optional tag `spec.md` §3
/// lists on `Point`; most are unset (`None`/`false`) for an ordinary
/// mid-row sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,

    pub turn_start: bool,
    pub turn_end: bool,
    pub row_number: Option<i64>,
    pub original_row_number: Option<i64>,
    pub first_track: bool,
    pub last_track: bool,
    pub is_connecting_track: bool,
    pub adjacent_islands: BTreeSet<IslandId>,
    pub up_down_row_start: Option<usize>,
    pub ridge_marker: RidgeMarker,

    // Set only on boundary/headland intersection points.
    pub angle: Option<f64>,
    pub headland: Option<HeadlandRef>,
    pub headland_edge: Option<HeadlandEdge>,
    pub island_id: Option<IslandId>,

    pub label: Option<&'static str>,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point {
            x,
            y,
            turn_start: false,
            turn_end: false,
            row_number: None,
            original_row_number: None,
            first_track: false,
            last_track: false,
            is_connecting_track: false,
            adjacent_islands: BTreeSet::new(),
            up_down_row_start: None,
            ridge_marker: RidgeMarker::None,
            angle: None,
            headland: None,
            headland_edge: None,
            island_id: None,
            label: None,
        }
    }

    pub fn from_coord(c: Coord) -> Self {
        Point::new(c.x, c.y)
    }

    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }

    pub fn rotated(&self, angle_rad: f64) -> Point {
        let rotated = self.coord().rotated(angle_rad);
        Point { x: rotated.x, y: rotated.y, ..self.clone() }
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Point {
        Point { x: self.x + dx, y: self.y + dy, ..self.clone() }
    }

    pub fn is_on_island(&self) -> bool {
        self.island_id.is_some()
    }
}
