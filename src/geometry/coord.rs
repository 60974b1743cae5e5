use std::ops::{Add, Sub};

/// A bare 2D coordinate, metres. Polygon vertices and row-segment endpoints
/// are `Coord`; waypoints that carry planning metadata are [`crate::Point`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub fn new(x: f64, y: f64) -> Self {
        Coord { x, y }
    }

    pub fn distance(&self, other: &Coord) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Rotate counter-clockwise by `angle_rad` about the origin.
    pub fn rotated(&self, angle_rad: f64) -> Coord {
        let (sin_a, cos_a) = angle_rad.sin_cos();
        Coord::new(
            self.x * cos_a - self.y * sin_a,
            self.x * sin_a + self.y * cos_a,
        )
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Coord {
        Coord::new(self.x + dx, self.y + dy)
    }
}

impl Add for Coord {
    type Output = Coord;
    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord {
    type Output = Coord;
    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn of(coords: &[Coord]) -> Option<BoundingBox> {
        let mut iter = coords.iter();
        let first = iter.next()?;
        let mut bbox = BoundingBox {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        for c in iter {
            bbox.min_x = bbox.min_x.min(c.x);
            bbox.max_x = bbox.max_x.max(c.x);
            bbox.min_y = bbox.min_y.min(c.y);
            bbox.max_y = bbox.max_y.max(c.y);
        }
        Some(bbox)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Segment-segment intersection, returning the crossing point if the two
/// closed segments properly intersect (collinear overlaps are ignored —
/// row segments and boundary edges are never collinear in practice).
pub fn segment_intersection(a1: Coord, a2: Coord, b1: Coord, b2: Coord) -> Option<Coord> {
    let r = a2 - a1;
    let s = b2 - b1;
    let denom = r.x * s.y - r.y * s.x;
    if denom.abs() < 1e-12 {
        return None;
    }
    let qp = b1 - a1;
    let t = (qp.x * s.y - qp.y * s.x) / denom;
    let u = (qp.x * r.y - qp.y * r.x) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(Coord::new(a1.x + t * r.x, a1.y + t * r.y))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rotates_quarter_turn() {
        let c = Coord::new(1.0, 0.0);
        let r = c.rotated(std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(r.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(r.y, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn crossing_segments_intersect_at_midpoint() {
        let p = segment_intersection(
            Coord::new(0.0, 0.0),
            Coord::new(2.0, 2.0),
            Coord::new(0.0, 2.0),
            Coord::new(2.0, 0.0),
        )
        .unwrap();
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn parallel_segments_do_not_intersect() {
        let p = segment_intersection(
            Coord::new(0.0, 0.0),
            Coord::new(1.0, 0.0),
            Coord::new(0.0, 1.0),
            Coord::new(1.0, 1.0),
        );
        assert!(p.is_none());
    }
}
