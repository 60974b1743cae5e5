use crate::error::Error;
use crate::geometry::{BoundingBox, Coord};

/// The longest edge of a polygon, used as a proxy for the field's dominant
/// axis (`spec.md` §3, `bestDirection`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestDirection {
    pub edge_ix: usize,
    /// Angle of the edge, in degrees, in `(-180, 180]`.
    pub dir: f64,
    pub length: f64,
}

/// A closed, simple polygon with cached derived geometry, indexed
/// cyclically rather than via pointer cycles (`spec.md` §9).
///
/// Invariant: at least 3 distinct vertices. `Polygon::new` enforces this.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Coord>,
    bbox: BoundingBox,
    /// `edge_length[i]` is the length of the edge from vertex `i` to `i+1`.
    edge_length: Vec<f64>,
    /// `tangent_angle[i]` is the angle (radians) of the edge leaving vertex `i`.
    tangent_angle: Vec<f64>,
    best_direction: Option<BestDirection>,
}

impl Polygon {
    /// Builds a polygon and eagerly computes derived data
    /// (`spec.md` §9: "compute `nextEdge.length` eagerly on `calculateData`").
    pub fn new(vertices: Vec<Coord>) -> Result<Polygon, Error> {
        let distinct = distinct_vertex_count(&vertices);
        if distinct < 3 {
            return Err(Error::DegeneratePolygon {
                found_vertices: distinct,
            });
        }
        let bbox = BoundingBox::of(&vertices).expect("checked non-empty above");
        let n = vertices.len();
        let mut edge_length = Vec::with_capacity(n);
        let mut tangent_angle = Vec::with_capacity(n);
        let mut best: Option<BestDirection> = None;
        for i in 0..n {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            let d = b - a;
            let len = a.distance(&b);
            let angle_deg = d.y.atan2(d.x).to_degrees();
            edge_length.push(len);
            tangent_angle.push(angle_deg.to_radians());
            if best.map(|b: BestDirection| len > b.length).unwrap_or(true) {
                best = Some(BestDirection {
                    edge_ix: i,
                    dir: angle_deg,
                    length: len,
                });
            }
        }
        Ok(Polygon {
            vertices,
            bbox,
            edge_length,
            tangent_angle,
            best_direction: best,
        })
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    pub fn best_direction(&self) -> BestDirection {
        self.best_direction
            .expect("Polygon::new guarantees >= 3 distinct vertices")
    }

    /// Vertex at cyclic index `ix` (works for any integer, positive or
    /// negative).
    pub fn vertex(&self, ix: i64) -> Coord {
        self.vertices[self.modulo(ix)]
    }

    pub fn modulo(&self, ix: i64) -> usize {
        let n = self.len() as i64;
        (((ix % n) + n) % n) as usize
    }

    /// Length of the edge leaving vertex `ix` (to vertex `ix + 1`).
    pub fn edge_length(&self, ix: i64) -> f64 {
        self.edge_length[self.modulo(ix)]
    }

    /// Tangent angle (radians) of the edge leaving vertex `ix`.
    pub fn tangent_angle(&self, ix: i64) -> f64 {
        self.tangent_angle[self.modulo(ix)]
    }

    pub fn edge(&self, ix: i64) -> (Coord, Coord) {
        (self.vertex(ix), self.vertex(ix + 1))
    }

    /// Walks the cycle from `start_ix` to `end_ix` inclusive, stepping by
    /// `step` (`+1` or `-1`), wrapping as needed (`spec.md` §9).
    pub fn iter(&self, start_ix: i64, end_ix: i64, step: i64) -> PolygonIter<'_> {
        assert!(step == 1 || step == -1, "polygon iteration step must be +-1");
        PolygonIter {
            polygon: self,
            cursor: Some(start_ix),
            end_ix,
            step,
        }
    }

    pub fn rotated(&self, angle_rad: f64) -> Polygon {
        let vertices = self.vertices.iter().map(|c| c.rotated(angle_rad)).collect();
        Polygon::new(vertices).expect("rotation preserves distinct vertex count")
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Polygon {
        let vertices = self.vertices.iter().map(|c| c.translated(dx, dy)).collect();
        Polygon::new(vertices).expect("translation preserves distinct vertex count")
    }

    pub fn centroid(&self) -> Coord {
        let n = self.len() as f64;
        let (sx, sy) = self
            .vertices
            .iter()
            .fold((0.0, 0.0), |(sx, sy), c| (sx + c.x, sy + c.y));
        Coord::new(sx / n, sy / n)
    }

    /// Sum of `edge_length` walking cyclically from `ix1` towards `ix1 - d`
    /// with step `d`, until `ix2` is reached (`spec.md` §4.7). Returns
    /// `None` ("infeasible") only if the walk never reaches `ix2`, which
    /// cannot happen on a finite cycle but is kept `Option` to mirror the
    /// spec's explicit "else +inf" language at call sites.
    pub fn distance_along(&self, ix1: i64, ix2: i64, d: i64) -> f64 {
        let n = self.len() as i64;
        let target = self.modulo(ix2) as i64;
        let mut total = 0.0;
        let mut i = ix1;
        for _ in 0..n {
            if self.modulo(i) as i64 == target {
                return total;
            }
            // vertex[i].nextEdge.length in the +1 direction; walking
            // backwards (d == -1) accrues the edge *behind* the vertex.
            let edge_ix = if d >= 0 { i } else { i - 1 };
            total += self.edge_length(edge_ix);
            i += d;
        }
        if self.modulo(i) as i64 == target {
            total
        } else {
            f64::INFINITY
        }
    }
}

fn distinct_vertex_count(vertices: &[Coord]) -> usize {
    let mut distinct: Vec<Coord> = Vec::new();
    'outer: for v in vertices {
        for d in &distinct {
            if (d.x - v.x).abs() < 1e-9 && (d.y - v.y).abs() < 1e-9 {
                continue 'outer;
            }
        }
        distinct.push(*v);
    }
    distinct.len()
}

/// Cyclic, inclusive iterator over polygon vertex indices produced by
/// [`Polygon::iter`].
pub struct PolygonIter<'a> {
    polygon: &'a Polygon,
    cursor: Option<i64>,
    end_ix: i64,
    step: i64,
}

impl<'a> Iterator for PolygonIter<'a> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let cur = self.cursor?;
        let done = self.polygon.modulo(cur) == self.polygon.modulo(self.end_ix);
        self.cursor = if done { None } else { Some(cur + self.step) };
        Some(cur)
    }
}
