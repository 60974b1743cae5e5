//! Caller-supplied field geometry (`spec.md` §6). Headland and island
//! geometry generation are out-of-scope collaborators; this crate only
//! consumes their output.

use crate::geometry::Polygon;
use crate::ids::IslandId;

/// The ordered headland passes around the field, outermost first. Only
/// the innermost pass (and the `circle_start`/`circle_step` exit point on
/// it) participates in row generation and linking; the outer passes are
/// accepted for interface completeness but otherwise unused by the core.
pub struct HeadlandInput {
    pub passes: Vec<Polygon>,
    /// Vertex index on the innermost pass where the headland track exits
    /// into the center work.
    pub circle_start: i64,
    /// Direction (`+1` or `-1`) the headland track runs at `circle_start`.
    pub circle_step: i64,
}

impl HeadlandInput {
    pub fn innermost(&self) -> &Polygon {
        self.passes.last().expect("HeadlandInput must have at least one pass")
    }

    /// Whether any headland pass exists beyond the field boundary itself
    /// (`spec.md` §4.7's "with headlands present" vs "with no headlands").
    /// A single pass means `passes[0]` is just the field boundary acting
    /// as its own innermost pass; more than one means real headland tracks
    /// were generated around it.
    pub fn has_headlands(&self) -> bool {
        self.passes.len() > 1
    }
}

/// One obstacle island inside the field, supplied by the (out-of-scope)
/// island-geometry collaborator.
pub struct Island {
    pub id: IslandId,
    pub outermost_headland_ix: usize,
    pub headland_tracks: Vec<Polygon>,
}

impl Island {
    pub fn outer(&self) -> &Polygon {
        &self.headland_tracks[self.outermost_headland_ix]
    }
}
