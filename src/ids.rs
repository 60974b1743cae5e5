//! Stable identifiers used in place of pointer/reference equality.
//!
//! `spec.md` §4.7 and the design notes in §9 rely on identity checks between
//! an intersection and the polygon it crossed ("the entry-corner
//! intersection's headland ≠ the innermost field headland"). Rather than
//! comparing polygon references, every crossable polygon carries a
//! [`HeadlandRef`] and comparisons are plain `Eq`.

/// Identifier for one island, as supplied by the (out-of-scope) island
/// geometry collaborator.
pub type IslandId = u32;

/// Which polygon an intersection or block corner lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadlandRef {
    /// The innermost field headland (or field boundary, if no headlands).
    Field,
    /// The outermost headland of one island.
    Island(IslandId),
}

/// A directed edge on a polygon, identified by its endpoint vertex indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeadlandEdge {
    pub from_ix: usize,
    pub to_ix: usize,
}
