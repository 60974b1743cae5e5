//! Fixed constants from `spec.md` §6.

/// Default waypoint spacing along a row, in metres.
pub const W_WP: f64 = 5.0;

/// Minimum leftover distance before a final short waypoint is appended,
/// in metres.
pub const W_MIN: f64 = 1.25;

/// Blocks with fewer rows than this are penalized by the angle searcher.
pub const SMALL_BLOCK_TRACK_COUNT_LIMIT: u32 = 5;

/// Above this many blocks the result is considered implausible.
pub const MAX_PLAUSIBLE_BLOCKS: usize = 30;

/// Below this average tracks-per-block (with more than one block) the
/// result is considered implausible.
pub const MIN_PLAUSIBLE_TRACKS_PER_BLOCK: f64 = 2.0;

/// Minimum angle magnitude used in row-end offset trigonometry, radians
/// (`spec.md` §4.3: `θ'` clamped to `|θ| >= π/12`).
pub const MIN_CROSSING_ANGLE: f64 = std::f64::consts::PI / 12.0;
