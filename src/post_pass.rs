//! Ridge-marker tagging, the trivial post-pass over the finished polyline
//! (`spec.md` §4.6). Turn-start/turn-end tagging itself happens inline
//! during linking (`crate::linker`); this module only adds ridge markers.

use crate::geometry::Point;
use crate::settings::RidgeMarker;

/// One worked row's span of indices within the final track, as recorded
/// by the linker while it appends rows. `is_first_row_of_block`/
/// `is_last_row_of_block` are relative to the row's own block, not the
/// track as a whole: ridge markers exclude the first and last row of
/// *every* block (`spec.md` §4.6), not just the very first/last block.
#[derive(Debug, Clone, Copy)]
pub struct RowSpan {
    pub start: usize,
    pub end: usize,
    pub is_first_row_of_block: bool,
    pub is_last_row_of_block: bool,
}

fn heading(a: &Point, b: &Point) -> f64 {
    (b.y - a.y).atan2(b.x - a.x)
}

fn wrap_angle(mut a: f64) -> f64 {
    while a > std::f64::consts::PI {
        a -= std::f64::consts::TAU;
    }
    while a <= -std::f64::consts::PI {
        a += std::f64::consts::TAU;
    }
    a
}

fn delta_angle_at(track: &[Point], turn_ix: usize) -> f64 {
    if turn_ix == 0 || turn_ix + 1 >= track.len() {
        return 0.0;
    }
    let incoming = heading(&track[turn_ix - 1], &track[turn_ix]);
    let outgoing = heading(&track[turn_ix], &track[turn_ix + 1]);
    wrap_angle(outgoing - incoming)
}

/// Applies ridge markers in place, only when `n_rows_to_skip == 0`
/// (`spec.md` §4.6).
pub fn apply_ridge_markers(track: &mut [Point], spans: &[RowSpan], n_rows_to_skip: u32) {
    if n_rows_to_skip != 0 {
        return;
    }
    for span in spans {
        if span.is_first_row_of_block || span.is_last_row_of_block {
            continue;
        }
        let turn_ix = span.end;
        if turn_ix >= track.len() || !track[turn_ix].turn_start {
            continue;
        }
        let marker = if delta_angle_at(track, turn_ix) >= 0.0 {
            RidgeMarker::Right
        } else {
            RidgeMarker::Left
        };
        for p in &mut track[span.start..=span.end] {
            p.ridge_marker = marker;
        }
    }

    if let Some(last_span) = spans.last() {
        for p in &mut track[last_span.start..=last_span.end] {
            p.ridge_marker = RidgeMarker::None;
        }
    }

    for i in 0..track.len() {
        if track[i].turn_end {
            if let Some(next) = track.get_mut(i + 1) {
                next.ridge_marker = RidgeMarker::None;
            }
        }
    }
}
