//! Cuts a row at its two boundary intersections, shortens or extends it
//! for oblique crossings, and samples waypoints (`spec.md` §4.3).

use crate::block_splitter::SplitRow;
use crate::constants::MIN_CROSSING_ANGLE;
use crate::geometry::Point;

// theta == 0.0 (intersection's tangent computed as exactly horizontal)
// must still clamp to a positive minimum rather than collapse `tan`/`sin`
// to zero.
fn clamp_crossing_angle(theta: f64) -> f64 {
    if theta == 0.0 {
        MIN_CROSSING_ANGLE
    } else if theta.abs() < MIN_CROSSING_ANGLE {
        MIN_CROSSING_ANGLE * theta.signum()
    } else {
        theta
    }
}

fn distance_to_full_cover(width: f64, theta: f64) -> f64 {
    let t = clamp_crossing_angle(theta);
    (width / (2.0 * t.tan())).abs()
}

fn distance_between_row_end_and_headland(width: f64, theta: f64) -> f64 {
    let t = clamp_crossing_angle(theta);
    (width / (2.0 * t.sin())).abs() - distance_to_full_cover(width, theta)
}

fn row_end_offset(width: f64, theta: f64, has_headland: bool) -> f64 {
    if has_headland {
        distance_between_row_end_and_headland(width, theta)
    } else {
        -distance_to_full_cover(width, theta)
    }
}

/// Materializes one row into sampled waypoints, or `None` if the row
/// collapses (oblique ends overlap) or yields fewer than 2 waypoints.
pub fn materialize_row(
    row: &SplitRow,
    width: f64,
    n_headland_passes: u32,
    w_wp: f64,
    w_min: f64,
) -> Option<Vec<Point>> {
    let is_l = &row.left;
    let is_r = &row.right;
    let has_headland = n_headland_passes > 0;

    let offset_l = row_end_offset(width, is_l.angle.unwrap_or(std::f64::consts::FRAC_PI_2), has_headland);
    let offset_r = row_end_offset(width, is_r.angle.unwrap_or(std::f64::consts::FRAC_PI_2), has_headland);

    let new_from = is_l.x + offset_l - 0.05 * width;
    let new_to = is_r.x - offset_r + 0.05 * width;
    if new_to <= new_from {
        return None;
    }

    let mut waypoints = Vec::new();
    let mut x = new_from;
    while x < new_to {
        let mut p = Point::new(x, is_l.y);
        p.original_row_number = Some(row.original_row_number);
        p.adjacent_islands = row.adjacent_islands.clone();
        waypoints.push(p);
        x += w_wp;
    }
    // `new_from < new_to` above guarantees the sampling loop pushed at
    // least one waypoint, so `waypoints.last()` is always `Some` here.
    if let Some(last) = waypoints.last() {
        if (new_to - last.x) > w_min {
            let mut p = Point::new(new_to, is_l.y);
            p.original_row_number = Some(row.original_row_number);
            p.adjacent_islands = row.adjacent_islands.clone();
            waypoints.push(p);
        }
    }

    if waypoints.len() < 2 {
        None
    } else {
        Some(waypoints)
    }
}

/// If a `turnEnd` waypoint lies more than `2*w_wp` from the previous row's
/// `turnStart`, inserts a midpoint and relocates the `turnStart` marker
/// onto it (`spec.md` §4.3).
pub fn extend_far_turn_gaps(track: &mut Vec<Point>, w_wp: f64) {
    let mut i = 1;
    while i < track.len() {
        if track[i].turn_end {
            let prev_start_ix = (0..i).rev().find(|&j| track[j].turn_start);
            if let Some(start_ix) = prev_start_ix {
                let d = track[start_ix].coord().distance(&track[i].coord());
                if d > 2.0 * w_wp {
                    let mid = Point::new(
                        (track[start_ix].x + track[i].x) / 2.0,
                        (track[start_ix].y + track[i].y) / 2.0,
                    );
                    track[start_ix].turn_start = false;
                    let mut mid = mid;
                    mid.turn_start = true;
                    track.insert(start_ix + 1, mid);
                    i += 1;
                }
            }
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_with_square_ends(y: f64, original_row_number: i64) -> SplitRow {
        let mut left = Point::new(0.0, y);
        left.angle = Some(std::f64::consts::FRAC_PI_2);
        let mut right = Point::new(40.0, y);
        right.angle = Some(std::f64::consts::FRAC_PI_2);
        SplitRow {
            left,
            right,
            original_row_number,
            adjacent_islands: Default::default(),
        }
    }

    #[test]
    fn perpendicular_row_samples_at_spacing() {
        // Square ends still pick up the mandated 5% overlap into the
        // headland on both sides: [0, 40] widens to [-0.2, 40.2]. Sampling
        // every 5.0 from -0.2 lands the last sample at 39.8; the remaining
        // 0.4 gap to 40.2 is within `w_min` (1.25), so no extra point is
        // appended.
        let row = row_with_square_ends(5.0, 1);
        let wps = materialize_row(&row, 4.0, 0, 5.0, 1.25).unwrap();
        assert!(wps.len() >= 2);
        assert!((wps.first().unwrap().x - -0.2).abs() < 1e-6);
        assert!((wps.last().unwrap().x - 39.8).abs() < 1e-6);
    }

    #[test]
    fn collapsing_row_is_dropped() {
        // With headland passes present, an oblique crossing shortens each
        // end (`distance_between_row_end_and_headland`); clamped to the
        // minimum crossing angle, a row this narrow shortens to nothing.
        let mut row = row_with_square_ends(5.0, 1);
        row.left.x = 19.9;
        row.right.x = 20.1;
        row.left.angle = Some(MIN_CROSSING_ANGLE / 4.0);
        row.right.angle = Some(MIN_CROSSING_ANGLE / 4.0);
        assert!(materialize_row(&row, 4.0, 1, 5.0, 1.25).is_none());
    }
}
