//! Walks the GA block order, emitting headland connectors between blocks
//! and the zig-zagged rows of each block (`spec.md` §4.8, plus the turn
//! tagging rules of §4.6).

use std::collections::HashMap;

use crate::block_splitter::Block;
use crate::geometry::{Point, Polygon};
use crate::ga::SequenceResult;
use crate::ids::HeadlandRef;
use crate::post_pass::RowSpan;
use crate::row_order::{order_for_block, zigzag_reverse};
use crate::settings::CenterSettings;

fn slice_polygon(polygon: &Polygon, start_ix: i64, end_ix: i64, step: i64) -> Vec<Point> {
    polygon
        .iter(start_ix, end_ix, step)
        .map(|ix| {
            let mut p = Point::from_coord(polygon.vertex(ix));
            p.is_connecting_track = true;
            p
        })
        .collect()
}

/// Assembles the final output polyline from a GA [`SequenceResult`], along
/// with the span of each worked row within it (for [`crate::post_pass`]).
#[allow(clippy::too_many_arguments)]
pub fn link(
    blocks: &[Block],
    sequence: &SequenceResult,
    circle_start: i64,
    circle_step: i64,
    has_headlands: bool,
    polygons: &HashMap<HeadlandRef, &Polygon>,
    settings: &CenterSettings,
    materialize: impl Fn(&crate::block_splitter::SplitRow) -> Option<Vec<Point>>,
) -> (Vec<Point>, Vec<RowSpan>) {
    let mut track: Vec<Point> = Vec::new();
    let mut spans: Vec<RowSpan> = Vec::new();
    let mut up_down_row_start: Option<usize> = None;

    for (pos, &block_ix) in sequence.order.iter().enumerate() {
        let block = &blocks[block_ix];
        let entry_corner = sequence.entry_corner[block_ix];
        let entry_point = block.corner_point(entry_corner);

        let mut connector: Vec<Point> = Vec::new();
        let mut skip_connector = false;

        if pos == 0 {
            if let Some(entry_edge) = entry_point.headland_edge {
                if has_headlands && entry_point.headland == Some(HeadlandRef::Field) {
                    let end_ix = if circle_step >= 0 {
                        entry_edge.from_ix as i64
                    } else {
                        entry_edge.to_ix as i64
                    };
                    if let Some(&innermost) = polygons.get(&HeadlandRef::Field) {
                        connector = slice_polygon(innermost, circle_start, end_ix, circle_step);
                    }
                }
            }
        } else {
            let prev_block = &blocks[sequence.order[pos - 1]];
            let prev_exit_corner = crate::ga::exit_corner::exit_corner(
                sequence.entry_corner[sequence.order[pos - 1]],
                prev_block.row_count(),
                settings.n_rows_to_skip,
            );
            let prev_exit_point = prev_block.corner_point(prev_exit_corner);
            let direction = sequence.direction_to_next[pos - 1];

            if let (Some(prev_row), Some(this_row)) =
                (prev_exit_point.original_row_number, entry_point.original_row_number)
            {
                if (prev_row - this_row).abs() == 1 {
                    skip_connector = true;
                }
            }

            if !skip_connector {
                if let (Some(a), Some(b)) = (prev_exit_point.headland, entry_point.headland) {
                    if a == b {
                        if let (Some(&polygon), Some(prev_edge), Some(next_edge)) =
                            (polygons.get(&a), prev_exit_point.headland_edge, entry_point.headland_edge)
                        {
                            let start_ix = if direction >= 0 {
                                prev_edge.to_ix as i64
                            } else {
                                prev_edge.from_ix as i64
                            };
                            let end_ix = if direction >= 0 {
                                next_edge.from_ix as i64
                            } else {
                                next_edge.to_ix as i64
                            };
                            connector = slice_polygon(polygon, start_ix, end_ix, direction);
                        }
                    }
                }
            }
        }

        if !connector.is_empty() {
            if pos == 0 {
                if let Some(last) = connector.last_mut() {
                    last.turn_start = true;
                }
            }
            track.append(&mut connector);
        }

        let left_to_right = !entry_corner.is_right();
        let bottom_to_top = !entry_corner.is_top();
        let row_order = order_for_block(block.row_count(), settings, left_to_right, bottom_to_top);

        let mut rows_waypoints: Vec<Vec<Point>> = row_order
            .iter()
            .filter_map(|&one_indexed| materialize(&block.rows[one_indexed - 1]))
            .collect();
        zigzag_reverse(&mut rows_waypoints);

        let is_first_block = pos == 0;
        let is_last_block = pos == sequence.order.len() - 1;
        let n_rows = rows_waypoints.len();
        for (row_ix, row) in rows_waypoints.iter_mut().enumerate() {
            if !(is_first_block && row_ix == 0) {
                if let Some(first) = row.first_mut() {
                    first.turn_end = true;
                }
            }
            if !(is_last_block && row_ix + 1 == n_rows) {
                if let Some(last) = row.last_mut() {
                    last.turn_start = true;
                }
            }
        }

        if is_first_block {
            if let Some(first_row) = rows_waypoints.first_mut() {
                if let Some(first_point) = first_row.first_mut() {
                    if up_down_row_start.is_none() {
                        up_down_row_start = Some(track.len());
                        first_point.up_down_row_start = up_down_row_start;
                    }
                }
            }
        }

        for (row_ix, row) in rows_waypoints.into_iter().enumerate() {
            let start = track.len();
            track.extend(row);
            let end = track.len().saturating_sub(1);
            spans.push(RowSpan {
                start,
                end,
                is_first_row_of_block: row_ix == 0,
                is_last_row_of_block: row_ix + 1 == n_rows,
            });
        }
    }

    (track, spans)
}
