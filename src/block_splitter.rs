//! Groups row segments into rectangular blocks by intersection count and
//! spatial overlap (`spec.md` §4.4).

use crate::geometry::Point;
use crate::row_generator::RowSegment;
use crate::settings::Corner;

/// One row, trimmed down to exactly the pair of intersections that bound
/// one block (a row with more than 2 intersections splits into several
/// `SplitRow`s, one per block it participates in).
#[derive(Debug, Clone)]
pub struct SplitRow {
    pub left: Point,
    pub right: Point,
    pub original_row_number: i64,
    pub adjacent_islands: std::collections::BTreeSet<crate::ids::IslandId>,
}

/// A maximal contiguous group of rows whose endpoints lie on the same
/// boundary segments (`spec.md` §3, §4.4).
#[derive(Debug, Clone)]
pub struct Block {
    pub id: u32,
    /// Bottom-to-top row order, as assembled by the splitter. Row-ordering
    /// patterns (`spec.md` §4.5) permute this before linking.
    pub rows: Vec<SplitRow>,
    pub entry_corner: Option<Corner>,
    pub direction_to_next_block: i64,
}

impl Block {
    fn new(id: u32, rows: Vec<SplitRow>) -> Self {
        Block {
            id,
            rows,
            entry_corner: None,
            direction_to_next_block: 1,
        }
    }

    /// Recovers the intersection point at one corner of the block's
    /// bounding quadrilateral (`spec.md` §3: `polygon[corner]`).
    pub fn corner_point(&self, corner: Corner) -> &Point {
        match corner {
            Corner::BL => &self.rows.first().expect("block has rows").left,
            Corner::BR => &self.rows.first().expect("block has rows").right,
            Corner::TL => &self.rows.last().expect("block has rows").left,
            Corner::TR => &self.rows.last().expect("block has rows").right,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Removes spurious intersection pairs caused by an island headland
/// crossing the field boundary, then drops a trailing odd intersection
/// (`spec.md` §4.4 `cleanupIntersections`).
pub fn cleanup_intersections(row: &mut RowSegment) {
    const COINCIDENT_EPS: f64 = 1e-6;
    let mut remove = vec![false; row.intersections.len()];
    let mut inside_island = false;
    for i in 0..row.intersections.len() {
        let is_island = row.intersections[i].island_id.is_some();
        if is_island {
            inside_island = !inside_island;
        } else if i > 0
            && row.intersections[i - 1].island_id.is_some()
            && !inside_island
            && (row.intersections[i].x - row.intersections[i - 1].x).abs() < COINCIDENT_EPS
        {
            // An island headland edge essentially coincides with the field
            // boundary here (distinct from the common case of a fully
            // interior island, which leaves real separation between its
            // exit and the field's own intersection).
            remove[i - 1] = true;
            remove[i] = true;
        }
    }
    if remove.iter().any(|&r| r) {
        log::debug!(
            "row {}: dropping {} spurious island/boundary intersection(s)",
            row.original_row_number,
            remove.iter().filter(|&&r| r).count()
        );
    }
    let mut idx = 0;
    row.intersections.retain(|_| {
        let keep = !remove[idx];
        idx += 1;
        keep
    });
    if row.intersections.len() % 2 == 1 {
        log::debug!(
            "row {}: odd intersection count after cleanup, dropping the last",
            row.original_row_number
        );
        row.intersections.pop();
    }
}

fn split_row(row: &RowSegment) -> Vec<SplitRow> {
    let k = row.intersections.len() / 2;
    (0..k)
        .map(|i| SplitRow {
            left: row.intersections[2 * i].clone(),
            right: row.intersections[2 * i + 1].clone(),
            original_row_number: row.original_row_number,
            adjacent_islands: row.adjacent_islands.clone(),
        })
        .collect()
}

fn x_intervals_overlap(a: &SplitRow, b: &SplitRow) -> bool {
    a.left.x.max(b.left.x) <= a.right.x.min(b.right.x)
}

/// Splits every row and assembles the resulting sub-segments into blocks,
/// scanning bottom to top (`spec.md` §4.4).
pub fn split_into_blocks(rows: &mut [RowSegment]) -> Vec<Block> {
    for row in rows.iter_mut() {
        cleanup_intersections(row);
    }

    let mut blocks = Vec::new();
    let mut next_id = 0u32;
    let mut current: Vec<Vec<SplitRow>> = Vec::new();
    let mut prev_sub_count = 0usize;

    for row in rows.iter() {
        let subs = split_row(row);
        if subs.is_empty() {
            continue;
        }
        let start_new = subs.len() != prev_sub_count
            || current.is_empty()
            || subs.iter().enumerate().any(|(i, s)| {
                current
                    .get(i)
                    .and_then(|rows| rows.last())
                    .map(|last| !x_intervals_overlap(s, last))
                    .unwrap_or(true)
            });

        if start_new {
            for open in current.drain(..) {
                blocks.push(Block::new(next_id, open));
                next_id += 1;
            }
            current = subs.into_iter().map(|s| vec![s]).collect();
        } else {
            for (i, s) in subs.into_iter().enumerate() {
                current[i].push(s);
            }
        }
        prev_sub_count = current.len();
    }
    for open in current.drain(..) {
        blocks.push(Block::new(next_id, open));
        next_id += 1;
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Coord;

    fn row(y: f64, xs: &[f64], n: i64) -> RowSegment {
        let mut r = RowSegment {
            from: Coord::new(xs[0], y),
            to: Coord::new(*xs.last().unwrap(), y),
            intersections: xs.iter().map(|&x| Point::new(x, y)).collect(),
            original_row_number: n,
            on_island: None,
            adjacent_islands: Default::default(),
        };
        for p in r.intersections.iter_mut() {
            p.original_row_number = Some(n);
        }
        r
    }

    #[test]
    fn single_rectangle_yields_one_block() {
        let mut rows = vec![
            row(0.0, &[0.0, 10.0], 1),
            row(4.0, &[0.0, 10.0], 2),
            row(8.0, &[0.0, 10.0], 3),
        ];
        let blocks = split_into_blocks(&mut rows);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].row_count(), 3);
    }

    #[test]
    fn non_overlapping_rows_split_into_two_blocks() {
        let mut rows = vec![row(0.0, &[0.0, 10.0], 1), row(4.0, &[20.0, 30.0], 2)];
        let blocks = split_into_blocks(&mut rows);
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn interior_island_intersections_survive_cleanup() {
        // Field edges at 0/60, island edges at 25/35: real separation, not
        // a boundary-crossing artifact, so cleanup must leave all 4 in
        // place and split_row must yield 2 sub-segments either side of the
        // island.
        let mut field_row = Point::new(0.0, 5.0);
        field_row.original_row_number = Some(1);
        let mut island_left = Point::new(25.0, 5.0);
        island_left.island_id = Some(1u32);
        island_left.original_row_number = Some(1);
        let mut island_right = Point::new(35.0, 5.0);
        island_right.island_id = Some(1u32);
        island_right.original_row_number = Some(1);
        let mut field_row_end = Point::new(60.0, 5.0);
        field_row_end.original_row_number = Some(1);

        let mut row = RowSegment {
            from: Coord::new(0.0, 5.0),
            to: Coord::new(60.0, 5.0),
            intersections: vec![field_row, island_left, island_right, field_row_end],
            original_row_number: 1,
            on_island: None,
            adjacent_islands: Default::default(),
        };
        cleanup_intersections(&mut row);
        assert_eq!(row.intersections.len(), 4);
        assert_eq!(split_row(&row).len(), 2);
    }

    #[test]
    fn corner_points_come_from_first_and_last_row() {
        let mut rows = vec![
            row(0.0, &[0.0, 10.0], 1),
            row(4.0, &[0.0, 10.0], 2),
        ];
        let blocks = split_into_blocks(&mut rows);
        let b = &blocks[0];
        assert_eq!(b.corner_point(Corner::BL).x, 0.0);
        assert_eq!(b.corner_point(Corner::TR).y, 4.0);
    }
}
