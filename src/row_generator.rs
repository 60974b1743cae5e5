//! Parallel row generation and boundary/headland intersection finding
//! (`spec.md` §4.2).

use crate::geometry::{segment_intersection, Coord, Point, Polygon};
use crate::ids::{HeadlandEdge, HeadlandRef, IslandId};

/// One candidate row, spanning the full rotated bounding box before being
/// trimmed at boundary intersections.
#[derive(Debug, Clone)]
pub struct RowSegment {
    pub from: Coord,
    pub to: Coord,
    pub intersections: Vec<Point>,
    pub original_row_number: i64,
    pub on_island: Option<IslandId>,
    pub adjacent_islands: std::collections::BTreeSet<IslandId>,
}

impl RowSegment {
    fn new(from: Coord, to: Coord, original_row_number: i64) -> Self {
        RowSegment {
            from,
            to,
            intersections: Vec::new(),
            original_row_number,
            on_island: None,
            adjacent_islands: std::collections::BTreeSet::new(),
        }
    }
}

/// An island's outermost headland, paired with its ID (`spec.md` §6).
pub struct IslandHeadland<'a> {
    pub id: IslandId,
    pub outer: &'a Polygon,
}

/// Generates evenly spaced horizontal rows across `polygon`'s bounding box,
/// inset by `distance` from the top and bottom, then intersects each row
/// against `polygon` and every island headland.
///
/// Returns `(rows, offset)` where `offset` is only meaningful when
/// `use_same_width` is true (`spec.md` §4.2).
pub fn generate_rows(
    polygon: &Polygon,
    islands: &[IslandHeadland<'_>],
    width: f64,
    distance: f64,
    use_same_width: bool,
) -> (Vec<RowSegment>, f64) {
    let bbox = polygon.bbox();
    let y_min = bbox.min_y + distance;
    let y_max = bbox.max_y - distance;

    let mut ys = Vec::new();
    let mut y = y_min;
    while y < y_max {
        ys.push(y);
        y += width;
    }
    // One final row at the next step, which may overshoot y_max.
    ys.push(y);

    let mut offset = 0.0;
    if let (Some(&second_last), Some(last)) = (ys.get(ys.len().saturating_sub(2)), ys.last()) {
        if use_same_width {
            offset = distance - (bbox.max_y - last);
        } else if ys.len() >= 2 {
            let clamped = bbox.max_y - distance;
            *ys.last_mut().unwrap() = clamped;
            if (clamped - second_last).abs() < 0.1 {
                ys.pop();
            }
        }
    }

    let mut rows: Vec<RowSegment> = ys
        .into_iter()
        .enumerate()
        .map(|(i, y)| {
            RowSegment::new(
                Coord::new(bbox.min_x, y),
                Coord::new(bbox.max_x, y),
                i as i64 + 1,
            )
        })
        .collect();

    find_intersections(&mut rows, polygon, HeadlandRef::Field, None);
    for island in islands {
        find_intersections(&mut rows, island.outer, HeadlandRef::Island(island.id), Some(island.id));
        mark_adjacent_islands(&mut rows, island.id);
    }

    (rows, offset)
}

/// Intersects every row against every edge of `headland`, tagging each hit
/// with angle/headland/edge metadata and inserting it in ascending-x order
/// with exact-x de-duplication (`spec.md` §4.2).
fn find_intersections(
    rows: &mut [RowSegment],
    headland: &Polygon,
    headland_ref: HeadlandRef,
    island_id: Option<IslandId>,
) {
    let n = headland.len() as i64;
    for row in rows.iter_mut() {
        for i in 0..n {
            let (cp, np) = headland.edge(i);
            if let Some(is) = segment_intersection(row.from, row.to, cp, np) {
                let mut point = Point::from_coord(is);
                point.angle = Some(headland.tangent_angle(i));
                point.headland = Some(headland_ref);
                point.headland_edge = Some(HeadlandEdge {
                    from_ix: headland.modulo(i),
                    to_ix: headland.modulo(i + 1),
                });
                point.island_id = island_id;
                point.original_row_number = Some(row.original_row_number);

                let dup_ix = row
                    .intersections
                    .iter()
                    .position(|existing| (existing.x - point.x).abs() < 1e-9);
                match dup_ix {
                    Some(_) => {}
                    None => {
                        let insert_at = row
                            .intersections
                            .iter()
                            .position(|existing| existing.x > point.x)
                            .unwrap_or(row.intersections.len());
                        row.intersections.insert(insert_at, point);
                    }
                }
                if island_id.is_some() {
                    row.on_island = island_id;
                }
            }
        }
    }
}

/// After an island pass, mark the row on the *other* side of the
/// island/non-island boundary as `adjacent_islands[id]` (`spec.md` §4.2).
fn mark_adjacent_islands(rows: &mut [RowSegment], island_id: IslandId) {
    for pair in 0..rows.len().saturating_sub(1) {
        let prev_on = rows[pair].on_island == Some(island_id);
        let cur_on = rows[pair + 1].on_island == Some(island_id);
        if prev_on != cur_on {
            if prev_on {
                rows[pair + 1].adjacent_islands.insert(island_id);
            } else {
                rows[pair].adjacent_islands.insert(island_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(side: f64) -> Polygon {
        Polygon::new(vec![
            Coord::new(0.0, 0.0),
            Coord::new(side, 0.0),
            Coord::new(side, side),
            Coord::new(0.0, side),
        ])
        .unwrap()
    }

    #[test]
    fn rows_are_inset_by_distance() {
        let p = square(40.0);
        let (rows, _) = generate_rows(&p, &[], 4.0, 2.0, false);
        assert!(rows.first().unwrap().from.y >= 2.0 - 1e-9);
        assert!(rows.last().unwrap().from.y <= 38.0 + 1e-9);
    }

    #[test]
    fn each_row_gets_two_boundary_intersections() {
        let p = square(40.0);
        let (rows, _) = generate_rows(&p, &[], 4.0, 2.0, false);
        for row in &rows {
            assert_eq!(row.intersections.len(), 2);
        }
    }

    #[test]
    fn increasing_width_never_increases_row_count() {
        let p = square(40.0);
        let (narrow, _) = generate_rows(&p, &[], 2.0, 1.0, false);
        let (wide, _) = generate_rows(&p, &[], 8.0, 4.0, false);
        assert!(wide.len() <= narrow.len());
    }
}
