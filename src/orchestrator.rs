//! Top-level entry point: coordinate-system transforms, one pass through
//! angle search → decomposition → GA → link → post-passes, and the
//! implausible-problem / no-room special cases (`spec.md` §6, §7, §9).

use std::collections::HashMap;

use rand::rngs::StdRng;

use crate::angle_search;
use crate::block_splitter::{split_into_blocks, Block};
use crate::constants::{MAX_PLAUSIBLE_BLOCKS, MIN_PLAUSIBLE_TRACKS_PER_BLOCK, W_MIN, W_WP};
use crate::error::Error;
use crate::geometry::Polygon;
use crate::ga;
use crate::ids::HeadlandRef;
use crate::input::{HeadlandInput, Island};
use crate::linker;
use crate::materializer;
use crate::post_pass;
use crate::row_generator::{generate_rows, IslandHeadland};
use crate::settings::{CenterSettings, HeadlandSettings};
use crate::geometry::Point;

/// `(track, bestAngle, nParallelTracks, blocks, resultIsOk)` from `spec.md`
/// §6, as a named struct.
#[derive(Debug, Clone)]
pub struct FieldCenterResult {
    pub track: Vec<Point>,
    pub best_angle_deg: f64,
    pub n_parallel_tracks: usize,
    pub blocks: Vec<Block>,
    /// `false` signals an implausible problem (`spec.md` §6): more than 30
    /// blocks, or more than one block averaging fewer than 2 tracks each.
    pub result_is_ok: bool,
}

impl FieldCenterResult {
    fn no_room() -> Self {
        FieldCenterResult {
            track: Vec::new(),
            best_angle_deg: 0.0,
            n_parallel_tracks: 0,
            blocks: Vec::new(),
            result_is_ok: true,
        }
    }
}

fn check_width(width: f64) -> Result<(), Error> {
    if width.is_finite() && width > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidWidth { value: width })
    }
}

/// Runs one full pass of the pipeline (`spec.md` §2 data flow). The
/// orchestrator never retries.
pub fn generate_field_center(
    headland_input: &HeadlandInput,
    islands: &[Island],
    width: f64,
    headland_settings: HeadlandSettings,
    center_settings: CenterSettings,
    rng: &mut StdRng,
) -> Result<FieldCenterResult, Error> {
    check_width(width)?;

    let distance = headland_settings.distance_from_boundary(width);
    let innermost = headland_input.innermost();
    let circle_start = headland_input.circle_start;
    let circle_step = headland_input.circle_step;
    let has_headlands = headland_input.has_headlands();

    let centroid = innermost.centroid();
    let origin_field = innermost.translated(-centroid.x, -centroid.y);
    let origin_islands: Vec<(crate::ids::IslandId, Polygon)> = islands
        .iter()
        .map(|island| (island.id, island.outer().translated(-centroid.x, -centroid.y)))
        .collect();
    let origin_refs: Vec<IslandHeadland<'_>> = origin_islands
        .iter()
        .map(|(id, outer)| IslandHeadland { id: *id, outer })
        .collect();

    let Some(angle) = angle_search::search(&origin_field, &origin_refs, width, distance, &center_settings) else {
        log::debug!("no candidate row angle yields any row at all");
        return Ok(FieldCenterResult::no_room());
    };
    let best_angle_rad = angle.best_angle_deg.to_radians();

    let rotated_field = origin_field.rotated(-best_angle_rad);
    let rotated_islands: Vec<(crate::ids::IslandId, Polygon)> = origin_islands
        .iter()
        .map(|(id, outer)| (*id, outer.rotated(-best_angle_rad)))
        .collect();
    let rotated_refs: Vec<IslandHeadland<'_>> = rotated_islands
        .iter()
        .map(|(id, outer)| IslandHeadland { id: *id, outer })
        .collect();

    let (mut rows, _offset) = generate_rows(&rotated_field, &rotated_refs, width, distance, false);
    let n_total_tracks = rows.len();
    let blocks: Vec<Block> = split_into_blocks(&mut rows);

    if blocks.is_empty() {
        log::debug!("no usable blocks after decomposition");
        return Ok(FieldCenterResult::no_room());
    }

    let mut polygons: HashMap<HeadlandRef, &Polygon> = HashMap::new();
    polygons.insert(HeadlandRef::Field, &rotated_field);
    for (id, outer) in &rotated_islands {
        polygons.insert(HeadlandRef::Island(*id), outer);
    }

    let sequence = ga::sequence_blocks(
        &blocks,
        &rotated_field,
        circle_start,
        circle_step,
        has_headlands,
        center_settings.n_rows_to_skip,
        &polygons,
        rng,
    );

    let n_headland_passes = headland_settings.n_passes;
    let materialize = |row: &crate::block_splitter::SplitRow| {
        materializer::materialize_row(row, width, n_headland_passes, W_WP, W_MIN)
    };

    let (mut track, spans) = linker::link(
        &blocks,
        &sequence,
        circle_start,
        circle_step,
        has_headlands,
        &polygons,
        &center_settings,
        materialize,
    );

    post_pass::apply_ridge_markers(&mut track, &spans, center_settings.n_rows_to_skip);
    materializer::extend_far_turn_gaps(&mut track, W_WP);

    for point in track.iter_mut() {
        *point = point.rotated(best_angle_rad).translated(centroid.x, centroid.y);
    }

    let n_blocks = blocks.len();
    let result_is_ok = !(n_blocks > MAX_PLAUSIBLE_BLOCKS
        || (n_blocks > 1 && (n_total_tracks as f64 / n_blocks as f64) < MIN_PLAUSIBLE_TRACKS_PER_BLOCK));
    if !result_is_ok {
        log::warn!("implausible problem: {n_blocks} blocks over {n_total_tracks} tracks");
    }

    Ok(FieldCenterResult {
        track,
        best_angle_deg: angle.best_angle_deg,
        n_parallel_tracks: angle.n_tracks,
        blocks,
        result_is_ok,
    })
}
