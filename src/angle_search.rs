//! Sweeps candidate row angles and scores each by block/row count and
//! deviation from the field's dominant axis (`spec.md` §4.1).

use crate::block_splitter::{split_into_blocks, Block};
use crate::constants::SMALL_BLOCK_TRACK_COUNT_LIMIT;
use crate::geometry::Polygon;
use crate::row_generator::{generate_rows, IslandHeadland};
use crate::settings::CenterSettings;

#[derive(Debug, Clone, Copy)]
pub struct AngleResult {
    pub best_angle_deg: f64,
    pub n_tracks: usize,
    pub n_blocks: usize,
}

struct Candidate {
    angle_deg: f64,
    score: f64,
    n_tracks: usize,
    n_blocks: usize,
}

fn candidate_angles(polygon: &Polygon, settings: &CenterSettings) -> Vec<f64> {
    if settings.use_longest_edge_angle {
        vec![-polygon.best_direction().dir]
    } else if settings.use_best_angle {
        let mut angles = Vec::with_capacity(90);
        let mut a = 0.0;
        while a < 180.0 {
            angles.push(a);
            a += 2.0;
        }
        angles
    } else {
        vec![settings.row_angle.to_degrees()]
    }
}

fn score_angle(
    polygon: &Polygon,
    islands: &[IslandHeadland<'_>],
    width: f64,
    distance: f64,
    angle_deg: f64,
    reference_dir_rad: Option<f64>,
) -> (f64, usize, usize) {
    let rotated = polygon.rotated(-angle_deg.to_radians());
    let rotated_islands: Vec<Polygon> = islands
        .iter()
        .map(|h| h.outer.rotated(-angle_deg.to_radians()))
        .collect();
    let rotated_refs: Vec<IslandHeadland<'_>> = islands
        .iter()
        .zip(rotated_islands.iter())
        .map(|(h, outer)| IslandHeadland { id: h.id, outer })
        .collect();

    let (mut rows, _offset) = generate_rows(&rotated, &rotated_refs, width, distance, false);
    let blocks: Vec<Block> = split_into_blocks(&mut rows);
    let n_tracks = rows.len();
    let n_blocks = blocks.len();

    let small_block_score: f64 = if n_blocks > 1 {
        blocks
            .iter()
            .filter(|b| b.row_count() < SMALL_BLOCK_TRACK_COUNT_LIMIT as usize)
            .map(|b| (SMALL_BLOCK_TRACK_COUNT_LIMIT as f64 - b.row_count() as f64))
            .sum()
    } else {
        0.0
    };

    let angle_score = match reference_dir_rad {
        Some(reference) => 3.0 * (angle_deg.to_radians() - reference).sin().abs(),
        None => 0.0,
    };

    let score = 50.0 * small_block_score + 10.0 * n_blocks as f64 + n_tracks as f64 + angle_score;
    (score, n_tracks, n_blocks)
}

/// Sweeps the candidate set implied by `settings` and returns the
/// minimum-score angle's statistics (`spec.md` §4.1). Ties keep the first
/// candidate found, matching a left-to-right sweep.
pub fn search(
    polygon: &Polygon,
    islands: &[IslandHeadland<'_>],
    width: f64,
    distance: f64,
    settings: &CenterSettings,
) -> Option<AngleResult> {
    let angles = candidate_angles(polygon, settings);
    let reference_dir_rad = if settings.use_best_angle {
        Some(polygon.best_direction().dir.to_radians())
    } else {
        None
    };

    let evaluate = |angle_deg: f64| -> Candidate {
        let (score, n_tracks, n_blocks) =
            score_angle(polygon, islands, width, distance, angle_deg, reference_dir_rad);
        log::trace!("angle {angle_deg:.1} score={score:.2} tracks={n_tracks} blocks={n_blocks}");
        Candidate {
            angle_deg,
            score,
            n_tracks,
            n_blocks,
        }
    };

    #[cfg(feature = "parallel")]
    let candidates: Vec<Candidate> = {
        use rayon::prelude::*;
        angles.into_par_iter().map(evaluate).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let candidates: Vec<Candidate> = angles.into_iter().map(evaluate).collect();

    candidates
        .into_iter()
        .enumerate()
        .min_by(|(ia, a), (ib, b)| {
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(ia.cmp(ib))
        })
        .map(|(_, c)| AngleResult {
            best_angle_deg: c.angle_deg,
            n_tracks: c.n_tracks,
            n_blocks: c.n_blocks,
        })
}
