//! Genetic block sequencer (`spec.md` §4.7): jointly chooses a block
//! traversal order and an entry corner per block, minimizing total
//! transition distance along the innermost headland (or an adjoining
//! island headland).

pub mod exit_corner;

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::Rng;

use crate::block_splitter::Block;
use crate::geometry::{Point, Polygon};
use crate::ids::HeadlandRef;
use crate::settings::Corner;

const TOURNAMENT_SIZE: usize = 5;
const MUTATION_RATE: f64 = 0.03;

/// A candidate block order plus a per-block entry-corner choice.
#[derive(Debug, Clone)]
struct Chromosome {
    /// Permutation of block indices (0..n_blocks).
    perm: Vec<usize>,
    /// Entry corner chosen for block index `i`, at `entry[i]`.
    entry: Vec<Corner>,
}

impl Chromosome {
    fn random(n_blocks: usize, rng: &mut StdRng) -> Self {
        let mut perm: Vec<usize> = (0..n_blocks).collect();
        for i in (1..n_blocks).rev() {
            let j = rng.gen_range(0..=i);
            perm.swap(i, j);
        }
        let entry = (0..n_blocks)
            .map(|_| Corner::ALL[rng.gen_range(0..4)])
            .collect();
        Chromosome { perm, entry }
    }

    fn crossover(a: &Chromosome, b: &Chromosome, rng: &mut StdRng) -> Chromosome {
        let n = a.perm.len();
        // Order-preserving (OX) crossover on the permutation.
        let mut perm = vec![usize::MAX; n];
        if n > 0 {
            let i = rng.gen_range(0..n);
            let j = rng.gen_range(0..n);
            let (lo, hi) = (i.min(j), i.max(j));
            perm[lo..=hi].copy_from_slice(&a.perm[lo..=hi]);
            let mut fill_pos = (hi + 1) % n;
            for k in 0..n {
                let candidate = b.perm[(hi + 1 + k) % n];
                if !perm[lo..=hi].contains(&candidate) {
                    perm[fill_pos] = candidate;
                    fill_pos = (fill_pos + 1) % n;
                }
            }
        }
        // Uniform crossover on the corner encoding.
        let entry = (0..n)
            .map(|i| if rng.gen_bool(0.5) { a.entry[i] } else { b.entry[i] })
            .collect();
        Chromosome { perm, entry }
    }

    fn mutate(&mut self, rng: &mut StdRng) {
        let n = self.perm.len();
        if n < 2 {
            return;
        }
        for i in 0..n {
            if rng.gen_bool(MUTATION_RATE) {
                let j = rng.gen_range(0..n);
                self.perm.swap(i, j);
            }
            if rng.gen_bool(MUTATION_RATE) {
                self.entry[i] = Corner::ALL[rng.gen_range(0..4)];
            }
        }
    }
}

/// Distance from `circle_start` to the first block's entry-corner edge,
/// along `innermost` (`spec.md` §4.7).
fn first_block_distance(
    innermost: &Polygon,
    circle_start: i64,
    circle_step: i64,
    has_headlands: bool,
    entry_point: &Point,
) -> (f64, i64) {
    if entry_point.headland != Some(HeadlandRef::Field) {
        return (f64::INFINITY, circle_step);
    }
    let edge = entry_point.headland_edge.expect("corner intersections always carry an edge");
    let directions: &[i64] = if has_headlands { &[circle_step] } else { &[1, -1] };
    let mut best = (f64::INFINITY, circle_step);
    for &d in directions {
        let target = if d >= 0 { edge.from_ix as i64 } else { edge.to_ix as i64 };
        let dist = innermost.distance_along(circle_start, target, d);
        if dist < best.0 {
            best = (dist, d);
        }
    }
    best
}

/// Distance between a previous block's exit corner and the next block's
/// entry corner, along whichever polygon both lie on (`spec.md` §4.7).
fn transition_distance(
    polygons: &HashMap<HeadlandRef, &Polygon>,
    prev_exit: &Point,
    next_entry: &Point,
) -> (f64, i64) {
    let (Some(a), Some(b)) = (prev_exit.headland, next_entry.headland) else {
        return (f64::INFINITY, 1);
    };
    if a != b {
        return (f64::INFINITY, 1);
    }
    let Some(&polygon) = polygons.get(&a) else {
        return (f64::INFINITY, 1);
    };
    let prev_edge = prev_exit.headland_edge.expect("corner intersections always carry an edge");
    let next_edge = next_entry.headland_edge.expect("corner intersections always carry an edge");
    let mut best = (f64::INFINITY, 1i64);
    for d in [1i64, -1] {
        let start = if d >= 0 { prev_edge.to_ix as i64 } else { prev_edge.from_ix as i64 };
        let end = if d >= 0 { next_edge.from_ix as i64 } else { next_edge.to_ix as i64 };
        let dist = polygon.distance_along(start, end, d);
        if dist < best.0 {
            best = (dist, d);
        }
    }
    best
}

struct Evaluated {
    chromosome: Chromosome,
    total_distance: f64,
    directions: Vec<i64>,
    fitness: f64,
}

fn evaluate(
    chromosome: Chromosome,
    blocks: &[Block],
    innermost: &Polygon,
    circle_start: i64,
    circle_step: i64,
    has_headlands: bool,
    n_rows_to_skip: u32,
    polygons: &HashMap<HeadlandRef, &Polygon>,
) -> Evaluated {
    let n = chromosome.perm.len();
    let mut directions = vec![1i64; n];
    let mut total = 0.0;

    if n > 0 {
        let first_block = &blocks[chromosome.perm[0]];
        let first_entry = chromosome.entry[chromosome.perm[0]];
        let (d0, _dir0) = first_block_distance(
            innermost,
            circle_start,
            circle_step,
            has_headlands,
            first_block.corner_point(first_entry),
        );
        total += d0;

        for i in 0..n {
            let block = &blocks[chromosome.perm[i]];
            let entry_c = chromosome.entry[chromosome.perm[i]];
            let exit_c = exit_corner::exit_corner(entry_c, block.row_count(), n_rows_to_skip);
            if i + 1 < n {
                let next_block = &blocks[chromosome.perm[i + 1]];
                let next_entry_c = chromosome.entry[chromosome.perm[i + 1]];
                let (d, dir) = transition_distance(
                    polygons,
                    block.corner_point(exit_c),
                    next_block.corner_point(next_entry_c),
                );
                total += d;
                directions[i] = dir;
            }
        }
    }

    let fitness = if total.is_finite() && total > 0.0 {
        10000.0 / total
    } else if total == 0.0 {
        10000.0
    } else {
        0.0
    };

    Evaluated {
        chromosome,
        total_distance: total,
        directions,
        fitness,
    }
}

fn tournament_select<'a>(pop: &'a [Evaluated], rng: &mut StdRng) -> &'a Chromosome {
    let mut best: Option<&Evaluated> = None;
    for _ in 0..TOURNAMENT_SIZE {
        let candidate = &pop[rng.gen_range(0..pop.len())];
        if best.map(|b| candidate.fitness > b.fitness).unwrap_or(true) {
            best = Some(candidate);
        }
    }
    &best.expect("tournament size > 0").chromosome
}

/// The result of sequencing: each block's chosen entry corner and the
/// direction used to transition away from it, in traversal order.
pub struct SequenceResult {
    /// Block indices in traversal order.
    pub order: Vec<usize>,
    /// Entry corner chosen for each block index (same indexing as `blocks`).
    pub entry_corner: Vec<Corner>,
    /// For the block at `order[i]`, the direction used to walk the
    /// headland to `order[i + 1]` (meaningless for the last position).
    pub direction_to_next: Vec<i64>,
    pub total_distance: f64,
}

/// Runs the GA and returns the best chromosome found.
///
/// `polygons` must map every [`HeadlandRef`] that can appear on a block
/// corner (the innermost field headland, plus any adjoining island's
/// outer headland) to its polygon.
#[allow(clippy::too_many_arguments)]
pub fn sequence_blocks(
    blocks: &[Block],
    innermost: &Polygon,
    circle_start: i64,
    circle_step: i64,
    has_headlands: bool,
    n_rows_to_skip: u32,
    polygons: &HashMap<HeadlandRef, &Polygon>,
    rng: &mut StdRng,
) -> SequenceResult {
    let n_blocks = blocks.len();
    if n_blocks == 0 {
        return SequenceResult {
            order: Vec::new(),
            entry_corner: Vec::new(),
            direction_to_next: Vec::new(),
            total_distance: 0.0,
        };
    }
    if n_blocks == 1 {
        let mut best_entry = Corner::BL;
        let mut best_dist = f64::INFINITY;
        for &c in Corner::ALL.iter() {
            let (d, _) =
                first_block_distance(innermost, circle_start, circle_step, has_headlands, blocks[0].corner_point(c));
            if d < best_dist {
                best_dist = d;
                best_entry = c;
            }
        }
        return SequenceResult {
            order: vec![0],
            entry_corner: vec![best_entry],
            direction_to_next: vec![1],
            total_distance: best_dist,
        };
    }

    let pop_size = 40 * n_blocks;
    let generations = 10 * n_blocks;

    let mut population: Vec<Evaluated> = (0..pop_size)
        .map(|_| {
            evaluate(
                Chromosome::random(n_blocks, rng),
                blocks,
                innermost,
                circle_start,
                circle_step,
                has_headlands,
                n_rows_to_skip,
                polygons,
            )
        })
        .collect();

    let mut best_fitness_so_far = population
        .iter()
        .map(|e| e.fitness)
        .fold(f64::NEG_INFINITY, f64::max);

    for generation in 0..generations {
        let mut next_gen = Vec::with_capacity(pop_size);
        // Elitism: carry the best chromosome forward unchanged.
        let elite_ix = population
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.fitness.partial_cmp(&b.fitness).unwrap())
            .map(|(i, _)| i)
            .expect("population is non-empty");
        next_gen.push(evaluate(
            population[elite_ix].chromosome.clone(),
            blocks,
            innermost,
            circle_start,
            circle_step,
            has_headlands,
            n_rows_to_skip,
            polygons,
        ));

        while next_gen.len() < pop_size {
            let parent_a = tournament_select(&population, rng);
            let parent_b = tournament_select(&population, rng);
            let mut child = Chromosome::crossover(parent_a, parent_b, rng);
            child.mutate(rng);
            next_gen.push(evaluate(
                child,
                blocks,
                innermost,
                circle_start,
                circle_step,
                has_headlands,
                n_rows_to_skip,
                polygons,
            ));
        }
        population = next_gen;
        let gen_best = population
            .iter()
            .map(|e| e.fitness)
            .fold(f64::NEG_INFINITY, f64::max);
        best_fitness_so_far = best_fitness_so_far.max(gen_best);
        log::trace!("GA generation {generation}: best fitness so far {best_fitness_so_far:.4}");
    }

    let best = population
        .into_iter()
        .max_by(|a, b| a.fitness.partial_cmp(&b.fitness).unwrap())
        .expect("population is non-empty");

    SequenceResult {
        order: best.chromosome.perm,
        entry_corner: best.chromosome.entry,
        direction_to_next: best.directions,
        total_distance: best.total_distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn single_block_picks_cheapest_entry_corner() {
        use crate::block_splitter::split_into_blocks;
        use crate::geometry::Coord;
        use crate::row_generator::generate_rows;

        let square = Polygon::new(vec![
            Coord::new(0.0, 0.0),
            Coord::new(40.0, 0.0),
            Coord::new(40.0, 40.0),
            Coord::new(0.0, 40.0),
        ])
        .unwrap();
        let (mut rows, _) = generate_rows(&square, &[], 4.0, 2.0, false);
        let blocks = split_into_blocks(&mut rows);
        let mut polygons = HashMap::new();
        polygons.insert(HeadlandRef::Field, &square);

        let result = sequence_blocks(&blocks, &square, 0, 1, false, 0, &polygons, &mut StdRng::seed_from_u64(1));
        assert_eq!(result.order, vec![0]);
        assert!(result.total_distance.is_finite());
    }

    #[test]
    fn ga_is_deterministic_for_a_fixed_seed() {
        use crate::block_splitter::split_into_blocks;
        use crate::geometry::Coord;
        use crate::row_generator::generate_rows;

        // An L-shape, rotated so axis-aligned rows cut through its notch
        // twice (4 intersections instead of 2), forces more than one block.
        let l_shape = Polygon::new(vec![
            Coord::new(0.0, 0.0),
            Coord::new(40.0, 0.0),
            Coord::new(40.0, 20.0),
            Coord::new(20.0, 20.0),
            Coord::new(20.0, 40.0),
            Coord::new(0.0, 40.0),
        ])
        .unwrap()
        .rotated(std::f64::consts::FRAC_PI_4);
        let (mut rows, _) = generate_rows(&l_shape, &[], 4.0, 2.0, false);
        let blocks = split_into_blocks(&mut rows);
        let mut polygons = HashMap::new();
        polygons.insert(HeadlandRef::Field, &l_shape);

        let a = sequence_blocks(&blocks, &l_shape, 0, 1, false, 0, &polygons, &mut StdRng::seed_from_u64(42));
        let b = sequence_blocks(&blocks, &l_shape, 0, 1, false, 0, &polygons, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.order, b.order);
        assert_eq!(a.entry_corner.len(), b.entry_corner.len());
    }
}
