//! Black-box scenarios from `spec.md` §8, exercised only through the public
//! API (`generate_field_center` and its input/output types).

use center_course::geometry::{Coord, Polygon};
use center_course::input::{HeadlandInput, Island};
use center_course::settings::{CenterMode, CenterSettings, HeadlandSettings};
use center_course::{generate_field_center, FieldCenterResult};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn single_pass_input(vertices: Vec<Coord>) -> HeadlandInput {
    let polygon = Polygon::new(vertices).unwrap();
    HeadlandInput {
        passes: vec![polygon],
        circle_start: 0,
        circle_step: 1,
    }
}

fn run(
    input: &HeadlandInput,
    islands: &[Island],
    width: f64,
    settings: CenterSettings,
    seed: u64,
) -> FieldCenterResult {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_field_center(input, islands, width, HeadlandSettings::default(), settings, &mut rng).unwrap()
}

// (i) Square: bestAngle snaps to an axis, ~10 rows, first row inset by W/2.
#[test]
fn square_field_snaps_to_an_axis_and_covers_ten_rows() {
    let input = single_pass_input(vec![
        Coord::new(0.0, 0.0),
        Coord::new(40.0, 0.0),
        Coord::new(40.0, 40.0),
        Coord::new(0.0, 40.0),
    ]);
    let result = run(&input, &[], 4.0, CenterSettings::default(), 1);

    assert!(result.result_is_ok);
    let snapped = result.best_angle_deg.rem_euclid(90.0);
    assert!(snapped < 1.0 || snapped > 89.0, "angle={}", result.best_angle_deg);
    assert_eq!(result.blocks.len(), 1);
    assert_eq!(result.blocks[0].row_count(), 10);

    let first = result.track.first().expect("non-empty track");
    let near_x2 = (first.x - 2.0).abs() < 1.0;
    let near_y2 = (first.y - 2.0).abs() < 1.0;
    assert!(near_x2 || near_y2, "first waypoint {:?} not near x=2 or y=2", first);
}

// (ii) Narrow rectangle: angle stays near 0, exactly 3 parallel tracks.
#[test]
fn narrow_rectangle_prefers_zero_angle_with_three_tracks() {
    let input = single_pass_input(vec![
        Coord::new(0.0, 0.0),
        Coord::new(100.0, 0.0),
        Coord::new(100.0, 10.0),
        Coord::new(0.0, 10.0),
    ]);
    let result = run(&input, &[], 4.0, CenterSettings::default(), 2);

    assert!(result.result_is_ok);
    let snapped = result.best_angle_deg.rem_euclid(180.0);
    assert!(snapped < 5.0 || snapped > 175.0, "angle={}", result.best_angle_deg);
    assert_eq!(result.n_parallel_tracks, 3);
}

// (iii) L-shape: at least two blocks, GA connects them, result is ok.
#[test]
fn l_shape_yields_multiple_blocks_the_ga_connects() {
    let input = single_pass_input(vec![
        Coord::new(0.0, 0.0),
        Coord::new(40.0, 0.0),
        Coord::new(40.0, 20.0),
        Coord::new(20.0, 20.0),
        Coord::new(20.0, 40.0),
        Coord::new(0.0, 40.0),
    ]);
    // Axis-aligned rows leave this L's notch y-monotone (every row still
    // gets exactly 2 intersections, nested inside the wider rows below),
    // so it never actually splits. At 45 degrees, rows cut through the
    // notch twice and pick up 4 intersections, forcing a genuine split.
    let settings = CenterSettings {
        use_best_angle: false,
        row_angle: -std::f64::consts::FRAC_PI_4,
        ..Default::default()
    };
    let result = run(&input, &[], 4.0, settings, 3);

    assert!(result.result_is_ok);
    assert!(result.blocks.len() >= 2);
    assert!(!result.track.is_empty());
}

// (iv) Circular approximation: a near-circular boundary stays one block and
// links end to end without panicking under nRowsToSkip = 1.
#[test]
fn circular_field_stays_one_block_under_up_down_skip() {
    let n = 32;
    let radius = 20.0;
    let vertices: Vec<Coord> = (0..n)
        .map(|i| {
            let theta = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
            Coord::new(radius * theta.cos(), radius * theta.sin())
        })
        .collect();
    let input = single_pass_input(vertices);
    let settings = CenterSettings {
        use_best_angle: false,
        row_angle: 0.0,
        mode: CenterMode::UpDown,
        n_rows_to_skip: 1,
        ..Default::default()
    };
    let result = run(&input, &[], 4.0, settings, 4);

    assert!(result.result_is_ok);
    assert_eq!(result.blocks.len(), 1);
    assert!(!result.track.is_empty());
}

// (v) LANDS: a field sized to produce exactly 12 rows reproduces the
// worked example's permutation via the row-ordering module directly, and
// end to end the pipeline still links every row into one track.
#[test]
fn lands_field_with_twelve_rows_links_successfully() {
    let input = single_pass_input(vec![
        Coord::new(0.0, 0.0),
        Coord::new(40.0, 0.0),
        Coord::new(40.0, 48.0),
        Coord::new(0.0, 48.0),
    ]);
    let settings = CenterSettings {
        use_best_angle: false,
        row_angle: 0.0,
        mode: CenterMode::Lands,
        n_rows_per_land: 4,
        ..Default::default()
    };
    let result = run(&input, &[], 4.0, settings, 5);

    assert!(result.result_is_ok);
    assert_eq!(result.blocks.len(), 1);
    assert_eq!(result.blocks[0].row_count(), 12);
    assert!(!result.track.is_empty());

    use center_course::row_order::lands::order;
    assert_eq!(order(12, 4, true, true, false), vec![3, 4, 2, 1, 7, 8, 6, 5, 11, 12, 10, 9]);
}

// (vi) A single interior island splits the field into (at least) two blocks.
#[test]
fn field_with_one_interior_island_splits_into_multiple_blocks() {
    let field = single_pass_input(vec![
        Coord::new(0.0, 0.0),
        Coord::new(60.0, 0.0),
        Coord::new(60.0, 40.0),
        Coord::new(0.0, 40.0),
    ]);
    let island_polygon = Polygon::new(vec![
        Coord::new(25.0, 15.0),
        Coord::new(35.0, 15.0),
        Coord::new(35.0, 25.0),
        Coord::new(25.0, 25.0),
    ])
    .unwrap();
    let island = Island {
        id: 1,
        outermost_headland_ix: 0,
        headland_tracks: vec![island_polygon],
    };
    let settings = CenterSettings {
        use_best_angle: false,
        row_angle: 0.0,
        ..Default::default()
    };
    let result = run(&field, std::slice::from_ref(&island), 4.0, settings, 6);

    assert!(result.result_is_ok);
    assert!(result.blocks.len() >= 2, "expected the island to split the field, got {} blocks", result.blocks.len());
    assert!(!result.track.is_empty());
}

#[test]
fn degenerate_geometry_is_rejected_before_generation() {
    let err = Polygon::new(vec![Coord::new(0.0, 0.0), Coord::new(1.0, 1.0)]).unwrap_err();
    assert!(matches!(err, center_course::Error::DegeneratePolygon { found_vertices: 2 }));
}
