//! The four row-ordering patterns applied within a block (`spec.md` §4.5).
//! Each produces a permutation of `1..=n`; the linker then walks it as a
//! zig-zag, reversing every second row's waypoints.

pub mod circular;
pub mod lands;
pub mod lands_tables;
pub mod spiral;
pub mod up_down;

use crate::settings::{CenterMode, CenterSettings};

/// Dispatches to the pattern named by `settings.mode`. `left_to_right`/
/// `bottom_to_top` are only consulted for [`CenterMode::Lands`].
pub fn order_for_block(
    n: usize,
    settings: &CenterSettings,
    left_to_right: bool,
    bottom_to_top: bool,
) -> Vec<usize> {
    match settings.mode {
        CenterMode::UpDown => up_down::order(
            n,
            settings.n_rows_to_skip,
            settings.leave_skipped_rows_unworked,
        ),
        CenterMode::Spiral => spiral::order(n),
        CenterMode::Circular => circular::order(n),
        CenterMode::Lands => lands::order(
            n,
            settings.n_rows_per_land,
            left_to_right,
            bottom_to_top,
            settings.pipe_on_left_side,
        ),
    }
}

/// Reverses every second entry's waypoints in place so consecutive rows
/// connect end-to-start (`spec.md` §4.5).
pub fn zigzag_reverse<T>(rows: &mut [Vec<T>]) {
    for row in rows.iter_mut().skip(1).step_by(2) {
        row.reverse();
    }
}
