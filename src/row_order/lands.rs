//! LANDS row ordering (`spec.md` §4.5): consecutive bands of
//! `n_rows_per_land` rows, each permuted by [`super::lands_tables`] so the
//! unloading pipe always points at already-worked ground.

use super::lands_tables;

/// `left_to_right`/`bottom_to_top` describe the block's traversal
/// direction as chosen by the linker's entry-corner decision; `spec.md`
/// does not give these a home in [`crate::settings::CenterSettings`], so
/// the caller (block linking, which already knows the entry corner)
/// supplies them explicitly.
pub fn order(
    n: usize,
    rows_per_land: u32,
    left_to_right: bool,
    bottom_to_top: bool,
    pipe_on_left_side: bool,
) -> Vec<usize> {
    let land_size = (rows_per_land.max(1) as usize).min(24);
    let counterclockwise = (left_to_right == bottom_to_top) ^ pipe_on_left_side;

    let mut order = Vec::with_capacity(n);
    let mut start = 1usize;
    while start <= n {
        let remaining = n - start + 1;
        let this_land_size = land_size.min(remaining);
        let table = if counterclockwise {
            lands_tables::counterclockwise_table(this_land_size as u32)
        } else {
            lands_tables::clockwise_table(this_land_size as u32)
        };
        order.extend(table.into_iter().map(|local| start + local - 1));
        start += this_land_size;
    }
    order
}
