//! UP_DOWN row ordering (`spec.md` §4.5).

/// Working index advances in steps of `skip + 1`. Once a forward sweep
/// stalls (runs off the end or lands back on an already-worked row) and
/// `leave_skipped_rows_unworked` is false, a reverse sweep picks up the
/// unworked rows from the other end with the same stride; sweeps keep
/// alternating ends until every row is visited exactly once.
pub fn order(n: usize, skip: u32, leave_skipped_rows_unworked: bool) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    let stride = skip as i64 + 1;
    let mut visited = vec![false; n + 1];
    let mut order = Vec::with_capacity(n);

    let mut forward = true;
    let mut start: i64 = 1;
    loop {
        let step = if forward { stride } else { -stride };
        let mut i = start;
        while i >= 1 && i <= n as i64 {
            if !visited[i as usize] {
                order.push(i as usize);
                visited[i as usize] = true;
            }
            i += step;
        }
        if order.len() == n || leave_skipped_rows_unworked {
            break;
        }
        forward = !forward;
        start = if forward {
            match (1..=n).find(|&r| !visited[r]) {
                Some(r) => r as i64,
                None => break,
            }
        } else {
            match (1..=n).rev().find(|&r| !visited[r]) {
                Some(r) => r as i64,
                None => break,
            }
        };
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_skip_is_simple_ascending_order() {
        assert_eq!(order(5, 0, false), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn skip_one_zigzags_from_both_ends() {
        assert_eq!(order(8, 1, false), vec![1, 3, 5, 7, 8, 6, 4, 2]);
    }

    #[test]
    fn leave_skipped_unworked_stops_after_forward_sweep() {
        assert_eq!(order(8, 1, true), vec![1, 3, 5, 7]);
    }

    #[test]
    fn is_a_permutation_for_small_n_and_skip() {
        for n in 1..=25 {
            for skip in 0..=3 {
                let result = order(n, skip, false);
                let mut sorted = result.clone();
                sorted.sort_unstable();
                assert_eq!(sorted, (1..=n).collect::<Vec<_>>(), "n={n} skip={skip}");
            }
        }
    }
}
