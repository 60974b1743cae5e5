//! CIRCULAR row ordering (`spec.md` §4.5).
//!
//! Starts at row `k+1` (`k = 4`) and alternates `SKIP_FWD` (`+k+1`) /
//! `SKIP_BACK` (`-k`) steps. Whenever the next target would fall outside
//! `[1, n]` or is already visited, the *other* direction is tried at the
//! same `k` before giving up; only when both directions are stuck does `k`
//! shrink (strictly, to guarantee termination) towards `(n - done) / 2`.
//! Once `k` reaches 0 the remainder is filled contiguously (`FILL_IN`).
//! Each row is visited exactly once.

pub fn order(n: usize) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    let mut k: i64 = 4;
    let mut visited = vec![false; n + 1];
    let mut order = Vec::with_capacity(n);

    let mut cur: i64 = k + 1;
    if cur < 1 || cur > n as i64 {
        cur = 1;
    }
    order.push(cur as usize);
    visited[cur as usize] = true;

    let mut skip_fwd = false;
    while order.len() < n {
        if k > 0 {
            let try_step = |step: i64| -> Option<i64> {
                let next = cur + step;
                if next >= 1 && next <= n as i64 && !visited[next as usize] {
                    Some(next)
                } else {
                    None
                }
            };
            let (primary, secondary) = if skip_fwd { (k + 1, -k) } else { (-k, k + 1) };
            if let Some(next) = try_step(primary) {
                cur = next;
                order.push(cur as usize);
                visited[cur as usize] = true;
                skip_fwd = !skip_fwd;
            } else if let Some(next) = try_step(secondary) {
                // The primary direction was stuck; falling back to the
                // other one without toggling `skip_fwd` keeps the next
                // iteration trying the direction that just worked.
                cur = next;
                order.push(cur as usize);
                visited[cur as usize] = true;
            } else {
                // Both directions stuck at this k: shrink strictly so k
                // cannot recompute to the same value forever.
                let done = order.len() as i64;
                let shrunk = (n as i64 - done) / 2;
                k = if shrunk < k { shrunk.max(0) } else { k - 1 };
            }
        } else {
            let next = (1..=n).find(|&i| !visited[i]).expect("loop guard: order.len() < n");
            order.push(next);
            visited[next] = true;
            cur = next as i64;
        }
    }
    order
}
