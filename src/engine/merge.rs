use super::RunContext;

/// Recursive merge sort that merges by rotation, without a buffer.
///
/// Every out-of-order element slides the block between the two run heads one
/// slot right, so merges are quadratic in the worst case. That is the point:
/// on screen the blocks slide instead of teleporting.
pub fn sort_in_place(ctx: &RunContext<'_>) {
    let n = ctx.seq.len();
    if n > 0 {
        sort_span(ctx, 0, n);
    }
}

/// sorts the half-open span `start..end`
fn sort_span(ctx: &RunContext<'_>, start: usize, end: usize) {
    ctx.state.bump_cycle();
    if ctx.halted() {
        return;
    }
    ctx.pace();

    let len = end - start;
    if len <= 2 {
        // two elements need a compare, not a merge
        if len == 2 && ctx.seq.get(start) > ctx.seq.get(start + 1) {
            ctx.seq.swap(start, start + 1);
        }
        return;
    }

    let mid = start + len / 2;
    ctx.state.mark(mid);
    sort_span(ctx, start, mid);
    ctx.state.mark(mid);
    sort_span(ctx, mid, end);

    merge_rotating(ctx, start, mid, end);
}

/// merge the sorted runs `start..mid` and `mid..end` in place
fn merge_rotating(ctx: &RunContext<'_>, start: usize, mid: usize, end: usize) {
    let seq = ctx.seq;
    let (mut left, mut right) = (start, mid);

    while left < right && right < end {
        if ctx.halted() {
            return;
        }
        ctx.state.mark(left);
        if seq.get(left) <= seq.get(right) {
            left += 1;
        } else {
            let moved = seq.get(right);
            for k in (left..right).rev() {
                seq.set(k + 1, seq.get(k));
            }
            seq.set(left, moved);
            left += 1;
            right += 1;
        }
    }
}

/// Unanimated top-down merge sort through an auxiliary buffer.
/// Only used when pacing is exactly zero (benchmark replay); still counts one
/// cycle per recursive call so replay counts stay comparable.
pub fn sort_buffered(ctx: &RunContext<'_>) {
    let values = ctx.seq.values();
    let sorted = sort_vec(ctx, values);
    ctx.seq.store_all(&sorted);
}

fn sort_vec(ctx: &RunContext<'_>, mut values: Vec<u32>) -> Vec<u32> {
    ctx.state.bump_cycle();
    if ctx.state.is_canceled() {
        return values;
    }
    // same base case as the animated sort, so both count the same calls
    if values.len() <= 2 {
        if values.len() == 2 && values[0] > values[1] {
            values.swap(0, 1);
        }
        return values;
    }

    let right = values.split_off(values.len() / 2);
    let left = sort_vec(ctx, values);
    let right = sort_vec(ctx, right);
    merge_buffers(&left, &right)
}

fn merge_buffers(left: &[u32], right: &[u32]) -> Vec<u32> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        if left[i] <= right[j] {
            merged.push(left[i]);
            i += 1;
        } else {
            merged.push(right[j]);
            j += 1;
        }
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::test_support::*;
    use crate::sequence::Sequence;
    use proptest::prelude::*;
    use std::time::Duration;

    fn run_in_place(values: &[u32]) -> (Vec<u32>, u64) {
        let seq = Sequence::from_values(values);
        let state = state();
        sort_in_place(&RunContext { seq: &seq, state: &state, delay: Duration::ZERO });
        (seq.values(), state.cycles())
    }

    #[test]
    fn test_rotation_merge() {
        let seq = Sequence::from_values(&[2, 5, 7, 1, 3, 6]);
        let state = state();
        let ctx = RunContext { seq: &seq, state: &state, delay: Duration::ZERO };
        merge_rotating(&ctx, 0, 3, 6);
        assert_eq!(seq.values(), vec![1, 2, 3, 5, 6, 7]);
    }

    #[test]
    fn test_in_place_small() {
        assert_eq!(run_in_place(&[2, 1]).0, vec![1, 2]);
        assert_eq!(run_in_place(&[3, 1, 2]).0, vec![1, 2, 3]);
        assert_eq!(run_in_place(&[1]), (vec![1], 1));
    }

    #[test]
    fn test_one_cycle_per_recursive_entry() {
        // 4 -> (2, 2): three entries
        assert_eq!(run_in_place(&[4, 3, 2, 1]).1, 3);
        // 5 -> (2, 3 -> (1, 2)): five entries
        assert_eq!(run_in_place(&[5, 4, 3, 2, 1]).1, 5);
    }

    #[test]
    fn test_buffered_matches_in_place() {
        let input = permutation(257, 4);
        let seq = Sequence::from_values(&input);
        let state = state();
        sort_buffered(&RunContext { seq: &seq, state: &state, delay: Duration::ZERO });
        let (expected, cycles) = run_in_place(&input);
        assert_eq!(seq.values(), expected);
        assert_eq!(state.cycles(), cycles);
    }

    #[test]
    fn test_buffered_two_elements() {
        let seq = Sequence::from_values(&[2, 1]);
        let state = state();
        sort_buffered(&RunContext { seq: &seq, state: &state, delay: Duration::ZERO });
        assert_eq!(seq.values(), vec![1, 2]);
        assert_eq!(state.cycles(), 1);
    }

    #[test]
    fn test_cancel_mid_merge_keeps_permutation() {
        let input = permutation(64, 12);
        let seq = Sequence::from_values(&input);
        let state = state();
        state.cancel_token().cancel();
        sort_in_place(&RunContext { seq: &seq, state: &state, delay: Duration::ZERO });
        // the first entry counts, then unwinds immediately
        assert_eq!(state.cycles(), 1);
        assert_eq!(seq.values(), input);
    }

    proptest! {
        #[test]
        fn prop_in_place_sorts(n in 0usize..200, seed in any::<u64>()) {
            let input = permutation(n, seed);
            let (out, _) = run_in_place(&input);
            prop_assert_eq!(out, (1..=n as u32).collect::<Vec<_>>());
        }
    }
}
