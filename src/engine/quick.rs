use rand::Rng;

use super::{selection, RunContext};

/// spans with `high - low` at or below this go to a selection pass in the hybrid
pub const HYBRID_SPAN: isize = 16;

/// In-place quicksort with a random pivot and Lomuto partitioning.
pub fn sort<R: Rng + ?Sized>(ctx: &RunContext<'_>, rng: &mut R) {
    sort_span(ctx, 0, ctx.seq.len() as isize - 1, rng, false);
}

/// Quicksort that delegates small spans to selection sort.
pub fn sort_hybrid<R: Rng + ?Sized>(ctx: &RunContext<'_>, rng: &mut R) {
    sort_span(ctx, 0, ctx.seq.len() as isize - 1, rng, true);
}

/// Sorts `low..=high`. Bounds are signed so the empty spans either side of a
/// pivot at index 0 are still ordinary calls; every entry counts as a cycle.
pub(crate) fn sort_span<R: Rng + ?Sized>(
    ctx: &RunContext<'_>,
    low: isize,
    high: isize,
    rng: &mut R,
    hybrid: bool,
) {
    ctx.state.bump_cycle();
    if ctx.halted() {
        return;
    }

    if hybrid && high - low <= HYBRID_SPAN {
        if low < high {
            selection::sort_range(ctx, low as usize, high as usize);
        }
        return;
    }

    if low < high {
        let pivot = partition(ctx, low as usize, high as usize, rng) as isize;
        sort_span(ctx, low, pivot - 1, rng, hybrid);
        sort_span(ctx, pivot + 1, high, rng, hybrid);
    }
}

/// Lomuto partition around a uniformly random pivot; returns the pivot's final index.
///
/// Paces, checks pause/cancel and marks the boundary after every comparison.
/// A canceled partition still drops the pivot into place.
fn partition<R: Rng + ?Sized>(ctx: &RunContext<'_>, low: usize, high: usize, rng: &mut R) -> usize {
    let seq = ctx.seq;
    let pivot_index = rng.random_range(low..=high);
    seq.swap(pivot_index, high);
    let pivot = seq.get(high);

    // everything left of `boundary` is <= pivot
    let mut boundary = low;
    for j in low..high {
        ctx.pace();
        if ctx.halted() {
            break;
        }
        if seq.get(j) <= pivot {
            seq.swap(boundary, j);
            boundary += 1;
        }
        match boundary.checked_sub(1) {
            Some(i) => ctx.state.mark(i),
            None => ctx.state.clear_mark(),
        }
    }

    seq.swap(boundary, high);
    boundary
}
