use super::RunContext;

/// Selection sort over the whole sequence.
pub fn sort(ctx: &RunContext<'_>) {
    let n = ctx.seq.len();
    if n >= 2 {
        sort_range(ctx, 0, n - 1);
    }
}

/// Selection sort restricted to `low..=high`.
///
/// Each outer iteration scans the unsorted prefix for its maximum (marking the
/// running maximum), then swaps it to the end of that prefix. One delay and one
/// cycle per outer iteration.
pub fn sort_range(ctx: &RunContext<'_>, low: usize, high: usize) {
    let seq = ctx.seq;
    if high <= low {
        return;
    }

    for outer in 0..high - low {
        if ctx.halted() {
            return;
        }
        let last = high - outer;
        let mut highest = low;
        for i in low..=last {
            if ctx.halted() {
                return;
            }
            if seq.get(i) > seq.get(highest) {
                highest = i;
            }
            ctx.state.mark(highest);
        }
        ctx.pace();

        seq.swap(last, highest);
        ctx.state.bump_cycle();
    }
}
