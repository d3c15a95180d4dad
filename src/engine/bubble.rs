use super::RunContext;

/// Adjacent-swap bubble sort: N-1 passes, each one shorter than the last.
/// Marks the right-hand slot of the pair just compared; one cycle per pass.
pub fn sort(ctx: &RunContext<'_>) {
    let seq = ctx.seq;
    let n = seq.len();

    for pass in 0..n.saturating_sub(1) {
        if ctx.halted() {
            return;
        }
        for i in 0..n - pass - 1 {
            if ctx.halted() {
                return;
            }
            if seq.get(i) > seq.get(i + 1) {
                seq.swap(i, i + 1);
            }
            ctx.state.mark(i + 1);
        }
        ctx.pace();
        ctx.state.bump_cycle();
    }
}
