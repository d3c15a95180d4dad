use super::RunContext;

/// Insertion sort: for each index 1..N, lift the element out and shift every
/// larger predecessor one slot right, then drop it into the gap.
///
/// Marks the slot the next shift compares against. One delay and one cycle per
/// outer index.
pub fn sort(ctx: &RunContext<'_>) {
    let seq = ctx.seq;

    for index in 1..seq.len() {
        ctx.pace();
        if ctx.halted() {
            return;
        }
        ctx.state.bump_cycle();

        let key = seq.get(index);
        let mut gap = index;
        let mut canceled = false;
        while gap > 0 && seq.get(gap - 1) > key {
            if ctx.halted() {
                canceled = true;
                break;
            }
            seq.set(gap, seq.get(gap - 1));
            gap -= 1;
            // nothing left to compare against once the gap reaches the front
            match gap {
                0 => ctx.state.clear_mark(),
                g => ctx.state.mark(g - 1),
            }
        }
        // the key is always put back so a canceled run is still a permutation
        seq.set(gap, key);
        if canceled {
            return;
        }
    }
}
