use rand::seq::SliceRandom;
use rand::Rng;

use super::RunContext;

/// Reshuffle the whole sequence until it happens to come out ascending.
/// The mark jumps to a random slot each attempt purely for motion on screen.
pub fn sort<R: Rng + ?Sized>(ctx: &RunContext<'_>, rng: &mut R) {
    let seq = ctx.seq;
    let mut values = seq.values();

    while !seq.is_ascending() {
        if ctx.halted() {
            return;
        }
        ctx.state.mark(rng.random_range(0..values.len()));
        ctx.state.bump_cycle();
        values.shuffle(rng);
        seq.store_all(&values);
        ctx.pace();
    }
}
