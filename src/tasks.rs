use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::engine::{Algorithm, Pacing};
use crate::sequence::Sequence;
use crate::state::{CancelToken, VisualizationState};

/// per-element step of an animation that should take `total_secs` for `n` elements
fn step_for(n: usize, total_secs: f64) -> Duration {
    if n == 0 || !total_secs.is_finite() || total_secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::from_secs_f64(total_secs / n as f64)
}

/// Animated shuffle: draws a uniform permutation up front, then writes it into
/// the sequence one slot at a time so the scramble itself is visible.
#[derive(Clone, Copy, Debug)]
pub struct ShuffleEngine {
    pub step: Duration,
}

impl ShuffleEngine {
    pub fn for_amount(n: usize, total_secs: f64) -> Self {
        Self { step: step_for(n, total_secs) }
    }

    pub fn run<R: Rng + ?Sized>(&self, seq: &Sequence, state: &VisualizationState, rng: &mut R) {
        profiling::scope!("shuffle_run");
        let mut target = seq.values();
        target.shuffle(rng);

        for (index, &value) in target.iter().enumerate() {
            if state.checkpoint().is_break() {
                return;
            }
            state.mark(index);
            seq.set(index, seq.get(index).with_value(value));
            state.pace(self.step);
        }
        state.set_phase_done(true);
    }
}

/// Non-mutating sweep over a sorted sequence so an observer can watch the
/// order being confirmed. Leaves the mark on the last slot when done.
#[derive(Clone, Copy, Debug)]
pub struct ConfirmationScanner {
    pub step: Duration,
}

impl ConfirmationScanner {
    pub fn for_amount(n: usize, total_secs: f64) -> Self {
        Self { step: step_for(n, total_secs) }
    }

    pub fn run(&self, n: usize, state: &VisualizationState) {
        profiling::scope!("confirm_run");
        for index in 0..n {
            if state.checkpoint().is_break() {
                return;
            }
            state.mark(index);
            state.pace(self.step);
        }
        state.set_scan_done(true);
    }
}

/// Result of an unthrottled re-run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BenchmarkReport {
    pub algorithm: Algorithm,
    pub cycles: u64,
    pub elapsed: Duration,
    pub sorted: bool,
}

impl BenchmarkReport {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Re-runs an algorithm with zero pacing on a fresh copy of the permutation the
/// animated run started from. Seeded like the animated run, so the replay makes
/// the same random choices and reports that run's exact cost.
#[derive(Clone, Debug)]
pub struct BenchmarkReplay {
    pub algorithm: Algorithm,
    pub original: Arc<[u32]>,
    pub seed: u64,
}

impl BenchmarkReplay {
    /// `cancel` is the process token; the replay otherwise has private state and
    /// is never paused
    pub fn run(&self, cancel: &CancelToken) -> BenchmarkReport {
        profiling::scope!("benchmark_run");
        let seq = Sequence::from_values(&self.original);
        let state = VisualizationState::new(cancel.clone());
        let mut rng = Pcg32::seed_from_u64(self.seed);

        let started = Instant::now();
        self.algorithm.run(&seq, &state, Pacing::None, &mut rng);
        let elapsed = started.elapsed();

        BenchmarkReport {
            algorithm: self.algorithm,
            cycles: state.cycles(),
            elapsed,
            sorted: seq.is_ascending(),
        }
    }
}
