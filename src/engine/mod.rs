// Sorting algorithms that run against a shared `Sequence`, one file each.
// Selection, pacing and the per-run context live here.

pub mod bubble;
pub mod insertion;
pub mod merge;
pub mod quick;
pub mod selection;
pub mod shufflesort;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use rand::Rng;

use crate::error::Error;
use crate::sequence::Sequence;
use crate::state::VisualizationState;

/// above this many elements shufflesort always runs unthrottled
pub const SHUFFLESORT_THROTTLE_LIMIT: usize = 9;

/// The seven interchangeable sorting strategies, in selector order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bubble,
    Selection,
    Merge,
    Quick,
    ShuffleSort,
    Insertion,
    /// quicksort that hands spans of at most 17 elements to a selection pass
    QuickSelect,
}

impl Algorithm {
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Merge,
        Algorithm::Quick,
        Algorithm::ShuffleSort,
        Algorithm::Insertion,
        Algorithm::QuickSelect,
    ];

    /// command line keyword
    pub fn keyword(self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Selection => "selection",
            Algorithm::Merge => "merge",
            Algorithm::Quick => "quick",
            Algorithm::ShuffleSort => "shufflesort",
            Algorithm::Insertion => "insert",
            Algorithm::QuickSelect => "quickselect",
        }
    }

    /// numeric selector of the dispatch table
    pub fn selector(self) -> u8 {
        match self {
            Algorithm::Bubble => 0,
            Algorithm::Selection => 1,
            Algorithm::Merge => 2,
            Algorithm::Quick => 3,
            Algorithm::ShuffleSort => 4,
            Algorithm::Insertion => 5,
            Algorithm::QuickSelect => 6,
        }
    }

    /// Default per-cycle delay for an `n`-element sequence.
    /// Formula values are milliseconds, floored; non-finite results (n = 1) give zero.
    pub fn default_delay(self, n: usize) -> Duration {
        let n = n as f64;
        let millis = match self {
            Algorithm::Bubble => 500_000.0 / n.powf(1.5),
            Algorithm::Selection => 400_000.0 / n.powf(1.5),
            Algorithm::Merge | Algorithm::Quick | Algorithm::QuickSelect => 30_000.0 / (n * n.ln()),
            Algorithm::Insertion => 60_000.0 / (n * n.log10()),
            Algorithm::ShuffleSort => 1.0,
        };
        if millis.is_finite() && millis > 0.0 {
            Duration::from_millis(millis.floor() as u64)
        } else {
            Duration::ZERO
        }
    }

    /// pacing actually applied for `n` elements; shufflesort above the limit
    /// only has a chance of finishing when unthrottled
    pub fn effective_pacing(self, n: usize, requested: Pacing) -> Pacing {
        match self {
            Algorithm::ShuffleSort if n > SHUFFLESORT_THROTTLE_LIMIT => Pacing::None,
            _ => requested,
        }
    }

    /// Run this strategy to completion (or cancellation) on the calling thread.
    ///
    /// Writes `marked`/`cycles` on `state` as it goes and honours its pause and
    /// cancel flags at every checkpoint.
    pub fn run<R: Rng + ?Sized>(self, seq: &Sequence, state: &VisualizationState, pacing: Pacing, rng: &mut R) {
        profiling::scope!("algorithm_run");
        let n = seq.len();
        let pacing = self.effective_pacing(n, pacing);
        let ctx = RunContext { seq, state, delay: pacing.resolve(self, n) };

        match self {
            Algorithm::Bubble => bubble::sort(&ctx),
            Algorithm::Selection => selection::sort(&ctx),
            // benchmark fast path: no animation, so the buffered merge is allowed
            Algorithm::Merge if pacing == Pacing::None => merge::sort_buffered(&ctx),
            Algorithm::Merge => merge::sort_in_place(&ctx),
            Algorithm::Quick => quick::sort(&ctx, rng),
            Algorithm::ShuffleSort => shufflesort::sort(&ctx, rng),
            Algorithm::Insertion => insertion::sort(&ctx),
            Algorithm::QuickSelect => quick::sort_hybrid(&ctx, rng),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl TryFrom<u8> for Algorithm {
    type Error = Error;

    fn try_from(selector: u8) -> Result<Self, Self::Error> {
        Algorithm::ALL
            .get(selector as usize)
            .copied()
            .ok_or_else(|| Error::UnknownAlgorithm(selector.to_string()))
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// accepts a keyword or a numeric selector
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(algo) = Algorithm::ALL.iter().find(|a| a.keyword() == s) {
            return Ok(*algo);
        }
        match s.parse::<u8>() {
            Ok(selector) => Algorithm::try_from(selector),
            Err(_) => Err(Error::UnknownAlgorithm(s.to_owned())),
        }
    }
}

/// How long a strategy sleeps per cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Pacing {
    /// derive the delay from N with the strategy's own formula
    #[default]
    Default,
    /// no delay at all (benchmark replay)
    None,
    Fixed(Duration),
}

impl Pacing {
    pub fn resolve(self, algorithm: Algorithm, n: usize) -> Duration {
        match self {
            Pacing::Default => algorithm.default_delay(n),
            Pacing::None => Duration::ZERO,
            Pacing::Fixed(delay) => delay,
        }
    }
}

/// Borrowed view a strategy works through: the sequence it owns for the
/// duration of the run, the shared state it drives, and its resolved delay.
pub struct RunContext<'a> {
    pub seq: &'a Sequence,
    pub state: &'a VisualizationState,
    pub delay: Duration,
}

impl RunContext<'_> {
    /// pause/cancel checkpoint; true means unwind now
    #[inline]
    pub fn halted(&self) -> bool {
        self.state.checkpoint().is_break()
    }

    #[inline]
    pub fn pace(&self) {
        self.state.pace(self.delay);
    }
}
