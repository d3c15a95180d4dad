use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::engine::{Algorithm, Pacing};
use crate::engine_thread::TaskHandle;
use crate::error::Result;
use crate::sequence::Sequence;
use crate::state::{CancelToken, VisualizationState};
use crate::tasks::{BenchmarkReplay, BenchmarkReport, ConfirmationScanner, ShuffleEngine};

/// Everything the controller needs for one process run.
#[derive(Clone, Debug)]
pub struct ControllerConfig {
    pub algorithm: Algorithm,
    pub amount: usize,
    /// master seed; each cycle draws its shuffle and sort seeds from it
    pub seed: u64,
    pub pacing: Pacing,
    pub shuffle_secs: f64,
    pub scan_secs: f64,
    pub cooldown: Duration,
    pub pause_poll: Duration,
    pub worker_stack_bytes: usize,
}

/// Phases of one visualizer cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// ascending bars, waiting for the first keypress
    AwaitStart,
    Shuffling,
    /// shuffled, waiting for the keypress that starts sorting
    Shuffled,
    Sorting,
    /// confirmation sweep, then the benchmark replay, on one worker
    Confirming,
    Cooldown { until: Instant },
    Stopped,
}

/// the single background task alive in a phase
enum Task {
    Shuffle(TaskHandle<()>),
    Sort(TaskHandle<()>),
    Confirm(TaskHandle<Option<BenchmarkReport>>),
}

impl Task {
    fn is_finished(&self) -> bool {
        match self {
            Task::Shuffle(h) => h.is_finished(),
            Task::Sort(h) => h.is_finished(),
            Task::Confirm(h) => h.is_finished(),
        }
    }

    fn join(self) {
        match self {
            Task::Shuffle(h) => h.join(),
            Task::Sort(h) => h.join(),
            Task::Confirm(h) => {
                h.join();
            }
        }
    }
}

/// Phase state machine: owns the sequence and visualization state, launches at
/// most one background task at a time and joins it before launching the next.
///
/// Independent of the GUI; the app feeds it keypresses, ticks and quit.
pub struct Controller {
    config: ControllerConfig,
    rng: Pcg32,
    cancel: CancelToken,
    sequence: Arc<Sequence>,
    state: Arc<VisualizationState>,
    /// permutation right after the shuffle, kept for the benchmark replay
    original: Option<Arc<[u32]>>,
    sort_seed: u64,
    phase: Phase,
    task: Option<Task>,
    report: Option<BenchmarkReport>,
    sort_started: Option<Instant>,
}

impl Controller {
    pub fn new(config: ControllerConfig) -> Self {
        let cancel = CancelToken::new();
        let rng = Pcg32::seed_from_u64(config.seed);
        let sequence = Arc::new(Sequence::ascending(config.amount));
        let state = Arc::new(VisualizationState::new(cancel.clone()).with_pause_poll(config.pause_poll));
        log::info!(
            "{} on {} elements (seed {})",
            config.algorithm,
            config.amount,
            config.seed
        );
        Self {
            config,
            rng,
            cancel,
            sequence,
            state,
            original: None,
            sort_seed: 0,
            phase: Phase::AwaitStart,
            task: None,
            report: None,
            sort_started: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn algorithm(&self) -> Algorithm {
        self.config.algorithm
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn state(&self) -> &VisualizationState {
        &self.state
    }

    pub fn report(&self) -> Option<&BenchmarkReport> {
        self.report.as_ref()
    }

    /// snapshot taken after the shuffle, if this cycle got that far
    pub fn original_order(&self) -> Option<&[u32]> {
        self.original.as_deref()
    }

    /// wall time since the animated sort started
    pub fn sort_elapsed(&self, now: Instant) -> Option<Duration> {
        self.sort_started.map(|t| now.saturating_duration_since(t))
    }

    /// true while bars should be colored by confirmation rather than highlight
    pub fn done_mode(&self) -> bool {
        matches!(self.phase, Phase::Confirming | Phase::Cooldown { .. })
    }

    pub fn has_live_task(&self) -> bool {
        self.task.is_some()
    }

    /// Keypress edge: advances the start phases, toggles pause while a task runs.
    pub fn on_key(&mut self) -> Result<()> {
        match self.phase {
            Phase::AwaitStart => self.start_shuffle(),
            Phase::Shuffled => self.start_sort(),
            Phase::Shuffling | Phase::Sorting | Phase::Confirming => {
                let paused = self.state.toggle_pause();
                log::info!("{}", if paused { "paused" } else { "resumed" });
                Ok(())
            }
            Phase::Cooldown { .. } | Phase::Stopped => Ok(()),
        }
    }

    /// Advance time-driven transitions. Called once per frame.
    pub fn tick(&mut self, now: Instant) -> Result<()> {
        profiling::scope!("controller_tick");
        match self.phase {
            Phase::Shuffling if self.task_finished() => {
                self.join_task();
                let snapshot: Arc<[u32]> = self.sequence.values().into();
                self.original = Some(snapshot);
                self.state.clear_mark();
                self.phase = Phase::Shuffled;
                log::info!("shuffled; press any key to sort");
            }
            Phase::Sorting if self.task_finished() && self.sequence.is_ascending() => {
                self.join_task();
                self.state.set_phase_done(true);
                if let Some(elapsed) = self.sort_elapsed(now) {
                    log::info!(
                        "{} finished after {} cycles ({:.2} s animated)",
                        self.config.algorithm,
                        self.state.cycles(),
                        elapsed.as_secs_f64()
                    );
                }
                self.start_confirm()?;
            }
            Phase::Confirming if self.task_finished() => {
                if let Some(Task::Confirm(handle)) = self.task.take() {
                    if let Some(report) = handle.join() {
                        log::info!(
                            "benchmark: {} cycles in {:.2} ms (animated run counted {})",
                            report.cycles,
                            report.elapsed_ms(),
                            self.state.cycles()
                        );
                        self.state.set_cycles(report.cycles);
                        self.report = Some(report);
                    }
                }
                self.phase = Phase::Cooldown { until: now + self.config.cooldown };
            }
            Phase::Cooldown { until } if now >= until => self.restart(),
            _ => {}
        }
        Ok(())
    }

    /// Quit request: raise the one-shot cancel flag and wait for the live task.
    pub fn quit(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.join();
        }
        self.phase = Phase::Stopped;
        log::info!("stopped");
    }

    fn task_finished(&self) -> bool {
        self.task.as_ref().is_some_and(Task::is_finished)
    }

    fn join_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.join();
        }
    }

    fn start_shuffle(&mut self) -> Result<()> {
        debug_assert!(self.task.is_none());
        let seq = Arc::clone(&self.sequence);
        let state = Arc::clone(&self.state);
        let engine = ShuffleEngine::for_amount(seq.len(), self.config.shuffle_secs);
        let mut rng = Pcg32::seed_from_u64(self.rng.random());

        let handle = TaskHandle::spawn("shuffle-worker", self.config.worker_stack_bytes, move || {
            engine.run(&seq, &state, &mut rng);
        })?;
        self.task = Some(Task::Shuffle(handle));
        self.phase = Phase::Shuffling;
        log::info!("shuffling");
        Ok(())
    }

    fn start_sort(&mut self) -> Result<()> {
        debug_assert!(self.task.is_none());
        self.sort_seed = self.rng.random();
        let seq = Arc::clone(&self.sequence);
        let state = Arc::clone(&self.state);
        let algorithm = self.config.algorithm;
        let pacing = self.config.pacing;
        let mut rng = Pcg32::seed_from_u64(self.sort_seed);

        let handle = TaskHandle::spawn("sort-worker", self.config.worker_stack_bytes, move || {
            algorithm.run(&seq, &state, pacing, &mut rng);
        })?;
        self.task = Some(Task::Sort(handle));
        self.phase = Phase::Sorting;
        self.sort_started = Some(Instant::now());
        log::info!("sorting with {algorithm}");
        Ok(())
    }

    /// confirmation sweep chained with the benchmark replay on one worker
    fn start_confirm(&mut self) -> Result<()> {
        debug_assert!(self.task.is_none());
        let state = Arc::clone(&self.state);
        let n = self.sequence.len();
        let scanner = ConfirmationScanner::for_amount(n, self.config.scan_secs);
        let replay = self.original.clone().map(|original| BenchmarkReplay {
            algorithm: self.config.algorithm,
            original,
            seed: self.sort_seed,
        });

        let handle = TaskHandle::spawn("confirm-worker", self.config.worker_stack_bytes, move || {
            scanner.run(n, &state);
            if state.is_canceled() {
                return None;
            }
            replay.map(|r| r.run(state.cancel_token()))
        })?;
        self.task = Some(Task::Confirm(handle));
        self.phase = Phase::Confirming;
        log::info!("checking order");
        Ok(())
    }

    /// fresh ascending sequence and counters; same amount, algorithm and cancel token
    fn restart(&mut self) {
        self.join_task();
        self.sequence = Arc::new(Sequence::ascending(self.config.amount));
        self.state = Arc::new(VisualizationState::new(self.cancel.clone()).with_pause_poll(self.config.pause_poll));
        self.original = None;
        self.report = None;
        self.sort_started = None;
        self.phase = Phase::AwaitStart;
        log::info!("restarting");
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        if self.task.is_some() {
            self.quit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn config(algorithm: Algorithm, amount: usize) -> ControllerConfig {
        ControllerConfig {
            algorithm,
            amount,
            seed: 42,
            pacing: Pacing::None,
            shuffle_secs: 0.0,
            scan_secs: 0.0,
            cooldown: Duration::ZERO,
            pause_poll: Duration::from_millis(1),
            worker_stack_bytes: 8 << 20,
        }
    }

    /// tick until `pred` holds or give up after a few seconds
    fn tick_until(ctrl: &mut Controller, pred: impl Fn(&Controller) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while !pred(ctrl) {
            assert!(Instant::now() < deadline, "stuck in {:?}", ctrl.phase());
            ctrl.tick(Instant::now()).unwrap();
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_full_cycle() {
        let mut ctrl = Controller::new(config(Algorithm::Insertion, 40));
        assert_eq!(ctrl.phase(), Phase::AwaitStart);
        assert!(ctrl.sequence().is_ascending());

        ctrl.on_key().unwrap();
        assert_eq!(ctrl.phase(), Phase::Shuffling);
        tick_until(&mut ctrl, |c| c.phase() == Phase::Shuffled);
        assert!(!ctrl.has_live_task());
        let original = ctrl.original_order().unwrap().to_vec();
        assert_eq!(original, ctrl.sequence().values());

        ctrl.on_key().unwrap();
        assert_eq!(ctrl.phase(), Phase::Sorting);
        tick_until(&mut ctrl, |c| matches!(c.phase(), Phase::Cooldown { .. } | Phase::AwaitStart));

        // cooldown of zero restarts on the next tick
        tick_until(&mut ctrl, |c| c.phase() == Phase::AwaitStart);
        assert!(ctrl.sequence().is_ascending());
        assert_eq!(ctrl.state().cycles(), 0);
        assert!(ctrl.original_order().is_none());
    }

    #[test]
    fn test_benchmark_overwrites_cycles() {
        let mut cfg = config(Algorithm::Quick, 60);
        cfg.cooldown = Duration::from_secs(60);
        let mut ctrl = Controller::new(cfg);
        ctrl.on_key().unwrap();
        tick_until(&mut ctrl, |c| c.phase() == Phase::Shuffled);
        ctrl.on_key().unwrap();
        tick_until(&mut ctrl, |c| matches!(c.phase(), Phase::Cooldown { .. }));

        let report = *ctrl.report().unwrap();
        assert!(report.sorted);
        assert_eq!(ctrl.state().cycles(), report.cycles);
        assert!(ctrl.done_mode());
        assert!(ctrl.state().scan_done());
        assert_eq!(ctrl.state().marked(), Some(59));

        // keypresses during cooldown are ignored
        ctrl.on_key().unwrap();
        assert!(matches!(ctrl.phase(), Phase::Cooldown { .. }));
    }

    #[test]
    fn test_key_toggles_pause_while_sorting() {
        let mut cfg = config(Algorithm::Bubble, 30);
        cfg.pacing = Pacing::Fixed(Duration::from_millis(20));
        let mut ctrl = Controller::new(cfg);
        ctrl.on_key().unwrap();
        tick_until(&mut ctrl, |c| c.phase() == Phase::Shuffled);
        ctrl.on_key().unwrap();

        ctrl.on_key().unwrap();
        assert!(ctrl.state().is_paused());
        thread::sleep(Duration::from_millis(50));
        let frozen = ctrl.state().cycles();
        thread::sleep(Duration::from_millis(100));
        // at most the pass already past its checkpoint can finish
        assert!(ctrl.state().cycles() <= frozen + 1);
        assert_eq!(ctrl.phase(), Phase::Sorting);

        ctrl.on_key().unwrap();
        assert!(!ctrl.state().is_paused());
        ctrl.quit();
    }

    #[test]
    fn test_quit_cancels_and_joins() {
        let mut cfg = config(Algorithm::Merge, 400);
        cfg.pacing = Pacing::Fixed(Duration::from_millis(5));
        let mut ctrl = Controller::new(cfg);
        ctrl.on_key().unwrap();
        tick_until(&mut ctrl, |c| c.phase() == Phase::Shuffled);
        ctrl.on_key().unwrap();
        thread::sleep(Duration::from_millis(30));

        let started = Instant::now();
        ctrl.quit();
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(ctrl.phase(), Phase::Stopped);
        assert!(!ctrl.has_live_task());
        assert!(ctrl.state().is_canceled());

        // the sequence is left as it was, but still a permutation
        let mut values = ctrl.sequence().values();
        values.sort_unstable();
        assert_eq!(values, (1..=400).collect::<Vec<_>>());
    }

    #[test]
    fn test_quit_while_paused_returns() {
        let mut cfg = config(Algorithm::Selection, 50);
        cfg.pacing = Pacing::Fixed(Duration::from_millis(10));
        let mut ctrl = Controller::new(cfg);
        ctrl.on_key().unwrap();
        tick_until(&mut ctrl, |c| c.phase() == Phase::Shuffled);
        ctrl.on_key().unwrap();
        ctrl.on_key().unwrap();
        assert!(ctrl.state().is_paused());
        ctrl.quit();
        assert_eq!(ctrl.phase(), Phase::Stopped);
    }

    #[test]
    fn test_same_seed_same_shuffle() {
        let mut a = Controller::new(config(Algorithm::Bubble, 25));
        let mut b = Controller::new(config(Algorithm::Bubble, 25));
        for ctrl in [&mut a, &mut b] {
            ctrl.on_key().unwrap();
            tick_until(ctrl, |c| c.phase() == Phase::Shuffled);
        }
        assert_eq!(a.original_order(), b.original_order());
    }
}
