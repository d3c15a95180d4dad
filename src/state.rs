use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, AtomicIsize, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// how long a paused task sleeps between polls of the pause flag
pub const DEFAULT_PAUSE_POLL: Duration = Duration::from_millis(2);

const NO_MARK: isize = -1;

/// One-shot cancellation flag shared by every task of a process.
/// Once set it stays set; a restart of the controller cycle keeps the same token.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_canceled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Fields the render loop reads while a background task drives them.
///
/// Every field is a relaxed atomic. There is no happens-before between a task's
/// write and the next frame's read; a one-frame-stale value only costs a
/// dropped or repeated frame.
#[derive(Debug)]
pub struct VisualizationState {
    marked: AtomicIsize,
    cycles: AtomicU64,
    paused: AtomicBool,
    phase_done: AtomicBool,
    scan_done: AtomicBool,
    cancel: CancelToken,
    pause_poll: Duration,
}

impl VisualizationState {
    pub fn new(cancel: CancelToken) -> Self {
        Self {
            marked: AtomicIsize::new(NO_MARK),
            cycles: AtomicU64::new(0),
            paused: AtomicBool::new(false),
            phase_done: AtomicBool::new(false),
            scan_done: AtomicBool::new(false),
            cancel,
            pause_poll: DEFAULT_PAUSE_POLL,
        }
    }

    pub fn with_pause_poll(mut self, poll: Duration) -> Self {
        self.pause_poll = poll.max(Duration::from_millis(1));
        self
    }

    // marked index

    #[inline]
    pub fn mark(&self, index: usize) {
        self.marked.store(index as isize, Ordering::Relaxed);
    }

    #[inline]
    pub fn clear_mark(&self) {
        self.marked.store(NO_MARK, Ordering::Relaxed);
    }

    /// currently highlighted index, `None` when nothing is marked
    #[inline]
    pub fn marked(&self) -> Option<usize> {
        usize::try_from(self.marked.load(Ordering::Relaxed)).ok()
    }

    // cycle counter

    #[inline]
    pub fn bump_cycle(&self) {
        self.cycles.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn cycles(&self) -> u64 {
        self.cycles.load(Ordering::Relaxed)
    }

    /// replace the counter (used once, after the benchmark replay finishes)
    pub fn set_cycles(&self, cycles: u64) {
        self.cycles.store(cycles, Ordering::Relaxed);
    }

    // pause / cancel

    /// flip the pause flag, returning the new value
    pub fn toggle_pause(&self) -> bool {
        !self.paused.fetch_xor(true, Ordering::Relaxed)
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn is_canceled(&self) -> bool {
        self.cancel.is_canceled()
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    // completion flags

    pub fn set_phase_done(&self, done: bool) {
        self.phase_done.store(done, Ordering::Relaxed);
    }

    pub fn phase_done(&self) -> bool {
        self.phase_done.load(Ordering::Relaxed)
    }

    pub fn set_scan_done(&self, done: bool) {
        self.scan_done.store(done, Ordering::Relaxed);
    }

    pub fn scan_done(&self) -> bool {
        self.scan_done.load(Ordering::Relaxed)
    }

    /// Pause and cancellation checkpoint.
    ///
    /// Blocks in `pause_poll` sleeps while paused and not canceled, then
    /// reports whether the caller must unwind.
    pub fn checkpoint(&self) -> ControlFlow<()> {
        while self.is_paused() && !self.is_canceled() {
            thread::sleep(self.pause_poll);
        }
        if self.is_canceled() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    /// apply one cycle's worth of pacing
    #[inline]
    pub fn pace(&self, delay: Duration) {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_mark_roundtrip() {
        let state = VisualizationState::new(CancelToken::new());
        assert_eq!(state.marked(), None);
        state.mark(4);
        assert_eq!(state.marked(), Some(4));
        state.clear_mark();
        assert_eq!(state.marked(), None);
    }

    #[test]
    fn test_toggle_pause_returns_new_value() {
        let state = VisualizationState::new(CancelToken::new());
        assert!(state.toggle_pause());
        assert!(state.is_paused());
        assert!(!state.toggle_pause());
        assert!(!state.is_paused());
    }

    #[test]
    fn test_checkpoint_breaks_once_canceled() {
        let token = CancelToken::new();
        let state = VisualizationState::new(token.clone());
        assert!(state.checkpoint().is_continue());
        token.cancel();
        assert!(state.checkpoint().is_break());
    }

    #[test]
    fn test_paused_checkpoint_released_by_cancel() {
        let token = CancelToken::new();
        let state = Arc::new(VisualizationState::new(token.clone()));
        state.set_paused(true);

        let waiter = {
            let state = Arc::clone(&state);
            thread::spawn(move || state.checkpoint())
        };
        thread::sleep(Duration::from_millis(20));
        assert!(!waiter.is_finished());

        let started = Instant::now();
        token.cancel();
        let flow = waiter.join().unwrap();
        assert!(flow.is_break());
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_paused_checkpoint_released_by_resume() {
        let state = Arc::new(VisualizationState::new(CancelToken::new()));
        state.set_paused(true);
        let waiter = {
            let state = Arc::clone(&state);
            thread::spawn(move || state.checkpoint())
        };
        thread::sleep(Duration::from_millis(10));
        state.set_paused(false);
        assert!(waiter.join().unwrap().is_continue());
    }

    #[test]
    fn test_cancel_is_shared_between_states() {
        let token = CancelToken::new();
        let live = VisualizationState::new(token.clone());
        let replay = VisualizationState::new(token.clone());
        live.cancel_token().cancel();
        assert!(replay.is_canceled());
    }
}
