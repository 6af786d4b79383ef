//! Per-search bookkeeping and the cooperative stop protocol.
//!
//! The search thread polls [`SearchInfo::stopped`] at every node; an
//! external controller requests termination by flipping the shared stop
//! flag (or the search runs out of its allotted time). On observing a stop
//! the recursion unwinds with a dummy score and the driver keeps the result
//! of the last completed iteration.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::search::MAX_PLY;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EngineState {
    Idle,
    Searching,
    Stopped,
}

pub struct SearchInfo {
    pub start: Instant,
    pub end: Instant,
    pub time_set: bool,
    /// Depth limit for iterative deepening.
    pub depth: i32,
    pub state: EngineState,
    stop: Arc<AtomicBool>,

    // Counters, written by the search thread only.
    pub nodes: u64,
    pub seldepth: usize,
    pub fail_high: u64,
    pub fail_high_first: u64,
}

impl SearchInfo {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            end: now,
            time_set: false,
            depth: MAX_PLY as i32 - 1,
            state: EngineState::Idle,
            stop: Arc::new(AtomicBool::new(false)),
            nodes: 0,
            seldepth: 0,
            fail_high: 0,
            fail_high_first: 0,
        }
    }

    pub fn with_depth(depth: i32) -> Self {
        let mut info = Self::new();
        info.depth = depth.clamp(1, MAX_PLY as i32 - 1);
        info
    }

    pub fn with_movetime(movetime: Duration) -> Self {
        let mut info = Self::new();
        info.allocate_time(movetime);
        info
    }

    /// Starts the clock for a timed search.
    pub fn allocate_time(&mut self, movetime: Duration) {
        self.start = Instant::now();
        self.end = self.start + movetime;
        self.time_set = true;
    }

    /// Resets the counters for a fresh search; limits are untouched.
    pub fn clear(&mut self) {
        self.nodes = 0;
        self.seldepth = 0;
        self.fail_high = 0;
        self.fail_high_first = 0;
    }

    /// True once the search should unwind: externally stopped, out of time,
    /// or no longer in the searching state.
    pub fn stopped(&self) -> bool {
        self.state != EngineState::Searching
            || (self.time_set && Instant::now() >= self.end)
            || self.stop.load(Ordering::Relaxed)
    }

    /// Shared flag a controller thread can set to end the search.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        self.stop.clone()
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Fraction of fail-highs caused by the first move searched; a move
    /// ordering quality diagnostic.
    pub fn ordering_quality(&self) -> f64 {
        if self.fail_high == 0 {
            return 0.0;
        }
        self.fail_high_first as f64 / self.fail_high as f64
    }
}

impl Default for SearchInfo {
    fn default() -> Self {
        Self::new()
    }
}
