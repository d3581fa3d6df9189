use super::Board;
use std::{
    fmt,
    time::{Duration, Instant},
};

/// Hook fired after every automatic advance
pub type TickHook = Box<dyn FnMut(&Board)>;

/// Default delay between automatic advances
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Idle,
    /// Playing, with the next advance pending at `next_due`
    Running { next_due: Instant },
}

/// Scheduling state for continuous play
///
/// The player never advances anything itself, it only tracks whether an
/// advance is pending and when. [`Board::run_pending`] is the pump.
pub(super) struct Player {
    state: PlayState,
    interval: Duration,
    on_tick: Option<TickHook>,
}

impl Player {
    pub fn new() -> Self {
        Self {
            state: PlayState::Idle,
            interval: DEFAULT_INTERVAL,
            on_tick: None,
        }
    }

    #[inline]
    pub fn state(&self) -> PlayState {
        self.state
    }
    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self.state, PlayState::Running { .. })
    }
    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Idle -> Running with an advance due at `now`
    ///
    /// Returns false (and drops `on_tick`) if already running.
    pub fn start(&mut self, now: Instant, on_tick: Option<TickHook>) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = PlayState::Running { next_due: now };
        self.on_tick = on_tick;
        true
    }

    /// Running -> Idle, cancelling the pending advance
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = PlayState::Idle;
        self.on_tick = None;
        true
    }

    pub fn is_due(&self, now: Instant) -> bool {
        match self.state {
            PlayState::Running { next_due } => now >= next_due,
            PlayState::Idle => false,
        }
    }

    /// Schedules the next advance one interval after `now`, if still running
    pub fn reschedule(&mut self, now: Instant) {
        if let PlayState::Running { ref mut next_due } = self.state {
            *next_due = now + self.interval;
        }
    }

    pub fn take_hook(&mut self) -> Option<TickHook> {
        self.on_tick.take()
    }
    pub fn restore_hook(&mut self, hook: Option<TickHook>) {
        if self.is_running() {
            self.on_tick = hook;
        }
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("state", &self.state)
            .field("interval", &self.interval)
            .field("on_tick", &self.on_tick.is_some())
            .finish()
    }
}
