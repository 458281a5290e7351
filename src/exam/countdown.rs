//! Countdown driver
//!
//! Tracks whether the exam clock is ticking. The seconds themselves live
//! in the session; this state machine decides when the host keeps a
//! recurring tick scheduled.

use crate::exam::session::{Effect, Session};

/// Countdown lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountdownState {
    /// Not ticking (before mount, or the session left the question screen)
    #[default]
    Idle,
    /// Ticking once per second
    Running,
    /// Reached zero; display holds at 00:00
    Expired,
}

/// Countdown driver state machine
#[derive(Debug, Default)]
pub struct Countdown {
    state: CountdownState,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == CountdownState::Running
    }

    /// Start ticking for a freshly mounted session.
    /// Returns true if a tick should now be scheduled.
    pub fn start(&mut self, session: &Session) -> bool {
        if self.state != CountdownState::Idle {
            return false;
        }
        if session.is_expired() {
            self.state = CountdownState::Expired;
            return false;
        }
        self.state = CountdownState::Running;
        true
    }

    /// Update the driver from a transition's effects.
    /// Returns `Some(true)` when ticking must (re)start and `Some(false)`
    /// when the scheduled tick must be cancelled.
    pub fn on_effect(&mut self, effect: &Effect) -> Option<bool> {
        match effect {
            Effect::StopCountdown if self.state == CountdownState::Running => {
                self.state = CountdownState::Idle;
                Some(false)
            }
            Effect::CountdownExpired if self.state == CountdownState::Running => {
                self.state = CountdownState::Expired;
                Some(false)
            }
            Effect::Restart => {
                self.state = CountdownState::Running;
                Some(true)
            }
            _ => None,
        }
    }
}
