//! Cancellable timed tasks
//!
//! Spawns tokio tasks for the countdown tick, the submission delay and the
//! deferred focus request. Every event carries the generation of the task
//! that produced it; cancelling a task bumps the generation so events that
//! were already queued are rejected by [`Scheduler::accept`].

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};

/// Kinds of scheduled work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Recurring countdown tick
    Tick,
    /// One-shot end of the submission delay
    SubmitComplete,
    /// One-shot deferred focus of the answer field
    Focus,
}

impl TaskKind {
    const COUNT: usize = 3;

    fn slot(self) -> usize {
        match self {
            TaskKind::Tick => 0,
            TaskKind::SubmitComplete => 1,
            TaskKind::Focus => 2,
        }
    }
}

/// Event delivered when a scheduled task fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledEvent {
    pub kind: TaskKind,
    pub generation: u64,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

/// Owner of all pending timed tasks for one view
#[derive(Debug)]
pub struct Scheduler {
    tx: mpsc::UnboundedSender<ScheduledEvent>,
    slots: [Slot; TaskKind::COUNT],
    tick_period: Duration,
}

impl Scheduler {
    /// Create a scheduler and the receiver its events arrive on
    pub fn new(tick_period: Duration) -> (Self, mpsc::UnboundedReceiver<ScheduledEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            tx,
            slots: Default::default(),
            tick_period,
        };
        (scheduler, rx)
    }

    /// Start the recurring tick, replacing any running one.
    /// The first tick fires one period from now.
    pub fn start_ticking(&mut self) {
        let generation = self.renew(TaskKind::Tick);
        let tx = self.tx.clone();
        let period = self.tick_period;

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let event = ScheduledEvent {
                    kind: TaskKind::Tick,
                    generation,
                };
                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        self.slots[TaskKind::Tick.slot()].handle = Some(handle);
    }

    /// Fire a one-shot event after `delay`, replacing any pending one of the same kind
    pub fn schedule_once(&mut self, kind: TaskKind, delay: Duration) {
        let generation = self.renew(kind);
        let tx = self.tx.clone();

        let handle = tokio::spawn(async move {
            sleep(delay).await;
            let _ = tx.send(ScheduledEvent { kind, generation });
        });

        self.slots[kind.slot()].handle = Some(handle);
    }

    /// Cancel a task; events it already queued become stale
    pub fn cancel(&mut self, kind: TaskKind) {
        self.renew(kind);
    }

    /// Cancel every pending task
    pub fn cancel_all(&mut self) {
        for kind in [TaskKind::Tick, TaskKind::SubmitComplete, TaskKind::Focus] {
            self.cancel(kind);
        }
    }

    /// Whether a task of this kind is scheduled and not finished
    pub fn is_pending(&self, kind: TaskKind) -> bool {
        self.slots[kind.slot()]
            .handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Check an event against the current generation; stale events are dropped.
    /// Accepting a one-shot event clears its slot.
    pub fn accept(&mut self, event: &ScheduledEvent) -> bool {
        let slot = &mut self.slots[event.kind.slot()];
        if slot.generation != event.generation {
            log::debug!("dropping stale {:?} event (gen {})", event.kind, event.generation);
            return false;
        }
        if event.kind != TaskKind::Tick {
            slot.handle = None;
        }
        true
    }

    fn renew(&mut self, kind: TaskKind) -> u64 {
        let slot = &mut self.slots[kind.slot()];
        if let Some(handle) = slot.handle.take() {
            handle.abort();
        }
        slot.generation += 1;
        slot.generation
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
