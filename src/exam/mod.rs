//! Exam core
//!
//! Session state and its transition function, the countdown driver and
//! the cancellable scheduler that feeds timed events back into the session.

pub mod countdown;
pub mod questions;
pub mod scheduler;
pub mod session;

pub use countdown::{Countdown, CountdownState};
pub use questions::{ExamPaper, QuestionSet, BUILTIN_QUESTIONS};
pub use scheduler::{ScheduledEvent, Scheduler, TaskKind};
pub use session::{transition, Action, Control, Effect, Screen, Session, Transition};
