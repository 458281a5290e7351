//! Exam view controller
//!
//! Owns the session and everything that acts on it: the countdown driver,
//! the scheduler for timed events and the speech adapter. User input and
//! scheduled events become actions; the effects of each transition are
//! carried out here.

use crate::app::state::{InputAction, ViewState};
use crate::config::ExamConfig;
use crate::exam::{
    transition, Action, Countdown, Effect, ExamPaper, ScheduledEvent, Scheduler, Session, TaskKind,
    Transition,
};
use crate::speech::Speaker;
use crate::Result;
use crossterm::event::KeyEvent;
use std::time::Duration;
use tokio::sync::mpsc;

/// Delays used by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Countdown period
    pub tick_period: Duration,
    pub submit_delay: Duration,
    pub focus_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_secs(1),
            submit_delay: Duration::from_millis(crate::SUBMIT_DELAY_MS),
            focus_delay: Duration::from_millis(crate::FOCUS_DELAY_MS),
        }
    }
}

impl From<&ExamConfig> for Timing {
    fn from(config: &ExamConfig) -> Self {
        Self {
            tick_period: Duration::from_secs(1),
            submit_delay: config.submit_delay,
            focus_delay: config.focus_delay,
        }
    }
}

/// Controller for one mounted exam view
pub struct ExamController {
    paper: ExamPaper,
    session: Session,
    view: ViewState,
    countdown: Countdown,
    scheduler: Scheduler,
    scheduled_rx: mpsc::UnboundedReceiver<ScheduledEvent>,
    speaker: Speaker,
    timing: Timing,
}

impl ExamController {
    /// Create a controller; nothing is scheduled until [`mount`](Self::mount).
    /// Must be called inside a tokio runtime.
    pub fn new(paper: ExamPaper, speaker: Speaker, timing: Timing) -> Self {
        let (scheduler, scheduled_rx) = Scheduler::new(timing.tick_period);
        Self {
            session: Session::new(paper.duration_secs),
            paper,
            view: ViewState::new(),
            countdown: Countdown::new(),
            scheduler,
            scheduled_rx,
            speaker,
            timing,
        }
    }

    /// Build a controller from configuration
    pub fn from_config(config: &ExamConfig) -> Result<Self> {
        let paper = config.exam_paper()?;
        let speaker = Speaker::from_config(&config.speech);
        Ok(Self::new(paper, speaker, Timing::from(config)))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn paper(&self) -> &ExamPaper {
        &self.paper
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn should_quit(&self) -> bool {
        self.view.should_quit()
    }

    /// Start the countdown for the freshly created session
    pub fn mount(&mut self) {
        if self.countdown.start(&self.session) {
            self.scheduler.start_ticking();
        }
        log::debug!(
            "exam view mounted: {} questions, {}s",
            self.paper.total(),
            self.session.remaining_seconds
        );
    }

    /// Cancel everything pending and silence speech
    pub fn unmount(&mut self) {
        self.scheduler.cancel_all();
        self.speaker.cancel();
        log::debug!("exam view unmounted");
    }

    /// Translate a key press and apply it
    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.view.key_to_action(key, self.session.screen) {
            InputAction::Exam(action) => self.dispatch(action),
            InputAction::Quit => self.view.quit(),
            InputAction::None => {}
        }
    }

    /// Apply an action to the session and carry out its effects
    pub fn dispatch(&mut self, action: Action) {
        let Transition { session, effects } =
            transition(&self.session, action.clone(), &self.paper);
        if session != self.session || !effects.is_empty() {
            log::debug!("{:?}: {:?} -> {:?}", action, self.session.screen, session.screen);
        }
        self.session = session;

        for effect in effects {
            self.apply_effect(effect);
        }
    }

    /// Apply a scheduled event unless it is stale
    pub fn handle_scheduled(&mut self, event: ScheduledEvent) {
        if !self.scheduler.accept(&event) {
            return;
        }

        match event.kind {
            TaskKind::Tick => self.dispatch(Action::Tick),
            TaskKind::SubmitComplete => self.dispatch(Action::SubmissionComplete),
            TaskKind::Focus => {
                if self.session.is_answer_editable() {
                    self.view.input_focused = true;
                }
            }
        }
    }

    /// Apply every scheduled event that has already arrived
    pub fn drain_scheduled(&mut self) {
        while let Ok(event) = self.scheduled_rx.try_recv() {
            self.handle_scheduled(event);
        }
    }

    /// Wait for the next scheduled event without applying it
    pub async fn next_scheduled(&mut self) -> Option<ScheduledEvent> {
        self.scheduled_rx.recv().await
    }

    fn apply_effect(&mut self, effect: Effect) {
        match &effect {
            Effect::Speak(text) => self.speaker.speak(text),
            Effect::RequestFocus => {
                self.scheduler
                    .schedule_once(TaskKind::Focus, self.timing.focus_delay);
            }
            Effect::ReleaseFocus => {
                self.scheduler.cancel(TaskKind::Focus);
                self.view.input_focused = false;
            }
            Effect::ScheduleSubmission => {
                self.scheduler
                    .schedule_once(TaskKind::SubmitComplete, self.timing.submit_delay);
            }
            Effect::Restart => {
                self.scheduler.cancel_all();
                self.view.input_focused = false;
            }
            Effect::StopCountdown | Effect::CountdownExpired => {}
        }

        match self.countdown.on_effect(&effect) {
            Some(true) => self.scheduler.start_ticking(),
            Some(false) => self.scheduler.cancel(TaskKind::Tick),
            None => {}
        }
    }
}

impl Drop for ExamController {
    fn drop(&mut self) {
        self.unmount();
    }
}
