//! Session state and transition function
//!
//! A `Session` is the complete state of one exam attempt. Every user
//! action and timer event goes through [`transition`], which returns the
//! next session plus the side effects the host has to carry out (speech,
//! focus, scheduling). Disabled actions return the session unchanged.

use crate::exam::questions::ExamPaper;

/// Prompt spoken when dictation starts
pub const DICTATION_PROMPT: &str = "Dictation mode started. Speak your answer.";
/// Message spoken when dictation is stopped
pub const ANSWER_SAVED: &str = "Answer saved.";

/// Which screen layout is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Question card, answer field and controls
    #[default]
    Question,
    /// Submission in progress
    Loading,
    /// Submission confirmation
    Finish,
}

/// The five numbered IVR controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Answer,
    ReadAgain,
    Next,
    Previous,
    Stop,
}

impl Control {
    /// All controls in display order
    pub const ALL: [Control; 5] = [
        Control::Answer,
        Control::ReadAgain,
        Control::Next,
        Control::Previous,
        Control::Stop,
    ];

    /// Button number shown to the user (1-based)
    pub fn number(self) -> u8 {
        match self {
            Control::Answer => 1,
            Control::ReadAgain => 2,
            Control::Next => 3,
            Control::Previous => 4,
            Control::Stop => 5,
        }
    }

    /// Control bound to a button number
    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.number() == number)
    }

    /// Button caption
    pub fn label(self) -> &'static str {
        match self {
            Control::Answer => "Answer",
            Control::ReadAgain => "Read Again",
            Control::Next => "Next",
            Control::Previous => "Previous",
            Control::Stop => "Stop Answering",
        }
    }
}

/// Inputs to the session transition function
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// One of the numbered controls was pressed
    Press(Control),
    /// A character was typed into the answer field
    Type(char),
    /// The last character of the answer was erased
    Erase,
    /// Submit the exam (last question only)
    Submit,
    /// The submission delay elapsed
    SubmissionComplete,
    /// Finish button on the confirmation screen
    Finish,
    /// One second of exam time elapsed
    Tick,
}

/// Side effects requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Cancel any current utterance and speak this text
    Speak(String),
    /// Focus the answer field shortly
    RequestFocus,
    /// Drop answer field focus, cancelling any pending focus request
    ReleaseFocus,
    /// Stop the countdown; the session left the question screen
    StopCountdown,
    /// Countdown reached zero
    CountdownExpired,
    /// Complete the submission after the fixed delay
    ScheduleSubmission,
    /// Session was reset: cancel everything pending and restart the countdown
    Restart,
}

/// Complete state of one exam attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub screen: Screen,
    /// 1-based index into the question set
    pub question_index: usize,
    pub answer_text: String,
    pub remaining_seconds: u32,
    /// Last control pressed, for highlighting only
    pub active_control: Option<Control>,
    pub dictating: bool,
}

impl Session {
    /// Fresh session with the given exam duration
    pub fn new(duration_secs: u32) -> Self {
        Self {
            screen: Screen::Question,
            question_index: 1,
            answer_text: String::new(),
            remaining_seconds: duration_secs,
            active_control: None,
            dictating: false,
        }
    }

    /// Whether a control is currently pressable
    pub fn is_enabled(&self, control: Control, total: usize) -> bool {
        if self.screen != Screen::Question {
            return false;
        }
        match control {
            Control::Answer | Control::ReadAgain => true,
            Control::Next => self.question_index < total,
            Control::Previous => self.question_index > 1,
            Control::Stop => self.dictating,
        }
    }

    /// Submit is offered only on the last question
    pub fn can_submit(&self, total: usize) -> bool {
        self.screen == Screen::Question && self.question_index == total
    }

    /// The answer field accepts edits only while dictating
    pub fn is_answer_editable(&self) -> bool {
        self.screen == Screen::Question && self.dictating
    }

    /// Whether the countdown has run out
    pub fn is_expired(&self) -> bool {
        self.remaining_seconds == 0
    }
}

/// Result of applying one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub session: Session,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn unchanged(session: &Session) -> Self {
        Self {
            session: session.clone(),
            effects: Vec::new(),
        }
    }
}

/// Apply an action to a session. Total: never fails, disabled actions are no-ops.
pub fn transition(session: &Session, action: Action, paper: &ExamPaper) -> Transition {
    let total = paper.total();

    match action {
        Action::Press(control) => {
            if !session.is_enabled(control, total) {
                return Transition::unchanged(session);
            }
            press(session, control, paper)
        }
        Action::Type(c) => {
            if !session.is_answer_editable() {
                return Transition::unchanged(session);
            }
            let mut next = session.clone();
            next.answer_text.push(c);
            Transition {
                session: next,
                effects: Vec::new(),
            }
        }
        Action::Erase => {
            if !session.is_answer_editable() {
                return Transition::unchanged(session);
            }
            let mut next = session.clone();
            next.answer_text.pop();
            Transition {
                session: next,
                effects: Vec::new(),
            }
        }
        Action::Submit => {
            if !session.can_submit(total) {
                return Transition::unchanged(session);
            }
            let mut next = session.clone();
            next.screen = Screen::Loading;
            next.dictating = false;
            Transition {
                session: next,
                effects: vec![
                    Effect::ReleaseFocus,
                    Effect::StopCountdown,
                    Effect::ScheduleSubmission,
                ],
            }
        }
        Action::SubmissionComplete => {
            if session.screen != Screen::Loading {
                return Transition::unchanged(session);
            }
            let mut next = session.clone();
            next.screen = Screen::Finish;
            Transition {
                session: next,
                effects: Vec::new(),
            }
        }
        Action::Finish => {
            if session.screen != Screen::Finish {
                return Transition::unchanged(session);
            }
            Transition {
                session: Session::new(paper.duration_secs),
                effects: vec![Effect::Restart],
            }
        }
        Action::Tick => {
            if session.screen != Screen::Question || session.remaining_seconds == 0 {
                return Transition::unchanged(session);
            }
            let mut next = session.clone();
            next.remaining_seconds -= 1;
            let effects = if next.remaining_seconds == 0 {
                vec![Effect::CountdownExpired]
            } else {
                Vec::new()
            };
            Transition {
                session: next,
                effects,
            }
        }
    }
}

fn press(session: &Session, control: Control, paper: &ExamPaper) -> Transition {
    let mut next = session.clone();
    next.active_control = Some(control);

    let effects = match control {
        Control::Answer => {
            next.dictating = true;
            vec![
                Effect::Speak(DICTATION_PROMPT.to_string()),
                Effect::RequestFocus,
            ]
        }
        Control::ReadAgain => {
            next.dictating = false;
            let text = paper
                .questions
                .get(session.question_index)
                .unwrap_or_default()
                .to_string();
            vec![Effect::ReleaseFocus, Effect::Speak(text)]
        }
        Control::Next => {
            next.dictating = false;
            next.question_index += 1;
            next.answer_text.clear();
            vec![Effect::ReleaseFocus]
        }
        Control::Previous => {
            next.dictating = false;
            next.question_index -= 1;
            next.answer_text.clear();
            vec![Effect::ReleaseFocus]
        }
        Control::Stop => {
            next.dictating = false;
            vec![Effect::ReleaseFocus, Effect::Speak(ANSWER_SAVED.to_string())]
        }
    };

    Transition {
        session: next,
        effects,
    }
}
