//! View state and keyboard mapping
//!
//! Holds the state that belongs to the terminal view rather than the exam
//! session (answer field focus, quit flag) and translates key events into
//! exam actions for the current screen.

use crate::exam::{Action, Control, Screen};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Feed an action to the exam session
    Exam(Action),
    /// Leave the application
    Quit,
    /// Key has no meaning here
    None,
}

/// Terminal view state that lives outside the session
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Answer field has keyboard focus; keys edit the answer
    pub input_focused: bool,
    should_quit: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Convert a key event to an action for the given screen
    pub fn key_to_action(&self, key: KeyEvent, screen: Screen) -> InputAction {
        if key.kind == KeyEventKind::Release {
            return InputAction::None;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return InputAction::Quit;
        }

        match screen {
            Screen::Question => self.question_key(key),
            Screen::Loading => match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') => InputAction::Quit,
                _ => InputAction::None,
            },
            Screen::Finish => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => InputAction::Exam(Action::Finish),
                KeyCode::Char('q') | KeyCode::Char('Q') => InputAction::Quit,
                _ => InputAction::None,
            },
        }
    }

    fn question_key(&self, key: KeyEvent) -> InputAction {
        // Function keys reach the controls even while typing
        if let KeyCode::F(n) = key.code {
            return match Control::from_number(n) {
                Some(control) => InputAction::Exam(Action::Press(control)),
                None => InputAction::None,
            };
        }

        if self.input_focused {
            return match key.code {
                KeyCode::Esc => InputAction::Exam(Action::Press(Control::Stop)),
                KeyCode::Backspace => InputAction::Exam(Action::Erase),
                KeyCode::Enter => InputAction::Exam(Action::Type('\n')),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    InputAction::Exam(Action::Type(c))
                }
                _ => InputAction::None,
            };
        }

        match key.code {
            KeyCode::Char(c @ '1'..='5') => {
                let number = c as u8 - b'0';
                Control::from_number(number)
                    .map(|control| InputAction::Exam(Action::Press(control)))
                    .unwrap_or(InputAction::None)
            }
            KeyCode::Right => InputAction::Exam(Action::Press(Control::Next)),
            KeyCode::Left => InputAction::Exam(Action::Press(Control::Previous)),
            KeyCode::Char('s') | KeyCode::Char('S') => InputAction::Exam(Action::Submit),
            KeyCode::Char('q') | KeyCode::Char('Q') => InputAction::Quit,
            _ => InputAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_digits_map_to_controls() {
        let view = ViewState::new();
        assert_eq!(
            view.key_to_action(key(KeyCode::Char('1')), Screen::Question),
            InputAction::Exam(Action::Press(Control::Answer))
        );
        assert_eq!(
            view.key_to_action(key(KeyCode::Char('5')), Screen::Question),
            InputAction::Exam(Action::Press(Control::Stop))
        );
        assert_eq!(
            view.key_to_action(key(KeyCode::Char('6')), Screen::Question),
            InputAction::None
        );
    }

    #[test]
    fn test_focused_keys_edit_answer() {
        let view = ViewState {
            input_focused: true,
            ..ViewState::default()
        };
        assert_eq!(
            view.key_to_action(key(KeyCode::Char('3')), Screen::Question),
            InputAction::Exam(Action::Type('3'))
        );
        assert_eq!(
            view.key_to_action(key(KeyCode::Char('q')), Screen::Question),
            InputAction::Exam(Action::Type('q'))
        );
        assert_eq!(
            view.key_to_action(key(KeyCode::Backspace), Screen::Question),
            InputAction::Exam(Action::Erase)
        );
        assert_eq!(
            view.key_to_action(key(KeyCode::Esc), Screen::Question),
            InputAction::Exam(Action::Press(Control::Stop))
        );
        assert_eq!(
            view.key_to_action(key(KeyCode::F(3)), Screen::Question),
            InputAction::Exam(Action::Press(Control::Next))
        );
    }

    #[test]
    fn test_quit_keys() {
        let view = ViewState::new();
        assert_eq!(
            view.key_to_action(key(KeyCode::Char('q')), Screen::Question),
            InputAction::Quit
        );
        assert_eq!(
            view.key_to_action(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                Screen::Loading
            ),
            InputAction::Quit
        );
    }

    #[test]
    fn test_screen_specific_keys() {
        let view = ViewState::new();
        assert_eq!(
            view.key_to_action(key(KeyCode::Char('s')), Screen::Question),
            InputAction::Exam(Action::Submit)
        );
        assert_eq!(
            view.key_to_action(key(KeyCode::Enter), Screen::Loading),
            InputAction::None
        );
        assert_eq!(
            view.key_to_action(key(KeyCode::Enter), Screen::Finish),
            InputAction::Exam(Action::Finish)
        );
        assert_eq!(
            view.key_to_action(key(KeyCode::Char('1')), Screen::Finish),
            InputAction::None
        );
    }
}
