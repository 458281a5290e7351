//! Question screen implementation
//!
//! Question counter, question card, dictation indicator, answer field,
//! the five numbered controls and (on the last question) the submit button.

use super::{palette, render_timer};
use crate::app::state::ViewState;
use crate::exam::{Control, ExamPaper, Session};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

/// Question screen, derived from the session
#[derive(Debug)]
pub struct QuestionScreen<'a> {
    session: &'a Session,
    paper: &'a ExamPaper,
    view: &'a ViewState,
}

impl<'a> QuestionScreen<'a> {
    pub fn new(session: &'a Session, paper: &'a ExamPaper, view: &'a ViewState) -> Self {
        Self {
            session,
            paper,
            view,
        }
    }

    /// Render the question screen
    pub fn render(&self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Timer row
                Constraint::Length(1), // Question counter
                Constraint::Min(5),    // Question card
                Constraint::Length(1), // Dictation indicator
                Constraint::Length(7), // Answer field
                Constraint::Length(3), // Controls
                Constraint::Length(3), // Submit / help
            ])
            .split(size);

        render_timer(f, chunks[0], self.session.remaining_seconds);
        self.render_counter(f, chunks[1]);
        self.render_question(f, chunks[2]);
        self.render_indicator(f, chunks[3]);
        self.render_answer(f, chunks[4]);
        self.render_controls(f, chunks[5]);
        self.render_footer(f, chunks[6]);
    }

    fn render_counter(&self, f: &mut Frame, area: Rect) {
        let counter = Paragraph::new(format!(
            "Question {} of {}",
            self.session.question_index,
            self.paper.total()
        ))
        .style(
            Style::default()
                .fg(palette::SAND)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);

        f.render_widget(counter, area);
    }

    fn render_question(&self, f: &mut Frame, area: Rect) {
        let text = self
            .paper
            .questions
            .get(self.session.question_index)
            .unwrap_or_default();

        let card = Paragraph::new(text)
            .style(Style::default().fg(Color::White).bg(palette::MAROON))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(palette::WINE))
                    .style(Style::default().bg(palette::MAROON)),
            );

        f.render_widget(card, area);
    }

    fn render_indicator(&self, f: &mut Frame, area: Rect) {
        if !self.session.dictating {
            return;
        }

        let indicator = Paragraph::new(Line::from(vec![
            Span::styled(
                "● ",
                Style::default()
                    .fg(palette::SAND)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                "Dictation Mode Active — Speak your answer",
                Style::default()
                    .fg(palette::SAND)
                    .add_modifier(Modifier::BOLD),
            ),
        ]))
        .alignment(Alignment::Center);

        f.render_widget(indicator, area);
    }

    fn render_answer(&self, f: &mut Frame, area: Rect) {
        let dictating = self.session.dictating;
        let inner = area.inner(&Margin::new(1, 1));

        let (content, scroll) = if self.session.answer_text.is_empty() {
            let placeholder = if dictating {
                "Listening... speak your answer"
            } else {
                "Press 1. Answer to start dictation"
            };
            let text = Text::styled(
                placeholder,
                Style::default()
                    .fg(palette::CREAM)
                    .add_modifier(Modifier::DIM),
            );
            (text, 0)
        } else {
            let width = inner.width as usize;
            let lines = wrap_answer(&self.session.answer_text, width);
            let (end_row, _) = end_of_text(&lines, width);
            let scroll = scroll_offset(end_row, inner.height as usize);
            let style = Style::default().fg(palette::CREAM);
            let text = Text::from(
                lines
                    .into_iter()
                    .map(|line| Line::styled(line, style))
                    .collect::<Vec<_>>(),
            );
            (text, scroll)
        };

        let border_color = if dictating { palette::SAND } else { palette::WINE };
        let title = if dictating { "Answer (editing)" } else { "Answer" };

        let answer = Paragraph::new(content)
            .wrap(Wrap { trim: false })
            .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(border_color)),
            );

        f.render_widget(answer, area);

        if self.view.input_focused && dictating {
            let (x, y) = cursor_position(&self.session.answer_text, area);
            f.set_cursor(x, y);
        }
    }

    fn render_controls(&self, f: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 5); 5])
            .split(area);

        for (control, column) in Control::ALL.iter().zip(columns.iter()) {
            self.render_button(f, *column, *control);
        }
    }

    fn render_button(&self, f: &mut Frame, area: Rect, control: Control) {
        let enabled = self.session.is_enabled(control, self.paper.total());
        let active = self.session.active_control == Some(control);

        let style = if !enabled {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        } else if active {
            Style::default()
                .fg(palette::SAND)
                .bg(palette::MAROON)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette::SAND)
        };

        let button = Paragraph::new(format!("{}. {}", control.number(), control.label()))
            .style(style)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(style),
            );

        f.render_widget(button, area);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(20)])
            .split(area);

        let key = Style::default()
            .fg(palette::SAND)
            .add_modifier(Modifier::BOLD);
        let help_text = if self.view.input_focused {
            Line::from(vec![
                Span::styled("Type", key),
                Span::raw(" Answer  "),
                Span::styled("Esc", key),
                Span::raw(" Stop  "),
                Span::styled("F1-F5", key),
                Span::raw(" Controls"),
            ])
        } else {
            Line::from(vec![
                Span::styled("1-5", key),
                Span::raw(" Controls  "),
                Span::styled("←→", key),
                Span::raw(" Previous/Next  "),
                Span::styled("Q", key),
                Span::raw(" Quit"),
            ])
        };

        let help = Paragraph::new(help_text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette::WINE)),
        );
        f.render_widget(help, columns[0]);

        if self.session.can_submit(self.paper.total()) {
            let submit = Paragraph::new("S  Submit Exam")
                .style(
                    Style::default()
                        .fg(Color::White)
                        .bg(palette::WINE)
                        .add_modifier(Modifier::BOLD),
                )
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(palette::SAND)),
                );
            f.render_widget(submit, columns[1]);
        }
    }
}

/// Answer text hard-wrapped at `width` columns, keeping explicit line breaks
fn wrap_answer(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for segment in text.split('\n') {
        let chars: Vec<char> = segment.chars().collect();
        if chars.is_empty() {
            lines.push(String::new());
        } else {
            lines.extend(chars.chunks(width).map(|chunk| chunk.iter().collect::<String>()));
        }
    }
    lines
}

/// Row and column just after the last character of the wrapped answer.
/// A full last line puts the end at the start of the next row.
fn end_of_text(lines: &[String], width: usize) -> (usize, usize) {
    let row = lines.len().saturating_sub(1);
    let col = lines.last().map_or(0, |line| line.chars().count());
    if col >= width.max(1) {
        (row + 1, 0)
    } else {
        (row, col)
    }
}

/// Rows scrolled off the top so that `end_row` stays visible
fn scroll_offset(end_row: usize, height: usize) -> usize {
    (end_row + 1).saturating_sub(height.max(1))
}

/// Cursor cell after the last character of the answer, inside the bordered area
fn cursor_position(text: &str, area: Rect) -> (u16, u16) {
    let inner = area.inner(&Margin::new(1, 1));
    let width = inner.width as usize;
    let lines = wrap_answer(text, width);
    let (row, col) = end_of_text(&lines, width);
    let visible_row = row - scroll_offset(row, inner.height as usize);

    let x = inner.x.saturating_add(col as u16);
    let y = inner.y.saturating_add(visible_row as u16);
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{contains, render_to_text};
    use super::*;

    fn draw(session: &Session, view: &ViewState) -> Vec<String> {
        let paper = ExamPaper::default();
        render_to_text(110, 30, |f| QuestionScreen::new(session, &paper, view).render(f))
    }

    #[test]
    fn test_renders_question_and_timer() {
        let mut session = Session::new(300);
        session.remaining_seconds = 65;
        let rows = draw(&session, &ViewState::new());

        assert!(contains(&rows, "Question 1 of 5"));
        assert!(contains(&rows, "What is the capital of France?"));
        assert!(contains(&rows, "01:05"));
        assert!(contains(&rows, "1. Answer"));
        assert!(contains(&rows, "5. Stop Answering"));
        assert!(contains(&rows, "Press 1. Answer to start dictation"));
        assert!(!contains(&rows, "Submit Exam"));
        assert!(!contains(&rows, "Dictation Mode Active"));
    }

    #[test]
    fn test_dictation_indicator_and_placeholder() {
        let mut session = Session::new(300);
        session.dictating = true;
        let rows = draw(&session, &ViewState::new());

        assert!(contains(&rows, "Dictation Mode Active"));
        assert!(contains(&rows, "Listening... speak your answer"));
    }

    #[test]
    fn test_answer_text_shown() {
        let mut session = Session::new(300);
        session.dictating = true;
        session.answer_text = "Paris".to_string();
        let mut view = ViewState::new();
        view.input_focused = true;
        let rows = draw(&session, &view);

        assert!(contains(&rows, "Paris"));
        assert!(contains(&rows, "Esc Stop"));
    }

    #[test]
    fn test_submit_on_last_question() {
        let mut session = Session::new(300);
        session.question_index = 5;
        let rows = draw(&session, &ViewState::new());

        assert!(contains(&rows, "Question 5 of 5"));
        assert!(contains(&rows, "Submit Exam"));
    }

    #[test]
    fn test_cursor_position() {
        let area = Rect::new(0, 10, 40, 7);
        assert_eq!(cursor_position("", area), (1, 11));
        assert_eq!(cursor_position("Paris", area), (6, 11));
        assert_eq!(cursor_position("a\nbc", area), (3, 12));
        assert_eq!(cursor_position(&"x".repeat(100), area), (25, 13));
        assert_eq!(cursor_position(&"x".repeat(38), area), (1, 12));
        // Five full rows: the end scrolls onto the last visible row
        assert_eq!(cursor_position(&"x".repeat(38 * 5), area), (1, 15));
    }

    #[test]
    fn test_wrap_answer() {
        assert_eq!(wrap_answer("", 4), vec![String::new()]);
        assert_eq!(wrap_answer("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_answer("ab\n\ncd", 4), vec!["ab", "", "cd"]);
    }

    #[test]
    fn test_long_answer_wraps_inside_field() {
        let mut session = Session::new(300);
        session.dictating = true;
        session.answer_text = format!("{}TAILEND", "a".repeat(150));
        let mut view = ViewState::new();
        view.input_focused = true;
        let rows = draw(&session, &view);

        assert!(contains(&rows, "TAILEND"));
        assert!(contains(&rows, &"a".repeat(108)));
    }

    #[test]
    fn test_overflowing_answer_keeps_end_visible() {
        let mut session = Session::new(300);
        session.dictating = true;
        session.answer_text = format!("HEADSTART{}TAILEND", "a".repeat(600));
        let rows = draw(&session, &ViewState::new());

        assert!(contains(&rows, "TAILEND"));
        assert!(!contains(&rows, "HEADSTART"));
    }
}
