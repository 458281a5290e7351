//! Finish screen implementation
//!
//! Confirms the submission and offers the Finish button that starts a
//! fresh attempt.

use super::palette;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// Submission confirmation screen
#[derive(Debug, Default)]
pub struct FinishScreen;

impl FinishScreen {
    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(35),
                Constraint::Length(3), // Confirmation
                Constraint::Length(1),
                Constraint::Length(3), // Finish button
                Constraint::Min(0),
                Constraint::Length(1), // Help
            ])
            .split(f.size());

        let message = Paragraph::new("✓ Exam Submitted Successfully")
            .style(
                Style::default()
                    .fg(palette::SAND)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(palette::WINE)),
            );
        f.render_widget(message, centered(chunks[1], 44));

        let button = Paragraph::new("Finish")
            .style(
                Style::default()
                    .fg(palette::CREAM)
                    .bg(palette::MAROON)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(palette::SAND)),
            );
        f.render_widget(button, centered(chunks[3], 20));

        let key = Style::default()
            .fg(palette::SAND)
            .add_modifier(Modifier::BOLD);
        let help = Paragraph::new(Line::from(vec![
            Span::styled("Enter", key),
            Span::raw(" Finish  "),
            Span::styled("Q", key),
            Span::raw(" Quit"),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(help, chunks[5]);
    }
}

fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{contains, render_to_text};
    use super::*;

    #[test]
    fn test_finish_screen() {
        let rows = render_to_text(80, 20, |f| FinishScreen.render(f));
        assert!(contains(&rows, "Exam Submitted Successfully"));
        assert!(contains(&rows, "Finish"));
        assert!(contains(&rows, "Enter Finish"));
    }

    #[test]
    fn test_centered() {
        assert_eq!(centered(Rect::new(0, 0, 80, 3), 20), Rect::new(30, 0, 20, 3));
        assert_eq!(centered(Rect::new(5, 1, 10, 3), 20), Rect::new(5, 1, 10, 3));
    }
}
