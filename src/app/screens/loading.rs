//! Loading screen shown while the submission is in flight

use super::palette;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

/// Submission progress screen
#[derive(Debug, Default)]
pub struct LoadingScreen;

impl LoadingScreen {
    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(f.size());

        let text = vec![
            Line::styled("◌", Style::default().fg(palette::SAND)),
            Line::from(""),
            Line::styled(
                "Submitting your exam...",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ];

        f.render_widget(Paragraph::new(text).alignment(Alignment::Center), chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{contains, render_to_text};
    use super::*;

    #[test]
    fn test_loading_message() {
        let rows = render_to_text(60, 20, |f| LoadingScreen.render(f));
        assert!(contains(&rows, "Submitting your exam..."));
    }
}
