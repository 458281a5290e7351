//! TUI screen components
//!
//! Each screen is derived entirely from the session, the exam paper and
//! the view state; none of them hold state of their own.

pub mod finish;
pub mod loading;
pub mod question;

pub use finish::FinishScreen;
pub use loading::LoadingScreen;
pub use question::QuestionScreen;

use crate::app::state::ViewState;
use crate::exam::{ExamPaper, Screen, Session};
use crate::util::format_clock;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

/// Colour palette
pub mod palette {
    use ratatui::style::Color;

    pub const MAROON: Color = Color::Rgb(0x56, 0x1C, 0x24);
    pub const WINE: Color = Color::Rgb(0x6D, 0x29, 0x32);
    pub const SAND: Color = Color::Rgb(0xE8, 0xD8, 0xC4);
    pub const CREAM: Color = Color::Rgb(0xFF, 0xF5, 0xE9);
}

/// Render whichever screen the session is on
pub fn render(f: &mut Frame, session: &Session, paper: &ExamPaper, view: &ViewState) {
    match session.screen {
        Screen::Question => QuestionScreen::new(session, paper, view).render(f),
        Screen::Loading => LoadingScreen.render(f),
        Screen::Finish => FinishScreen.render(f),
    }
}

/// Width of the timer badge
pub const TIMER_WIDTH: u16 = 11;

/// Draw the countdown badge in the top-right corner of `area`
pub fn render_timer(f: &mut Frame, area: Rect, remaining_seconds: u32) {
    if area.width < TIMER_WIDTH || area.height < 3 {
        return;
    }
    let badge = Rect::new(area.right() - TIMER_WIDTH, area.y, TIMER_WIDTH, 3);

    let color = if remaining_seconds == 0 {
        Color::Red
    } else {
        palette::SAND
    };

    let timer = Paragraph::new(format_clock(remaining_seconds))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(palette::WINE)),
        );

    f.render_widget(Clear, badge);
    f.render_widget(timer, badge);
}


#[cfg(test)]
mod tests {
    use super::test_support::{contains, render_to_text};
    use super::*;

    #[test]
    fn test_timer_badge() {
        let rows = render_to_text(40, 5, |f| {
            let area = f.size();
            render_timer(f, area, 65)
        });
        assert!(rows[1].contains("01:05"));
        assert!(!rows[1][..20].contains("01:05"));
    }

    #[test]
    fn test_dispatch_by_screen() {
        let paper = ExamPaper::default();
        let view = ViewState::new();
        let mut session = Session::new(300);

        let rows = render_to_text(100, 30, |f| render(f, &session, &paper, &view));
        assert!(contains(&rows, "Question 1 of 5"));

        session.screen = Screen::Loading;
        let rows = render_to_text(100, 30, |f| render(f, &session, &paper, &view));
        assert!(contains(&rows, "Submitting your exam..."));
        assert!(!contains(&rows, "05:00"));

        session.screen = Screen::Finish;
        let rows = render_to_text(100, 30, |f| render(f, &session, &paper, &view));
        assert!(contains(&rows, "Exam Submitted Successfully"));
    }
}
