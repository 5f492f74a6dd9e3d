pub mod layout;
mod learn;
mod quiz;
mod review;
mod summary;
mod typed_quiz;

use crate::input::AnswerBuffer;
use crate::models::{Mode, SessionState};
use crate::session::{SessionContext, SessionStatus};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub use layout::{calculate_card_chunks, calculate_screen_chunks, calculate_typed_quiz_chunks};
pub use quiz::draw_quit_confirmation;

/// Everything a frame needs. Built fresh by the app loop for each draw.
pub struct Screen<'a> {
    pub state: &'a SessionState,
    pub ctx: &'a SessionContext<'a>,
    pub status: SessionStatus,
    pub buffer: &'a AnswerBuffer,
    pub review_cursor: usize,
    pub notice: Option<&'a str>,
}

pub fn draw(f: &mut Frame, screen: &Screen) {
    if screen.status != SessionStatus::Active {
        summary::draw_finished(f, screen);
        return;
    }
    match screen.state.mode {
        Mode::Learn => learn::draw_learn(f, screen),
        Mode::Quiz => quiz::draw_quiz(f, screen),
        Mode::Review => review::draw_review(f, screen),
        Mode::GoalCompleted => summary::draw_goal_completed(f, screen),
        Mode::InputQuiz => typed_quiz::draw_typed_quiz(f, screen),
        Mode::InputQuizSummary => summary::draw_typed_quiz_summary(f, screen),
    }
}

fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn render_header(f: &mut Frame, text: String, area: Rect) {
    let header = Paragraph::new(text)
        .style(key_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

/// One centered line of `key Label` pairs.
pub(crate) fn render_help(f: &mut Frame, keys: &[(&str, &str)], area: Rect) {
    let mut spans = Vec::new();
    for (key, label) in keys {
        spans.push(Span::styled(key.to_string(), key_style()));
        spans.push(Span::from(format!(" {}  ", label)));
    }
    let help = Paragraph::new(vec![Line::from(spans)])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

/// Score line, or the latest notice (audio failure, achievement) when there is one.
pub(crate) fn render_status(f: &mut Frame, screen: &Screen, area: Rect) {
    let line = match screen.notice {
        Some(notice) => Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Yellow),
        )),
        None => {
            let progress = &screen.state.progress;
            Line::from(format!(
                "Score {}  High {}  Streak {}  Learned {}  Today {}/{}",
                progress.score,
                progress.high_score,
                progress.streak,
                progress.total_learned,
                progress.daily.learned(),
                screen.ctx.config.daily_goal
            ))
        }
    };
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
