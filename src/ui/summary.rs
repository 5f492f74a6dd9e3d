use super::layout::calculate_screen_chunks;
use super::{Screen, render_header, render_help, render_status};
use crate::session::SessionStatus;
use crate::utils::{format_score, truncate_string};
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

fn achievements_text(screen: &Screen, text: &mut Text) {
    let achievements = &screen.state.progress.achievements;
    if achievements.is_empty() {
        return;
    }
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        "Achievements:",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for achievement in achievements {
        text.push_line(Line::from(format!("  * {}", achievement.title())));
    }
}

pub fn draw_goal_completed(f: &mut Frame, screen: &Screen) {
    let layout = calculate_screen_chunks(f.area());
    let progress = &screen.state.progress;

    render_header(f, "Daily Goal Completed".to_string(), layout.header_area);

    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        format!(
            "You learned {} words today!",
            progress.daily.learned()
        ),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(format!(
        "Ready to recall {} of them by typing?",
        screen.ctx.config.input_quiz_length
    )));
    achievements_text(screen, &mut text);

    let body = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, layout.body_area);

    render_status(f, screen, layout.status_area);
    render_help(
        f,
        &[
            ("i", "Typed Quiz"),
            ("c", "Keep Learning"),
            ("v", "Review"),
            ("x", "End Session"),
        ],
        layout.help_area,
    );
}

pub fn draw_typed_quiz_summary(f: &mut Frame, screen: &Screen) {
    let layout = calculate_screen_chunks(f.area());
    let Some(quiz) = screen.state.input_quiz.as_ref() else {
        return;
    };

    render_header(
        f,
        format!("Recall Summary - {}", format_score(quiz.score, quiz.len())),
        layout.header_area,
    );

    let width = layout.body_area.width.saturating_sub(4) as usize;
    let mut text = Text::default();
    for (i, word) in quiz.words.iter().enumerate() {
        let (mark, style) = match quiz.outcomes.get(i).copied().flatten() {
            Some(true) => ("[✓]", Style::default().fg(Color::Green)),
            Some(false) => ("[✗]", Style::default().fg(Color::Red)),
            None => ("[ ]", Style::default()),
        };
        let answer = quiz
            .answers
            .get(i)
            .cloned()
            .flatten()
            .unwrap_or_else(|| "-".to_string());
        text.push_line(Line::from(Span::styled(
            truncate_string(
                &format!("{} {}. {}  (you typed: {})", mark, i + 1, word, answer),
                width,
            ),
            style,
        )));
    }

    let missed = quiz.missed_words();
    if !missed.is_empty() {
        text.push_line(Line::from(""));
        text.push_line(Line::from(format!("Missed: {}", missed.join(", "))));
    }

    let body = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Answers"));
    f.render_widget(body, layout.body_area);

    render_status(f, screen, layout.status_area);
    render_help(
        f,
        &[
            ("v", "Review Missed"),
            ("c", "Keep Learning"),
            ("x", "End Session"),
        ],
        layout.help_area,
    );
}

pub fn draw_finished(f: &mut Frame, screen: &Screen) {
    let layout = calculate_screen_chunks(f.area());
    let progress = &screen.state.progress;

    let title = match screen.status {
        SessionStatus::AllWordsLearned => "All Words Learned",
        SessionStatus::AllRoundsCompleted => "All Rounds Completed",
        SessionStatus::Ended | SessionStatus::Active => "Session Ended",
    };
    render_header(f, title.to_string(), layout.header_area);

    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        "Great work!",
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(format!("Final score: {}", progress.score)));
    text.push_line(Line::from(format!("High score: {}", progress.high_score)));
    text.push_line(Line::from(format!(
        "Words learned: {} / {}",
        progress.total_learned,
        screen.ctx.catalog.len()
    )));
    achievements_text(screen, &mut text);

    let body = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, layout.body_area);

    render_status(f, screen, layout.status_area);
    render_help(f, &[("r", "Restart"), ("q", "Quit")], layout.help_area);
}
