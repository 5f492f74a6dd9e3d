use super::layout::calculate_screen_chunks;
use super::{Screen, render_header, render_help, render_status};
use crate::catalog::same_word;
use crate::models::QuizResult;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn draw_quiz(f: &mut Frame, screen: &Screen) {
    let layout = calculate_screen_chunks(f.area());
    let Some(quiz) = screen.state.quiz.as_ref() else {
        return;
    };

    render_header(
        f,
        format!("Quiz - Round {} / {}", screen.state.round, screen.ctx.total_rounds()),
        layout.header_area,
    );

    let mut text = Text::default();
    if let Some(item) = screen.ctx.catalog.lookup(&quiz.correct_word) {
        text.push_line(Line::from(format!("Which word matches {}?", item.image_ref)));
        if let Some(translation) = &item.translation {
            text.push_line(Line::from(format!("({})", translation)));
        }
    }
    text.push_line(Line::from(""));

    for (i, option) in quiz.options.iter().enumerate() {
        let style = if !quiz.submitted {
            Style::default()
        } else if same_word(option, &quiz.correct_word) {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else if quiz.selected.as_deref() == Some(option.as_str()) {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        text.push_line(Line::from(Span::styled(
            format!("  {}. {}", i + 1, option),
            style,
        )));
    }

    match quiz.result {
        Some(QuizResult::Correct) => {
            text.push_line(Line::from(""));
            text.push_line(Line::from(Span::styled(
                format!("Correct! +{} points", screen.ctx.config.points_per_correct),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        Some(QuizResult::Wrong) => {
            text.push_line(Line::from(""));
            text.push_line(Line::from(Span::styled(
                format!("Not quite. The correct word is {}.", quiz.correct_word),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        }
        None => {}
    }

    let body = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(body, layout.body_area);

    render_status(f, screen, layout.status_area);
    if quiz.submitted {
        render_help(
            f,
            &[("Enter", "Continue"), ("v", "Review"), ("Esc", "Quit")],
            layout.help_area,
        );
    } else {
        let last = quiz.options.len().to_string();
        let range = format!("1-{}", last);
        render_help(
            f,
            &[(range.as_str(), "Choose"), ("v", "Review"), ("Esc", "Quit")],
            layout.help_area,
        );
    }
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Quit")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new("Leave this learning session?")
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No (Keep Learning)"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
