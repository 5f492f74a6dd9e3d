use super::layout::{calculate_card_chunks, calculate_screen_chunks};
use super::{Screen, render_header, render_help, render_status};
use crate::session::current_item;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

pub fn draw_learn(f: &mut Frame, screen: &Screen) {
    let layout = calculate_screen_chunks(f.area());
    let state = screen.state;
    let ctx = screen.ctx;

    render_header(
        f,
        format!(
            "Word {} / {} - Round {} / {}",
            (state.cursor + 1).min(ctx.catalog.len()),
            ctx.catalog.len(),
            state.round.min(ctx.total_rounds()),
            ctx.total_rounds()
        ),
        layout.header_area,
    );

    let card = calculate_card_chunks(layout.body_area);
    if let Some(item) = current_item(state, ctx) {
        let word = Paragraph::new(Line::from(Span::styled(
            item.word.as_str(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("New Word"));
        f.render_widget(word, card.word_area);

        let mut details = Text::default();
        details.push_line(Line::from(format!("Image: {}", item.image_ref)));
        if let Some(example) = &item.example {
            details.push_line(Line::from(""));
            details.push_line(Line::from(format!("Example: {}", example)));
        }
        if state.show_translation {
            details.push_line(Line::from(""));
            details.push_line(Line::from(Span::styled(
                format!(
                    "Translation: {}",
                    item.translation.as_deref().unwrap_or("(none)")
                ),
                Style::default().fg(Color::Yellow),
            )));
        }
        let details = Paragraph::new(details)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(details, card.details_area);
    }

    let goal = ctx.config.daily_goal.max(1);
    let learned = state.progress.daily.learned().min(goal);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Daily Goal"))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(learned as f64 / goal as f64)
        .label(format!("{} / {}", learned, goal));
    f.render_widget(gauge, card.goal_area);

    render_status(f, screen, layout.status_area);
    render_help(
        f,
        &[
            ("Enter", "Next"),
            ("t", "Translation"),
            ("s/S", "Say (slow)"),
            ("e", "Example"),
            ("p", "Pronounce"),
            ("v", "Review"),
            ("Esc", "Quit"),
        ],
        layout.help_area,
    );
}
