use super::layout::calculate_screen_chunks;
use super::{Screen, render_header, render_help, render_status};
use crate::utils::truncate_string;
use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn draw_review(f: &mut Frame, screen: &Screen) {
    let layout = calculate_screen_chunks(f.area());
    let queue = &screen.state.progress.review_queue;

    render_header(
        f,
        format!("Review - {} words", queue.len()),
        layout.header_area,
    );

    let mut text = Text::default();
    if queue.is_empty() {
        text.push_line(Line::from("Nothing to review yet."));
    }
    let width = layout.body_area.width.saturating_sub(8) as usize;
    for (i, word) in queue.iter().enumerate() {
        let mut line = format!("{}. {}", i + 1, word);
        if let Some(item) = screen.ctx.catalog.lookup(word) {
            if screen.state.show_translation
                && let Some(translation) = &item.translation
            {
                line.push_str(&format!(" - {}", translation));
            }
            if let Some(example) = &item.example {
                line.push_str(&format!("  \"{}\"", example));
            }
        }
        let line = truncate_string(&line, width);
        if i == screen.review_cursor {
            text.push_line(Line::from(Span::styled(
                format!("> {}", line),
                Style::default().add_modifier(Modifier::REVERSED),
            )));
        } else {
            text.push_line(Line::from(format!("  {}", line)));
        }
    }

    let list = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Words to Review"));
    f.render_widget(list, layout.body_area);

    render_status(f, screen, layout.status_area);
    let translation = if screen.state.show_translation {
        "Hide Translation"
    } else {
        "Show Translation"
    };
    render_help(
        f,
        &[
            ("↑/↓", "Select"),
            ("s/1-9", "Say Word"),
            ("e", "Say Example"),
            ("t", translation),
            ("Enter/b", "Back"),
            ("Esc", "Quit"),
        ],
        layout.help_area,
    );
}
