use super::layout::{calculate_screen_chunks, calculate_typed_quiz_chunks};
use super::{Screen, render_header, render_help, render_status};
use crate::models::AnswerPhase;
use crate::session::typed_hint;
use crate::utils::{cursor_column, mask_word};
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn draw_typed_quiz(f: &mut Frame, screen: &Screen) {
    let layout = calculate_screen_chunks(f.area());
    let Some(quiz) = screen.state.input_quiz.as_ref() else {
        return;
    };
    let Some(word) = quiz.current_word() else {
        return;
    };

    render_header(
        f,
        format!(
            "Daily Recall - {} / {} - Score {}",
            quiz.index + 1,
            quiz.len(),
            quiz.score
        ),
        layout.header_area,
    );

    let parts = calculate_typed_quiz_chunks(layout.body_area);

    let mut prompt = Text::default();
    if let Some(item) = screen.ctx.catalog.lookup(word) {
        prompt.push_line(Line::from(format!("Type the word for {}", item.image_ref)));
        if let Some(example) = &item.example {
            prompt.push_line(Line::from(mask_word(example, &item.word)));
        }
    }
    let prompt = Paragraph::new(prompt)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Prompt"));
    f.render_widget(prompt, parts.prompt_area);

    let submitted = quiz.answers.get(quiz.index).cloned().flatten();
    let answer_text = match (quiz.phase, submitted) {
        (AnswerPhase::Idle, _) if screen.buffer.is_empty() => {
            Span::styled("[Type your answer here...]", Style::default().fg(Color::DarkGray))
        }
        (AnswerPhase::Idle, _) => Span::from(screen.buffer.text.clone()),
        (_, Some(answer)) => Span::from(answer),
        (_, None) => Span::from(""),
    };
    let answer = Paragraph::new(Line::from(answer_text))
        .block(Block::default().borders(Borders::ALL).title("Your Answer"));
    f.render_widget(answer, parts.answer_area);

    if quiz.phase == AnswerPhase::Idle {
        let column = cursor_column(&screen.buffer.text, screen.buffer.cursor) as u16;
        let max_x = parts.answer_area.x + parts.answer_area.width.saturating_sub(2);
        f.set_cursor_position(((parts.answer_area.x + 1 + column).min(max_x), parts.answer_area.y + 1));
    }

    let mut feedback = Text::default();
    match quiz.phase {
        AnswerPhase::Correct => feedback.push_line(Line::from(Span::styled(
            "Correct!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))),
        AnswerPhase::Wrong => {
            feedback.push_line(Line::from(Span::styled(
                "Not quite. Try again, take a hint, or skip.",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            if quiz.hint_shown {
                feedback.push_line(Line::from(""));
                feedback.push_line(Line::from(format!(
                    "Hint: {}",
                    typed_hint(word, screen.ctx.catalog)
                )));
            }
        }
        AnswerPhase::Idle => {}
    }
    let feedback = Paragraph::new(feedback)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(feedback, parts.feedback_area);

    render_status(f, screen, layout.status_area);
    let keys: &[(&str, &str)] = match quiz.phase {
        AnswerPhase::Idle => &[("Enter", "Submit"), ("←/→", "Move"), ("Esc", "Quit")],
        AnswerPhase::Correct => &[("Enter", "Next Word"), ("Esc", "Quit")],
        AnswerPhase::Wrong => &[
            ("r", "Retry"),
            ("h", "Hint"),
            ("s", "Skip"),
            ("v", "Review Word"),
            ("Esc", "Quit"),
        ],
    };
    render_help(f, keys, layout.help_area);
}
