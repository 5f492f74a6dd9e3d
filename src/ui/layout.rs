use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct ScreenLayout {
    pub header_area: Rect,
    pub body_area: Rect,
    pub status_area: Rect,
    pub help_area: Rect,
}

pub struct CardLayout {
    pub word_area: Rect,
    pub details_area: Rect,
    pub goal_area: Rect,
}

pub struct TypedQuizLayout {
    pub prompt_area: Rect,
    pub answer_area: Rect,
    pub feedback_area: Rect,
}

pub fn calculate_screen_chunks(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    ScreenLayout {
        header_area: chunks[0],
        body_area: chunks[1],
        status_area: chunks[2],
        help_area: chunks[3],
    }
}

/// Splits the body of the learn screen.
pub fn calculate_card_chunks(body: Rect) -> CardLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(body);

    CardLayout {
        word_area: chunks[0],
        details_area: chunks[1],
        goal_area: chunks[2],
    }
}

pub fn calculate_typed_quiz_chunks(body: Rect) -> TypedQuizLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(2),
        ])
        .split(body);

    TypedQuizLayout {
        prompt_area: chunks[0],
        answer_area: chunks[1],
        feedback_area: chunks[2],
    }
}
