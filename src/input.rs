use crate::catalog::Catalog;
use crate::models::{Action, AnswerPhase, Mode, SessionState, SpeechRequest};
use crate::session::SessionStatus;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Editable typed-answer field. `cursor` counts characters, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerBuffer {
    pub text: String,
    pub cursor: usize,
}

impl AnswerBuffer {
    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn insert(&mut self, c: char) {
        self.cursor = self.cursor.min(self.len());
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        self.cursor = self.cursor.min(self.len());
        if self.cursor > 0 {
            let at = self.byte_index(self.cursor - 1);
            self.text.remove(at);
            self.cursor -= 1;
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.min(self.len()).saturating_sub(1);
    }

    pub fn right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }
}

/// What a key press means to the app loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Action(Action),
    Speak(SpeechRequest),
    Pronounce,
    RequestQuit,
    None,
}

fn option_index(c: char) -> Option<usize> {
    c.to_digit(10)
        .filter(|d| *d >= 1)
        .map(|d| d as usize - 1)
}

/// `review_cursor` is the highlighted row of the review list.
pub fn map_key(
    state: &SessionState,
    status: SessionStatus,
    catalog: &Catalog,
    buffer: &mut AnswerBuffer,
    review_cursor: &mut usize,
    key: KeyEvent,
) -> KeyOutcome {
    if status != SessionStatus::Active {
        return match key.code {
            KeyCode::Char('r') => KeyOutcome::Action(Action::Restart),
            KeyCode::Char('q') | KeyCode::Esc => KeyOutcome::RequestQuit,
            _ => KeyOutcome::None,
        };
    }

    match state.mode {
        Mode::Learn => {
            let item = catalog.get(state.cursor);
            match key.code {
                KeyCode::Enter | KeyCode::Right | KeyCode::Char('n') => {
                    KeyOutcome::Action(Action::Advance)
                }
                KeyCode::Char('t') => KeyOutcome::Action(Action::ToggleTranslation),
                KeyCode::Char('v') => KeyOutcome::Action(Action::GoToReview),
                KeyCode::Char('s') => speak(item.map(|i| i.word.as_str()), false),
                KeyCode::Char('S') => speak(item.map(|i| i.word.as_str()), true),
                KeyCode::Char('e') => speak(item.and_then(|i| i.example.as_deref()), false),
                KeyCode::Char('p') => KeyOutcome::Pronounce,
                KeyCode::Char('q') | KeyCode::Esc => KeyOutcome::RequestQuit,
                _ => KeyOutcome::None,
            }
        }
        Mode::Quiz => {
            let Some(quiz) = state.quiz.as_ref() else {
                return KeyOutcome::None;
            };
            match key.code {
                KeyCode::Char(c) if !quiz.submitted && option_index(c).is_some() => {
                    match option_index(c).and_then(|i| quiz.options.get(i)) {
                        Some(option) => KeyOutcome::Action(Action::SelectOption(option.clone())),
                        None => KeyOutcome::None,
                    }
                }
                KeyCode::Enter if quiz.submitted => KeyOutcome::Action(Action::Advance),
                KeyCode::Char('v') => KeyOutcome::Action(Action::GoToReview),
                KeyCode::Char('q') | KeyCode::Esc => KeyOutcome::RequestQuit,
                _ => KeyOutcome::None,
            }
        }
        Mode::Review => map_review_key(state, catalog, review_cursor, key),
        Mode::GoalCompleted => match key.code {
            KeyCode::Enter | KeyCode::Char('i') => KeyOutcome::Action(Action::StartInputQuiz),
            KeyCode::Char('c') => KeyOutcome::Action(Action::Advance),
            KeyCode::Char('v') => KeyOutcome::Action(Action::GoToReview),
            KeyCode::Char('x') => KeyOutcome::Action(Action::EndSession),
            KeyCode::Char('q') | KeyCode::Esc => KeyOutcome::RequestQuit,
            _ => KeyOutcome::None,
        },
        Mode::InputQuiz => {
            let phase = state
                .input_quiz
                .as_ref()
                .map(|q| q.phase)
                .unwrap_or(AnswerPhase::Idle);
            map_typed_quiz_key(phase, buffer, key)
        }
        Mode::InputQuizSummary => match key.code {
            KeyCode::Enter | KeyCode::Char('c') => KeyOutcome::Action(Action::Advance),
            KeyCode::Char('v') => KeyOutcome::Action(Action::GoToReview),
            KeyCode::Char('x') => KeyOutcome::Action(Action::EndSession),
            KeyCode::Char('q') | KeyCode::Esc => KeyOutcome::RequestQuit,
            _ => KeyOutcome::None,
        },
    }
}

fn speak(text: Option<&str>, slow: bool) -> KeyOutcome {
    match text {
        Some(text) if slow => KeyOutcome::Speak(SpeechRequest::slow(text)),
        Some(text) => KeyOutcome::Speak(SpeechRequest::normal(text)),
        None => KeyOutcome::None,
    }
}

fn map_review_key(
    state: &SessionState,
    catalog: &Catalog,
    review_cursor: &mut usize,
    key: KeyEvent,
) -> KeyOutcome {
    let queue = &state.progress.review_queue;
    *review_cursor = (*review_cursor).min(queue.len().saturating_sub(1));
    let selected = |cursor: usize| queue.get(cursor).map(String::as_str);

    match key.code {
        KeyCode::Enter | KeyCode::Char('b') | KeyCode::Backspace => {
            KeyOutcome::Action(Action::BackFromReview)
        }
        KeyCode::Up | KeyCode::Char('k') => {
            *review_cursor = review_cursor.saturating_sub(1);
            KeyOutcome::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if *review_cursor + 1 < queue.len() {
                *review_cursor += 1;
            }
            KeyOutcome::None
        }
        KeyCode::Char(c) if option_index(c).is_some() => {
            match option_index(c).filter(|i| *i < queue.len()) {
                Some(i) => {
                    *review_cursor = i;
                    speak(selected(i), false)
                }
                None => KeyOutcome::None,
            }
        }
        KeyCode::Char('s') => speak(selected(*review_cursor), false),
        KeyCode::Char('e') => speak(
            selected(*review_cursor)
                .and_then(|word| catalog.lookup(word))
                .and_then(|item| item.example.as_deref()),
            false,
        ),
        KeyCode::Char('t') => KeyOutcome::Action(Action::ToggleTranslation),
        KeyCode::Char('q') | KeyCode::Esc => KeyOutcome::RequestQuit,
        _ => KeyOutcome::None,
    }
}

fn map_typed_quiz_key(phase: AnswerPhase, buffer: &mut AnswerBuffer, key: KeyEvent) -> KeyOutcome {
    if key.code == KeyCode::Esc {
        return KeyOutcome::RequestQuit;
    }
    match phase {
        AnswerPhase::Idle => {
            match key.code {
                KeyCode::Enter => {
                    if buffer.text.trim().is_empty() {
                        return KeyOutcome::None;
                    }
                    return KeyOutcome::Action(Action::SubmitTypedAnswer(buffer.take()));
                }
                KeyCode::Left => buffer.left(),
                KeyCode::Right => buffer.right(),
                KeyCode::Backspace => buffer.backspace(),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    buffer.insert(c)
                }
                _ => {}
            }
            KeyOutcome::None
        }
        AnswerPhase::Correct => match key.code {
            KeyCode::Enter => KeyOutcome::Action(Action::Advance),
            _ => KeyOutcome::None,
        },
        AnswerPhase::Wrong => match key.code {
            KeyCode::Char('h') => KeyOutcome::Action(Action::RequestHint),
            KeyCode::Char('v') => KeyOutcome::Action(Action::GoToReview),
            KeyCode::Char('s') => KeyOutcome::Action(Action::SkipToNext),
            KeyCode::Char('r') | KeyCode::Enter => {
                buffer.clear();
                KeyOutcome::Action(Action::RetryCurrent)
            }
            _ => KeyOutcome::None,
        },
    }
}
