//! End-to-end walks through a session using only public operations.

use crate::catalog::{Catalog, WordItem};
use crate::config::SessionConfig;
use crate::models::{Action, Effect, Mode, QuizState, SessionState};
use crate::selection::sample_daily_batch;
use crate::session::{SessionContext, SessionStatus, handle_action, status};
use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

fn catalog(words: &[&str]) -> Catalog {
    Catalog::from_items(
        words
            .iter()
            .map(|w| WordItem::new(w, &format!("images/{}.png", w)))
            .collect(),
    )
}

/// Session sitting on an unanswered question about `dog`.
fn dog_question(words: &Catalog) -> SessionState {
    let mut state = SessionState::new(today());
    state.mode = Mode::Quiz;
    state.cursor = 3;
    state.round_learned = vec!["cat".into(), "dog".into(), "bird".into()];
    state.quiz = Some(QuizState::new(
        "dog".into(),
        words.iter().map(|item| item.word.clone()).collect(),
    ));
    state
}

#[test]
fn test_three_words_then_quiz() {
    let words = catalog(&["cat", "dog", "bird"]);
    let config = SessionConfig::default();
    let ctx = SessionContext::new(&words, &config, today());
    let mut rng = StdRng::seed_from_u64(100);
    let mut state = SessionState::new(today());

    for _ in 0..3 {
        handle_action(&mut state, Action::Advance, &ctx, &mut rng);
    }

    assert_eq!(state.mode, Mode::Quiz);
    assert_eq!(state.cursor, 3);
    assert_eq!(state.round_learned, vec!["cat", "dog", "bird"]);
    let quiz = state.quiz.as_ref().unwrap();
    assert_eq!(quiz.options.len(), 3);
    assert!(quiz.options.contains(&quiz.correct_word));
}

#[test]
fn test_correct_answer_scores() {
    let words = catalog(&["cat", "dog", "bird"]);
    let config = SessionConfig::default();
    let ctx = SessionContext::new(&words, &config, today());
    let mut rng = StdRng::seed_from_u64(101);
    let mut state = dog_question(&words);

    let effects = handle_action(&mut state, Action::SelectOption("dog".into()), &ctx, &mut rng);

    assert_eq!(state.progress.score, 10);
    assert_eq!(state.progress.high_score, 10);
    assert_eq!(state.progress.streak, 1);
    assert!(state.quiz.as_ref().unwrap().submitted);
    assert!(effects.iter().any(|e| matches!(e, Effect::Speak(s) if s.text == "dog")));
}

#[test]
fn test_wrong_answer_resets_streak_and_queues_review_once() {
    let words = catalog(&["cat", "dog", "bird"]);
    let config = SessionConfig::default();
    let ctx = SessionContext::new(&words, &config, today());
    let mut rng = StdRng::seed_from_u64(102);
    let mut state = dog_question(&words);
    state.progress.streak = 2;
    state.progress.review_queue = vec!["dog".into()];

    handle_action(&mut state, Action::SelectOption("cat".into()), &ctx, &mut rng);

    assert_eq!(state.progress.streak, 0);
    assert_eq!(state.progress.score, 0);
    assert_eq!(
        state.progress.review_queue.iter().filter(|w| *w == "dog").count(),
        1
    );
}

#[test]
fn test_daily_batch_from_four_words() {
    let learned: Vec<String> = ["cat", "dog", "bird", "fish"]
        .iter()
        .map(|w| w.to_string())
        .collect();
    let mut rng = StdRng::seed_from_u64(103);

    let batch = sample_daily_batch(&learned, 10, &mut rng);

    assert_eq!(batch.len(), 10);
    assert!(batch.iter().all(|w| learned.contains(w)));
}

#[test]
fn test_typed_answer_case_insensitive() {
    let words = catalog(&["dog", "cat"]);
    let config = SessionConfig {
        daily_goal: 1,
        input_quiz_length: 1,
        ..SessionConfig::default()
    };
    let ctx = SessionContext::new(&words, &config, today());
    let mut rng = StdRng::seed_from_u64(104);
    let mut state = SessionState::new(today());

    handle_action(&mut state, Action::Advance, &ctx, &mut rng);
    assert_eq!(state.mode, Mode::GoalCompleted);
    handle_action(&mut state, Action::StartInputQuiz, &ctx, &mut rng);
    handle_action(&mut state, Action::SubmitTypedAnswer("Dog".into()), &ctx, &mut rng);

    let quiz = state.input_quiz.as_ref().unwrap();
    assert_eq!(quiz.score, 1);
    assert_eq!(quiz.outcomes[0], Some(true));
}

#[test]
fn test_full_session_to_completion() {
    let words = catalog(&["cat", "dog", "bird", "fish", "frog", "horse"]);
    let config = SessionConfig::default();
    let ctx = SessionContext::new(&words, &config, today());
    let mut rng = StdRng::seed_from_u64(105);
    let mut state = SessionState::new(today());

    let mut guard = 0;
    while status(&state, &ctx) == SessionStatus::Active {
        let action = match state.quiz.as_ref() {
            Some(quiz) if !quiz.submitted => Action::SelectOption(quiz.correct_word.clone()),
            _ => Action::Advance,
        };
        handle_action(&mut state, action, &ctx, &mut rng);
        guard += 1;
        assert!(guard < 50, "session never finished");
    }

    assert_eq!(status(&state, &ctx), SessionStatus::AllRoundsCompleted);
    assert_eq!(state.progress.total_learned, 6);
    assert_eq!(state.progress.score, 20);
    assert_eq!(state.progress.high_score, 20);
}
