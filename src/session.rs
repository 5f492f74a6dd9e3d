use crate::catalog::{Catalog, WordItem, same_word};
use crate::config::SessionConfig;
use crate::logger;
use crate::models::{
    Action, AnswerPhase, AudioCue, Effect, InputQuizState, Mode, QuizResult, QuizState,
    ReturnTarget, SessionState, SpeechRequest,
};
use crate::selection::{build_choice_set, pick_quiz_word, sample_daily_batch};
use chrono::NaiveDate;
use rand::Rng;

/// Read-only inputs to a transition.
pub struct SessionContext<'a> {
    pub catalog: &'a Catalog,
    pub config: &'a SessionConfig,
    pub today: NaiveDate,
}

impl<'a> SessionContext<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a SessionConfig, today: NaiveDate) -> Self {
        Self {
            catalog,
            config,
            today,
        }
    }

    pub fn total_rounds(&self) -> usize {
        self.config.total_rounds(self.catalog.len())
    }
}

/// Terminal presentations are derived from state rather than stored as modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    AllWordsLearned,
    AllRoundsCompleted,
    Ended,
}

pub fn status(state: &SessionState, ctx: &SessionContext<'_>) -> SessionStatus {
    let teaching = matches!(state.mode, Mode::Learn | Mode::Quiz);
    if state.ended {
        SessionStatus::Ended
    } else if teaching && state.round > ctx.total_rounds() {
        SessionStatus::AllRoundsCompleted
    } else if state.mode == Mode::Learn && state.cursor >= ctx.catalog.len() {
        SessionStatus::AllWordsLearned
    } else {
        SessionStatus::Active
    }
}

/// Applies one user action. Total: actions that do not apply in the current
/// mode leave the state untouched.
pub fn handle_action<R: Rng + ?Sized>(
    state: &mut SessionState,
    action: Action,
    ctx: &SessionContext<'_>,
    rng: &mut R,
) -> Vec<Effect> {
    state.progress.rollover_daily_if_needed(ctx.today);
    let mut effects = Vec::new();

    if action == Action::Restart {
        logger::log("Session restarted");
        *state = SessionState::new(ctx.today);
        return effects;
    }

    let current = status(state, ctx);
    if current != SessionStatus::Active {
        logger::log(&format!("Ignored {:?}: session is {:?}", action, current));
        return effects;
    }

    let before = state.mode;
    match (state.mode, action) {
        (Mode::Learn, Action::Advance) => advance_learn(state, ctx, rng, &mut effects),
        (Mode::Learn | Mode::Review, Action::ToggleTranslation) => {
            state.show_translation = !state.show_translation;
        }
        (Mode::Learn, Action::GoToReview) => set_mode(state, Mode::Review),
        (Mode::Quiz, Action::SelectOption(option)) => {
            select_option(state, &option, ctx, &mut effects)
        }
        (Mode::Quiz, Action::Advance) => {
            if state.quiz.as_ref().is_some_and(|q| q.submitted) {
                finish_round(state, ctx, rng);
            }
        }
        (Mode::Quiz, Action::GoToReview) => {
            // An answered question closes its round before the detour.
            if state.quiz.as_ref().is_some_and(|q| q.submitted) {
                state.round_learned.clear();
                state.round += 1;
            }
            set_mode(state, Mode::Review);
        }
        (Mode::GoalCompleted, Action::StartInputQuiz) => start_input_quiz(state, ctx, rng),
        (Mode::GoalCompleted, Action::GoToReview) => set_mode(state, Mode::Review),
        (Mode::GoalCompleted, Action::Advance) => enter_learn(state, ctx, rng),
        (Mode::GoalCompleted | Mode::InputQuizSummary, Action::EndSession) => {
            logger::log("Session ended by user");
            state.ended = true;
        }
        (Mode::InputQuiz, action) => handle_input_quiz(state, action, ctx, &mut effects),
        (Mode::InputQuizSummary, Action::GoToReview) => review_missed(state),
        (Mode::InputQuizSummary, Action::Advance) => enter_learn(state, ctx, rng),
        (Mode::Review, Action::BackFromReview) => back_from_review(state, ctx, rng),
        (mode, action) => {
            logger::log(&format!("Ignored {:?} in {:?}", action, mode));
        }
    }

    if state.mode != before {
        logger::log(&format!("Mode {:?} -> {:?}", before, state.mode));
    }
    effects
}

// Sub-states live only in their own modes.
fn set_mode(state: &mut SessionState, mode: Mode) {
    if mode != Mode::Quiz {
        state.quiz = None;
    }
    if !matches!(mode, Mode::InputQuiz | Mode::InputQuizSummary) {
        state.input_quiz = None;
    }
    state.mode = mode;
}

fn advance_learn<R: Rng + ?Sized>(
    state: &mut SessionState,
    ctx: &SessionContext<'_>,
    rng: &mut R,
    effects: &mut Vec<Effect>,
) {
    let Some(item) = ctx.catalog.get(state.cursor) else {
        return;
    };
    let word = item.word.clone();

    state.progress.record_learned(&word);
    if !state.round_learned.iter().any(|w| same_word(w, &word)) {
        state.round_learned.push(word.clone());
    }
    state.progress.enqueue_review(&word);
    state.cursor += 1;
    unlock_achievements(state, ctx, effects);

    let goal = ctx.config.daily_goal;
    if !state.progress.daily.goal_met && state.progress.daily_goal_reached(goal) {
        logger::log(&format!("Daily goal of {} words reached", goal));
        state.progress.daily.goal_met = true;
        effects.push(Effect::DailyGoalReached);
        effects.push(Effect::Cue(AudioCue::GoalCompleted));
        set_mode(state, Mode::GoalCompleted);
        return;
    }

    if quiz_pending(state, ctx) {
        enter_quiz(state, ctx, rng);
    }
}

fn quiz_pending(state: &SessionState, ctx: &SessionContext<'_>) -> bool {
    state.round_learned.len() >= ctx.config.words_per_round && state.round <= ctx.total_rounds()
}

/// Every route back to teaching goes through here, so a quiz deferred by the
/// daily goal is picked up as soon as learning resumes.
fn enter_learn<R: Rng + ?Sized>(state: &mut SessionState, ctx: &SessionContext<'_>, rng: &mut R) {
    if quiz_pending(state, ctx) {
        enter_quiz(state, ctx, rng);
    } else {
        set_mode(state, Mode::Learn);
    }
}

fn enter_quiz<R: Rng + ?Sized>(state: &mut SessionState, ctx: &SessionContext<'_>, rng: &mut R) {
    let question = pick_quiz_word(&state.round_learned, rng)
        .and_then(|word| ctx.catalog.lookup(&word))
        .map(|item| {
            let options = build_choice_set(item, ctx.catalog, ctx.config.distractor_count, rng);
            QuizState::new(item.word.clone(), options)
        });

    match question {
        Some(quiz) => {
            set_mode(state, Mode::Quiz);
            state.quiz = Some(quiz);
        }
        None => {
            logger::log("No quiz word available for this round, skipping quiz");
            finish_round(state, ctx, rng);
        }
    }
}

fn finish_round<R: Rng + ?Sized>(state: &mut SessionState, ctx: &SessionContext<'_>, rng: &mut R) {
    logger::log(&format!("Round {} complete", state.round));
    state.round_learned.clear();
    state.round += 1;
    enter_learn(state, ctx, rng);
}

fn select_option(
    state: &mut SessionState,
    option: &str,
    ctx: &SessionContext<'_>,
    effects: &mut Vec<Effect>,
) {
    let Some(quiz) = state.quiz.as_mut() else {
        return;
    };
    if quiz.submitted || !quiz.options.iter().any(|o| same_word(o, option)) {
        return;
    }

    let correct = same_word(option, &quiz.correct_word);
    quiz.submitted = true;
    quiz.selected = Some(option.to_string());
    quiz.result = Some(if correct {
        QuizResult::Correct
    } else {
        QuizResult::Wrong
    });
    let correct_word = quiz.correct_word.clone();

    state
        .progress
        .record_quiz_result(correct, ctx.config.points_per_correct);
    if correct {
        effects.push(Effect::Cue(AudioCue::Correct));
        effects.push(Effect::Speak(SpeechRequest::normal(correct_word)));
    } else {
        state.progress.enqueue_review(&correct_word);
        effects.push(Effect::Cue(AudioCue::Wrong));
        effects.push(Effect::Speak(SpeechRequest::normal(format!(
            "The correct word is {}",
            correct_word
        ))));
    }
    unlock_achievements(state, ctx, effects);
}

fn unlock_achievements(state: &mut SessionState, ctx: &SessionContext<'_>, effects: &mut Vec<Effect>) {
    let unlocked = state.progress.check_achievements(ctx.catalog.len());
    if unlocked.is_empty() {
        return;
    }
    effects.extend(unlocked.into_iter().map(Effect::AchievementUnlocked));
    effects.push(Effect::Cue(AudioCue::AchievementUnlocked));
}

fn start_input_quiz<R: Rng + ?Sized>(state: &mut SessionState, ctx: &SessionContext<'_>, rng: &mut R) {
    let batch = sample_daily_batch(
        &state.progress.daily.words,
        ctx.config.input_quiz_length,
        rng,
    );
    logger::log(&format!("Typed quiz started with {} words", batch.len()));
    set_mode(state, Mode::InputQuiz);
    state.input_quiz = Some(InputQuizState::new(batch));
    skip_stale_entries(state, ctx);
}

/// Words no longer in the catalog are scored as misses and stepped over.
fn skip_stale_entries(state: &mut SessionState, ctx: &SessionContext<'_>) {
    let Some(quiz) = state.input_quiz.as_mut() else {
        return;
    };
    while let Some(word) = quiz.current_word() {
        if ctx.catalog.contains(word) {
            break;
        }
        logger::log(&format!("Skipping unknown quiz word `{}`", word));
        let index = quiz.index;
        quiz.outcomes[index] = Some(false);
        quiz.advance();
    }
    if quiz.is_finished() {
        logger::log(&format!(
            "Typed quiz finished: {}/{}",
            quiz.score,
            quiz.len()
        ));
        state.mode = Mode::InputQuizSummary;
    }
}

fn handle_input_quiz(
    state: &mut SessionState,
    action: Action,
    ctx: &SessionContext<'_>,
    effects: &mut Vec<Effect>,
) {
    let Some(quiz) = state.input_quiz.as_mut() else {
        return;
    };
    let index = quiz.index;

    match (quiz.phase, action) {
        (AnswerPhase::Idle, Action::SubmitTypedAnswer(text)) => {
            let Some(word) = quiz.current_word().map(str::to_string) else {
                return;
            };
            if text.trim().is_empty() {
                return;
            }
            let correct = same_word(&text, &word);
            quiz.answers[index] = Some(text);
            quiz.outcomes[index] = Some(correct);
            if correct {
                quiz.score += 1;
                quiz.phase = AnswerPhase::Correct;
                effects.push(Effect::Cue(AudioCue::Correct));
                effects.push(Effect::Speak(SpeechRequest::normal(word)));
            } else {
                quiz.phase = AnswerPhase::Wrong;
                effects.push(Effect::Cue(AudioCue::Wrong));
            }
            unlock_achievements(state, ctx, effects);
        }
        (AnswerPhase::Correct, Action::Advance) | (AnswerPhase::Wrong, Action::SkipToNext) => {
            quiz.advance();
            skip_stale_entries(state, ctx);
        }
        (AnswerPhase::Wrong, Action::RequestHint) => quiz.hint_shown = true,
        (AnswerPhase::Wrong, Action::RetryCurrent) => {
            quiz.answers[index] = None;
            quiz.phase = AnswerPhase::Idle;
        }
        (AnswerPhase::Wrong, Action::GoToReview) => {
            let Some(word) = quiz.current_word().map(str::to_string) else {
                return;
            };
            if let Some(suspended) = state.input_quiz.take() {
                state.return_to = Some(ReturnTarget::InputQuiz(suspended));
            }
            state.progress.replace_review_queue(&[word]);
            set_mode(state, Mode::Review);
        }
        (phase, action) => {
            logger::log(&format!("Ignored {:?} while answer is {:?}", action, phase));
        }
    }
}

fn review_missed(state: &mut SessionState) {
    let Some(quiz) = state.input_quiz.take() else {
        return;
    };
    state.progress.replace_review_queue(&quiz.missed_words());
    state.return_to = Some(ReturnTarget::InputQuizSummary(quiz));
    set_mode(state, Mode::Review);
}

fn back_from_review<R: Rng + ?Sized>(
    state: &mut SessionState,
    ctx: &SessionContext<'_>,
    rng: &mut R,
) {
    match state.return_to.take() {
        Some(ReturnTarget::InputQuiz(quiz)) => {
            set_mode(state, Mode::InputQuiz);
            state.input_quiz = Some(quiz);
        }
        Some(ReturnTarget::InputQuizSummary(quiz)) => {
            set_mode(state, Mode::InputQuizSummary);
            state.input_quiz = Some(quiz);
        }
        None => enter_learn(state, ctx, rng),
    }
}

/// The word being taught in learn mode, if any remain.
pub fn current_item<'a>(state: &SessionState, ctx: &SessionContext<'a>) -> Option<&'a WordItem> {
    if state.mode != Mode::Learn {
        return None;
    }
    ctx.catalog.get(state.cursor)
}

/// First letter, then one blank per remaining letter; translation appended when known.
pub fn typed_hint(word: &str, catalog: &Catalog) -> String {
    let mut chars = word.chars();
    let mut hint = match chars.next() {
        Some(first) => first.to_uppercase().to_string(),
        None => String::new(),
    };
    for c in chars {
        hint.push(' ');
        hint.push(if c.is_whitespace() { ' ' } else { '_' });
    }
    hint.push_str(&format!(" ({} letters)", word.chars().count()));
    if let Some(translation) = catalog.lookup(word).and_then(|item| item.translation.as_ref()) {
        hint.push_str(&format!(" - {}", translation));
    }
    hint
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::Achievement;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn catalog(words: &[&str]) -> Catalog {
        Catalog::from_items(
            words
                .iter()
                .map(|w| WordItem::new(w, &format!("images/{}.png", w)))
                .collect(),
        )
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    }

    fn config(words_per_round: usize, daily_goal: usize) -> SessionConfig {
        SessionConfig {
            words_per_round,
            daily_goal,
            ..SessionConfig::default()
        }
    }

    fn advance_n(
        state: &mut SessionState,
        ctx: &SessionContext<'_>,
        rng: &mut StdRng,
        n: usize,
    ) -> Vec<Effect> {
        let mut effects = Vec::new();
        for _ in 0..n {
            effects.extend(handle_action(state, Action::Advance, ctx, rng));
        }
        effects
    }

    fn wrong_option(state: &SessionState) -> String {
        let quiz = state.quiz.as_ref().unwrap();
        quiz.options
            .iter()
            .find(|o| **o != quiz.correct_word)
            .unwrap()
            .clone()
    }

    #[test]
    fn test_learn_advance_records_word() {
        let words = catalog(&["cat", "dog", "bird", "fish"]);
        let cfg = config(3, 10);
        let ctx = SessionContext::new(&words, &cfg, today());
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = SessionState::new(today());

        handle_action(&mut state, Action::Advance, &ctx, &mut rng);

        assert_eq!(state.mode, Mode::Learn);
        assert_eq!(state.cursor, 1);
        assert_eq!(state.round_learned, vec!["cat"]);
        assert_eq!(state.progress.total_learned, 1);
        assert_eq!(state.progress.daily.learned(), 1);
        assert_eq!(state.progress.review_queue, vec!["cat"]);
    }

    #[test]
    fn test_quiz_question_is_built_on_entry() {
        let words = catalog(&["cat", "dog", "bird", "fish", "frog", "horse"]);
        let cfg = config(3, 10);
        let ctx = SessionContext::new(&words, &cfg, today());
        let mut rng = StdRng::seed_from_u64(2);
        let mut state = SessionState::new(today());

        advance_n(&mut state, &ctx, &mut rng, 3);

        let quiz = state.quiz.as_ref().unwrap();
        assert_eq!(state.mode, Mode::Quiz);
        assert!(state.round_learned.contains(&quiz.correct_word));
        assert_eq!(quiz.options.len(), 4);
        assert_eq!(
            quiz.options.iter().filter(|o| **o == quiz.correct_word).count(),
            1
        );
        assert!(!quiz.submitted);
    }

    #[test]
    fn test_second_choice_is_ignored() {
        let words = catalog(&["cat", "dog", "bird", "fish"]);
        let cfg = config(3, 10);
        let ctx = SessionContext::new(&words, &cfg, today());
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = SessionState::new(today());
        advance_n(&mut state, &ctx, &mut rng, 3);

        let correct = state.quiz.as_ref().unwrap().correct_word.clone();
        handle_action(&mut state, Action::SelectOption(correct.clone()), &ctx, &mut rng);
        let snapshot = state.clone();

        let effects = handle_action(&mut state, Action::SelectOption(correct), &ctx, &mut rng);
        assert!(effects.is_empty());
        assert_eq!(state, snapshot);
        assert_eq!(state.progress.score, 10);
    }

    #[test]
    fn test_option_not_offered_is_ignored() {
        let words = catalog(&["cat", "dog", "bird", "fish", "frog", "horse", "cow"]);
        let cfg = config(3, 10);
        let ctx = SessionContext::new(&words, &cfg, today());
        let mut rng = StdRng::seed_from_u64(4);
        let mut state = SessionState::new(today());
        advance_n(&mut state, &ctx, &mut rng, 3);

        handle_action(&mut state, Action::SelectOption("zebra".into()), &ctx, &mut rng);
        assert!(!state.quiz.as_ref().unwrap().submitted);
    }

    #[test]
    fn test_continue_after_wrong_starts_next_round() {
        let words = catalog(&["cat", "dog", "bird", "fish", "frog", "horse"]);
        let cfg = config(3, 10);
        let ctx = SessionContext::new(&words, &cfg, today());
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = SessionState::new(today());
        advance_n(&mut state, &ctx, &mut rng, 3);

        let wrong = wrong_option(&state);
        let correct = state.quiz.as_ref().unwrap().correct_word.clone();
        let effects = handle_action(&mut state, Action::SelectOption(wrong), &ctx, &mut rng);
        assert!(effects.contains(&Effect::Speak(SpeechRequest::normal(format!(
            "The correct word is {}",
            correct
        )))));
        assert_eq!(
            state.quiz.as_ref().unwrap().result,
            Some(QuizResult::Wrong)
        );

        handle_action(&mut state, Action::Advance, &ctx, &mut rng);
        assert_eq!(state.mode, Mode::Learn);
        assert_eq!(state.round, 2);
        assert!(state.round_learned.is_empty());
        assert!(state.quiz.is_none());
    }

    #[test]
    fn test_advance_before_answer_keeps_question() {
        let words = catalog(&["cat", "dog", "bird", "fish"]);
        let cfg = config(3, 10);
        let ctx = SessionContext::new(&words, &cfg, today());
        let mut rng = StdRng::seed_from_u64(6);
        let mut state = SessionState::new(today());
        advance_n(&mut state, &ctx, &mut rng, 3);
        let question = state.quiz.clone();

        handle_action(&mut state, Action::Advance, &ctx, &mut rng);
        assert_eq!(state.mode, Mode::Quiz);
        assert_eq!(state.quiz, question);
    }

    #[test]
    fn test_last_round_finishes_session() {
        let words = catalog(&["cat", "dog", "bird"]);
        let cfg = config(3, 10);
        let ctx = SessionContext::new(&words, &cfg, today());
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = SessionState::new(today());
        advance_n(&mut state, &ctx, &mut rng, 3);

        let correct = state.quiz.as_ref().unwrap().correct_word.clone();
        handle_action(&mut state, Action::SelectOption(correct), &ctx, &mut rng);
        handle_action(&mut state, Action::Advance, &ctx, &mut rng);

        assert_eq!(status(&state, &ctx), SessionStatus::AllRoundsCompleted);
        let snapshot = state.clone();
        handle_action(&mut state, Action::Advance, &ctx, &mut rng);
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_all_words_learned_is_terminal() {
        let words = catalog(&["cat", "dog", "bird", "fish"]);
        let cfg = config(3, 10);
        let ctx = SessionContext::new(&words, &cfg, today());
        let mut rng = StdRng::seed_from_u64(8);
        let mut state = SessionState::new(today());
        state.cursor = 4;

        assert_eq!(status(&state, &ctx), SessionStatus::AllWordsLearned);
        handle_action(&mut state, Action::Advance, &ctx, &mut rng);
        assert_eq!(state.cursor, 4);
    }

    #[test]
    fn test_daily_goal_takes_precedence_over_quiz() {
        let words = catalog(&["cat", "dog", "bird", "fish", "frog", "horse"]);
        let cfg = config(3, 3);
        let ctx = SessionContext::new(&words, &cfg, today());
        let mut rng = StdRng::seed_from_u64(9);
        let mut state = SessionState::new(today());

        let effects = advance_n(&mut state, &ctx, &mut rng, 3);

        assert_eq!(state.mode, Mode::GoalCompleted);
        assert!(state.progress.daily.goal_met);
        assert!(state.quiz.is_none());
        assert_eq!(state.round_learned.len(), 3);
        assert!(effects.contains(&Effect::DailyGoalReached));

        // Resuming the learn flow picks up the deferred quiz.
        handle_action(&mut state, Action::Advance, &ctx, &mut rng);
        assert_eq!(state.mode, Mode::Quiz);
        assert!(state.quiz.is_some());
    }

    #[test]
    fn test_daily_goal_fires_once_per_day() {
        let words = catalog(&["cat", "dog", "bird", "fish", "frog", "horse", "cow"]);
        let cfg = config(10, 2);
        let ctx = SessionContext::new(&words, &cfg, today());
        let mut rng = StdRng::seed_from_u64(10);
        let mut state = SessionState::new(today());

        advance_n(&mut state, &ctx, &mut rng, 2);
        assert_eq!(state.mode, Mode::GoalCompleted);
        handle_action(&mut state, Action::Advance, &ctx, &mut rng);
        assert_eq!(state.mode, Mode::Learn);

        advance_n(&mut state, &ctx, &mut rng, 2);
        assert_eq!(state.mode, Mode::Learn);
        assert_eq!(state.progress.daily.learned(), 4);
    }

    #[test]
    fn test_daily_rollover_on_next_action() {
        let words = catalog(&["cat", "dog", "bird", "fish"]);
        let cfg = config(3, 10);
        let ctx = SessionContext::new(&words, &cfg, today());
        let mut rng = StdRng::seed_from_u64(11);
        let mut state = SessionState::new(today());
        advance_n(&mut state, &ctx, &mut rng, 1);
        state.progress.daily.goal_met = true;

        let tomorrow = today().succ_opt().unwrap();
        let next_day = SessionContext::new(&words, &cfg, tomorrow);
        handle_action(&mut state, Action::ToggleTranslation, &next_day, &mut rng);

        assert_eq!(state.progress.daily.learned(), 0);
        assert!(!state.progress.daily.goal_met);
        assert_eq!(state.progress.daily.date, tomorrow);
        assert_eq!(state.progress.total_learned, 1);
    }

    #[test]
    fn test_streak_master_unlocks_after_three_correct() {
        let names: Vec<String> = (0..12).map(|i| format!("word{}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let words = catalog(&refs);
        let cfg = config(3, 100);
        let ctx = SessionContext::new(&words, &cfg, today());
        let mut rng = StdRng::seed_from_u64(12);
        let mut state = SessionState::new(today());

        let mut unlocked = Vec::new();
        for _ in 0..3 {
            advance_n(&mut state, &ctx, &mut rng, 3);
            let correct = state.quiz.as_ref().unwrap().correct_word.clone();
            let effects = handle_action(&mut state, Action::SelectOption(correct), &ctx, &mut rng);
            unlocked.extend(effects.into_iter().filter_map(|e| match e {
                Effect::AchievementUnlocked(a) => Some(a),
                _ => None,
            }));
            handle_action(&mut state, Action::Advance, &ctx, &mut rng);
        }

        assert_eq!(unlocked, vec![Achievement::StreakMaster]);
        assert_eq!(state.progress.streak, 3);
        assert_eq!(state.progress.high_score, 30);
    }

    #[test]
    fn test_review_from_answered_quiz_closes_round() {
        let words = catalog(&["cat", "dog", "bird", "fish", "frog", "horse"]);
        let cfg = config(3, 10);
        let ctx = SessionContext::new(&words, &cfg, today());
        let mut rng = StdRng::seed_from_u64(13);
        let mut state = SessionState::new(today());
        advance_n(&mut state, &ctx, &mut rng, 3);
        let wrong = wrong_option(&state);
        handle_action(&mut state, Action::SelectOption(wrong), &ctx, &mut rng);

        handle_action(&mut state, Action::GoToReview, &ctx, &mut rng);
        assert_eq!(state.mode, Mode::Review);
        assert!(state.quiz.is_none());
        assert_eq!(state.round, 2);

        handle_action(&mut state, Action::BackFromReview, &ctx, &mut rng);
        assert_eq!(state.mode, Mode::Learn);
    }

    #[test]
    fn test_review_from_unanswered_quiz_resumes_quiz() {
        let words = catalog(&["cat", "dog", "bird", "fish", "frog", "horse"]);
        let cfg = config(3, 10);
        let ctx = SessionContext::new(&words, &cfg, today());
        let mut rng = StdRng::seed_from_u64(14);
        let mut state = SessionState::new(today());
        advance_n(&mut state, &ctx, &mut rng, 3);

        handle_action(&mut state, Action::GoToReview, &ctx, &mut rng);
        assert!(state.quiz.is_none());
        handle_action(&mut state, Action::BackFromReview, &ctx, &mut rng);

        assert_eq!(state.mode, Mode::Quiz);
        assert_eq!(state.round, 1);
        assert!(!state.quiz.as_ref().unwrap().submitted);
    }

    fn goal_reached_session(
        words: &Catalog,
        cfg: &SessionConfig,
        rng: &mut StdRng,
    ) -> SessionState {
        let ctx = SessionContext::new(words, cfg, today());
        let mut state = SessionState::new(today());
        advance_n(&mut state, &ctx, rng, cfg.daily_goal);
        assert_eq!(state.mode, Mode::GoalCompleted);
        state
    }

    #[test]
    fn test_input_quiz_flow_to_summary() {
        let words = catalog(&["cat", "dog"]);
        let cfg = SessionConfig {
            input_quiz_length: 3,
            ..config(5, 2)
        };
        let ctx = SessionContext::new(&words, &cfg, today());
        let mut rng = StdRng::seed_from_u64(15);
        let mut state = goal_reached_session(&words, &cfg, &mut rng);

        handle_action(&mut state, Action::StartInputQuiz, &ctx, &mut rng);
        assert_eq!(state.mode, Mode::InputQuiz);
        assert_eq!(state.input_quiz.as_ref().unwrap().len(), 3);

        for _ in 0..3 {
            let word = state
                .input_quiz
                .as_ref()
                .unwrap()
                .current_word()
                .unwrap()
                .to_uppercase();
            handle_action(
                &mut state,
                Action::SubmitTypedAnswer(format!("  {}  ", word)),
                &ctx,
                &mut rng,
            );
            assert_eq!(
                state.input_quiz.as_ref().unwrap().phase,
                AnswerPhase::Correct
            );
            handle_action(&mut state, Action::Advance, &ctx, &mut rng);
        }

        assert_eq!(state.mode, Mode::InputQuizSummary);
        assert_eq!(state.input_quiz.as_ref().unwrap().score, 3);
    }

    #[test]
    fn test_wrong_answer_retry_and_hint() {
        let words = catalog(&["cat", "dog"]);
        let cfg = SessionConfig {
            input_quiz_length: 2,
            ..config(5, 2)
        };
        let ctx = SessionContext::new(&words, &cfg, today());
        let mut rng = StdRng::seed_from_u64(16);
        let mut state = goal_reached_session(&words, &cfg, &mut rng);
        handle_action(&mut state, Action::StartInputQuiz, &ctx, &mut rng);

        // Hints only after a wrong answer.
        handle_action(&mut state, Action::RequestHint, &ctx, &mut rng);
        assert!(!state.input_quiz.as_ref().unwrap().hint_shown);

        handle_action(&mut state, Action::SubmitTypedAnswer("zebra".into()), &ctx, &mut rng);
        let quiz = state.input_quiz.as_ref().unwrap();
        assert_eq!(quiz.phase, AnswerPhase::Wrong);
        assert_eq!(quiz.outcomes[0], Some(false));

        handle_action(&mut state, Action::RequestHint, &ctx, &mut rng);
        assert!(state.input_quiz.as_ref().unwrap().hint_shown);

        handle_action(&mut state, Action::RetryCurrent, &ctx, &mut rng);
        let quiz = state.input_quiz.as_ref().unwrap();
        assert_eq!(quiz.phase, AnswerPhase::Idle);
        assert!(quiz.answers[0].is_none());
        assert_eq!(quiz.index, 0);

        let word = quiz.current_word().unwrap().to_string();
        handle_action(&mut state, Action::SubmitTypedAnswer(word), &ctx, &mut rng);
        let quiz = state.input_quiz.as_ref().unwrap();
        assert_eq!(quiz.score, 1);
        assert_eq!(quiz.outcomes[0], Some(true));
    }

    #[test]
    fn test_blank_answer_is_ignored() {
        let words = catalog(&["cat", "dog"]);
        let cfg = config(5, 2);
        let ctx = SessionContext::new(&words, &cfg, today());
        let mut rng = StdRng::seed_from_u64(17);
        let mut state = goal_reached_session(&words, &cfg, &mut rng);
        handle_action(&mut state, Action::StartInputQuiz, &ctx, &mut rng);

        handle_action(&mut state, Action::SubmitTypedAnswer("   ".into()), &ctx, &mut rng);
        let quiz = state.input_quiz.as_ref().unwrap();
        assert_eq!(quiz.phase, AnswerPhase::Idle);
        assert!(quiz.answers[0].is_none());
    }

    #[test]
    fn test_skip_records_miss_and_summary_reviews_missed() {
        let words = catalog(&["cat", "dog"]);
        let cfg = SessionConfig {
            input_quiz_length: 2,
            ..config(5, 2)
        };
        let ctx = SessionContext::new(&words, &cfg, today());
        let mut rng = StdRng::seed_from_u64(18);
        let mut state = goal_reached_session(&words, &cfg, &mut rng);
        handle_action(&mut state, Action::StartInputQuiz, &ctx, &mut rng);

        let first = state.input_quiz.as_ref().unwrap().words[0].clone();
        handle_action(&mut state, Action::SubmitTypedAnswer("nope".into()), &ctx, &mut rng);
        handle_action(&mut state, Action::SkipToNext, &ctx, &mut rng);
        let second = state.input_quiz.as_ref().unwrap().current_word().unwrap().to_string();
        handle_action(&mut state, Action::SubmitTypedAnswer(second), &ctx, &mut rng);
        handle_action(&mut state, Action::Advance, &ctx, &mut rng);
        assert_eq!(state.mode, Mode::InputQuizSummary);

        handle_action(&mut state, Action::GoToReview, &ctx, &mut rng);
        assert_eq!(state.mode, Mode::Review);
        assert_eq!(state.progress.review_queue, vec![first]);
        assert!(matches!(
            state.return_to,
            Some(ReturnTarget::InputQuizSummary(_))
        ));

        handle_action(&mut state, Action::BackFromReview, &ctx, &mut rng);
        assert_eq!(state.mode, Mode::InputQuizSummary);
        assert!(state.return_to.is_none());
        assert!(state.input_quiz.is_some());

        // Continuing to learn drops the finished typed quiz.
        handle_action(&mut state, Action::Advance, &ctx, &mut rng);
        assert_eq!(state.mode, Mode::Learn);
        assert!(state.input_quiz.is_none());
    }

    #[test]
    fn test_review_word_detour_restores_typed_quiz() {
        let words = catalog(&["cat", "dog"]);
        let cfg = SessionConfig {
            input_quiz_length: 2,
            ..config(5, 2)
        };
        let ctx = SessionContext::new(&words, &cfg, today());
        let mut rng = StdRng::seed_from_u64(19);
        let mut state = goal_reached_session(&words, &cfg, &mut rng);
        handle_action(&mut state, Action::StartInputQuiz, &ctx, &mut rng);

        let current = state.input_quiz.as_ref().unwrap().current_word().unwrap().to_string();
        handle_action(&mut state, Action::SubmitTypedAnswer("nope".into()), &ctx, &mut rng);
        let suspended = state.input_quiz.clone();

        handle_action(&mut state, Action::GoToReview, &ctx, &mut rng);
        assert_eq!(state.mode, Mode::Review);
        assert!(state.input_quiz.is_none());
        assert_eq!(state.progress.review_queue, vec![current]);

        handle_action(&mut state, Action::BackFromReview, &ctx, &mut rng);
        assert_eq!(state.mode, Mode::InputQuiz);
        assert_eq!(state.input_quiz, suspended);
        assert!(state.return_to.is_none());
    }

    #[test]
    fn test_stale_quiz_word_is_skipped_as_miss() {
        let words = catalog(&["cat", "dog"]);
        let cfg = config(5, 2);
        let ctx = SessionContext::new(&words, &cfg, today());
        let mut rng = StdRng::seed_from_u64(20);
        let mut state = SessionState::new(today());
        state.mode = Mode::InputQuiz;
        state.input_quiz = Some(InputQuizState::new(vec![
            "cat".to_string(),
            "unicorn".to_string(),
            "dog".to_string(),
        ]));

        handle_action(&mut state, Action::SubmitTypedAnswer("cat".into()), &ctx, &mut rng);
        handle_action(&mut state, Action::Advance, &ctx, &mut rng);

        let quiz = state.input_quiz.as_ref().unwrap();
        assert_eq!(quiz.index, 2);
        assert_eq!(quiz.outcomes[1], Some(false));
        assert_eq!(quiz.current_word(), Some("dog"));
    }

    #[test]
    fn test_end_and_restart() {
        let words = catalog(&["cat", "dog"]);
        let cfg = config(5, 2);
        let ctx = SessionContext::new(&words, &cfg, today());
        let mut rng = StdRng::seed_from_u64(21);
        let mut state = goal_reached_session(&words, &cfg, &mut rng);

        handle_action(&mut state, Action::EndSession, &ctx, &mut rng);
        assert_eq!(status(&state, &ctx), SessionStatus::Ended);
        handle_action(&mut state, Action::StartInputQuiz, &ctx, &mut rng);
        assert_eq!(state.mode, Mode::GoalCompleted);

        handle_action(&mut state, Action::Restart, &ctx, &mut rng);
        assert_eq!(state, SessionState::new(today()));
    }

    #[test]
    fn test_inapplicable_actions_are_ignored() {
        let words = catalog(&["cat", "dog", "bird", "fish"]);
        let cfg = config(3, 10);
        let ctx = SessionContext::new(&words, &cfg, today());
        let mut rng = StdRng::seed_from_u64(22);
        let mut state = SessionState::new(today());
        let snapshot = state.clone();

        for action in [
            Action::SelectOption("cat".into()),
            Action::SubmitTypedAnswer("cat".into()),
            Action::RequestHint,
            Action::BackFromReview,
            Action::StartInputQuiz,
            Action::SkipToNext,
            Action::RetryCurrent,
            Action::EndSession,
        ] {
            let effects = handle_action(&mut state, action, &ctx, &mut rng);
            assert!(effects.is_empty());
        }
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_toggle_translation() {
        let words = catalog(&["cat"]);
        let cfg = config(3, 10);
        let ctx = SessionContext::new(&words, &cfg, today());
        let mut rng = StdRng::seed_from_u64(23);
        let mut state = SessionState::new(today());

        handle_action(&mut state, Action::ToggleTranslation, &ctx, &mut rng);
        assert!(state.show_translation);
        handle_action(&mut state, Action::ToggleTranslation, &ctx, &mut rng);
        assert!(!state.show_translation);
    }

    #[test]
    fn test_toggle_translation_in_review_survives_back() {
        let words = catalog(&["cat", "dog"]);
        let cfg = config(3, 10);
        let ctx = SessionContext::new(&words, &cfg, today());
        let mut rng = StdRng::seed_from_u64(29);
        let mut state = SessionState::new(today());

        handle_action(&mut state, Action::GoToReview, &ctx, &mut rng);
        assert_eq!(state.mode, Mode::Review);
        handle_action(&mut state, Action::ToggleTranslation, &ctx, &mut rng);
        assert!(state.show_translation);
        assert_eq!(state.mode, Mode::Review);

        handle_action(&mut state, Action::BackFromReview, &ctx, &mut rng);
        assert_eq!(state.mode, Mode::Learn);
        assert!(state.show_translation);

        state.mode = Mode::GoalCompleted;
        handle_action(&mut state, Action::ToggleTranslation, &ctx, &mut rng);
        assert!(state.show_translation);
    }

    #[test]
    fn test_typed_hint() {
        let mut dog = WordItem::new("dog", "dog.png");
        dog.translation = Some("Hund".to_string());
        let words = Catalog::from_items(vec![dog, WordItem::new("ice cream", "i.png")]);

        assert_eq!(typed_hint("dog", &words), "D _ _ (3 letters) - Hund");
        assert_eq!(typed_hint("ice cream", &words), "I _ _   _ _ _ _ _ (9 letters)");
    }
}
