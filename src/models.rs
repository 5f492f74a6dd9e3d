use crate::progress::{Achievement, Progress};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The interaction mode the session is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Learn,
    Quiz,
    Review,
    GoalCompleted,
    InputQuiz,
    InputQuizSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizResult {
    Correct,
    Wrong,
}

/// One multiple-choice question. Lives only while the session is in `Mode::Quiz`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizState {
    pub correct_word: String,
    pub options: Vec<String>,
    pub submitted: bool,
    pub result: Option<QuizResult>,
    pub selected: Option<String>,
}

impl QuizState {
    pub fn new(correct_word: String, options: Vec<String>) -> Self {
        Self {
            correct_word,
            options,
            submitted: false,
            result: None,
            selected: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerPhase {
    Idle,
    Correct,
    Wrong,
}

/// The typed-recall round that follows a completed daily goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputQuizState {
    pub words: Vec<String>,
    pub index: usize,
    pub answers: Vec<Option<String>>,
    pub outcomes: Vec<Option<bool>>,
    pub score: usize,
    pub hint_shown: bool,
    pub phase: AnswerPhase,
}

impl InputQuizState {
    pub fn new(words: Vec<String>) -> Self {
        let len = words.len();
        Self {
            words,
            index: 0,
            answers: vec![None; len],
            outcomes: vec![None; len],
            score: 0,
            hint_shown: false,
            phase: AnswerPhase::Idle,
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn current_word(&self) -> Option<&str> {
        self.words.get(self.index).map(String::as_str)
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.words.len()
    }

    /// Moves to the next word and resets per-question UI state.
    pub fn advance(&mut self) {
        if self.index < self.words.len() {
            self.index += 1;
        }
        self.phase = AnswerPhase::Idle;
        self.hint_shown = false;
    }

    /// Words answered incorrectly, first occurrence order, without repeats.
    pub fn missed_words(&self) -> Vec<String> {
        let mut missed: Vec<String> = Vec::new();
        for (word, outcome) in self.words.iter().zip(&self.outcomes) {
            if *outcome == Some(false) && !missed.iter().any(|m| m == word) {
                missed.push(word.clone());
            }
        }
        missed
    }
}

/// Where `BackFromReview` goes when review was entered as a detour.
/// Holds the suspended typed-quiz so it resumes exactly where it was left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "state", rename_all = "snake_case")]
pub enum ReturnTarget {
    InputQuiz(InputQuizState),
    InputQuizSummary(InputQuizState),
}

/// The single mutable aggregate of one learning session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub mode: Mode,
    pub cursor: usize,
    pub round: usize,
    pub round_learned: Vec<String>,
    pub progress: Progress,
    pub quiz: Option<QuizState>,
    pub input_quiz: Option<InputQuizState>,
    pub return_to: Option<ReturnTarget>,
    pub show_translation: bool,
    pub ended: bool,
}

impl SessionState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            mode: Mode::Learn,
            cursor: 0,
            round: 1,
            round_learned: Vec::new(),
            progress: Progress::new(today),
            quiz: None,
            input_quiz: None,
            return_to: None,
            show_translation: false,
            ended: false,
        }
    }
}

/// Discrete user intents reported by the presentation adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Advance,
    SelectOption(String),
    SubmitTypedAnswer(String),
    RequestHint,
    GoToReview,
    BackFromReview,
    StartInputQuiz,
    SkipToNext,
    RetryCurrent,
    ToggleTranslation,
    Restart,
    EndSession,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
    pub slow: bool,
}

impl SpeechRequest {
    pub fn normal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            slow: false,
        }
    }

    pub fn slow(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            slow: true,
        }
    }
}

/// Pre-recorded sounds, looked up by name in the cue directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioCue {
    Correct,
    Wrong,
    GoalCompleted,
    AchievementUnlocked,
}

impl AudioCue {
    pub fn name(&self) -> &'static str {
        match self {
            AudioCue::Correct => "correct",
            AudioCue::Wrong => "wrong",
            AudioCue::GoalCompleted => "goal_completed",
            AudioCue::AchievementUnlocked => "achievement",
        }
    }
}

/// Side effects requested by a transition. The adapter performs them best-effort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Speak(SpeechRequest),
    Cue(AudioCue),
    AchievementUnlocked(Achievement),
    DailyGoalReached,
}
