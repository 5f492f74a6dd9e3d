use crate::logger::DEFAULT_LOG_FILE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const WORDS_PER_ROUND: usize = 3;
pub const DAILY_GOAL: usize = 10;
pub const INPUT_QUIZ_LENGTH: usize = 10;
pub const DISTRACTOR_COUNT: usize = 3;
pub const POINTS_PER_CORRECT: u32 = 10;
pub const DEFAULT_WORDS_FILE: &str = "words.json";
pub const DEFAULT_SPEECH_COMMAND: &str = "espeak-ng";
pub const DEFAULT_CUE_PLAYER: &str = "aplay";

/// Tunables of the learning flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub words_per_round: usize,
    pub daily_goal: usize,
    pub input_quiz_length: usize,
    pub distractor_count: usize,
    pub points_per_correct: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            words_per_round: WORDS_PER_ROUND,
            daily_goal: DAILY_GOAL,
            input_quiz_length: INPUT_QUIZ_LENGTH,
            distractor_count: DISTRACTOR_COUNT,
            points_per_correct: POINTS_PER_CORRECT,
        }
    }
}

impl SessionConfig {
    /// `max(1, total / words_per_round)`
    pub fn total_rounds(&self, total_words: usize) -> usize {
        (total_words / self.words_per_round.max(1)).max(1)
    }

    // Zero would stall rounds and goals forever.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.words_per_round == 0 {
            self.words_per_round = defaults.words_per_round;
        }
        if self.daily_goal == 0 {
            self.daily_goal = defaults.daily_goal;
        }
        if self.input_quiz_length == 0 {
            self.input_quiz_length = defaults.input_quiz_length;
        }
        self
    }
}

/// Everything the terminal app needs to start.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub words_file: PathBuf,
    pub log_file: PathBuf,
    pub speech_command: Option<String>,
    /// Extra arguments for slow speech; espeak gets `-s 110` when unset.
    pub speech_slow_args: Option<String>,
    pub cue_dir: Option<PathBuf>,
    pub cue_player: String,
    pub recognizer_command: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            words_file: PathBuf::from(DEFAULT_WORDS_FILE),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            speech_command: Some(DEFAULT_SPEECH_COMMAND.to_string()),
            speech_slow_args: None,
            cue_dir: None,
            cue_player: DEFAULT_CUE_PLAYER.to_string(),
            recognizer_command: None,
        }
    }
}

impl AppConfig {
    /// Defaults, then `VOCAB_CONFIG` file, then `VOCAB_*` variables, then the first argument.
    pub fn resolve(args: &[String]) -> Self {
        let config = match std::env::var("VOCAB_CONFIG") {
            Ok(path) => Self::from_file(&path).unwrap_or_default(),
            Err(_) => Self::default(),
        };
        let mut config = config.with_overrides(|key| std::env::var(key).ok());
        if let Some(path) = args.get(1) {
            config.words_file = PathBuf::from(path);
        }
        config.session = config.session.sanitized();
        config
    }

    fn from_file(path: &str) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup("VOCAB_WORDS_FILE") {
            self.words_file = PathBuf::from(path);
        }
        if let Some(path) = lookup("VOCAB_LOG_FILE") {
            self.log_file = PathBuf::from(path);
        }
        if let Some(goal) = lookup("VOCAB_DAILY_GOAL").and_then(|v| v.trim().parse().ok()) {
            self.session.daily_goal = goal;
        }
        if let Some(per_round) = lookup("VOCAB_WORDS_PER_ROUND").and_then(|v| v.trim().parse().ok())
        {
            self.session.words_per_round = per_round;
        }
        if let Some(cmd) = lookup("VOCAB_SPEECH_CMD") {
            self.speech_command = if cmd.trim().is_empty() { None } else { Some(cmd) };
        }
        if let Some(args) = lookup("VOCAB_SPEECH_SLOW_ARGS")
            && !args.trim().is_empty()
        {
            self.speech_slow_args = Some(args);
        }
        if let Some(dir) = lookup("VOCAB_CUE_DIR") {
            self.cue_dir = Some(PathBuf::from(dir));
        }
        if let Some(cmd) = lookup("VOCAB_RECOGNIZER_CMD")
            && !cmd.trim().is_empty()
        {
            self.recognizer_command = Some(cmd);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_total_rounds_integer_division_with_floor_of_one() {
        let config = SessionConfig::default();
        assert_eq!(config.total_rounds(3), 1);
        assert_eq!(config.total_rounds(7), 2);
        assert_eq!(config.total_rounds(2), 1);
        assert_eq!(config.total_rounds(0), 1);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("VOCAB_WORDS_FILE", "decks/animals.json"),
            ("VOCAB_DAILY_GOAL", "5"),
            ("VOCAB_WORDS_PER_ROUND", "oops"),
            ("VOCAB_SPEECH_CMD", ""),
            ("VOCAB_SPEECH_SLOW_ARGS", "-r 120"),
        ]
        .into_iter()
        .collect();

        let config =
            AppConfig::default().with_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.words_file, PathBuf::from("decks/animals.json"));
        assert_eq!(config.session.daily_goal, 5);
        assert_eq!(config.session.words_per_round, WORDS_PER_ROUND);
        assert!(config.speech_command.is_none());
        assert_eq!(config.speech_slow_args.as_deref(), Some("-r 120"));
        assert!(config.recognizer_command.is_none());
    }

    #[test]
    fn test_zero_values_fall_back_to_defaults() {
        let config = SessionConfig {
            words_per_round: 0,
            daily_goal: 0,
            ..SessionConfig::default()
        }
        .sanitized();
        assert_eq!(config.words_per_round, WORDS_PER_ROUND);
        assert_eq!(config.daily_goal, DAILY_GOAL);
    }

    #[test]
    fn test_partial_config_file_keeps_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"session": {"daily_goal": 4}, "cue_player": "paplay"}"#)
                .unwrap();
        assert_eq!(config.session.daily_goal, 4);
        assert_eq!(config.session.words_per_round, WORDS_PER_ROUND);
        assert_eq!(config.cue_player, "paplay");
        assert_eq!(config.words_file, PathBuf::from(DEFAULT_WORDS_FILE));
    }
}
