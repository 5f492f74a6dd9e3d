use crate::catalog::same_word;
use crate::logger;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const STREAK_MASTER_THRESHOLD: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    StreakMaster,
    WordCollector,
}

impl Achievement {
    pub fn id(&self) -> &'static str {
        match self {
            Achievement::StreakMaster => "streak_master",
            Achievement::WordCollector => "word_collector",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Achievement::StreakMaster => "Streak Master",
            Achievement::WordCollector => "Word Collector",
        }
    }
}

/// Per-calendar-day counters. Reset whenever the stored date is not today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub date: NaiveDate,
    pub words: Vec<String>,
    pub goal_met: bool,
}

impl DailyProgress {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            words: Vec::new(),
            goal_met: false,
        }
    }

    pub fn learned(&self) -> usize {
        self.words.len()
    }
}

/// Cumulative counters and the review queue.
///
/// Nothing here can lower `high_score` or `total_learned`, or drop an
/// achievement. Score and streak move only through [`Progress::record_quiz_result`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub score: u32,
    pub high_score: u32,
    pub streak: u32,
    pub total_learned: usize,
    pub learned: Vec<String>,
    pub achievements: Vec<Achievement>,
    pub daily: DailyProgress,
    pub review_queue: Vec<String>,
}

impl Progress {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            score: 0,
            high_score: 0,
            streak: 0,
            total_learned: 0,
            learned: Vec::new(),
            achievements: Vec::new(),
            daily: DailyProgress::new(today),
            review_queue: Vec::new(),
        }
    }

    /// Returns true if the word had never been learned in this session.
    pub fn record_learned(&mut self, word: &str) -> bool {
        if !self.daily.words.iter().any(|w| same_word(w, word)) {
            self.daily.words.push(word.to_string());
        }
        if self.learned.iter().any(|w| same_word(w, word)) {
            return false;
        }
        self.learned.push(word.to_string());
        self.total_learned += 1;
        true
    }

    pub fn record_quiz_result(&mut self, correct: bool, points: u32) {
        if correct {
            self.score += points;
            self.streak += 1;
            self.high_score = self.high_score.max(self.score);
        } else {
            self.streak = 0;
        }
        logger::log(&format!(
            "Quiz answer {}: score {} streak {} high {}",
            if correct { "correct" } else { "wrong" },
            self.score,
            self.streak,
            self.high_score
        ));
    }

    /// Appends to the review queue unless already present.
    pub fn enqueue_review(&mut self, word: &str) -> bool {
        if self.review_queue.iter().any(|w| same_word(w, word)) {
            return false;
        }
        self.review_queue.push(word.to_string());
        true
    }

    /// Replaces the queue wholesale, dropping repeats.
    pub fn replace_review_queue(&mut self, words: &[String]) {
        self.review_queue.clear();
        for word in words {
            self.enqueue_review(word);
        }
    }

    /// Unlocks achievements whose condition now holds; returns only the new ones.
    pub fn check_achievements(&mut self, total_words: usize) -> Vec<Achievement> {
        let mut unlocked = Vec::new();
        if self.streak >= STREAK_MASTER_THRESHOLD {
            unlocked.push(Achievement::StreakMaster);
        }
        if total_words > 0 && self.total_learned >= total_words {
            unlocked.push(Achievement::WordCollector);
        }
        unlocked.retain(|a| !self.achievements.contains(a));
        for achievement in &unlocked {
            logger::log(&format!("Achievement unlocked: {}", achievement.id()));
            self.achievements.push(*achievement);
        }
        unlocked
    }

    /// Resets the daily counters when `today` differs from the stored date.
    pub fn rollover_daily_if_needed(&mut self, today: NaiveDate) -> bool {
        if self.daily.date == today {
            return false;
        }
        logger::log(&format!(
            "Daily rollover {} -> {} ({} words learned)",
            self.daily.date,
            today,
            self.daily.learned()
        ));
        self.daily = DailyProgress::new(today);
        true
    }

    pub fn daily_goal_reached(&self, goal: usize) -> bool {
        self.daily.learned() >= goal
    }
}
