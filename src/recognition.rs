//! Pronunciation practice against an external speech recognizer.
//!
//! Recognition is opaque: something listens and returns a transcript. The
//! outcome is feedback only and never touches session state.

use crate::catalog::same_word;
use crate::error::RecognitionError;
use crate::logger;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

pub trait Recognizer {
    fn listen(&self) -> Result<String, RecognitionError>;
}

/// Used when no recognizer is configured.
pub struct NoRecognizer;

impl Recognizer for NoRecognizer {
    fn listen(&self) -> Result<String, RecognitionError> {
        Err(RecognitionError::Unavailable(
            "no recognizer configured (set VOCAB_RECOGNIZER_CMD)".to_string(),
        ))
    }
}

/// Seconds the recognizer gets to hear and transcribe one phrase.
pub const LISTEN_TIMEOUT: Duration = Duration::from_secs(10);
const POLL_STEP: Duration = Duration::from_millis(50);

/// Runs a command that records from the microphone and prints what it heard.
/// A command still running after the timeout is killed.
pub struct CommandRecognizer {
    command_line: String,
    timeout: Duration,
}

impl CommandRecognizer {
    pub fn new(command_line: impl Into<String>) -> Self {
        Self {
            command_line: command_line.into(),
            timeout: LISTEN_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Recognizer for CommandRecognizer {
    fn listen(&self) -> Result<String, RecognitionError> {
        let mut parts = self.command_line.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| RecognitionError::Unavailable("empty recognizer command".to_string()))?;
        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| RecognitionError::Unavailable(format!("{}: {}", program, e)))?;

        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(_)) => break,
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    logger::log(&format!(
                        "Recognizer {} killed after {:?}",
                        program, self.timeout
                    ));
                    return Err(RecognitionError::Unavailable(format!(
                        "{} did not answer within {}s",
                        program,
                        self.timeout.as_secs_f32()
                    )));
                }
                Ok(None) => thread::sleep(POLL_STEP),
                Err(e) => {
                    let _ = child.kill();
                    return Err(RecognitionError::Unavailable(format!("{}: {}", program, e)));
                }
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| RecognitionError::Unavailable(format!("{}: {}", program, e)))?;
        if !output.status.success() {
            return Err(RecognitionError::Unavailable(format!(
                "{} exited with {}",
                program, output.status
            )));
        }
        let heard = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if heard.is_empty() {
            return Err(RecognitionError::NotUnderstood);
        }
        Ok(heard)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PronunciationOutcome {
    Matched { heard: String },
    Mismatch { heard: String },
    NotUnderstood,
    Unavailable(String),
}

impl PronunciationOutcome {
    pub fn message(&self) -> String {
        match self {
            PronunciationOutcome::Matched { .. } => "Good job, pronunciation matched!".to_string(),
            PronunciationOutcome::Mismatch { heard } => {
                format!("Detected '{}'. Try again.", heard)
            }
            PronunciationOutcome::NotUnderstood => {
                "Sorry, could not understand the audio.".to_string()
            }
            PronunciationOutcome::Unavailable(reason) => {
                format!("Speech recognition is unavailable: {}", reason)
            }
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self, PronunciationOutcome::Matched { .. })
    }
}

pub fn check_pronunciation(recognizer: &dyn Recognizer, word: &str) -> PronunciationOutcome {
    let outcome = match recognizer.listen() {
        Ok(heard) if same_word(&heard, word) => PronunciationOutcome::Matched { heard },
        Ok(heard) => PronunciationOutcome::Mismatch { heard },
        Err(RecognitionError::NotUnderstood) => PronunciationOutcome::NotUnderstood,
        Err(RecognitionError::Unavailable(reason)) => PronunciationOutcome::Unavailable(reason),
    };
    logger::log(&format!("Pronunciation check for `{}`: {:?}", word, outcome));
    outcome
}
