pub mod audio;
pub mod catalog;
pub mod config;
pub mod error;
pub mod input;
pub mod logger;
pub mod models;
pub mod progress;
pub mod recognition;
pub mod selection;
pub mod session;
pub mod ui;
pub mod utils;

#[cfg(test)]
mod scenario_tests;

// Re-exports for convenience
pub use audio::{AudioBackend, AudioChannel, AudioRequest, CommandBackend, spawn_audio_worker};
pub use catalog::{Catalog, WordItem};
pub use config::{AppConfig, SessionConfig};
pub use error::{AdapterIoError, CatalogError, RecognitionError};
pub use input::{AnswerBuffer, KeyOutcome, map_key};
pub use models::{Action, AudioCue, Effect, Mode, SessionState, SpeechRequest};
pub use progress::{Achievement, Progress};
pub use recognition::{
    CommandRecognizer, NoRecognizer, PronunciationOutcome, Recognizer, check_pronunciation,
};
pub use session::{SessionContext, SessionStatus, handle_action, status};
pub use ui::Screen;
