use std::path::PathBuf;

/// Startup failure: without a catalog no session can begin.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("word list not found at {}", path.display())]
    Missing { path: PathBuf },

    #[error("failed to read word list {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("word list is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("record {index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("word `{0}` appears more than once")]
    DuplicateWord(String),

    #[error("word list contains no records")]
    Empty,
}

/// Rendering or playback failure in the terminal adapter. Never fatal to the session.
#[derive(Debug, thiserror::Error)]
pub enum AdapterIoError {
    #[error("terminal error: {0}")]
    Render(#[from] std::io::Error),

    #[error("speech playback failed: {0}")]
    Speech(String),

    #[error("audio cue `{cue}` failed: {reason}")]
    Cue { cue: String, reason: String },

    #[error("audio worker is not running")]
    WorkerGone,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecognitionError {
    #[error("speech recognition is unavailable: {0}")]
    Unavailable(String),

    #[error("could not understand the audio")]
    NotUnderstood,
}
