use crate::error::AdapterIoError;
use crate::logger;
use crate::models::{AudioCue, Effect, SpeechRequest};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

const QUEUE_CAPACITY: usize = 16;
const SLOW_WORDS_PER_MINUTE: &str = "110";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioRequest {
    Speak(SpeechRequest),
    Cue(AudioCue),
}

impl AudioRequest {
    pub fn from_effect(effect: &Effect) -> Option<Self> {
        match effect {
            Effect::Speak(request) => Some(AudioRequest::Speak(request.clone())),
            Effect::Cue(cue) => Some(AudioRequest::Cue(*cue)),
            _ => None,
        }
    }
}

pub trait AudioBackend: Send {
    fn speak(&mut self, request: &SpeechRequest) -> Result<(), AdapterIoError>;
    fn play_cue(&mut self, cue: AudioCue) -> Result<(), AdapterIoError>;
}

/// Shells out to a text-to-speech program and an audio player.
#[derive(Debug, Clone)]
pub struct CommandBackend {
    pub speech_command: Option<String>,
    pub slow_args: Option<String>,
    pub cue_dir: Option<PathBuf>,
    pub cue_player: String,
}

impl CommandBackend {
    /// Arguments that slow the speech command down. Built in for espeak; any
    /// other program needs them configured.
    fn slow_args(&self, program: &str) -> Option<Vec<String>> {
        if let Some(args) = self.slow_args.as_deref() {
            return Some(args.split_whitespace().map(str::to_string).collect());
        }
        if program.contains("espeak") {
            return Some(vec!["-s".to_string(), SLOW_WORDS_PER_MINUTE.to_string()]);
        }
        None
    }
}

impl AudioBackend for CommandBackend {
    fn speak(&mut self, request: &SpeechRequest) -> Result<(), AdapterIoError> {
        let Some(command_line) = self.speech_command.as_deref() else {
            return Ok(());
        };
        let mut parts = command_line.split_whitespace();
        let Some(program) = parts.next() else {
            return Ok(());
        };

        let mut command = Command::new(program);
        command.args(parts);
        if request.slow {
            match self.slow_args(program) {
                Some(args) => {
                    command.args(args);
                }
                None => logger::log(&format!(
                    "{} has no slow mode configured (VOCAB_SPEECH_SLOW_ARGS), speaking at normal rate",
                    program
                )),
            }
        }
        let status = command
            .arg(&request.text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| AdapterIoError::Speech(format!("{}: {}", program, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(AdapterIoError::Speech(format!("{} exited with {}", program, status)))
        }
    }

    fn play_cue(&mut self, cue: AudioCue) -> Result<(), AdapterIoError> {
        let Some(dir) = self.cue_dir.as_ref() else {
            return Ok(());
        };
        let path = dir.join(format!("{}.wav", cue.name()));
        if !path.exists() {
            return Err(AdapterIoError::Cue {
                cue: cue.name().to_string(),
                reason: format!("{} not found", path.display()),
            });
        }
        let status = Command::new(&self.cue_player)
            .arg(&path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| AdapterIoError::Cue {
                cue: cue.name().to_string(),
                reason: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(AdapterIoError::Cue {
                cue: cue.name().to_string(),
                reason: format!("{} exited with {}", self.cue_player, status),
            })
        }
    }
}

/// Fire-and-forget handle the UI uses to queue sounds.
#[derive(Debug, Clone)]
pub struct AudioChannel {
    tx: Sender<AudioRequest>,
}

impl AudioChannel {
    pub fn request(&self, request: AudioRequest) -> Result<(), AdapterIoError> {
        match self.tx.try_send(request) {
            Ok(()) => Ok(()),
            // A backed-up queue just drops the sound.
            Err(TrySendError::Full(dropped)) => {
                logger::log(&format!("Audio queue full, dropped {:?}", dropped));
                Ok(())
            }
            Err(TrySendError::Disconnected(_)) => Err(AdapterIoError::WorkerGone),
        }
    }

    pub fn play_effects(&self, effects: &[Effect]) -> Result<(), AdapterIoError> {
        for request in effects.iter().filter_map(AudioRequest::from_effect) {
            self.request(request)?;
        }
        Ok(())
    }
}

/// Starts the playback thread. Failures are logged and reported on the returned
/// receiver; the session never waits on playback.
pub fn spawn_audio_worker(
    mut backend: Box<dyn AudioBackend>,
) -> std::io::Result<(AudioChannel, Receiver<AdapterIoError>, thread::JoinHandle<()>)> {
    let (tx, rx) = crossbeam_channel::bounded::<AudioRequest>(QUEUE_CAPACITY);
    let (failure_tx, failure_rx) = crossbeam_channel::unbounded::<AdapterIoError>();

    let handle = thread::Builder::new()
        .name("vocab-flashcards::audio_worker".to_string())
        .spawn(move || {
            for request in rx.iter() {
                let result = match &request {
                    AudioRequest::Speak(speech) => backend.speak(speech),
                    AudioRequest::Cue(cue) => backend.play_cue(*cue),
                };
                if let Err(e) = result {
                    logger::log(&format!("Audio failure for {:?}: {}", request, e));
                    let _ = failure_tx.send(e);
                }
            }
            logger::log("Audio channel disconnected, worker exiting");
        })?;

    Ok((AudioChannel { tx }, failure_rx, handle))
}
