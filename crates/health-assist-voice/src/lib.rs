//! Audio capture and speech-to-text plumbing for symptom dictation.
//!
//! A recording runs for a fixed duration: an [`AudioSource`] pushes raw
//! 16-bit PCM blocks into a bounded channel while the caller drains it until
//! the deadline. The collected audio then goes to a [`SpeechToText`]
//! implementation, which yields a [`Recognition`]. Failed or empty
//! recognition degrades to an empty transcript.
//!
//! Live capture from the default input device is behind the `microphone`
//! feature.

pub mod capture;
#[cfg(feature = "microphone")]
pub mod microphone;
pub mod recognition;
pub mod wav;

pub use capture::*;
#[cfg(feature = "microphone")]
pub use microphone::MicrophoneSource;
pub use recognition::*;
pub use wav::*;

use thiserror::Error;

/// Capture and recognition errors.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Speech model not found at {0}. Unpack a model into this directory.")]
    ModelNotFound(String),

    #[error("Audio device error: {0}")]
    Device(String),

    #[error("Invalid capture configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid recognizer output: {0}")]
    InvalidFormat(String),

    #[error("Recognizer failed: {0}")]
    Recognizer(String),

    #[error("Audio source thread panicked")]
    SourcePanicked,
}

pub type CaptureResult<T> = Result<T, CaptureError>;
