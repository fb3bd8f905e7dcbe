//! Speech-to-text seam and recognizer output parsing.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::thread;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::capture::{record, AudioSource, CaptureConfig};
use crate::{CaptureError, CaptureResult};

/// Outcome of running speech-to-text over one recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum Recognition {
    /// Speech was recognized
    Text(String),
    /// The recognizer ran but heard nothing intelligible
    Unrecognized,
    /// The recognizer could not process the audio
    Failed,
}

impl Recognition {
    /// Transcript to feed the symptom matcher; empty unless recognized.
    pub fn transcript(&self) -> &str {
        match self {
            Recognition::Text(text) => text,
            Recognition::Unrecognized | Recognition::Failed => "",
        }
    }

    /// User-facing status line.
    pub fn message(&self) -> String {
        match self {
            Recognition::Text(text) => format!("Recognized: '{}'", text),
            Recognition::Unrecognized => "Could not clearly recognize speech.".to_string(),
            Recognition::Failed => "Audio processing failed.".to_string(),
        }
    }
}

/// Anything that can turn raw 16-bit PCM into text.
pub trait SpeechToText {
    fn transcribe(&mut self, pcm: &[u8], sample_rate: u32) -> CaptureResult<Recognition>;
}

/// A speech model directory on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechModel {
    dir: PathBuf,
}

impl SpeechModel {
    /// Locate the model directory.
    pub fn locate<P: AsRef<Path>>(dir: P) -> CaptureResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(CaptureError::ModelNotFound(dir.display().to_string()));
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Final result object emitted by the recognizer.
#[derive(Debug, Clone, Deserialize)]
struct RecognizerOutput {
    #[serde(default)]
    text: String,
}

/// Parse recognizer JSON such as `{"text": "i have a headache"}`.
///
/// Text before the first `{` or after the last `}` is ignored.
pub fn parse_recognizer_result(output: &str) -> CaptureResult<Recognition> {
    let json_start = output.find('{').ok_or_else(|| {
        CaptureError::InvalidFormat("No JSON object found in recognizer output".into())
    })?;
    let json_end = output.rfind('}').ok_or_else(|| {
        CaptureError::InvalidFormat("No closing brace found in recognizer output".into())
    })?;
    if json_end < json_start {
        return Err(CaptureError::InvalidFormat(
            "Closing brace precedes opening brace".into(),
        ));
    }

    let parsed: RecognizerOutput = serde_json::from_str(&output[json_start..=json_end])?;
    let text = parsed.text.trim();

    if text.is_empty() {
        Ok(Recognition::Unrecognized)
    } else {
        Ok(Recognition::Text(text.to_string()))
    }
}

/// Runs an external recognizer program.
///
/// The program is invoked as `<program> [args..] <model_dir> <sample_rate>`,
/// receives raw PCM on stdin and must print recognizer JSON on stdout.
pub struct ExternalRecognizer {
    program: PathBuf,
    args: Vec<String>,
    model: SpeechModel,
}

impl ExternalRecognizer {
    pub fn new<P: Into<PathBuf>>(program: P, model: SpeechModel) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            model,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl SpeechToText for ExternalRecognizer {
    fn transcribe(&mut self, pcm: &[u8], sample_rate: u32) -> CaptureResult<Recognition> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(self.model.dir())
            .arg(sample_rate.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // stdin is written on its own thread while stdout is drained here.
        let stdin = child.stdin.take();
        let output = thread::scope(|scope| -> CaptureResult<Output> {
            let writer = scope.spawn(move || -> std::io::Result<()> {
                if let Some(mut stdin) = stdin {
                    stdin.write_all(pcm)?;
                }
                Ok(())
            });
            let output = child.wait_with_output()?;
            if let Ok(Err(e)) = writer.join() {
                // A child that exits without reading all input closes the pipe.
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
            Ok(output)
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(status = %output.status, stderr = %stderr.trim(), "recognizer exited with error");
            return Ok(Recognition::Failed);
        }

        parse_recognizer_result(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Recognizer returning a fixed transcript, for testing without a model.
#[derive(Debug, Clone, Default)]
pub struct MockRecognizer {
    transcript: String,
}

impl MockRecognizer {
    pub fn new(transcript: &str) -> Self {
        Self {
            transcript: transcript.to_string(),
        }
    }
}

impl SpeechToText for MockRecognizer {
    fn transcribe(&mut self, pcm: &[u8], _sample_rate: u32) -> CaptureResult<Recognition> {
        if pcm.is_empty() {
            return Ok(Recognition::Failed);
        }
        let json = serde_json::json!({ "text": self.transcript }).to_string();
        parse_recognizer_result(&json)
    }
}

/// Record one utterance and transcribe it.
pub fn dictate<S, R>(
    source: &mut S,
    recognizer: &mut R,
    config: &CaptureConfig,
) -> CaptureResult<Recognition>
where
    S: AudioSource,
    R: SpeechToText,
{
    let recording = record(source, config)?;
    if recording.is_empty() {
        info!("no audio captured");
        return Ok(Recognition::Failed);
    }

    let recognition = recognizer.transcribe(&recording.pcm, config.sample_rate)?;
    info!(recognized = !recognition.transcript().is_empty(), "dictation complete");
    Ok(recognition)
}
