//! Fixed-duration audio capture over a bounded channel.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, SyncSender, TrySendError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::{CaptureError, CaptureResult};

/// Recording parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureConfig {
    /// Samples per second
    pub sample_rate: u32,
    /// Frames per delivered block
    pub block_size: usize,
    pub channels: u16,
    /// How long a recording lasts
    pub duration: Duration,
    /// Blocks buffered between source and consumer before the source blocks
    pub queue_capacity: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16_000,
            block_size: 8_000,
            channels: 1,
            duration: Duration::from_secs(5),
            queue_capacity: 32,
        }
    }
}

impl CaptureConfig {
    /// Bytes in one block of 16-bit samples.
    pub fn block_bytes(&self) -> usize {
        self.block_size * usize::from(self.channels) * 2
    }
}

enum AudioEvent {
    Block(Vec<u8>),
    Status(String),
}

/// Producer end of a recording.
#[derive(Clone)]
pub struct FrameSink {
    tx: SyncSender<AudioEvent>,
}

impl FrameSink {
    /// Deliver one block of little-endian 16-bit PCM, waiting while the
    /// queue is full.
    ///
    /// Returns `false` once the recording is over; the source should stop.
    pub fn push(&self, block: Vec<u8>) -> bool {
        self.tx.send(AudioEvent::Block(block)).is_ok()
    }

    /// Report a non-fatal device status message.
    pub fn status(&self, message: impl Into<String>) -> bool {
        self.tx.send(AudioEvent::Status(message.into())).is_ok()
    }

    /// Deliver one block without waiting.
    pub fn try_push(&self, block: Vec<u8>) -> Delivery {
        self.try_send(AudioEvent::Block(block))
    }

    /// Report a status message without waiting.
    pub fn try_status(&self, message: impl Into<String>) -> Delivery {
        self.try_send(AudioEvent::Status(message.into()))
    }

    fn try_send(&self, event: AudioEvent) -> Delivery {
        match self.tx.try_send(event) {
            Ok(()) => Delivery::Queued,
            Err(TrySendError::Full(_)) => Delivery::QueueFull,
            Err(TrySendError::Disconnected(_)) => Delivery::Closed,
        }
    }
}

/// Result of [`FrameSink::try_push`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Queued,
    /// The consumer is behind; the block was dropped
    QueueFull,
    /// The recording is over
    Closed,
}

/// Feeds a [`FrameSink`] from a device callback thread.
///
/// Callbacks must not block, so a full queue drops the block and counts it
/// as an overflow. [`CallbackBridge::wait`] parks the source thread until
/// the recording closes.
#[derive(Clone)]
pub struct CallbackBridge {
    sink: FrameSink,
    closed: Arc<AtomicBool>,
    dropped: Arc<AtomicUsize>,
}

impl CallbackBridge {
    pub fn new(sink: &FrameSink) -> Self {
        Self {
            sink: sink.clone(),
            closed: Arc::new(AtomicBool::new(false)),
            dropped: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Hand over one callback buffer.
    pub fn deliver(&self, block: Vec<u8>) {
        if self.is_closed() {
            return;
        }
        match self.sink.try_push(block) {
            Delivery::Queued => {}
            Delivery::QueueFull => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
            }
            Delivery::Closed => self.closed.store(true, Ordering::Relaxed),
        }
    }

    /// Forward a device error from the error callback.
    pub fn fail(&self, message: impl Into<String>) {
        match self.sink.try_status(message) {
            Delivery::Queued => {}
            Delivery::QueueFull => warn!("audio queue full, device error not reported"),
            Delivery::Closed => self.closed.store(true, Ordering::Relaxed),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Relaxed)
    }

    /// Blocks dropped because the queue was full.
    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Park until the recording closes or `limit` elapses, then report any
    /// overflow as a status message.
    pub fn wait(&self, limit: Duration) {
        let started = Instant::now();
        while !self.is_closed() && started.elapsed() < limit {
            thread::sleep(BRIDGE_POLL);
        }
        let dropped = self.dropped();
        if dropped > 0 {
            self.sink
                .status(format!("input overflow: {} block(s) dropped", dropped));
        }
    }
}

const BRIDGE_POLL: Duration = Duration::from_millis(10);

/// Something that produces audio blocks, such as a device callback or a file.
pub trait AudioSource: Send {
    /// Push blocks into `sink` until the source runs dry or `push` returns
    /// `false`.
    fn stream(&mut self, sink: &FrameSink) -> CaptureResult<()>;
}

/// Audio collected by [`record`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recording {
    /// Raw little-endian 16-bit PCM
    pub pcm: Vec<u8>,
    pub blocks: usize,
    /// Device status messages seen while recording
    pub warnings: Vec<String>,
    pub elapsed: Duration,
}

impl Recording {
    pub fn is_empty(&self) -> bool {
        self.pcm.is_empty()
    }

    /// Number of 16-bit samples captured.
    pub fn sample_count(&self) -> usize {
        self.pcm.len() / 2
    }
}

/// Record from `source` until `config.duration` elapses or the source ends.
///
/// The source runs on its own thread and feeds a channel bounded by
/// `config.queue_capacity`; this thread drains it against a fixed deadline.
pub fn record<S: AudioSource>(source: &mut S, config: &CaptureConfig) -> CaptureResult<Recording> {
    let (tx, rx) = mpsc::sync_channel(config.queue_capacity.max(1));
    let started = Instant::now();
    let deadline = started.checked_add(config.duration).ok_or_else(|| {
        CaptureError::InvalidConfig(format!(
            "recording duration of {}s is too long",
            config.duration.as_secs()
        ))
    })?;

    info!(
        duration_ms = config.duration.as_millis() as u64,
        sample_rate = config.sample_rate,
        "recording started"
    );

    thread::scope(|scope| -> CaptureResult<Recording> {
        let producer = scope.spawn(move || source.stream(&FrameSink { tx }));

        let mut recording = Recording::default();
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match rx.recv_timeout(remaining) {
                Ok(AudioEvent::Block(block)) => {
                    recording.blocks += 1;
                    recording.pcm.extend_from_slice(&block);
                }
                Ok(AudioEvent::Status(message)) => {
                    warn!(status = %message, "audio device status");
                    recording.warnings.push(message);
                }
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => {
                    debug!("audio source finished before deadline");
                    break;
                }
            }
        }

        // Unblocks a producer waiting on a full queue.
        drop(rx);
        recording.elapsed = started.elapsed();

        producer.join().map_err(|_| CaptureError::SourcePanicked)??;

        info!(
            blocks = recording.blocks,
            bytes = recording.pcm.len(),
            "recording stopped"
        );
        Ok(recording)
    })
}

/// Replays in-memory PCM blocks, optionally paced like a device callback.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    blocks: VecDeque<Vec<u8>>,
    statuses: Vec<String>,
    pace: Option<Duration>,
}

impl MemorySource {
    pub fn new(blocks: Vec<Vec<u8>>) -> Self {
        Self {
            blocks: blocks.into(),
            statuses: Vec::new(),
            pace: None,
        }
    }

    /// Split contiguous PCM into blocks of `block_bytes`.
    pub fn from_pcm(pcm: &[u8], block_bytes: usize) -> Self {
        Self::new(pcm.chunks(block_bytes.max(1)).map(<[u8]>::to_vec).collect())
    }

    /// Wait this long before each block.
    pub fn paced(mut self, interval: Duration) -> Self {
        self.pace = Some(interval);
        self
    }

    /// Emit a status message before the first block.
    pub fn with_status(mut self, message: &str) -> Self {
        self.statuses.push(message.to_string());
        self
    }
}

impl AudioSource for MemorySource {
    fn stream(&mut self, sink: &FrameSink) -> CaptureResult<()> {
        for message in self.statuses.drain(..) {
            if !sink.status(message) {
                return Ok(());
            }
        }
        while let Some(block) = self.blocks.pop_front() {
            if let Some(interval) = self.pace {
                thread::sleep(interval);
            }
            if !sink.push(block) {
                break;
            }
        }
        Ok(())
    }
}
