//! WAV file audio source.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use hound::{SampleFormat, WavReader};

use crate::capture::{AudioSource, CaptureConfig, FrameSink};
use crate::{CaptureError, CaptureResult};

/// Streams a 16-bit mono WAV file in fixed-size blocks.
pub struct WavSource {
    reader: WavReader<BufReader<File>>,
    block_size: usize,
}

impl WavSource {
    /// Open a recording that matches the capture format.
    pub fn open<P: AsRef<Path>>(path: P, config: &CaptureConfig) -> CaptureResult<Self> {
        let reader = WavReader::open(path)?;
        let spec = reader.spec();

        if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
            return Err(CaptureError::UnsupportedFormat(format!(
                "expected 16-bit integer samples, got {}-bit {:?}",
                spec.bits_per_sample, spec.sample_format
            )));
        }
        if spec.channels != config.channels {
            return Err(CaptureError::UnsupportedFormat(format!(
                "expected {} channel(s), got {}",
                config.channels, spec.channels
            )));
        }
        if spec.sample_rate != config.sample_rate {
            return Err(CaptureError::UnsupportedFormat(format!(
                "expected {} Hz, got {} Hz",
                config.sample_rate, spec.sample_rate
            )));
        }

        Ok(Self {
            reader,
            block_size: config.block_size.max(1),
        })
    }

    /// Total samples in the file.
    pub fn len(&self) -> u32 {
        self.reader.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reader.len() == 0
    }
}

impl AudioSource for WavSource {
    fn stream(&mut self, sink: &FrameSink) -> CaptureResult<()> {
        let mut block = Vec::with_capacity(self.block_size * 2);

        for sample in self.reader.samples::<i16>() {
            block.extend_from_slice(&sample?.to_le_bytes());
            if block.len() == self.block_size * 2 {
                let full = std::mem::replace(&mut block, Vec::with_capacity(self.block_size * 2));
                if !sink.push(full) {
                    return Ok(());
                }
            }
        }

        if !block.is_empty() {
            sink.push(block);
        }
        Ok(())
    }
}
