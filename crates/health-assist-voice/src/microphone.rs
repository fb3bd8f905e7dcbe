//! Live capture from the default input device.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, SizedSample, Stream, StreamConfig};
use tracing::info;

use crate::capture::{AudioSource, CallbackBridge, CaptureConfig, FrameSink};
use crate::{CaptureError, CaptureResult};

/// Records from the system's default microphone.
///
/// Blocks follow the device's callback buffer size; `block_size` is only a
/// hint. Samples are delivered as 16-bit little-endian PCM whatever the
/// device's native format.
#[derive(Debug, Clone)]
pub struct MicrophoneSource {
    config: CaptureConfig,
}

impl MicrophoneSource {
    pub fn new(config: &CaptureConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn stream_config(&self) -> StreamConfig {
        StreamConfig {
            channels: self.config.channels,
            sample_rate: cpal::SampleRate(self.config.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        }
    }
}

impl AudioSource for MicrophoneSource {
    fn stream(&mut self, sink: &FrameSink) -> CaptureResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| CaptureError::Device("no input device available".into()))?;
        let format = device
            .default_input_config()
            .map_err(|e| CaptureError::Device(e.to_string()))?
            .sample_format();

        info!(
            device = %device.name().unwrap_or_else(|_| "unknown".into()),
            format = ?format,
            "opening input stream"
        );

        let bridge = CallbackBridge::new(sink);
        let config = self.stream_config();
        let stream = match format {
            SampleFormat::I16 => build_stream::<i16>(&device, &config, &bridge, |s| s),
            SampleFormat::F32 => build_stream::<f32>(&device, &config, &bridge, f32_to_i16),
            other => Err(CaptureError::UnsupportedFormat(format!(
                "input device delivers {:?} samples",
                other
            ))),
        }?;

        stream
            .play()
            .map_err(|e| CaptureError::Device(e.to_string()))?;
        bridge.wait(self.config.duration);
        Ok(())
    }
}

fn build_stream<T>(
    device: &Device,
    config: &StreamConfig,
    bridge: &CallbackBridge,
    to_i16: fn(T) -> i16,
) -> CaptureResult<Stream>
where
    T: SizedSample,
{
    let data_bridge = bridge.clone();
    let error_bridge = bridge.clone();
    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                data_bridge.deliver(encode_pcm(data, to_i16));
            },
            move |err| error_bridge.fail(err.to_string()),
            None,
        )
        .map_err(|e| CaptureError::Device(e.to_string()))
}

/// Encode samples as little-endian 16-bit PCM.
fn encode_pcm<T: Copy>(data: &[T], to_i16: fn(T) -> i16) -> Vec<u8> {
    let mut block = Vec::with_capacity(data.len() * 2);
    for &sample in data {
        block.extend_from_slice(&to_i16(sample).to_le_bytes());
    }
    block
}

fn f32_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_conversion_clamps() {
        assert_eq!(f32_to_i16(0.0), 0);
        assert_eq!(f32_to_i16(1.0), i16::MAX);
        assert_eq!(f32_to_i16(-1.0), -i16::MAX);
        assert_eq!(f32_to_i16(3.5), i16::MAX);
        assert_eq!(f32_to_i16(-3.5), -i16::MAX);
    }

    #[test]
    fn test_encode_pcm_little_endian() {
        let block = encode_pcm(&[1i16, -2, 0x0102], |s| s);
        assert_eq!(block, vec![1, 0, 0xfe, 0xff, 0x02, 0x01]);
    }

    #[test]
    fn test_stream_config_follows_capture_config() {
        let source = MicrophoneSource::new(&CaptureConfig::default());
        let config = source.stream_config();
        assert_eq!(config.channels, 1);
        assert_eq!(config.sample_rate, cpal::SampleRate(16_000));
    }
}
