//! Audio input capture via `cpal`.
//!
//! [`AudioCapture`] wraps the cpal host/device/stream lifecycle.  Call
//! [`AudioCapture::start`] to begin streaming [`CaptureBlock`]s over an mpsc
//! channel.  The returned [`StreamHandle`] is a RAII guard — dropping it
//! stops the underlying cpal stream.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use std::sync::mpsc;
use thiserror::Error;

// ---------------------------------------------------------------------------
// CaptureBlock
// ---------------------------------------------------------------------------

/// A single buffer of raw audio as delivered by the cpal callback.
///
/// Samples are interleaved `f32` in the range `[-1.0, 1.0]` regardless of
/// the device's native sample format.  Use
/// [`crate::audio::deinterleave`] to split the block into per-channel runs.
#[derive(Debug, Clone)]
pub struct CaptureBlock {
    /// Interleaved PCM samples in `[-1.0, 1.0]`.
    pub samples: Vec<f32>,
    /// Sample rate of this block in Hz (e.g. 44100, 48000).
    pub sample_rate: u32,
    /// Number of interleaved channels (1 = mono, 2 = stereo, …), always ≥ 1.
    pub channels: u16,
}

impl CaptureBlock {
    /// Number of complete frames (one sample per channel) in the block.
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }
}

// ---------------------------------------------------------------------------
// StreamHandle
// ---------------------------------------------------------------------------

/// RAII guard that keeps the cpal stream alive.
///
/// Dropping this value calls `cpal::Stream::drop` which pauses/stops the
/// underlying hardware stream.
pub struct StreamHandle {
    _stream: cpal::Stream,
}

// ---------------------------------------------------------------------------
// CaptureError
// ---------------------------------------------------------------------------

/// Errors that can occur while setting up or running the audio capture.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no input device found on the default audio host")]
    NoDevice,

    #[error("failed to enumerate input devices: {0}")]
    Devices(#[from] cpal::DevicesError),

    #[error("failed to query default input config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build input stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("unsupported sample format: {0:?}")]
    UnsupportedFormat(cpal::SampleFormat),
}

// ---------------------------------------------------------------------------
// Device enumeration
// ---------------------------------------------------------------------------

/// Names of every input device on the default host, for the startup log.
///
/// Devices whose name cannot be read are listed as `"<unknown>"` rather
/// than skipped, so the count stays honest.
pub fn list_input_devices() -> Result<Vec<String>, CaptureError> {
    let host = cpal::default_host();
    let names = host
        .input_devices()?
        .map(|device| device.name().unwrap_or_else(|_| "<unknown>".into()))
        .collect();
    Ok(names)
}

// ---------------------------------------------------------------------------
// AudioCapture
// ---------------------------------------------------------------------------

/// Input capture device wrapper built on top of `cpal`.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::mpsc;
/// use triscope::audio::{AudioCapture, CaptureBlock};
///
/// let (tx, rx) = mpsc::channel::<CaptureBlock>();
/// let capture = AudioCapture::new(None).unwrap();
/// let _handle = capture.start(tx).unwrap();
/// // `_handle` keeps the stream alive; drop it to stop capturing.
/// ```
pub struct AudioCapture {
    device: cpal::Device,
    config: cpal::StreamConfig,
    /// Native sample format reported by the device.
    sample_format: cpal::SampleFormat,
    /// Native sample rate reported by the device (Hz).
    sample_rate: u32,
    /// Number of interleaved channels reported by the device.
    channels: u16,
    /// Resolved device name, for logging and the status line.
    name: String,
}

impl AudioCapture {
    /// Create a new [`AudioCapture`] on the named input device, or on the
    /// system default when `preferred` is `None`.
    ///
    /// A configured name that matches no device logs a warning and falls
    /// back to the default, so a stale `settings.toml` never blocks startup.
    /// Queries the device's preferred stream configuration (sample rate,
    /// channels, buffer size) so no manual configuration is required.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::NoDevice`] when no input device is available,
    /// or [`CaptureError::DefaultConfig`] when the device cannot report a
    /// default stream configuration.
    pub fn new(preferred: Option<&str>) -> Result<Self, CaptureError> {
        let host = cpal::default_host();

        let device = match preferred {
            Some(wanted) => match Self::find_by_name(&host, wanted)? {
                Some(device) => device,
                None => {
                    log::warn!("input device {wanted:?} not found, using system default");
                    host.default_input_device().ok_or(CaptureError::NoDevice)?
                }
            },
            None => host.default_input_device().ok_or(CaptureError::NoDevice)?,
        };

        let name = device.name().unwrap_or_else(|_| "<unknown>".into());
        let supported = device.default_input_config()?;

        let sample_format = supported.sample_format();
        let channels = supported.channels();
        let sample_rate = supported.sample_rate().0;
        let config: cpal::StreamConfig = supported.into();

        Ok(Self {
            device,
            config,
            sample_format,
            sample_rate,
            channels,
            name,
        })
    }

    /// Search the host's input devices for an exact name match.
    fn find_by_name(
        host: &cpal::Host,
        wanted: &str,
    ) -> Result<Option<cpal::Device>, CaptureError> {
        for device in host.input_devices()? {
            if device.name().map(|name| name == wanted).unwrap_or(false) {
                return Ok(Some(device));
            }
        }
        Ok(None)
    }

    /// Start capturing and send [`CaptureBlock`]s to `tx`.
    ///
    /// The cpal callback runs on a dedicated audio thread; each time the
    /// hardware delivers a buffer the samples are converted to `f32`,
    /// wrapped in a [`CaptureBlock`] and forwarded over the channel.  Send
    /// errors (receiver dropped) are silently ignored so the audio thread
    /// never panics.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::BuildStream`] or [`CaptureError::PlayStream`]
    /// if the platform rejects the stream configuration, and
    /// [`CaptureError::UnsupportedFormat`] for sample formats other than
    /// f32 / i16 / u16.
    pub fn start(&self, tx: mpsc::Sender<CaptureBlock>) -> Result<StreamHandle, CaptureError> {
        let stream = match self.sample_format {
            cpal::SampleFormat::F32 => self.build_stream::<f32>(tx)?,
            cpal::SampleFormat::I16 => self.build_stream::<i16>(tx)?,
            cpal::SampleFormat::U16 => self.build_stream::<u16>(tx)?,
            other => return Err(CaptureError::UnsupportedFormat(other)),
        };

        stream.play()?;
        Ok(StreamHandle { _stream: stream })
    }

    /// Build the input stream for one concrete sample type, converting every
    /// sample to `f32` in the callback.
    fn build_stream<T>(
        &self,
        tx: mpsc::Sender<CaptureBlock>,
    ) -> Result<cpal::Stream, cpal::BuildStreamError>
    where
        T: SizedSample,
        f32: FromSample<T>,
    {
        let sample_rate = self.sample_rate;
        let channels = self.channels;

        self.device.build_input_stream(
            &self.config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                let block = CaptureBlock {
                    samples: data.iter().map(|s| f32::from_sample(*s)).collect(),
                    sample_rate,
                    channels,
                };
                // Ignore send errors; the receiver may have been dropped.
                let _ = tx.send(block);
            },
            |err: cpal::StreamError| {
                log::error!("cpal stream error: {err}");
            },
            None, // no timeout
        )
    }

    /// Native sample rate of the capture stream in Hz.
    ///
    /// This is the rate reported by the device (commonly 44 100 or 48 000 Hz).
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of interleaved channels in each [`CaptureBlock`].
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Resolved name of the opened device.
    pub fn device_name(&self) -> &str {
        &self.name
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
