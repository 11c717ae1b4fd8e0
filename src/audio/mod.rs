//! Audio path — input capture → de-interleave → ring buffers → FFT.
//!
//! # Pipeline
//!
//! ```text
//! Input device → cpal callback → CaptureBlock (mpsc) → deinterleave
//!             → RingBuffer (one per channel) → SpectrumAnalyzer
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::mpsc;
//! use triscope::audio::{AudioCapture, CaptureBlock};
//!
//! let (tx, rx) = mpsc::channel::<CaptureBlock>();
//! let capture = AudioCapture::new(None).unwrap();
//! let _handle = capture.start(tx).unwrap(); // drop handle → stops stream
//!
//! while let Ok(block) = rx.recv() {
//!     println!("received {} frames @ {}Hz", block.frames(), block.sample_rate);
//! }
//! ```

pub mod buffer;
pub mod capture;
pub mod channels;
pub mod spectrum;

pub use buffer::RingBuffer;
pub use capture::{list_input_devices, AudioCapture, CaptureBlock, CaptureError, StreamHandle};
pub use channels::deinterleave;
pub use spectrum::SpectrumAnalyzer;
