//! Frequency-domain analysis via `rustfft`.
//!
//! [`SpectrumAnalyzer`] turns a run of time-domain samples into `bands`
//! magnitude values — the positive-frequency half of a forward FFT of
//! length `2 × bands`.  The FFT plan, Hann window and scratch buffer are
//! allocated once and reused every frame.
//!
//! # Example
//!
//! ```rust
//! use triscope::audio::SpectrumAnalyzer;
//!
//! let mut analyzer = SpectrumAnalyzer::new(4);
//! let magnitudes = analyzer.magnitudes(&[0.0; 8]);
//! assert_eq!(magnitudes.len(), 4);
//! assert!(magnitudes.iter().all(|&m| m == 0.0));
//! ```

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// SpectrumAnalyzer
// ---------------------------------------------------------------------------

/// Reusable forward-FFT magnitude analyzer.
///
/// One instance serves every channel: [`magnitudes`](Self::magnitudes)
/// overwrites the whole scratch buffer on each call, so no per-channel
/// state is carried between calls.
pub struct SpectrumAnalyzer {
    bands: usize,
    fft_len: usize,
    fft: Arc<dyn Fft<f32>>,
    /// Hann window coefficients, one per FFT slot.
    window: Vec<f32>,
    /// Scratch buffer the FFT transforms in place.
    buffer: Vec<Complex<f32>>,
}

impl SpectrumAnalyzer {
    /// Create an analyzer producing `bands` magnitude values per call.
    ///
    /// The FFT length is `2 × bands` so the returned magnitudes are exactly
    /// the positive-frequency bins.
    ///
    /// # Panics
    ///
    /// Panics if `bands == 0`.
    pub fn new(bands: usize) -> Self {
        assert!(bands > 0, "SpectrumAnalyzer bands must be > 0");
        let fft_len = bands * 2;

        let fft = FftPlanner::new().plan_fft_forward(fft_len);

        // Hann window for smoother frequency response
        let window: Vec<f32> = (0..fft_len)
            .map(|i| {
                0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / (fft_len - 1) as f32).cos())
            })
            .collect();

        Self {
            bands,
            fft_len,
            fft,
            window,
            buffer: vec![Complex::new(0.0, 0.0); fft_len],
        }
    }

    /// Number of magnitude values produced per call.
    pub fn bands(&self) -> usize {
        self.bands
    }

    /// FFT length consumed per call (`2 × bands`).
    ///
    /// Feeding exactly this many samples uses the full window; shorter runs
    /// are zero-padded and anything beyond it is ignored.
    pub fn fft_len(&self) -> usize {
        self.fft_len
    }

    /// Compute the magnitude spectrum of `samples`.
    ///
    /// Samples are Hann-windowed and zero-padded to the FFT length; the
    /// result holds the `.norm()` of the first `bands` output bins, in bin
    /// order (DC first).
    pub fn magnitudes(&mut self, samples: &[f32]) -> Vec<f32> {
        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let sample = samples.get(i).copied().unwrap_or(0.0);
            *slot = Complex::new(sample * self.window[i], 0.0);
        }

        self.fft.process(&mut self.buffer);

        self.buffer[..self.bands].iter().map(|c| c.norm()).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_length_equals_bands() {
        let mut analyzer = SpectrumAnalyzer::new(32);
        let magnitudes = analyzer.magnitudes(&vec![0.25_f32; 64]);
        assert_eq!(magnitudes.len(), 32);
        assert_eq!(analyzer.bands(), 32);
        assert_eq!(analyzer.fft_len(), 64);
    }

    #[test]
    fn silence_yields_zero_magnitudes() {
        let mut analyzer = SpectrumAnalyzer::new(16);
        let magnitudes = analyzer.magnitudes(&[0.0_f32; 32]);
        assert!(magnitudes.iter().all(|&m| m.abs() < 1e-6));
    }

    /// A pure tone with `k` cycles per FFT window must peak in band `k`.
    #[test]
    fn pure_tone_peaks_in_expected_band() {
        let mut analyzer = SpectrumAnalyzer::new(32);
        let fft_len = analyzer.fft_len();

        let k = 8;
        let tone: Vec<f32> = (0..fft_len)
            .map(|i| (2.0 * std::f32::consts::PI * k as f32 * i as f32 / fft_len as f32).sin())
            .collect();

        let magnitudes = analyzer.magnitudes(&tone);
        let peak_band = magnitudes
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| i)
            .unwrap();

        assert_eq!(peak_band, k);
    }

    /// A DC signal concentrates its energy at bin 0.
    #[test]
    fn dc_signal_peaks_at_bin_zero() {
        let mut analyzer = SpectrumAnalyzer::new(16);
        let magnitudes = analyzer.magnitudes(&[0.5_f32; 32]);

        let peak_band = magnitudes
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| i)
            .unwrap();

        assert_eq!(peak_band, 0);
    }

    /// Input shorter than the FFT length is zero-padded, not rejected.
    #[test]
    fn short_input_is_zero_padded() {
        let mut analyzer = SpectrumAnalyzer::new(16);
        let magnitudes = analyzer.magnitudes(&[0.5_f32; 5]);
        assert_eq!(magnitudes.len(), 16);
        // Some energy must survive the padding.
        assert!(magnitudes.iter().any(|&m| m > 0.0));
    }

    /// The scratch buffer is fully overwritten, so repeated calls with the
    /// same input agree.
    #[test]
    fn repeated_calls_are_deterministic() {
        let mut analyzer = SpectrumAnalyzer::new(16);
        let tone: Vec<f32> = (0..32)
            .map(|i| (2.0 * std::f32::consts::PI * 3.0 * i as f32 / 32.0).sin())
            .collect();

        let first = analyzer.magnitudes(&tone);
        let second = analyzer.magnitudes(&tone);
        assert_eq!(first, second);
    }

    #[test]
    #[should_panic(expected = "SpectrumAnalyzer bands must be > 0")]
    fn zero_bands_panics() {
        let _analyzer = SpectrumAnalyzer::new(0);
    }
}
