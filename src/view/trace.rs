//! Time-domain trace geometry for one scope lane.
//!
//! [`WaveTrace::map`] turns the tail of a channel's sample history into
//! screen-space polyline points plus the window's peak deflection.  All
//! coordinates are relative to the lane center so the caller only has to
//! translate, never scale.
//!
//! # Example
//!
//! ```rust
//! use triscope::view::WaveTrace;
//!
//! let samples = vec![0.0_f32, 0.5, -0.5, 0.0];
//! let trace = WaveTrace::map(&samples, 4, 400.0, 100.0);
//!
//! assert_eq!(trace.points.len(), 4);
//! // Positive samples deflect upward (negative y in screen space).
//! assert_eq!(trace.points[1], (100.0, -50.0));
//! assert_eq!(trace.peak, -50.0);
//! ```

// ---------------------------------------------------------------------------
// WaveTrace
// ---------------------------------------------------------------------------

/// Polyline geometry for the last `window` samples of one channel.
#[derive(Debug, Clone)]
pub struct WaveTrace {
    /// `(x, dy)` per drawn sample: `x` in `[0, width)`, `dy` the vertical
    /// deflection relative to the lane center (negative = up).
    pub points: Vec<(f32, f32)>,
    /// The deflection with the largest magnitude in the window, sign
    /// preserved.  `0.0` when no samples were drawn.
    pub peak: f32,
}

impl WaveTrace {
    /// Map the most recent `window` samples onto a `width`-pixel-wide lane.
    ///
    /// The start index is `samples.len() - window`, clamped to zero — a
    /// buffer shorter than the window draws everything it has, stretched
    /// across the full width.  Each sample `s` becomes the point
    /// `(c · width / count, -gain · s)` where `c` counts drawn samples.
    pub fn map(samples: &[f32], window: usize, width: f32, gain: f32) -> Self {
        let start = samples.len().saturating_sub(window);
        let tail = &samples[start..];

        if tail.is_empty() {
            return Self {
                points: Vec::new(),
                peak: 0.0,
            };
        }

        let scale = width / tail.len() as f32;

        let mut peak = 0.0_f32;
        let points = tail
            .iter()
            .enumerate()
            .map(|(c, &s)| {
                let dy = -gain * s;
                if dy.abs() > peak.abs() {
                    peak = dy;
                }
                (c as f32 * scale, dy)
            })
            .collect();

        Self { points, peak }
    }

    /// Number of drawn points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` when nothing would be drawn.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ---------------------------------------------------------------------------
// peak_deflection
// ---------------------------------------------------------------------------

/// Signed peak deflection of the last `window` samples, without building the
/// polyline.
///
/// Reports the same value as the `peak` field of [`WaveTrace::map`]; the
/// hold trigger uses this between frames where the full trace geometry is
/// not needed.
pub fn peak_deflection(samples: &[f32], window: usize, gain: f32) -> f32 {
    let start = samples.len().saturating_sub(window);
    let peak_sample = samples[start..]
        .iter()
        .fold(0.0_f32, |acc, &s| if s.abs() > acc.abs() { s } else { acc });
    -gain * peak_sample
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Window selection --------------------------------------------------

    /// A buffer shorter than the window clamps the start index to zero and
    /// draws every stored sample.
    #[test]
    fn short_buffer_clamps_start_to_zero() {
        let samples = vec![0.1_f32; 100];
        let trace = WaveTrace::map(&samples, 2048, 1280.0, 100.0);

        assert_eq!(trace.len(), 100);
        assert_eq!(trace.points[0].0, 0.0);
    }

    /// A buffer longer than the window draws exactly the trailing `window`
    /// samples.
    #[test]
    fn long_buffer_draws_trailing_window() {
        let mut samples = vec![0.0_f32; 4096];
        // Mark the first sample inside the drawn tail.
        samples[4096 - 2048] = 0.5;

        let trace = WaveTrace::map(&samples, 2048, 1280.0, 100.0);

        assert_eq!(trace.len(), 2048);
        assert_eq!(trace.points[0], (0.0, -50.0));
    }

    // ---- Coordinate mapping ------------------------------------------------

    /// The available samples stretch across the full lane width.
    #[test]
    fn x_spreads_samples_across_width() {
        let samples = vec![0.0_f32; 4];
        let trace = WaveTrace::map(&samples, 4, 400.0, 100.0);

        let xs: Vec<f32> = trace.points.iter().map(|p| p.0).collect();
        assert_eq!(xs, vec![0.0, 100.0, 200.0, 300.0]);
    }

    /// Fewer samples than the window still span the width (wider steps).
    #[test]
    fn short_buffer_still_spans_width() {
        let samples = vec![0.0_f32; 2];
        let trace = WaveTrace::map(&samples, 8, 400.0, 100.0);

        assert_eq!(trace.points[0].0, 0.0);
        assert_eq!(trace.points[1].0, 200.0);
    }

    /// Positive samples deflect up, negative samples down, scaled by gain.
    #[test]
    fn y_is_negated_gain_scaled_sample() {
        let samples = vec![0.5_f32, -0.25];
        let trace = WaveTrace::map(&samples, 2, 100.0, 100.0);

        assert_eq!(trace.points[0].1, -50.0);
        assert_eq!(trace.points[1].1, 25.0);
    }

    // ---- Peak selection ----------------------------------------------------

    /// The peak is the deflection with the largest magnitude, sign kept.
    #[test]
    fn peak_keeps_sign_of_largest_deflection() {
        let samples = vec![0.1_f32, -0.8, 0.3];
        let trace = WaveTrace::map(&samples, 3, 100.0, 100.0);
        // Deflections are -10, +80, -30.
        assert_eq!(trace.peak, 80.0);

        let samples = vec![0.9_f32, -0.2];
        let trace = WaveTrace::map(&samples, 2, 100.0, 100.0);
        // Deflections are -90, +20.
        assert_eq!(trace.peak, -90.0);
    }

    /// Samples outside the drawn window do not influence the peak.
    #[test]
    fn peak_ignores_samples_before_window() {
        let mut samples = vec![0.0_f32; 10];
        samples[0] = 1.0; // outside a window of 2
        samples[9] = 0.1;

        let trace = WaveTrace::map(&samples, 2, 100.0, 100.0);
        assert_eq!(trace.peak, -10.0);
    }

    // ---- Degenerate input --------------------------------------------------

    #[test]
    fn empty_samples_produce_empty_trace() {
        let trace = WaveTrace::map(&[], 2048, 1280.0, 100.0);
        assert!(trace.is_empty());
        assert_eq!(trace.peak, 0.0);
    }

    #[test]
    fn zero_window_produces_empty_trace() {
        let samples = vec![0.5_f32; 16];
        let trace = WaveTrace::map(&samples, 0, 1280.0, 100.0);
        assert!(trace.is_empty());
        assert_eq!(trace.peak, 0.0);
    }

    // ---- peak_deflection ---------------------------------------------------

    /// The shortcut agrees with the peak the full mapping reports.
    #[test]
    fn peak_deflection_matches_mapped_peak() {
        let samples = vec![0.1_f32, -0.8, 0.3, 0.05, -0.2];

        let mapped = WaveTrace::map(&samples, 3, 1280.0, 100.0).peak;
        let direct = peak_deflection(&samples, 3, 100.0);

        assert_eq!(mapped, direct);
    }

    #[test]
    fn peak_deflection_of_empty_is_zero() {
        assert_eq!(peak_deflection(&[], 2048, 100.0), 0.0);
    }
}
