//! Channel de-interleaving for captured audio blocks.
//!
//! cpal delivers interleaved frames (`L R T L R T …` for a three-channel
//! device).  The scope draws each channel in its own lane, so every incoming
//! block is split into per-channel sample runs first.

// ---------------------------------------------------------------------------
// deinterleave
// ---------------------------------------------------------------------------

/// Split interleaved multi-channel audio into per-channel runs.
///
/// Returns one `Vec<f32>` per channel for the first `take` channels, each of
/// length `samples.len() / channels`.  A trailing partial frame (fewer than
/// `channels` samples) is dropped.
///
/// * If `take > channels` the result is clamped to `channels` runs.
/// * If `channels == 0` or `take == 0` an empty vector is returned.
///
/// # Example
///
/// ```rust
/// use triscope::audio::deinterleave;
///
/// let block = vec![0.1_f32, 0.2, 0.3, 0.4, 0.5, 0.6]; // L R L R L R
/// let runs = deinterleave(&block, 2, 2);
/// assert_eq!(runs[0], vec![0.1, 0.3, 0.5]); // left
/// assert_eq!(runs[1], vec![0.2, 0.4, 0.6]); // right
/// ```
pub fn deinterleave(samples: &[f32], channels: u16, take: usize) -> Vec<Vec<f32>> {
    let channels = channels as usize;
    if channels == 0 || take == 0 {
        return Vec::new();
    }

    let take = take.min(channels);
    let frames = samples.len() / channels;

    let mut runs: Vec<Vec<f32>> = (0..take).map(|_| Vec::with_capacity(frames)).collect();
    for frame in samples.chunks_exact(channels) {
        for (run, &sample) in runs.iter_mut().zip(frame.iter()) {
            run.push(sample);
        }
    }
    runs
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
