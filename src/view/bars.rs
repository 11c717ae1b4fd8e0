//! Spectrum bar geometry for one scope lane.
//!
//! Magnitudes come straight off the FFT; this module turns them into
//! `(x, height)` columns relative to the lane: bar `i` sits at
//! `x = i · spacing` and rises `magnitude / bands × gain` pixels above the
//! lane center.  Normalising by the band count keeps the height scale
//! independent of the FFT length.

// ---------------------------------------------------------------------------
// spectrum_columns
// ---------------------------------------------------------------------------

/// Map FFT magnitudes to bar columns.
///
/// Returns one `(x, height)` pair per band.  Heights are non-negative;
/// callers draw each bar from `lane_center - height` down to `lane_center`.
///
/// # Example
///
/// ```rust
/// use triscope::view::spectrum_columns;
///
/// let columns = spectrum_columns(&[0.0, 2.0, 4.0, 0.0], 3.0, 1000.0);
/// assert_eq!(columns.len(), 4);
/// assert_eq!(columns[1], (3.0, 500.0)); // 2.0 / 4 bands × 1000
/// assert_eq!(columns[2], (6.0, 1000.0));
/// ```
pub fn spectrum_columns(magnitudes: &[f32], spacing: f32, gain: f32) -> Vec<(f32, f32)> {
    let bands = magnitudes.len();
    if bands == 0 {
        return Vec::new();
    }

    let norm = gain / bands as f32;
    magnitudes
        .iter()
        .enumerate()
        .map(|(i, &mag)| (i as f32 * spacing, mag * norm))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
