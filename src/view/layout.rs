//! Vertical lane layout.
//!
//! Each displayed channel owns a horizontal lane; lane centers are spread
//! evenly around the vertical middle of the panel.

// ---------------------------------------------------------------------------
// lane_centers
// ---------------------------------------------------------------------------

/// Vertical center of every lane, top to bottom.
///
/// Lane `i` of `lanes` sits at
/// `height / 2 + (i - (lanes - 1) / 2) · spacing`, so an odd lane count
/// puts the middle lane exactly at mid-height and an even count straddles
/// it half a spacing either side.
///
/// # Example
///
/// ```rust
/// use triscope::view::lane_centers;
///
/// assert_eq!(lane_centers(720.0, 3, 200.0), vec![160.0, 360.0, 560.0]);
/// assert_eq!(lane_centers(720.0, 1, 200.0), vec![360.0]);
/// ```
pub fn lane_centers(height: f32, lanes: usize, spacing: f32) -> Vec<f32> {
    let mid = height * 0.5;
    let half_span = (lanes as f32 - 1.0) * 0.5;
    (0..lanes)
        .map(|i| mid + (i as f32 - half_span) * spacing)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_lanes_spread_around_middle() {
        assert_eq!(lane_centers(720.0, 3, 200.0), vec![160.0, 360.0, 560.0]);
    }

    #[test]
    fn single_lane_sits_at_mid_height() {
        assert_eq!(lane_centers(720.0, 1, 200.0), vec![360.0]);
    }

    #[test]
    fn even_lane_count_straddles_middle() {
        assert_eq!(lane_centers(720.0, 2, 200.0), vec![260.0, 460.0]);
    }

    #[test]
    fn zero_lanes_yield_no_centers() {
        assert!(lane_centers(720.0, 0, 200.0).is_empty());
    }
}
