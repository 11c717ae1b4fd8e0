//! Screen-space geometry for the scope display.
//!
//! Everything here is pure math over slices — no egui types — so the lane
//! layout, waveform mapping and bar sizing are unit-testable without a
//! window.  The app translates these relative coordinates into panel space
//! and hands them to the painter.

pub mod bars;
pub mod layout;
pub mod trace;

pub use bars::spectrum_columns;
pub use layout::lane_centers;
pub use trace::{peak_deflection, WaveTrace};
