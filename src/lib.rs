//! triscope — a live multi-channel audio scope.
//!
//! Captures audio from an input device via `cpal`, keeps the most recent
//! samples of up to three channels in ring buffers, runs a forward FFT per
//! channel via `rustfft`, and draws waveform traces and spectrum bars in an
//! `eframe`/`egui` window.  When the monitored channel's peak deflection
//! exceeds a threshold the display freezes itself; pressing `S` resumes.
//!
//! # Module map
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`audio`] | cpal capture, de-interleaving, ring buffers, FFT |
//! | [`view`] | pure screen-space geometry (traces, bars, lanes) |
//! | [`app`] | the eframe application: polling, state, painting |
//! | [`config`] | TOML settings and platform paths |

pub mod app;
pub mod audio;
pub mod config;
pub mod view;
