//! Application entry point — triscope.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Enumerate and log the available input devices.
//! 4. Open the configured (or default) input device and start capturing.
//!    Failure is non-fatal — the window still opens, showing only the
//!    status strip.
//! 5. Run [`eframe::run_native`] — blocks the main thread until the window
//!    is closed.

use std::sync::mpsc;

use triscope::{
    app::{DeviceInfo, ScopeApp},
    audio::{list_input_devices, AudioCapture, CaptureBlock, StreamHandle},
    config::AppConfig,
};

use eframe::egui;

// ---------------------------------------------------------------------------
// Native options builder
// ---------------------------------------------------------------------------

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let vp = egui::ViewportBuilder::default()
        .with_inner_size([config.display.width, config.display.height]);

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("triscope starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Input device listing
    match list_input_devices() {
        Ok(names) if names.is_empty() => log::warn!("No input devices found"),
        Ok(names) => {
            log::info!("{} input device(s):", names.len());
            for name in &names {
                log::info!("  {name}");
            }
        }
        Err(e) => log::warn!("Could not enumerate input devices: {e}"),
    }

    // 4. Audio capture — failure is non-fatal, the scope just stays empty.
    let (block_tx, block_rx) = mpsc::channel::<CaptureBlock>();

    let mut device: Option<DeviceInfo> = None;
    let _stream_handle: Option<StreamHandle> =
        match AudioCapture::new(config.capture.device.as_deref()) {
            Ok(capture) => match capture.start(block_tx) {
                Ok(handle) => {
                    log::info!(
                        "Audio capture started: {} ({} Hz, {} ch)",
                        capture.device_name(),
                        capture.sample_rate(),
                        capture.channels()
                    );
                    device = Some(DeviceInfo {
                        name: capture.device_name().to_string(),
                        sample_rate: capture.sample_rate(),
                        channels: capture.channels(),
                    });
                    Some(handle)
                }
                Err(e) => {
                    log::warn!("Failed to start audio stream: {e}");
                    None
                }
            },
            Err(e) => {
                log::warn!("Audio capture unavailable: {e}");
                None
            }
        };

    // 5. Build the egui app and run it (blocks until the window is closed)
    let app = ScopeApp::new(block_rx, device, config.clone());
    let options = native_options(&config);

    eframe::run_native("triscope", options, Box::new(move |_cc| Ok(Box::new(app))))
}
