//! Scope window — egui/eframe application.
//!
//! # Architecture
//!
//! [`ScopeApp`] is the top-level [`eframe::App`].  It owns the receiving end
//! of the capture channel, one ring buffer and one magnitude array per
//! displayed channel, and the shared FFT analyzer.  Every frame it drains
//! the channel, refreshes the analysis while live, and repaints the lanes
//! with the raw `egui::Painter`.
//!
//! # Run states
//!
//! | State | Behaviour |
//! |-------|-----------|
//! | `Live` | Incoming blocks feed the rings; traces and spectra update |
//! | `Held` | Peak trigger fired — blocks are discarded, display frozen |
//!
//! A held scope resumes when the `S` key is pressed.

use std::sync::mpsc;
use std::time::Duration;

use eframe::egui;

use crate::audio::{deinterleave, CaptureBlock, RingBuffer, SpectrumAnalyzer};
use crate::config::AppConfig;
use crate::view::{lane_centers, peak_deflection, spectrum_columns, WaveTrace};

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Panel clear colour (dark gray, ~10% white).
const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(26, 26, 26);
/// Waveform polylines (cyan).
const TRACE_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 204, 255);
/// Peak marker line (red).
const PEAK_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 0, 0);
/// Spectrum bar colour at the lane baseline (yellow).
const BAR_BASE_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 255, 0);
/// Spectrum bar colour at the bar tip (green).
const BAR_TIP_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 255, 0);
/// Status strip text.
const STATUS_COLOR: egui::Color32 = egui::Color32::from_rgb(150, 150, 150);

// ---------------------------------------------------------------------------
// RunState
// ---------------------------------------------------------------------------

/// Whether the scope is consuming new audio or frozen on the last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// New capture blocks update the display every frame.
    #[default]
    Live,
    /// The peak trigger fired; the display stays frozen until `S` resumes.
    Held,
}

impl RunState {
    /// Short status label for the header strip.
    pub fn label(&self) -> &'static str {
        match self {
            RunState::Live => "live",
            RunState::Held => "held",
        }
    }

    /// Returns `true` while the display is frozen.
    pub fn is_held(&self) -> bool {
        matches!(self, RunState::Held)
    }
}

// ---------------------------------------------------------------------------
// DeviceInfo
// ---------------------------------------------------------------------------

/// Details of the opened capture device, shown in the status strip.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    /// Resolved device name.
    pub name: String,
    /// Native sample rate in Hz.
    pub sample_rate: u32,
    /// Interleaved channel count the device delivers.
    pub channels: u16,
}

// ---------------------------------------------------------------------------
// ScopeApp
// ---------------------------------------------------------------------------

/// eframe application — the multi-channel scope window.
pub struct ScopeApp {
    // ── Run state ────────────────────────────────────────────────────────
    /// Live / held state of the display.
    state: RunState,
    /// Set once the first capture block arrives.  Traces, spectra and the
    /// peak marker are skipped until then.
    got_signal: bool,
    /// Signed peak deflection (px) of the monitored lane over its drawn
    /// window; drives the hold trigger and the red marker.
    monitor_peak: f32,

    // ── Audio state ──────────────────────────────────────────────────────
    /// Receive capture blocks from the cpal callback thread.
    block_rx: mpsc::Receiver<CaptureBlock>,
    /// Sample history, one ring per displayed channel.
    rings: Vec<RingBuffer<f32>>,
    /// FFT magnitudes per displayed channel, refreshed while live.
    spectra: Vec<Vec<f32>>,
    /// Shared forward-FFT analyzer.
    analyzer: SpectrumAnalyzer,

    // ── Device info ──────────────────────────────────────────────────────
    /// `None` when capture setup failed; the window then shows only the
    /// status strip.
    device: Option<DeviceInfo>,

    // ── Configuration ────────────────────────────────────────────────────
    /// Application configuration (read-only after startup).
    config: AppConfig,
}

impl ScopeApp {
    /// Create a new [`ScopeApp`].
    ///
    /// * `block_rx` — receiver end of the capture channel.
    /// * `device`   — details of the opened device, or `None` when capture
    ///   could not be started (the window still opens).
    /// * `config`   — loaded application configuration.
    ///
    /// The displayed lane count is `config.scope.channels` clamped to what
    /// the device delivers, so a stereo device configured for three lanes
    /// shows two.
    pub fn new(
        block_rx: mpsc::Receiver<CaptureBlock>,
        device: Option<DeviceInfo>,
        config: AppConfig,
    ) -> Self {
        let lanes = match &device {
            Some(info) => config.scope.channels.min(info.channels as usize),
            None => config.scope.channels,
        };

        let analyzer = SpectrumAnalyzer::new(config.spectrum.bands.max(1));
        let capacity = config.scope.window_samples.max(analyzer.fft_len());

        Self {
            state: RunState::default(),
            got_signal: false,
            monitor_peak: 0.0,
            block_rx,
            rings: (0..lanes).map(|_| RingBuffer::new(capacity)).collect(),
            spectra: vec![Vec::new(); lanes],
            analyzer,
            device,
            config,
        }
    }

    /// Index of the monitored lane, clamped to the lanes that exist.
    fn monitor_lane(&self) -> usize {
        self.config
            .scope
            .monitor_channel
            .min(self.rings.len().saturating_sub(1))
    }

    // ── Channel polling ──────────────────────────────────────────────────

    /// Drain all pending capture blocks (non-blocking).
    ///
    /// While live each block is de-interleaved into the per-lane rings.
    /// While held the blocks are discarded, so the display stays frozen and
    /// the channel never backs up.  Returns `true` when any samples were
    /// consumed into the rings.
    fn poll_blocks(&mut self) -> bool {
        let mut consumed = false;
        while let Ok(block) = self.block_rx.try_recv() {
            self.got_signal = true;
            if self.state.is_held() {
                continue;
            }

            let runs = deinterleave(&block.samples, block.channels, self.rings.len());
            for (ring, run) in self.rings.iter_mut().zip(runs.iter()) {
                ring.push_slice(run);
            }
            consumed = true;
        }
        consumed
    }

    /// Recompute per-lane spectra and the monitored peak from the ring
    /// tails, then arm the hold trigger.
    ///
    /// Called only when new samples arrived while live; otherwise the
    /// previous results are redrawn unchanged.
    fn refresh_analysis(&mut self) {
        let fft_len = self.analyzer.fft_len();
        for (lane, ring) in self.rings.iter().enumerate() {
            let samples = ring.tail(fft_len);
            self.spectra[lane] = self.analyzer.magnitudes(&samples);
        }

        if self.rings.is_empty() {
            return;
        }

        let scope = &self.config.scope;
        let samples = self.rings[self.monitor_lane()].tail(scope.window_samples);
        self.monitor_peak = peak_deflection(&samples, scope.window_samples, scope.gain);

        if self.monitor_peak.abs() > scope.hold_threshold {
            log::info!(
                "peak deflection {:.1} px exceeded {:.1} px, holding display",
                self.monitor_peak.abs(),
                scope.hold_threshold
            );
            self.state = RunState::Held;
        }
    }

    /// `S` resumes a held display; a no-op while live.
    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::S)) && self.state.is_held() {
            log::info!("resume key pressed, scope is live again");
            self.state = RunState::Live;
        }
    }

    // ── Drawing ──────────────────────────────────────────────────────────

    /// Paint the whole scope into the panel rect.
    fn draw_scope(&self, ui: &egui::Ui, rect: egui::Rect) {
        let painter = ui.painter();

        self.draw_status(painter, rect);

        // Nothing meaningful to draw before the first capture block.
        if !self.got_signal {
            return;
        }

        let centers = lane_centers(
            rect.height(),
            self.rings.len(),
            self.config.scope.lane_spacing,
        );

        for (lane, center) in centers.iter().enumerate() {
            let center_y = rect.top() + center;
            self.draw_spectrum(painter, rect, lane, center_y);
            self.draw_trace(painter, rect, lane, center_y);
        }

        if let Some(center) = centers.get(self.monitor_lane()) {
            self.draw_peak_marker(painter, rect, rect.top() + center);
        }
    }

    /// One lane's waveform polyline: the window tail stretched across the
    /// full width, deflected around the lane center.
    fn draw_trace(&self, painter: &egui::Painter, rect: egui::Rect, lane: usize, center_y: f32) {
        let window = self.config.scope.window_samples;
        let samples = self.rings[lane].tail(window);
        let trace = WaveTrace::map(&samples, window, rect.width(), self.config.scope.gain);
        if trace.is_empty() {
            return;
        }

        let points: Vec<egui::Pos2> = trace
            .points
            .iter()
            .map(|&(x, dy)| egui::pos2(rect.left() + x, center_y + dy))
            .collect();

        painter.add(egui::Shape::line(points, egui::Stroke::new(1.0, TRACE_COLOR)));
    }

    /// One lane's spectrum bars, rising from the lane center with a
    /// yellow-to-green vertical gradient.
    fn draw_spectrum(&self, painter: &egui::Painter, rect: egui::Rect, lane: usize, center_y: f32) {
        let columns = spectrum_columns(
            &self.spectra[lane],
            self.config.spectrum.bar_spacing,
            self.config.spectrum.gain,
        );
        let bar_width = self.config.spectrum.bar_width;

        let mut mesh = egui::Mesh::default();
        for (x, height) in columns {
            if height <= 0.0 {
                continue;
            }

            let left = rect.left() + x;
            if left > rect.right() {
                break;
            }

            let top = center_y - height;
            let base = mesh.vertices.len() as u32;
            mesh.colored_vertex(egui::pos2(left, top), BAR_TIP_COLOR);
            mesh.colored_vertex(egui::pos2(left + bar_width, top), BAR_TIP_COLOR);
            mesh.colored_vertex(egui::pos2(left + bar_width, center_y), BAR_BASE_COLOR);
            mesh.colored_vertex(egui::pos2(left, center_y), BAR_BASE_COLOR);
            mesh.add_triangle(base, base + 1, base + 2);
            mesh.add_triangle(base, base + 2, base + 3);
        }

        if !mesh.is_empty() {
            painter.add(egui::Shape::mesh(mesh));
        }
    }

    /// Horizontal red line across the full width at the monitored lane's
    /// peak deflection.
    fn draw_peak_marker(&self, painter: &egui::Painter, rect: egui::Rect, center_y: f32) {
        let y = center_y + self.monitor_peak;
        painter.line_segment(
            [egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)],
            egui::Stroke::new(1.0, PEAK_COLOR),
        );
    }

    /// Device / state readout in the top-left corner.
    fn draw_status(&self, painter: &egui::Painter, rect: egui::Rect) {
        let text = match &self.device {
            None => "no input device".to_string(),
            Some(info) if !self.got_signal => {
                format!(
                    "{} @ {} Hz  [waiting for signal]",
                    info.name, info.sample_rate
                )
            }
            Some(info) => {
                let mut text =
                    format!("{} @ {} Hz  [{}]", info.name, info.sample_rate, self.state.label());
                if self.state.is_held() {
                    text.push_str("  press S to resume");
                }
                text
            }
        };

        painter.text(
            rect.left_top() + egui::vec2(8.0, 8.0),
            egui::Align2::LEFT_TOP,
            text,
            egui::FontId::monospace(12.0),
            STATUS_COLOR,
        );
    }
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for ScopeApp {
    /// Called every frame by eframe.  Polls the capture channel, refreshes
    /// the analysis, then repaints the lanes.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);

        if self.poll_blocks() {
            self.refresh_analysis();
        }

        // A held scope only needs to notice the resume key; a live one
        // repaints at display rate.
        match self.state {
            RunState::Live => ctx.request_repaint_after(Duration::from_millis(16)),
            RunState::Held => ctx.request_repaint_after(Duration::from_millis(250)),
        }

        let frame = egui::Frame::new().fill(BACKGROUND);
        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            let rect = ui.max_rect();
            self.draw_scope(ui, rect);
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        log::info!("triscope closing");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
