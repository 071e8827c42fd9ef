//! Per-frame orchestration: playback state → spectrum → bands → scene → draw.
//!
//! The driver owns the whole session (deck, analyzer, scene) so no state is
//! shared implicitly. It is driven by the host once per display refresh and
//! never blocks: asset loading is observed by polling [`LoadState`].

use crate::bands::{extract_bands, BandEnergy, BandLayout};
use crate::constants::MAX_FRAME_DT_SEC;
use crate::error::VisualizerError;
use crate::overlay::{info_lines, Status};
use crate::playback::{LoadState, TrackDeck};
use crate::render;
use crate::scene::{SceneConfig, SceneInput, SceneModel};
use crate::spectrum::{idle_waveform, AnalyzerConfig, SpectrumAnalyzer, SpectrumSnapshot};
use crate::surface::DrawSurface;

#[derive(Clone, Debug, PartialEq)]
pub struct VisualizerConfig {
    pub analyzer: AnalyzerConfig,
    pub bands: BandLayout,
    pub scene: SceneConfig,
    pub seed: u64,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            analyzer: AnalyzerConfig::default(),
            bands: BandLayout::default(),
            scene: SceneConfig::default(),
            seed: 42,
        }
    }
}

impl VisualizerConfig {
    pub fn validate(&self) -> Result<(), VisualizerError> {
        self.analyzer.validate()?;
        self.bands.validate()?;
        self.scene.validate()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// No playable audio yet; only placeholder frames are drawn.
    Idle,
    /// Audio is available; the spectrum may be analyzed.
    Ready,
}

pub struct Visualizer {
    config: VisualizerConfig,
    state: DriverState,
    deck: TrackDeck,
    analyzer: SpectrumAnalyzer,
    scene: Option<SceneModel>,

    last_snapshot: Option<SpectrumSnapshot>,
    bands: BandEnergy,
    status: Status,
    frame_index: u64,
    idle_clock: f32,
}

impl Visualizer {
    pub fn new(deck: TrackDeck, config: VisualizerConfig) -> Self {
        if let Err(e) = config.validate() {
            log::warn!("[visualizer] config sanitized: {}", e);
        }
        let mut deck = deck;
        let mut analyzer = SpectrumAnalyzer::new(config.analyzer.clone());
        deck.attach(&mut analyzer);
        Self {
            config,
            state: DriverState::Idle,
            deck,
            analyzer,
            scene: None,
            last_snapshot: None,
            bands: BandEnergy::default(),
            status: Status::Loading,
            frame_index: 0,
            idle_clock: 0.0,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == DriverState::Ready
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn bands(&self) -> BandEnergy {
        self.bands
    }

    pub fn deck(&self) -> &TrackDeck {
        &self.deck
    }

    pub fn analyzer(&self) -> &SpectrumAnalyzer {
        &self.analyzer
    }

    pub fn scene(&self) -> Option<&SceneModel> {
        self.scene.as_ref()
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn current_time(&self) -> f64 {
        self.deck.current().current_time()
    }

    pub fn duration(&self) -> f64 {
        self.deck.current().duration()
    }

    /// Render one frame onto `surface`. `dt_sec` is the wall time since the last frame.
    pub fn frame(&mut self, surface: &mut dyn DrawSurface, dt_sec: f32) {
        self.frame_index = self.frame_index.wrapping_add(1);
        let dt = if dt_sec.is_finite() {
            dt_sec.clamp(0.0, MAX_FRAME_DT_SEC)
        } else {
            0.0
        };

        if self.state == DriverState::Idle {
            self.poll_load_state();
            if self.state == DriverState::Idle {
                let message = match &self.status {
                    Status::Error(msg) => msg.clone(),
                    _ => "LOADING STREAM...".to_string(),
                };
                render::draw_placeholder(surface, &message);
                return;
            }
        }

        render::draw_background(surface);
        if let Err(e) = self.ensure_scene(surface.width(), surface.height()) {
            log::warn!("[visualizer] frame skipped: {}", e);
            return;
        }

        let playing = self.deck.current().is_playing();
        self.refresh_status(playing);
        let snapshot = self.next_snapshot(playing, dt);
        let bands = extract_bands(&snapshot, &self.config.bands);
        if bands_are_sane(bands) {
            self.bands = bands;
            if let Some(scene) = self.scene.as_mut() {
                scene.update(SceneInput {
                    snapshot: &snapshot,
                    bands,
                    dt_sec: dt,
                });
            }
        } else {
            log::warn!("[visualizer] discarding band update {:?}", bands);
        }

        if let Some(scene) = self.scene.as_ref() {
            render::draw_skyline(surface, scene);
            render::draw_network(surface, scene, self.bands.treble);
        }
        let lines = info_lines(
            &self.status,
            self.deck.active_name(),
            self.current_time(),
            self.duration(),
            self.bands,
        );
        render::draw_overlay(surface, &lines);
    }

    fn poll_load_state(&mut self) {
        match self.deck.current().load_state() {
            LoadState::Pending => {}
            LoadState::Ready => {
                log::info!("[visualizer] stream connected: {}", self.deck.active_name());
                self.state = DriverState::Ready;
                self.status = Status::Paused;
            }
            LoadState::Failed(e) => {
                if self.status != Status::Error(e.to_string()) {
                    log::error!("[visualizer] {}", e);
                    self.status = Status::Error(e.to_string());
                }
            }
        }
    }

    /// Status of the active track once ready. A part that failed to load, or
    /// a stream that errors later, keeps reporting its error every frame.
    fn refresh_status(&mut self, playing: bool) {
        self.status = match self.deck.current().load_state() {
            LoadState::Failed(e) => {
                let msg = e.to_string();
                if self.status != Status::Error(msg.clone()) {
                    log::error!("[visualizer] {}", e);
                }
                Status::Error(msg)
            }
            _ if playing => Status::Playing,
            _ => Status::Paused,
        };
    }

    fn ensure_scene(&mut self, width: f32, height: f32) -> Result<(), VisualizerError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(VisualizerError::EmptySurface { width, height });
        }
        let stale = self
            .scene
            .as_ref()
            .map_or(true, |s| !s.matches_size(width, height));
        if stale {
            log::info!("[visualizer] building scene for {}x{}", width, height);
            self.scene = Some(SceneModel::new(
                width,
                height,
                &self.config.scene,
                self.config.seed,
            ));
        }
        Ok(())
    }

    /// Live analysis while playing; otherwise the last analyzed snapshot, or an
    /// idle waveform if nothing has been analyzed yet.
    fn next_snapshot(&mut self, playing: bool, dt: f32) -> SpectrumSnapshot {
        if playing {
            let input = self.analyzer.input();
            let source = self.deck.source_for(input);
            let snapshot = self.analyzer.analyze(source, self.frame_index).clone();
            self.last_snapshot = Some(snapshot.clone());
            return snapshot;
        }
        match &self.last_snapshot {
            Some(s) => s.clone(),
            None => {
                self.idle_clock += dt;
                idle_waveform(self.analyzer.bins(), self.idle_clock)
            }
        }
    }

    // ---------------- transport ----------------

    /// Start or pause the active track. Returns whether it is now playing.
    pub fn toggle_play(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        let track = self.deck.current_mut();
        if track.is_playing() {
            track.pause();
        } else {
            track.play();
        }
        track.is_playing()
    }

    pub fn play(&mut self) -> Result<(), VisualizerError> {
        self.require_ready()?;
        self.deck.current_mut().play();
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), VisualizerError> {
        self.require_ready()?;
        self.deck.current_mut().pause();
        Ok(())
    }

    /// Seek to the start and make sure playback runs.
    pub fn restart(&mut self) -> Result<(), VisualizerError> {
        self.require_ready()?;
        let track = self.deck.current_mut();
        track.seek(0.0);
        if !track.is_playing() {
            track.play();
        }
        Ok(())
    }

    /// Seek within `[0, duration]`.
    pub fn seek(&mut self, seconds: f64) -> Result<(), VisualizerError> {
        self.require_ready()?;
        if !seconds.is_finite() {
            return Err(VisualizerError::invalid_range(format!("seek to {seconds}")));
        }
        let track = self.deck.current_mut();
        let upper = track.duration().max(0.0);
        track.seek(seconds.clamp(0.0, upper));
        Ok(())
    }

    /// Volume in `[0, 1]`; allowed before the stream is ready.
    pub fn set_volume(&mut self, volume: f32) {
        if volume.is_finite() {
            self.deck.current_mut().set_volume(volume.clamp(0.0, 1.0));
        }
    }

    /// Switch the active track by name, keeping the analyzer routed to it.
    pub fn switch_track(&mut self, name: &str) -> bool {
        let switched = self.deck.switch_to(name, &mut self.analyzer);
        if switched {
            self.last_snapshot = None;
        }
        switched
    }

    fn require_ready(&self) -> Result<(), VisualizerError> {
        if self.is_ready() {
            Ok(())
        } else {
            log::debug!("[visualizer] transport ignored before ready");
            Err(VisualizerError::NotReady)
        }
    }
}

#[inline]
fn bands_are_sane(b: BandEnergy) -> bool {
    [b.bass, b.mid, b.treble].iter().all(|v| v.is_finite())
}
