//! Playback collaborator seam and the multi-track deck.
//!
//! The core never decodes audio. A front-end supplies [`PlaybackHandle`]
//! implementations; [`SilentTrack`] stands in when nothing could be loaded.

use fnv::FnvHashMap;
use smallvec::SmallVec;

use crate::error::VisualizerError;
use crate::spectrum::{SignalSource, SpectrumAnalyzer};

pub type TrackId = usize;

/// Outcome of asynchronous asset acquisition, inspected once per frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Pending,
    Ready,
    Failed(VisualizerError),
}

/// Transport and routing capabilities of one audio track.
pub trait PlaybackHandle: SignalSource {
    fn load_state(&self) -> LoadState;

    fn play(&mut self);
    fn pause(&mut self);
    fn is_playing(&self) -> bool;

    fn current_time(&self) -> f64;
    /// Track length in seconds; 0 until known.
    fn duration(&self) -> f64;
    fn seek(&mut self, seconds: f64);

    fn volume(&self) -> f32;
    fn set_volume(&mut self, volume: f32);

    /// Route the track's output into the analyzer input.
    fn connect(&mut self);
    fn disconnect(&mut self);
    fn is_connected(&self) -> bool;
}

/// Null-object track: every transport call is a safe no-op and it never
/// produces a signal.
#[derive(Debug)]
pub struct SilentTrack {
    state: LoadState,
    volume: f32,
    connected: bool,
}

impl SilentTrack {
    pub fn new() -> Self {
        Self {
            state: LoadState::Pending,
            volume: 1.0,
            connected: false,
        }
    }

    /// Placeholder for a track whose asset could not be loaded.
    pub fn failed(error: VisualizerError) -> Self {
        Self {
            state: LoadState::Failed(error),
            ..Self::new()
        }
    }
}

impl Default for SilentTrack {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalSource for SilentTrack {
    fn fill_time_domain(&self, _out: &mut [f32]) -> bool {
        false
    }
}

impl PlaybackHandle for SilentTrack {
    fn load_state(&self) -> LoadState {
        self.state.clone()
    }
    fn play(&mut self) {}
    fn pause(&mut self) {}
    fn is_playing(&self) -> bool {
        false
    }
    fn current_time(&self) -> f64 {
        0.0
    }
    fn duration(&self) -> f64 {
        0.0
    }
    fn seek(&mut self, _seconds: f64) {}
    fn volume(&self) -> f32 {
        self.volume
    }
    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }
    fn connect(&mut self) {
        self.connected = true;
    }
    fn disconnect(&mut self) {
        self.connected = false;
    }
    fn is_connected(&self) -> bool {
        self.connected
    }
}

/// Named tracks with exactly one active at a time.
pub struct TrackDeck {
    tracks: SmallVec<[Box<dyn PlaybackHandle>; 2]>,
    names: FnvHashMap<String, TrackId>,
    labels: SmallVec<[String; 2]>,
    active: TrackId,
}

impl TrackDeck {
    pub fn new(name: impl Into<String>, track: Box<dyn PlaybackHandle>) -> Self {
        let mut deck = Self {
            tracks: SmallVec::new(),
            names: FnvHashMap::default(),
            labels: SmallVec::new(),
            active: 0,
        };
        deck.add(name, track);
        deck
    }

    /// A deck holding only a [`SilentTrack`] in the failed state.
    pub fn unavailable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        let name = name.into();
        let error = VisualizerError::asset_unavailable(name.clone(), reason);
        Self::new(name, Box::new(SilentTrack::failed(error)))
    }

    /// Register another track.
    ///
    /// Re-using a name replaces that track in place and keeps its id. The old
    /// track is disconnected and paused; the new one inherits its routing.
    pub fn add(&mut self, name: impl Into<String>, track: Box<dyn PlaybackHandle>) -> TrackId {
        let name = name.into();
        if let Some(id) = self.id_of(&name) {
            let mut old = std::mem::replace(&mut self.tracks[id], track);
            let was_connected = old.is_connected();
            old.disconnect();
            old.pause();
            if was_connected {
                self.tracks[id].connect();
            }
            log::warn!("[deck] track `{}` replaced", name);
            return id;
        }
        let id = self.tracks.len();
        self.tracks.push(track);
        self.labels.push(name.clone());
        self.names.insert(name, id);
        id
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn id_of(&self, name: &str) -> Option<TrackId> {
        self.names.get(name).copied()
    }

    pub fn active_id(&self) -> TrackId {
        self.active
    }

    pub fn active_name(&self) -> &str {
        &self.labels[self.active]
    }

    pub fn current(&self) -> &dyn PlaybackHandle {
        self.tracks[self.active].as_ref()
    }

    pub fn current_mut(&mut self) -> &mut dyn PlaybackHandle {
        self.tracks[self.active].as_mut()
    }

    pub fn track(&self, id: TrackId) -> Option<&dyn PlaybackHandle> {
        self.tracks.get(id).map(|t| t.as_ref())
    }

    /// Route the active track into `analyzer`.
    pub fn attach(&mut self, analyzer: &mut SpectrumAnalyzer) {
        self.tracks[self.active].connect();
        analyzer.connect(self.active);
    }

    /// The signal the analyzer should read, if its input is a connected track.
    pub fn source_for(&self, input: Option<TrackId>) -> Option<&dyn PlaybackHandle> {
        let id = input?;
        let track = self.tracks.get(id)?;
        (id == self.active && track.is_connected()).then(|| track.as_ref())
    }

    /// Make `name` the active track.
    ///
    /// Disconnects and pauses the previous track, then connects the new one.
    /// The whole sequence runs under one `&mut` borrow, so no frame can observe
    /// the deck half-switched. Playback resumes on the new track if the old one
    /// was playing. Returns `false` for an unknown name.
    pub fn switch_to(&mut self, name: &str, analyzer: &mut SpectrumAnalyzer) -> bool {
        let Some(next) = self.id_of(name) else {
            log::warn!("[deck] unknown track `{}`", name);
            return false;
        };
        if next == self.active {
            return true;
        }
        let prev = self.active;
        let was_playing = self.tracks[prev].is_playing();

        self.tracks[prev].disconnect();
        analyzer.disconnect();
        self.tracks[prev].pause();

        self.active = next;
        self.tracks[next].connect();
        analyzer.connect(next);
        if was_playing {
            self.tracks[next].play();
        }
        log::info!(
            "[deck] switched `{}` -> `{}`",
            self.labels[prev],
            self.labels[next]
        );
        true
    }
}
