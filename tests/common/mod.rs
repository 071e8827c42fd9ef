// Test doubles for the two external collaborators: playback and the surface.

#![allow(dead_code)]

use skyline_core::{DrawSurface, LoadState, PlaybackHandle, Rgba, SignalSource};
use std::cell::RefCell;
use std::f32::consts::PI;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear,
    Rect { x: f32, y: f32, w: f32, h: f32 },
    Ellipse { cx: f32, cy: f32, d: f32 },
    StrokeEllipse { cx: f32, cy: f32, d: f32 },
    Line { x1: f32, y1: f32, x2: f32, y2: f32 },
    Text(String),
}

pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn first_index(&self, pred: impl Fn(&DrawOp) -> bool) -> Option<usize> {
        self.ops.iter().position(pred)
    }

    pub fn last_index(&self, pred: impl Fn(&DrawOp) -> bool) -> Option<usize> {
        self.ops.iter().rposition(pred)
    }
}

impl DrawSurface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }
    fn height(&self) -> f32 {
        self.height
    }
    fn clear(&mut self, _color: Rgba) {
        self.ops.push(DrawOp::Clear);
    }
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, _color: Rgba) {
        self.ops.push(DrawOp::Rect { x, y, w, h });
    }
    fn fill_ellipse(&mut self, cx: f32, cy: f32, w: f32, _h: f32, _color: Rgba) {
        self.ops.push(DrawOp::Ellipse { cx, cy, d: w });
    }
    fn stroke_ellipse(&mut self, cx: f32, cy: f32, w: f32, _h: f32, _weight: f32, _c: Rgba) {
        self.ops.push(DrawOp::StrokeEllipse { cx, cy, d: w });
    }
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, _weight: f32, _color: Rgba) {
        self.ops.push(DrawOp::Line { x1, y1, x2, y2 });
    }
    fn text(&mut self, text: &str, _x: f32, _y: f32, _size: f32, _color: Rgba) {
        self.ops.push(DrawOp::Text(text.to_string()));
    }
}

/// Observable state of a [`ScriptedTrack`], shared with the test.
#[derive(Debug)]
pub struct TrackState {
    pub load: LoadState,
    pub playing: bool,
    pub time: f64,
    pub duration: f64,
    pub volume: f32,
    pub connected: bool,
    /// Sine tone placed exactly on this FFT bin; `None` means silence.
    pub tone_bin: Option<usize>,
    pub reads: usize,
    pub plays: usize,
    pub pauses: usize,
}

pub type Probe = Rc<RefCell<TrackState>>;

pub struct ScriptedTrack {
    state: Probe,
}

impl ScriptedTrack {
    pub fn new(tone_bin: Option<usize>) -> (Self, Probe) {
        let state = Rc::new(RefCell::new(TrackState {
            load: LoadState::Pending,
            playing: false,
            time: 0.0,
            duration: 180.0,
            volume: 1.0,
            connected: false,
            tone_bin,
            reads: 0,
            plays: 0,
            pauses: 0,
        }));
        (
            Self {
                state: state.clone(),
            },
            state,
        )
    }

    /// A track whose metadata has already loaded.
    pub fn ready(tone_bin: Option<usize>) -> (Self, Probe) {
        let (track, probe) = Self::new(tone_bin);
        probe.borrow_mut().load = LoadState::Ready;
        (track, probe)
    }
}

impl SignalSource for ScriptedTrack {
    fn fill_time_domain(&self, out: &mut [f32]) -> bool {
        let mut s = self.state.borrow_mut();
        s.reads += 1;
        if !s.connected || s.load != LoadState::Ready {
            return false;
        }
        let n = out.len() as f32;
        match s.tone_bin {
            Some(k) => {
                for (i, v) in out.iter_mut().enumerate() {
                    *v = (2.0 * PI * k as f32 * i as f32 / n).sin();
                }
            }
            None => out.fill(0.0),
        }
        true
    }
}

impl PlaybackHandle for ScriptedTrack {
    fn load_state(&self) -> LoadState {
        self.state.borrow().load.clone()
    }
    fn play(&mut self) {
        let mut s = self.state.borrow_mut();
        s.playing = true;
        s.plays += 1;
    }
    fn pause(&mut self) {
        let mut s = self.state.borrow_mut();
        s.playing = false;
        s.pauses += 1;
    }
    fn is_playing(&self) -> bool {
        self.state.borrow().playing
    }
    fn current_time(&self) -> f64 {
        self.state.borrow().time
    }
    fn duration(&self) -> f64 {
        self.state.borrow().duration
    }
    fn seek(&mut self, seconds: f64) {
        self.state.borrow_mut().time = seconds;
    }
    fn volume(&self) -> f32 {
        self.state.borrow().volume
    }
    fn set_volume(&mut self, volume: f32) {
        self.state.borrow_mut().volume = volume;
    }
    fn connect(&mut self) {
        self.state.borrow_mut().connected = true;
    }
    fn disconnect(&mut self) {
        self.state.borrow_mut().connected = false;
    }
    fn is_connected(&self) -> bool {
        self.state.borrow().connected
    }
}
