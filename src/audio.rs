use skyline_core::{
    LoadState, PlaybackHandle, SignalSource, SilentTrack, TrackDeck, VisualizerError,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

use crate::constants::{DEFAULT_TRACK_NAME, DEFAULT_TRACK_URL, PART_ATTR, PART_SELECTOR, SRC_ATTR};
use crate::dom;

/// One audio context with a single analyser shared by every track.
pub struct AudioGraph {
    pub audio_ctx: web::AudioContext,
    pub analyser: web::AnalyserNode,
}

impl AudioGraph {
    pub fn new(bins: usize) -> anyhow::Result<Self> {
        let audio_ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let analyser =
            web::AnalyserNode::new(&audio_ctx).map_err(|e| anyhow::anyhow!("{:?}", e))?;
        // core analysis runs its own FFT over 2 * bins time-domain samples
        analyser.set_fft_size((bins * 2) as u32);
        Ok(Self {
            audio_ctx,
            analyser,
        })
    }
}

/// `<audio>` element routed through WebAudio.
///
/// The element always plays to the destination; `connect` additionally feeds
/// the shared analyser.
pub struct MediaTrack {
    element: web::HtmlAudioElement,
    source: web::MediaElementAudioSourceNode,
    analyser: web::AnalyserNode,
    audio_ctx: web::AudioContext,
    load: Rc<RefCell<LoadState>>,
    connected: bool,
}

impl MediaTrack {
    pub fn load(graph: &AudioGraph, name: &str, url: &str) -> anyhow::Result<Self> {
        let element =
            web::HtmlAudioElement::new_with_src(url).map_err(|e| anyhow::anyhow!("{:?}", e))?;
        // required for the analyser to read cross-origin streams
        element.set_cross_origin(Some("anonymous"));
        element.set_preload("metadata");

        let source = graph
            .audio_ctx
            .create_media_element_source(&element)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        source
            .connect_with_audio_node(&graph.audio_ctx.destination())
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        let load = Rc::new(RefCell::new(LoadState::Pending));
        let ready = load.clone();
        let ready_name = name.to_string();
        listen(&element, "loadedmetadata", move || {
            log::info!("[audio] `{}` metadata loaded", ready_name);
            *ready.borrow_mut() = LoadState::Ready;
        });
        let failed = load.clone();
        let failed_name = name.to_string();
        listen(&element, "error", move || {
            let err = VisualizerError::asset_unavailable(
                failed_name.clone(),
                "stream failed to load or decode",
            );
            log::error!("[audio] {}", err);
            *failed.borrow_mut() = LoadState::Failed(err);
        });

        Ok(Self {
            element,
            source,
            analyser: graph.analyser.clone(),
            audio_ctx: graph.audio_ctx.clone(),
            load,
            connected: false,
        })
    }
}

fn listen(element: &web::HtmlAudioElement, event: &str, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    _ = element.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

impl SignalSource for MediaTrack {
    fn fill_time_domain(&self, out: &mut [f32]) -> bool {
        if !self.connected || *self.load.borrow() != LoadState::Ready {
            return false;
        }
        self.analyser.get_float_time_domain_data(out);
        true
    }
}

impl PlaybackHandle for MediaTrack {
    fn load_state(&self) -> LoadState {
        self.load.borrow().clone()
    }

    fn play(&mut self) {
        // browsers keep the context suspended until a user gesture
        _ = self.audio_ctx.resume();
        match self.element.play() {
            Ok(promise) => spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::error!("[audio] play blocked: {:?}", e);
                }
            }),
            Err(e) => log::error!("[audio] play error: {:?}", e),
        }
    }

    fn pause(&mut self) {
        _ = self.element.pause();
    }

    fn is_playing(&self) -> bool {
        !self.element.paused()
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn duration(&self) -> f64 {
        let d = self.element.duration();
        if d.is_finite() {
            d
        } else {
            0.0
        }
    }

    fn seek(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn volume(&self) -> f32 {
        self.element.volume() as f32
    }

    fn set_volume(&mut self, volume: f32) {
        self.element.set_volume(volume.clamp(0.0, 1.0) as f64);
    }

    fn connect(&mut self) {
        if self.connected {
            return;
        }
        match self.source.connect_with_audio_node(&self.analyser) {
            Ok(_) => self.connected = true,
            Err(e) => log::error!("[audio] analyser connect error: {:?}", e),
        }
    }

    fn disconnect(&mut self) {
        if !self.connected {
            return;
        }
        _ = self.source.disconnect_with_audio_node(&self.analyser);
        self.connected = false;
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

fn track_or_placeholder(graph: &AudioGraph, name: &str, url: &str) -> Box<dyn PlaybackHandle> {
    match MediaTrack::load(graph, name, url) {
        Ok(t) => Box::new(t),
        Err(e) => {
            log::error!("[audio] `{}` unavailable: {}", name, e);
            let err = VisualizerError::asset_unavailable(name, e.to_string());
            Box::new(SilentTrack::failed(err))
        }
    }
}

/// Tracks declared by `[data-part]` elements, or the default stream.
///
/// Elements without `data-src` fall back to the default URL.
pub fn build_deck(graph: &AudioGraph, document: &web::Document) -> TrackDeck {
    let mut parts: Vec<(String, String)> = Vec::new();
    for el in dom::query_all(document, PART_SELECTOR) {
        let Some(name) = el.get_attribute(PART_ATTR) else {
            continue;
        };
        if parts.iter().any(|(n, _)| *n == name) {
            continue;
        }
        let url = el
            .get_attribute(SRC_ATTR)
            .unwrap_or_else(|| DEFAULT_TRACK_URL.to_string());
        parts.push((name, url));
    }
    if parts.is_empty() {
        parts.push((DEFAULT_TRACK_NAME.to_string(), DEFAULT_TRACK_URL.to_string()));
    }

    let mut iter = parts.into_iter();
    let mut deck = match iter.next() {
        Some((name, url)) => {
            let track = track_or_placeholder(graph, &name, &url);
            TrackDeck::new(name, track)
        }
        None => TrackDeck::unavailable(DEFAULT_TRACK_NAME, "no tracks declared"),
    };
    for (name, url) in iter {
        let track = track_or_placeholder(graph, &name, &url);
        deck.add(name, track);
    }
    log::info!("[audio] deck ready with {} track(s)", deck.len());
    deck
}
