#![cfg(target_arch = "wasm32")]
use instant::Instant;
use skyline_core::{AnalyzerConfig, TrackDeck, Visualizer, VisualizerConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod audio;
mod canvas;
mod constants;
mod dom;
mod events;
mod frame;
mod overlay;

use constants::{CANVAS_ID, DEFAULT_TRACK_NAME};

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn build_deck(document: &web::Document, bins: usize) -> TrackDeck {
    match audio::AudioGraph::new(bins) {
        Ok(graph) => audio::build_deck(&graph, document),
        Err(e) => {
            log::error!("audio graph error: {:?}", e);
            TrackDeck::unavailable(DEFAULT_TRACK_NAME, e.to_string())
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("skyline-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let config = VisualizerConfig {
        seed: (js_sys::Math::random() * u32::MAX as f64) as u64,
        ..VisualizerConfig::default()
    };
    log::info!("[init] scene seed {}", config.seed);
    let deck = build_deck(&document, AnalyzerConfig::default().bins);
    let visualizer = Rc::new(RefCell::new(Visualizer::new(deck, config)));

    events::wire_transport(&document, &visualizer);

    let surface = canvas::CanvasSurface::new(canvas)?;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        visualizer,
        surface,
        document,
        last_instant: Instant::now(),
        announced_ready: false,
        shown_error: None,
        shown_duration: None,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
