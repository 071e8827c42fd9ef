use instant::Instant;
use skyline_core::{Status, Visualizer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::canvas::CanvasSurface;
use crate::overlay;

pub struct FrameContext {
    pub visualizer: Rc<RefCell<Visualizer>>,
    pub surface: CanvasSurface,
    pub document: web::Document,

    pub last_instant: Instant,
    pub announced_ready: bool,
    // error text currently shown on the loading screen
    pub shown_error: Option<String>,
    // track and duration currently shown next to the progress bar
    pub shown_duration: Option<(String, f64)>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        // handlers borrow on user events; a frame never overlaps them
        let Ok(mut vis) = self.visualizer.try_borrow_mut() else {
            return;
        };
        vis.frame(&mut self.surface, dt.as_secs_f32());

        if !self.announced_ready && vis.is_ready() {
            log::info!("[frame] ready after {} frames", vis.frame_index());
            overlay::hide_loading(&self.document);
            self.announced_ready = true;
        }
        match vis.status() {
            Status::Error(msg) => {
                if self.shown_error.as_deref() != Some(msg.as_str()) {
                    overlay::show_error(&self.document, msg);
                    self.shown_error = Some(msg.clone());
                }
            }
            _ => {
                if self.shown_error.take().is_some() && vis.is_ready() {
                    overlay::hide_loading(&self.document);
                }
            }
        }
        if !vis.is_ready() {
            return;
        }

        let track = vis.deck().active_name();
        let duration = vis.duration();
        let stale = self
            .shown_duration
            .as_ref()
            .map_or(true, |(t, d)| t != track || *d != duration);
        if stale {
            overlay::set_duration(&self.document, duration);
            self.shown_duration = Some((track.to_string(), duration));
        }
        if vis.deck().current().is_playing() {
            overlay::update_progress(&self.document, vis.current_time());
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
