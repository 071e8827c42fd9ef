//! Transport controls wired to the shared visualizer.
//!
//! Every handler runs synchronously inside one DOM event, so a track switch is
//! complete before the next animation frame borrows the visualizer.

use skyline_core::Visualizer;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

use crate::constants::*;
use crate::dom;
use crate::overlay;

pub fn wire_transport(document: &web::Document, visualizer: &Rc<RefCell<Visualizer>>) {
    let vis = visualizer.clone();
    let doc = document.clone();
    dom::add_listener(document, PLAY_BUTTON_ID, "click", move || {
        let mut v = vis.borrow_mut();
        if !v.is_ready() {
            return;
        }
        let playing = v.toggle_play();
        log::info!("[transport] {}", if playing { "play" } else { "pause" });
        overlay::set_play_button(&doc, playing);
    });

    let vis = visualizer.clone();
    let doc = document.clone();
    dom::add_listener(document, RESTART_BUTTON_ID, "click", move || {
        if vis.borrow_mut().restart().is_ok() {
            overlay::set_play_button(&doc, true);
        }
    });

    let vis = visualizer.clone();
    let doc = document.clone();
    dom::add_listener(document, PROGRESS_BAR_ID, "input", move || {
        if let Some(seconds) = dom::input_value(&doc, PROGRESS_BAR_ID) {
            _ = vis.borrow_mut().seek(seconds);
        }
    });

    let vis = visualizer.clone();
    let doc = document.clone();
    dom::add_listener(document, VOLUME_SLIDER_ID, "input", move || {
        if let Some(volume) = dom::input_value(&doc, VOLUME_SLIDER_ID) {
            vis.borrow_mut().set_volume(volume as f32);
        }
    });

    wire_parts(document, visualizer);
}

fn wire_parts(document: &web::Document, visualizer: &Rc<RefCell<Visualizer>>) {
    for el in dom::query_all(document, PART_SELECTOR) {
        let Some(part) = el.get_attribute(PART_ATTR) else {
            continue;
        };
        let vis = visualizer.clone();
        let doc = document.clone();
        dom::add_element_listener(&el, "click", move || {
            let mut v = vis.borrow_mut();
            if v.switch_track(&part) {
                overlay::mark_active_part(&doc, &part);
                let playing = v.deck().current().is_playing();
                overlay::set_play_button(&doc, playing);
            }
        });
    }
    if let Ok(v) = visualizer.try_borrow() {
        overlay::mark_active_part(document, v.deck().active_name());
    }
}
