use skyline_core::format_time;
use web_sys as web;

use crate::constants::*;
use crate::dom;

#[inline]
pub fn hide_loading(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(LOADING_SCREEN_ID) {
        _ = el.set_attribute("style", "display:none");
    }
}

/// Replace the loading screen text with an error and keep it visible.
pub fn show_error(document: &web::Document, message: &str) {
    if let Some(el) = document.get_element_by_id(LOADING_SCREEN_ID) {
        _ = el.set_attribute("style", "");
        el.set_text_content(Some(message));
    }
}

/// Size the progress bar and total-time label for the active track.
pub fn set_duration(document: &web::Document, duration: f64) {
    dom::set_text(document, TOTAL_TIME_ID, &format_time(duration));
    if let Some(bar) = dom::input_element(document, PROGRESS_BAR_ID) {
        bar.set_max(&format!("{duration}"));
    }
}

pub fn update_progress(document: &web::Document, current: f64) {
    if let Some(bar) = dom::input_element(document, PROGRESS_BAR_ID) {
        bar.set_value(&format!("{current}"));
    }
    dom::set_text(document, CURRENT_TIME_ID, &format_time(current));
}

pub fn set_play_button(document: &web::Document, playing: bool) {
    if let Some(el) = document.get_element_by_id(PLAY_BUTTON_ID) {
        el.set_text_content(Some(if playing { "PAUSE" } else { "PLAY" }));
        let cl = el.class_list();
        _ = if playing {
            cl.add_1(PLAY_ACTIVE_CLASS)
        } else {
            cl.remove_1(PLAY_ACTIVE_CLASS)
        };
    }
}

/// Highlight the track button for `active`.
pub fn mark_active_part(document: &web::Document, active: &str) {
    for el in dom::query_all(document, PART_SELECTOR) {
        let is_active = el.get_attribute(PART_ATTR).as_deref() == Some(active);
        _ = el.class_list().toggle_with_force(PART_ACTIVE_CLASS, is_active);
    }
}
