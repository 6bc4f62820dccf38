use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::*;
use crate::dom;

/// Make the final-message container visible and set the line texts. The
/// lines themselves start transparent; per-frame styling fades them in.
pub fn reveal_message(document: &web::Document) {
    dom::set_display(document, FINAL_MESSAGE_CONTAINER_ID, "block");
    if let Some(el) = document.get_element_by_id(FINAL_MESSAGE_ID) {
        el.set_text_content(Some(FINAL_MESSAGE_TEXT));
    }
}

pub fn reveal_subline(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(FINAL_SUBLINE_ID) {
        el.set_text_content(Some(FINAL_SUBLINE_TEXT));
        dom::set_display(document, FINAL_SUBLINE_ID, "block");
    }
}

/// Apply the scene's tweened opacity/offset to one overlay line.
pub fn style_line(document: &web::Document, element_id: &str, opacity: f32, offset_y_px: f32) {
    if let Some(el) = document.get_element_by_id(element_id) {
        if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
            let style = html.style();
            _ = style.set_property("opacity", &format!("{opacity:.3}"));
            _ = style.set_property("transform", &format!("translateY({offset_y_px:.1}px)"));
        }
    }
}

/// Swap the music toggle icons.
pub fn set_music_icons(document: &web::Document, playing: bool) {
    let (on, off) = if playing {
        ("block", "none")
    } else {
        ("none", "block")
    };
    dom::set_display(document, MUSIC_ON_ID, on);
    dom::set_display(document, MUSIC_OFF_ID, off);
}
