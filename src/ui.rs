use crate::core::dispatch::{stats_display, DisplayUpdate};
use crate::core::FrameStats;
use crate::dom;
use web_sys as web;

pub fn apply_updates<'a>(document: &web::Document, updates: impl IntoIterator<Item = &'a DisplayUpdate>) {
    for update in updates {
        match update {
            DisplayUpdate::Text { id, text } => dom::set_text(document, id, text),
            DisplayUpdate::Active { id, active } => dom::set_active(document, id, *active),
        }
    }
}

pub fn publish_stats(document: &web::Document, stats: &FrameStats) {
    apply_updates(document, stats_display(stats).iter());
}
