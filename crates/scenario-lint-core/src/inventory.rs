//! Resource inventory: backgrounds and music referenced by a script.

use crate::script::Chapter;
use crate::walker::{walk_code, ArgumentValue, InvocationEvent, WalkerOptions};
use serde::Serialize;

const BACKGROUND_CALLS: &[&str] = &[
    "show",
    "trans",
    "trans2",
    "trans_fade",
    "trans_left",
    "trans_right",
    "trans_up",
    "trans_down",
];
const BACKGROUND_LOOP_CALL: &str = "show_loop";
const BGM_CALLS: &[&str] = &["play", "fade_in"];

/// Resources in order of first use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceInventory {
    /// Background images.
    pub backgrounds: Vec<String>,
    /// Background music tracks.
    pub bgm: Vec<String>,
}

impl ResourceInventory {
    /// Collects resources from every entry of `chapters`.
    ///
    /// Code blocks that do not parse are skipped.
    #[must_use]
    pub fn collect(chapters: &[Chapter], options: &WalkerOptions) -> Self {
        let mut inventory = Self::default();
        for chapter in chapters {
            for entry in chapter.entries.iter().filter(|e| e.has_code()) {
                match walk_code(&entry.code, options) {
                    Ok(events) => events.iter().for_each(|ev| inventory.record(ev)),
                    Err(e) => tracing::warn!(
                        chapter = %chapter.name,
                        line = entry.line_number,
                        "skipping code block: {e}"
                    ),
                }
            }
        }
        inventory
    }

    fn record(&mut self, event: &InvocationEvent) {
        let Some(target) = event.first_arg_text() else {
            return;
        };
        let name = event.name.as_str();

        if BACKGROUND_CALLS.contains(&name) && target.starts_with("bg") {
            if let Some(ArgumentValue::Str(image)) = event.arg(1) {
                push_unique(&mut self.backgrounds, image);
            }
        } else if name == BACKGROUND_LOOP_CALL && target.starts_with("bg") {
            if let Some(ArgumentValue::Table { items, .. }) = event.arg(1) {
                for image in items.iter().filter_map(ArgumentValue::as_text) {
                    push_unique(&mut self.backgrounds, image);
                }
            }
        } else if BGM_CALLS.contains(&name) && target == "bgm" {
            if let Some(track) = event.arg(1).and_then(ArgumentValue::as_text) {
                push_unique(&mut self.bgm, track);
            }
        }
    }
}

fn push_unique(list: &mut Vec<String>, name: &str) {
    if !list.iter().any(|n| n == name) {
        list.push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;

    #[test]
    fn test_collects_first_seen_resources() {
        let text = concat!(
            "@<|label('c')|>\n",
            "<|\nshow(bg, 'room')\nplay(bgm, 'theme')\n|>\nA\n\n",
            "<|\ntrans(bg, 'street', 'fade')\nshow_loop(bg, {'rain1', 'rain2', 'room'})\n|>\nB\n\n",
            "<|\nshow(fg, 'ignored')\nfade_in(bgm, 'theme', 1)\nfade_in(bgm, 'night')\n|>\nC\n",
            "@<||>",
        );
        let chapters = parse_script(text).unwrap();
        let inventory = ResourceInventory::collect(&chapters, &WalkerOptions::default());
        assert_eq!(inventory.backgrounds, vec!["room", "street", "rain1", "rain2"]);
        assert_eq!(inventory.bgm, vec!["theme", "night"]);
    }
}
