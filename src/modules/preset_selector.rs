use eframe::egui;
use std::sync::mpsc::Receiver;
use super::sync::{EventBus, SelectorEvent, Writer};

/// What a host has to expose for the tag docker to mirror its brush tags.
pub trait TagSource {
    fn tags(&self) -> Vec<String>;
    fn current_tag(&self) -> Option<String>;
    /// Makes `tag` current. Returns false when the host has no such tag.
    fn select_tag(&mut self, tag: &str, writer: Writer) -> bool;
    fn subscribe(&mut self) -> Receiver<SelectorEvent>;
}

pub const DEFAULT_TAGS: &[&str] = &[
    "All", "Favorites", "Sketch", "Ink", "Paint", "Digital", "Textures", "Erasers", "Pixel Art",
];

/// The host's brush-preset tag combo box.
pub struct PresetSelector {
    tags: Vec<String>,
    current: Option<usize>,
    events: EventBus,
}

impl Default for PresetSelector {
    fn default() -> Self {
        Self::new(DEFAULT_TAGS.iter().map(|t| t.to_string()).collect())
    }
}

impl PresetSelector {
    pub fn new(tags: Vec<String>) -> Self {
        let current = if tags.is_empty() { None } else { Some(0) };
        Self { tags, current, events: EventBus::new() }
    }

    pub fn count(&self) -> usize { self.tags.len() }

    pub fn item_text(&self, index: usize) -> Option<&str> {
        self.tags.get(index).map(String::as_str)
    }

    pub fn current_text(&self) -> Option<&str> {
        self.current.and_then(|i| self.item_text(i))
    }

    pub fn set_current_index(&mut self, index: usize, writer: Writer) {
        if index >= self.tags.len() || self.current == Some(index) {
            return;
        }
        self.current = Some(index);
        let tag = self.tags[index].clone();
        tracing::debug!(%tag, ?writer, "preset tag selected");
        self.events.publish(SelectorEvent::SelectionChanged { tag, origin: writer });
    }

    /// Adds a tag at `index` (clamped to the end). Duplicate or blank names are rejected.
    pub fn insert_tag(&mut self, index: usize, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        let index = index.min(self.tags.len());
        self.tags.insert(index, tag.to_string());
        match self.current {
            Some(cur) if cur >= index => self.current = Some(cur + 1),
            None => self.current = Some(index),
            _ => {}
        }
        self.events.publish(SelectorEvent::TagsChanged);
        if self.current == Some(index) {
            self.events.publish(SelectorEvent::SelectionChanged { tag: tag.to_string(), origin: Writer::Host });
        }
        true
    }

    pub fn push_tag(&mut self, tag: &str) -> bool {
        self.insert_tag(self.tags.len(), tag)
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let Some(index) = self.tags.iter().position(|t| t == tag) else { return false };
        self.tags.remove(index);
        let selection_moved = match self.current {
            Some(cur) if cur == index => {
                self.current = if self.tags.is_empty() { None } else { Some(index.min(self.tags.len() - 1)) };
                true
            }
            Some(cur) if cur > index => {
                self.current = Some(cur - 1);
                false
            }
            _ => false,
        };
        self.events.publish(SelectorEvent::TagsChanged);
        if selection_moved {
            if let Some(tag) = self.current_text().map(str::to_owned) {
                self.events.publish(SelectorEvent::SelectionChanged { tag, origin: Writer::Host });
            }
        }
        true
    }

    /// Replaces every tag, keeping the current one when it survives.
    pub fn reset(&mut self, tags: Vec<String>) {
        let previous = self.current_text().map(str::to_owned);
        self.tags = tags;
        self.current = previous
            .as_deref()
            .and_then(|p| self.tags.iter().position(|t| t == p))
            .or(if self.tags.is_empty() { None } else { Some(0) });
        self.events.publish(SelectorEvent::TagsChanged);
        if let Some(tag) = self.current_text().map(str::to_owned) {
            if previous.as_deref() != Some(tag.as_str()) {
                self.events.publish(SelectorEvent::SelectionChanged { tag, origin: Writer::Host });
            }
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) {
        let selected_text = self.current_text().unwrap_or("(no tags)").to_string();
        let mut picked = None;
        egui::ComboBox::from_id_salt("preset_tag_combo")
            .selected_text(selected_text)
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for (i, tag) in self.tags.iter().enumerate() {
                    if ui.selectable_label(self.current == Some(i), tag.as_str()).clicked() {
                        picked = Some(i);
                    }
                }
            });
        if let Some(i) = picked {
            self.set_current_index(i, Writer::Host);
        }
    }
}

impl TagSource for PresetSelector {
    fn tags(&self) -> Vec<String> { self.tags.clone() }

    fn current_tag(&self) -> Option<String> { self.current_text().map(str::to_owned) }

    fn select_tag(&mut self, tag: &str, writer: Writer) -> bool {
        match self.tags.iter().position(|t| t == tag) {
            Some(index) => {
                self.set_current_index(index, writer);
                true
            }
            None => false,
        }
    }

    fn subscribe(&mut self) -> Receiver<SelectorEvent> { self.events.subscribe() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector(raw: &[&str]) -> PresetSelector {
        PresetSelector::new(raw.iter().map(|s| s.to_string()).collect())
    }

    fn drain(rx: &Receiver<SelectorEvent>) -> Vec<SelectorEvent> {
        rx.try_iter().collect()
    }

    #[test]
    fn starts_on_first_tag() {
        let s = selector(&["Ink", "Paint"]);
        assert_eq!(s.current_text(), Some("Ink"));
        assert_eq!(selector(&[]).current_text(), None);
    }

    #[test]
    fn selecting_publishes_once_with_writer() {
        let mut s = selector(&["Ink", "Paint"]);
        let rx = s.subscribe();
        assert!(s.select_tag("Paint", Writer::Docker));
        assert!(s.select_tag("Paint", Writer::Docker));
        assert_eq!(drain(&rx), vec![SelectorEvent::SelectionChanged { tag: "Paint".into(), origin: Writer::Docker }]);
    }

    #[test]
    fn unknown_tag_is_not_selected() {
        let mut s = selector(&["Ink"]);
        assert!(!s.select_tag("Nope", Writer::Docker));
        assert_eq!(s.current_text(), Some("Ink"));
    }

    #[test]
    fn insert_keeps_current_tag() {
        let mut s = selector(&["Ink", "Paint"]);
        s.set_current_index(1, Writer::Host);
        let rx = s.subscribe();
        assert!(s.insert_tag(0, "Sketch"));
        assert_eq!(s.current_text(), Some("Paint"));
        assert_eq!(drain(&rx), vec![SelectorEvent::TagsChanged]);
        assert!(!s.push_tag("Ink"));
        assert!(!s.push_tag("   "));
    }

    #[test]
    fn removing_current_moves_selection() {
        let mut s = selector(&["Ink", "Paint", "Sketch"]);
        s.set_current_index(2, Writer::Host);
        let rx = s.subscribe();
        assert!(s.remove_tag("Sketch"));
        assert_eq!(s.current_text(), Some("Paint"));
        assert_eq!(drain(&rx), vec![
            SelectorEvent::TagsChanged,
            SelectorEvent::SelectionChanged { tag: "Paint".into(), origin: Writer::Host },
        ]);
    }

    #[test]
    fn removing_last_tag_clears_selection() {
        let mut s = selector(&["Ink"]);
        assert!(s.remove_tag("Ink"));
        assert_eq!(s.current_text(), None);
        assert!(!s.remove_tag("Ink"));
    }

    #[test]
    fn reset_keeps_surviving_selection() {
        let mut s = selector(&["Ink", "Paint"]);
        s.set_current_index(1, Writer::Host);
        s.reset(vec!["Paint".into(), "Erasers".into()]);
        assert_eq!(s.current_text(), Some("Paint"));
        s.reset(vec!["Erasers".into()]);
        assert_eq!(s.current_text(), Some("Erasers"));
    }
}
