use eframe::egui;
use std::sync::mpsc::{Receiver, TryRecvError};
use crate::modules::flow_layout::{FlowItem, FlowLayout};
use crate::modules::preset_selector::TagSource;
use crate::modules::sync::{SelectorEvent, WriteGuard, Writer};
use crate::modules::tag_mirror::TagMirror;
use crate::settings::DockerSettings;

pub const DOCKER_TITLE: &str = "Brush Tag Selector";

/// A checkable button standing for one host tag.
#[derive(Debug, Clone, PartialEq)]
pub struct TagButton {
    pub(super) label: String,
    pub(super) checked: bool,
    pub(super) size: egui::Vec2,
    pub(super) rect: egui::Rect,
}

impl TagButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), checked: false, size: egui::Vec2::ZERO, rect: egui::Rect::NOTHING }
    }

    pub fn label(&self) -> &str { &self.label }
    pub fn is_checked(&self) -> bool { self.checked }
}

impl FlowItem for TagButton {
    fn size_hint(&self) -> egui::Vec2 { self.size }
    fn set_geometry(&mut self, rect: egui::Rect) { self.rect = rect; }
}

pub struct TagDocker {
    pub(super) buttons: Vec<TagButton>,
    pub(super) layout: FlowLayout,
    mirror: TagMirror,
    events: Option<Receiver<SelectorEvent>>,
    guard: WriteGuard,
}

impl TagDocker {
    pub fn new(settings: &DockerSettings) -> Self {
        Self::with_mirror(settings.mirror(), FlowLayout::new(settings.margin, settings.spacing))
    }

    /// Buttons come from the mirror right away so the previous session's tags
    /// show up before the host selector is attached.
    pub fn with_mirror(mirror: TagMirror, layout: FlowLayout) -> Self {
        let mut docker = Self { buttons: Vec::new(), layout, mirror, events: None, guard: WriteGuard::new() };
        docker.rebuild_buttons(None);
        docker
    }

    pub fn buttons(&self) -> &[TagButton] { &self.buttons }

    pub fn mirror(&self) -> &TagMirror { &self.mirror }

    pub fn is_attached(&self) -> bool { self.events.is_some() }

    pub fn checked_label(&self) -> Option<&str> {
        self.buttons.iter().find(|b| b.checked).map(|b| b.label.as_str())
    }

    pub fn apply_settings(&mut self, settings: &DockerSettings) {
        self.layout = FlowLayout::new(settings.margin, settings.spacing);
        let mirror = settings.mirror();
        if mirror.path() != self.mirror.path() {
            tracing::info!(path = %mirror.path().display(), "tag mirror moved");
            self.mirror = mirror;
            let current = self.checked_label().map(str::to_owned);
            if self.is_attached() {
                let tags: Vec<String> = self.buttons.iter().map(|b| b.label.clone()).collect();
                self.write_mirror(&tags);
            }
            self.rebuild_buttons(current.as_deref());
        }
    }

    /// Hooks the docker up to the host selector. Without one the docker stays
    /// disabled and shows whatever the mirror held.
    pub fn attach(&mut self, host: Option<&mut dyn TagSource>) -> bool {
        let Some(host) = host else {
            tracing::warn!("{DOCKER_TITLE}: brush preset selector is not available, docker disabled");
            return false;
        };
        self.events = Some(host.subscribe());
        self.sync_tags_from_host(host);
        self.rebuild_buttons(host.current_tag().as_deref());
        tracing::info!(tags = self.buttons.len(), "{DOCKER_TITLE}: attached to brush preset selector");
        true
    }

    pub fn detach(&mut self) {
        self.events = None;
    }

    pub fn sync_tags_from_host(&self, host: &dyn TagSource) {
        self.write_mirror(&host.tags());
    }

    fn write_mirror(&self, tags: &[String]) {
        if let Err(e) = self.mirror.write(tags) {
            tracing::error!("{DOCKER_TITLE}: {e}");
        }
    }

    pub fn rebuild_buttons(&mut self, current: Option<&str>) {
        self.buttons.clear();
        let tags = match self.mirror.read() {
            Ok(tags) => tags,
            Err(e) => {
                tracing::error!("{DOCKER_TITLE}: {e}");
                return;
            }
        };
        self.buttons = tags.into_iter().map(TagButton::new).collect();
        self.sync_button_state(current);
    }

    /// Exactly the buttons labelled `text` end up checked.
    pub fn sync_button_state(&mut self, text: Option<&str>) {
        for button in &mut self.buttons {
            button.checked = Some(button.label.as_str()) == text;
        }
    }

    /// The clicked button is checked right away, then the host follows. While
    /// the write is in flight the pending selector events are drained: their
    /// selections are either the echo of this click or older than it.
    pub fn on_button_clicked(&mut self, index: usize, host: Option<&mut dyn TagSource>) {
        let Some(label) = self.buttons.get(index).map(|b| b.label.clone()) else { return };
        self.sync_button_state(Some(&label));

        let Some(host) = host else {
            tracing::debug!(%label, "tag button clicked without a host selector");
            return;
        };
        let Some(_token) = self.guard.try_begin() else { return };

        let selected = host.select_tag(&label, Writer::Docker);
        self.process_events(&mut *host);
        if selected {
            self.sync_button_state(host.current_tag().as_deref());
        } else {
            tracing::warn!(%label, "host selector has no such tag, mirror is stale");
        }
    }

    pub fn on_selection_changed(&mut self, tag: &str, origin: Writer) {
        if self.guard.is_writing() {
            tracing::trace!(%tag, ?origin, "selection change during own write ignored");
            return;
        }
        self.sync_button_state(Some(tag));
    }

    /// Drains pending selector events in the order the host sent them, so the
    /// last selection wins. Call once per frame.
    pub fn process_events(&mut self, host: &mut dyn TagSource) {
        let Some(rx) = &self.events else { return };
        let mut pending = Vec::new();
        let mut disconnected = false;
        loop {
            match rx.try_recv() {
                Ok(event) => pending.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        for event in pending {
            tracing::debug!(?event, "selector event");
            match event {
                SelectorEvent::TagsChanged => {
                    self.sync_tags_from_host(host);
                    self.rebuild_buttons(host.current_tag().as_deref());
                }
                SelectorEvent::SelectionChanged { tag, origin } => self.on_selection_changed(&tag, origin),
            }
        }

        if disconnected {
            tracing::warn!("{DOCKER_TITLE}: brush preset selector went away");
            self.events = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::preset_selector::PresetSelector;
    use crate::modules::tag_mirror::TAGS_FILENAME;
    use tempfile::TempDir;

    fn host(raw: &[&str]) -> PresetSelector {
        PresetSelector::new(raw.iter().map(|s| s.to_string()).collect())
    }

    fn docker(tmp: &TempDir) -> TagDocker {
        TagDocker::with_mirror(TagMirror::new(tmp.path().join(TAGS_FILENAME)), FlowLayout::new(0.0, 3.0))
    }

    fn labels(docker: &TagDocker) -> Vec<&str> {
        docker.buttons().iter().map(TagButton::label).collect()
    }

    /// Selector that records every write it receives.
    struct EchoHost<'a> {
        inner: PresetSelector,
        echoes: &'a std::cell::RefCell<Vec<(String, Writer)>>,
    }

    impl TagSource for EchoHost<'_> {
        fn tags(&self) -> Vec<String> { self.inner.tags() }
        fn current_tag(&self) -> Option<String> { self.inner.current_tag() }
        fn select_tag(&mut self, tag: &str, writer: Writer) -> bool {
            self.echoes.borrow_mut().push((tag.to_string(), writer));
            self.inner.select_tag(tag, writer)
        }
        fn subscribe(&mut self) -> Receiver<SelectorEvent> { self.inner.subscribe() }
    }

    #[test]
    fn attach_mirrors_host_tags_and_selection() {
        let tmp = TempDir::new().unwrap();
        let mut d = docker(&tmp);
        let mut h = host(&["Ink", "Paint", "Sketch"]);
        h.set_current_index(1, Writer::Host);
        assert!(d.attach(Some(&mut h)));
        assert_eq!(labels(&d), vec!["Ink", "Paint", "Sketch"]);
        assert_eq!(d.checked_label(), Some("Paint"));
        assert_eq!(d.mirror().read().unwrap(), h.tags());
    }

    #[test]
    fn missing_host_leaves_docker_disabled() {
        let tmp = TempDir::new().unwrap();
        let mut d = docker(&tmp);
        assert!(!d.attach(None));
        assert!(!d.is_attached());
        d.on_button_clicked(0, None);
        assert!(d.buttons().is_empty());
    }

    #[test]
    fn click_before_attach_checks_locally() {
        let tmp = TempDir::new().unwrap();
        TagMirror::new(tmp.path().join(TAGS_FILENAME)).write(&["Ink".into(), "Erasers".into()]).unwrap();
        let mut d = docker(&tmp);
        d.on_button_clicked(1, None);
        assert_eq!(d.checked_label(), Some("Erasers"));
        d.on_button_clicked(0, None);
        assert_eq!(d.checked_label(), Some("Ink"));
        assert_eq!(d.buttons().iter().filter(|b| b.is_checked()).count(), 1);
    }

    #[test]
    fn stale_label_click_still_checks_locally() {
        let tmp = TempDir::new().unwrap();
        let mut d = docker(&tmp);
        let mut h = host(&["Ink", "Paint"]);
        d.attach(Some(&mut h));
        // Host loses the tag without the docker hearing about it yet.
        let mut renamed = host(&["Ink"]);
        d.on_button_clicked(1, Some(&mut renamed));
        assert_eq!(renamed.current_text(), Some("Ink"));
        assert_eq!(d.checked_label(), Some("Paint"));
        assert!(!d.guard.is_writing());
    }

    #[test]
    fn previous_session_tags_load_before_attach() {
        let tmp = TempDir::new().unwrap();
        TagMirror::new(tmp.path().join(TAGS_FILENAME)).write(&["Ink".into(), "Erasers".into()]).unwrap();
        let d = docker(&tmp);
        assert_eq!(labels(&d), vec!["Ink", "Erasers"]);
        assert_eq!(d.checked_label(), None);
    }

    #[test]
    fn unreadable_mirror_gives_empty_button_set() {
        let tmp = TempDir::new().unwrap();
        let d = TagDocker::with_mirror(TagMirror::new(tmp.path()), FlowLayout::default());
        assert!(d.buttons().is_empty());
    }

    #[test]
    fn click_selects_host_tag_exclusively() {
        let tmp = TempDir::new().unwrap();
        let mut d = docker(&tmp);
        let mut h = host(&["Ink", "Paint", "Sketch"]);
        d.attach(Some(&mut h));
        d.on_button_clicked(2, Some(&mut h));
        assert_eq!(h.current_text(), Some("Sketch"));
        assert_eq!(d.checked_label(), Some("Sketch"));
        assert_eq!(d.buttons().iter().filter(|b| b.is_checked()).count(), 1);
    }

    #[test]
    fn own_selection_echo_is_drained_during_click() {
        let tmp = TempDir::new().unwrap();
        let mut d = docker(&tmp);
        let mut h = host(&["Ink", "Paint"]);
        let rx = h.subscribe();
        d.attach(Some(&mut h));
        d.on_button_clicked(1, Some(&mut h));
        assert_eq!(rx.try_recv().unwrap(), SelectorEvent::SelectionChanged { tag: "Paint".into(), origin: Writer::Docker });
        d.sync_button_state(Some("Ink"));
        d.process_events(&mut h);
        assert_eq!(d.checked_label(), Some("Ink"));
        assert!(!d.guard.is_writing());
    }

    #[test]
    fn click_supersedes_pending_host_selection() {
        let tmp = TempDir::new().unwrap();
        let mut d = docker(&tmp);
        let mut h = host(&["Ink", "Paint", "Sketch"]);
        d.attach(Some(&mut h));
        h.select_tag("Paint", Writer::Host);
        d.on_button_clicked(2, Some(&mut h));
        d.process_events(&mut h);
        assert_eq!(h.current_text(), Some("Sketch"));
        assert_eq!(d.checked_label(), h.current_text());
    }

    #[test]
    fn host_selection_after_click_wins() {
        let tmp = TempDir::new().unwrap();
        let mut d = docker(&tmp);
        let mut h = host(&["Ink", "Paint", "Sketch"]);
        d.attach(Some(&mut h));
        d.on_button_clicked(2, Some(&mut h));
        h.select_tag("Paint", Writer::Host);
        d.process_events(&mut h);
        assert_eq!(d.checked_label(), Some("Paint"));
        assert_eq!(d.checked_label(), h.current_text());
    }

    #[test]
    fn tag_edits_pending_at_click_time_still_rebuild() {
        let tmp = TempDir::new().unwrap();
        let mut d = docker(&tmp);
        let mut h = host(&["Ink", "Paint"]);
        d.attach(Some(&mut h));
        h.push_tag("Textures");
        d.on_button_clicked(1, Some(&mut h));
        assert_eq!(labels(&d), vec!["Ink", "Paint", "Textures"]);
        assert_eq!(d.checked_label(), Some("Paint"));
    }

    #[test]
    fn click_writes_host_once() {
        let tmp = TempDir::new().unwrap();
        let echoes = std::cell::RefCell::new(Vec::new());
        let mut h = EchoHost { inner: host(&["Ink", "Paint"]), echoes: &echoes };
        let mut d = docker(&tmp);
        d.attach(Some(&mut h));
        d.on_button_clicked(1, Some(&mut h));
        d.process_events(&mut h);
        assert_eq!(*echoes.borrow(), vec![("Paint".to_string(), Writer::Docker)]);
        assert_eq!(d.checked_label(), Some("Paint"));
    }

    #[test]
    fn host_selection_updates_buttons() {
        let tmp = TempDir::new().unwrap();
        let mut d = docker(&tmp);
        let mut h = host(&["Ink", "Paint"]);
        d.attach(Some(&mut h));
        h.select_tag("Paint", Writer::Host);
        d.process_events(&mut h);
        assert_eq!(d.checked_label(), Some("Paint"));
    }

    #[test]
    fn host_tag_edits_rebuild_buttons_and_mirror() {
        let tmp = TempDir::new().unwrap();
        let mut d = docker(&tmp);
        let mut h = host(&["Ink", "Paint"]);
        d.attach(Some(&mut h));
        h.push_tag("Textures");
        h.remove_tag("Ink");
        d.process_events(&mut h);
        assert_eq!(labels(&d), vec!["Paint", "Textures"]);
        assert_eq!(d.checked_label(), Some("Paint"));
        assert_eq!(d.mirror().read().unwrap(), vec!["Paint".to_string(), "Textures".to_string()]);
    }

    #[test]
    fn dropped_host_detaches() {
        let tmp = TempDir::new().unwrap();
        let mut d = docker(&tmp);
        let mut h = host(&["Ink"]);
        d.attach(Some(&mut h));
        let mut other = host(&["Ink"]);
        drop(h);
        d.process_events(&mut other);
        assert!(!d.is_attached());
    }

    #[test]
    fn moving_the_mirror_rewrites_it() {
        let tmp = TempDir::new().unwrap();
        let mut d = docker(&tmp);
        let mut h = host(&["Ink", "Paint"]);
        d.attach(Some(&mut h));
        let mut settings = DockerSettings::default();
        settings.mirror_path = Some(tmp.path().join("moved").join(TAGS_FILENAME));
        d.apply_settings(&settings);
        assert_eq!(d.mirror().path(), tmp.path().join("moved").join(TAGS_FILENAME).as_path());
        assert_eq!(labels(&d), vec!["Ink", "Paint"]);
        assert_eq!(d.checked_label(), Some("Ink"));
    }
}
