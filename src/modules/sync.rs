//! Change notifications between the host selector and the tag docker.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::mpsc::{Receiver, Sender, channel};

/// The side of a two-way binding that performed a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Writer { Host, Docker }

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorEvent {
    /// Tags were inserted, removed or replaced wholesale.
    TagsChanged,
    SelectionChanged { tag: String, origin: Writer },
}

#[derive(Default)]
pub struct EventBus { subscribers: Vec<Sender<SelectorEvent>> }

impl EventBus {
    pub fn new() -> Self { Self::default() }

    pub fn subscribe(&mut self) -> Receiver<SelectorEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn publish(&mut self, event: SelectorEvent) {
        tracing::trace!(?event, subscribers = self.subscribers.len(), "publishing selector event");
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

/// Single-writer token for a two-way binding.
///
/// While a [`WriteToken`] is alive, the owning side is pushing a change to the
/// other side and must not react to the echo of that change. The token owns
/// its share of the flag, so the owner stays free to mutate itself meanwhile.
#[derive(Debug, Default)]
pub struct WriteGuard { writing: Rc<Cell<bool>> }

impl WriteGuard {
    pub fn new() -> Self { Self::default() }

    pub fn try_begin(&self) -> Option<WriteToken> {
        if self.writing.replace(true) {
            return None;
        }
        Some(WriteToken { writing: Rc::clone(&self.writing) })
    }

    pub fn is_writing(&self) -> bool { self.writing.get() }
}

#[derive(Debug)]
pub struct WriteToken { writing: Rc<Cell<bool>> }

impl Drop for WriteToken {
    fn drop(&mut self) {
        self.writing.set(false);
    }
}
