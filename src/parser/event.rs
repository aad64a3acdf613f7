use std::collections::VecDeque;

use tokio::sync::mpsc;

use crate::playlist::{Item, Playlist};

/// Notifications produced while parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseEvent {
    /// An item is fully formed: a segment or variant got its URI, or an
    /// I-frame stream / rendition was declared.
    ItemReady(Item),
    /// End of input was processed. Sent exactly once per successful parse.
    PlaylistReady(Playlist),
    /// The header check failed. Nothing follows this event.
    FormatError { line: String, message: String },
}

/// Receives parse notifications as they happen.
pub trait ParseListener {
    fn on_event(&mut self, event: ParseEvent);
}

/// Discards every notification.
impl ParseListener for () {
    fn on_event(&mut self, _event: ParseEvent) {}
}

/// Buffers notifications until the caller drains them.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<ParseEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pop(&mut self) -> Option<ParseEvent> {
        self.events.pop_front()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = ParseEvent> + '_ {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl ParseListener for EventQueue {
    fn on_event(&mut self, event: ParseEvent) {
        self.events.push_back(event);
    }
}

/// Forwards notifications to a channel. A closed receiver drops them.
impl ParseListener for mpsc::UnboundedSender<ParseEvent> {
    fn on_event(&mut self, event: ParseEvent) {
        if self.send(event).is_err() {
            tracing::trace!("event receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = EventQueue::new();
        queue.on_event(ParseEvent::PlaylistReady(Playlist::new()));
        queue.on_event(ParseEvent::FormatError {
            line: "x".to_string(),
            message: "bad".to_string(),
        });
        assert_eq!(queue.len(), 2);
        assert!(matches!(queue.pop(), Some(ParseEvent::PlaylistReady(_))));
        assert!(matches!(queue.pop(), Some(ParseEvent::FormatError { .. })));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_channel_listener() {
        let (mut tx, mut rx) = mpsc::unbounded_channel();
        tx.on_event(ParseEvent::PlaylistReady(Playlist::new()));
        assert!(matches!(rx.try_recv(), Ok(ParseEvent::PlaylistReady(_))));

        drop(rx);
        tx.on_event(ParseEvent::PlaylistReady(Playlist::new()));
    }
}
