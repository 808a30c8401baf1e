//! Outbound game events
//!
//! The tick never calls into the UI. It queues events here and the session
//! drains them once per frame, so every logical event is delivered once.

/// Something the UI layer or the stats bridge may care about
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A landing scored points
    Scored { increment: u32 },
    /// Stick tip landed inside the perfect window
    PerfectHit,
    /// Landed on a golden platform
    GoldenHit,
    /// The stick finished turning (once per turn)
    StickDropped { hit: bool, perfect: bool },
    /// Live stick length during a Stretching tick
    StickStretched { length: f32 },
    /// Fall finished; round over
    GameOver,
}

/// A queue for events of a single type.
/// Events are collected during the tick and drained by the session.
#[derive(Debug, Clone)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties_queue_in_order() {
        let mut queue = EventQueue::new();
        queue.send(GameEvent::PerfectHit);
        queue.send(GameEvent::Scored { increment: 2 });
        assert_eq!(queue.len(), 2);

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(drained, vec![GameEvent::PerfectHit, GameEvent::Scored { increment: 2 }]);
        assert!(queue.is_empty());
    }
}
