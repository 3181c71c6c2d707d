use std::collections::HashSet;

use super::types::{InputEvent, Key};

/// Input that arrived since the previous redraw.
///
/// Edges only: which keys went down or up. Held keys live in
/// [`InputState`](super::InputState). Cleared by the runtime after each frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// In arrival order.
    pub events: Vec<InputEvent>,
    pub keys_pressed: HashSet<Key>,
    pub keys_released: HashSet<Key>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    /// Went down this frame (repeats excluded).
    pub fn pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }
}
