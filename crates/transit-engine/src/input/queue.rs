/// Input event types the show understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The page scrolled. Heights are in CSS pixels.
    Scroll { offset: f32, document_height: f32, viewport_height: f32 },
    /// The viewport changed size.
    Resize { width: f32, height: f32 },
    /// A pointer press began at client coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A pointer moved to client coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// A pointer press ended at client coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// A user gesture that may unlock audio (click, key, touch).
    Gesture,
}

impl InputEvent {
    /// Whether the browser treats this event as a user activation for audio.
    pub fn unlocks_audio(&self) -> bool {
        matches!(
            self,
            InputEvent::Gesture | InputEvent::PointerDown { .. } | InputEvent::Scroll { .. }
        )
    }
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
