use serde::Deserialize;

use super::types::{InputEvent, Key, MouseButton};

/// Input event as written in a stage manifest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptedInput {
    Key { key: Key, pressed: bool },
    Button { button: MouseButton, pressed: bool },
    PointerMoved { x: f32, y: f32 },
    PointerEntered,
    PointerLeft,
    Focus { focused: bool },
}

impl From<&ScriptedInput> for InputEvent {
    fn from(input: &ScriptedInput) -> Self {
        match input {
            ScriptedInput::Key { key, pressed } => InputEvent::key(*key, *pressed),
            ScriptedInput::Button { button, pressed } => InputEvent::button(*button, *pressed),
            ScriptedInput::PointerMoved { x, y } => InputEvent::PointerMoved { x: *x, y: *y },
            ScriptedInput::PointerEntered => InputEvent::PointerEntered,
            ScriptedInput::PointerLeft => InputEvent::PointerLeft,
            ScriptedInput::Focus { focused } => InputEvent::Focused(*focused),
        }
    }
}

/// One scripted event, due at the start of `frame`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimelineEntry {
    pub frame: u64,
    pub event: ScriptedInput,
}

/// Replays scripted input by frame index, for headless runs.
#[derive(Debug, Clone, Default)]
pub struct InputTimeline {
    entries: Vec<TimelineEntry>,
    cursor: usize,
}

impl InputTimeline {
    pub fn new(mut entries: Vec<TimelineEntry>) -> Self {
        // Stable, so same-frame events keep manifest order.
        entries.sort_by_key(|e| e.frame);
        Self { entries, cursor: 0 }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.entries.len()
    }

    /// Returns every event due at or before `frame` that has not been replayed yet.
    pub fn drain_due(&mut self, frame: u64) -> Vec<InputEvent> {
        let start = self.cursor;
        while self.cursor < self.entries.len() && self.entries[self.cursor].frame <= frame {
            self.cursor += 1;
        }
        self.entries[start..self.cursor].iter().map(|e| InputEvent::from(&e.event)).collect()
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}
