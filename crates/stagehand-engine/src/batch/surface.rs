use crate::paint::Color;

/// Per-frame render target state outside the sprite batch.
///
/// Actors set the clear color from `draw`; presenters read it before
/// painting the batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Surface {
    clear: Option<Color>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that the frame be cleared to `color`. The last call wins.
    pub fn clear(&mut self, color: Color) {
        self.clear = Some(color);
    }

    pub fn clear_color(&self) -> Option<Color> {
        self.clear
    }

    /// Forgets the previous frame's requests.
    pub fn reset(&mut self) {
        self.clear = None;
    }
}
