use crate::content::ContentManager;
use crate::coords::{Rect, Resolution};
use crate::input::{InputFrame, InputState, Key, MouseButton};
use crate::time::GameTime;

/// Context handed to `FrameActor::initialize`.
pub struct InitCtx<'a> {
    pub content: &'a mut ContentManager,
    pub resolution: Resolution,
}

impl<'a> InitCtx<'a> {
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.resolution.bounds()
    }
}

/// Per-frame context handed to `FrameActor::update`.
pub struct UpdateCtx<'a> {
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub time: GameTime,
    pub resolution: Resolution,
}

impl<'a> UpdateCtx<'a> {
    /// Elapsed seconds since the previous frame.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.time.dt()
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.resolution.bounds()
    }

    #[inline]
    pub fn key_down(&self, key: Key) -> bool {
        self.input.key_down(key)
    }

    #[inline]
    pub fn any_key_down(&self, keys: &[Key]) -> bool {
        self.input.any_key_down(keys)
    }

    /// True on the frame `key` went down.
    #[inline]
    pub fn key_typed(&self, key: Key) -> bool {
        self.input_frame.key_typed(key)
    }

    #[inline]
    pub fn button_down(&self, button: MouseButton) -> bool {
        self.input.button_down(button)
    }

    #[inline]
    pub fn pointer_inside(&self) -> bool {
        self.input.is_inside_window()
    }
}
