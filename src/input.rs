//! Input source boundary
//!
//! The scene and scheduler never consult input themselves; entity code
//! queries it through the update context. Implementations (device
//! polling, recorded playback) live outside this crate.

use glam::Vec2;

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Boolean key/pointer queries consumed by entity behaviors.
///
/// `Sync` is required: worker tasks share one source during the parallel
/// phase, so implementations must be safe to query concurrently.
pub trait InputSource: Sync {
    /// Whether the key with the given code is currently held
    fn is_key_pressed(&self, key: u32) -> bool;

    /// Whether the key transitioned to pressed this frame
    fn is_key_just_pressed(&self, key: u32) -> bool;

    fn is_mouse_button_pressed(&self, button: MouseButton) -> bool;

    /// Pointer position in the render sink's coordinate space
    fn mouse_position(&self) -> Vec2;
}

/// Input source that reports nothing pressed; for headless runs and tests
#[derive(Debug, Default, Clone, Copy)]
pub struct NullInput;

impl InputSource for NullInput {
    fn is_key_pressed(&self, _key: u32) -> bool {
        false
    }

    fn is_key_just_pressed(&self, _key: u32) -> bool {
        false
    }

    fn is_mouse_button_pressed(&self, _button: MouseButton) -> bool {
        false
    }

    fn mouse_position(&self) -> Vec2 {
        Vec2::ZERO
    }
}
