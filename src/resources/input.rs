//! Per-frame input resource.
//!
//! The host samples its devices once per frame into a [`RawInput`] and hands
//! it to [`apply_raw_input`](crate::systems::input::apply_raw_input), which
//! updates the [`InputState`] resource read by every gameplay system. Defaults
//! use WASD for movement, Shift to run, Space to jump and E to interact.
use bevy_ecs::prelude::*;
use glam::Vec2;
use rustc_hash::FxHashSet;

/// Keys the gameplay layer can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Key {
    #[default]
    Null,
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
    Space,
    LeftShift,
    E,
}

/// Device snapshot for one frame, filled by the host.
#[derive(Debug, Clone, Default)]
pub struct RawInput {
    pub keys_down: FxHashSet<Key>,
    /// Analog movement (gamepad stick). Overrides the movement keys when set.
    pub axes: Option<Vec2>,
    pub mouse_delta: Vec2,
    pub scroll: f32,
}

impl RawInput {
    pub fn with_keys(keys: &[Key]) -> Self {
        Self {
            keys_down: keys.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently active/pressed this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: Key,
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound(Key::Null)
    }
}

impl BoolState {
    pub fn bound(key_binding: Key) -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding,
        }
    }

    /// Advance one frame given whether the bound key is down now.
    pub fn update(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

/// Resource capturing the per-frame input relevant to gameplay.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub move_forward: BoolState,
    pub move_left: BoolState,
    pub move_back: BoolState,
    pub move_right: BoolState,
    pub run: BoolState,
    pub jump: BoolState,
    pub interact: BoolState,
    /// Movement axes in [-1, 1]: x is strafe (right positive), y is forward.
    pub move_axes: Vec2,
    pub mouse_delta: Vec2,
    pub scroll: f32,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            move_forward: BoolState::bound(Key::W),
            move_left: BoolState::bound(Key::A),
            move_back: BoolState::bound(Key::S),
            move_right: BoolState::bound(Key::D),
            run: BoolState::bound(Key::LeftShift),
            jump: BoolState::bound(Key::Space),
            interact: BoolState::bound(Key::E),
            move_axes: Vec2::ZERO,
            mouse_delta: Vec2::ZERO,
            scroll: 0.0,
        }
    }
}

impl InputState {
    /// Movement axes derived from the digital movement keys.
    pub fn digital_axes(&self) -> Vec2 {
        let mut axes = Vec2::ZERO;
        if self.move_right.active {
            axes.x += 1.0;
        }
        if self.move_left.active {
            axes.x -= 1.0;
        }
        if self.move_forward.active {
            axes.y += 1.0;
        }
        if self.move_back.active {
            axes.y -= 1.0;
        }
        axes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolstate_default() {
        let bs = BoolState::default();
        assert!(!bs.active);
        assert!(!bs.just_pressed);
        assert!(!bs.just_released);
        assert_eq!(bs.key_binding, Key::Null);
    }

    #[test]
    fn test_boolstate_edges() {
        let mut bs = BoolState::bound(Key::Space);
        bs.update(true);
        assert!(bs.active && bs.just_pressed && !bs.just_released);
        bs.update(true);
        assert!(bs.active && !bs.just_pressed);
        bs.update(false);
        assert!(!bs.active && bs.just_released);
        bs.update(false);
        assert!(!bs.just_released);
    }

    #[test]
    fn test_inputstate_default_key_bindings() {
        let input = InputState::default();
        assert_eq!(input.move_forward.key_binding, Key::W);
        assert_eq!(input.move_left.key_binding, Key::A);
        assert_eq!(input.move_back.key_binding, Key::S);
        assert_eq!(input.move_right.key_binding, Key::D);
        assert_eq!(input.run.key_binding, Key::LeftShift);
        assert_eq!(input.jump.key_binding, Key::Space);
        assert_eq!(input.interact.key_binding, Key::E);
        assert_eq!(input.move_axes, Vec2::ZERO);
    }

    #[test]
    fn test_digital_axes_cancel_out() {
        let mut input = InputState::default();
        input.move_left.active = true;
        input.move_right.active = true;
        input.move_forward.active = true;
        assert_eq!(input.digital_axes(), Vec2::new(0.0, 1.0));
    }
}
