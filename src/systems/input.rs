//! Input update.
//!
//! [`apply_raw_input`] copies the host's per-frame device snapshot into the
//! [`InputState`] resource, computing press/release edges for every bound
//! action and the movement axes.
use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::resources::input::{InputState, RawInput};

/// Update the `InputState` resource from this frame's `RawInput`.
///
/// Analog axes, when present, replace the digital movement keys. Axes are
/// clamped to [-1, 1] per component.
pub fn apply_raw_input(world: &mut World, raw: &RawInput) {
    let mut input = world.resource_mut::<InputState>();

    let down = |binding| raw.is_down(binding);
    let forward = down(input.move_forward.key_binding);
    let left = down(input.move_left.key_binding);
    let back = down(input.move_back.key_binding);
    let right = down(input.move_right.key_binding);
    let run = down(input.run.key_binding);
    let jump = down(input.jump.key_binding);
    let interact = down(input.interact.key_binding);

    input.move_forward.update(forward);
    input.move_left.update(left);
    input.move_back.update(back);
    input.move_right.update(right);
    input.run.update(run);
    input.jump.update(jump);
    input.interact.update(interact);

    let axes = raw.axes.unwrap_or_else(|| input.digital_axes());
    input.move_axes = axes.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
    input.mouse_delta = raw.mouse_delta;
    input.scroll = raw.scroll;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::input::Key;

    fn world() -> World {
        let mut world = World::new();
        world.insert_resource(InputState::default());
        world
    }

    #[test]
    fn test_keys_set_axes_and_edges() {
        let mut world = world();
        apply_raw_input(&mut world, &RawInput::with_keys(&[Key::W, Key::D, Key::Space]));
        {
            let input = world.resource::<InputState>();
            assert_eq!(input.move_axes, Vec2::new(1.0, 1.0));
            assert!(input.jump.just_pressed);
        }
        apply_raw_input(&mut world, &RawInput::with_keys(&[Key::W]));
        let input = world.resource::<InputState>();
        assert_eq!(input.move_axes, Vec2::new(0.0, 1.0));
        assert!(!input.jump.active);
        assert!(input.jump.just_released);
    }

    #[test]
    fn test_analog_axes_override_and_clamp() {
        let mut world = world();
        let mut raw = RawInput::with_keys(&[Key::W]);
        raw.axes = Some(Vec2::new(3.0, -0.5));
        raw.mouse_delta = Vec2::new(1.0, 2.0);
        raw.scroll = -1.0;
        apply_raw_input(&mut world, &raw);
        let input = world.resource::<InputState>();
        assert_eq!(input.move_axes, Vec2::new(1.0, -0.5));
        assert!(input.move_forward.active);
        assert_eq!(input.mouse_delta, Vec2::new(1.0, 2.0));
        assert_eq!(input.scroll, -1.0);
    }
}
