use bevy_ecs::prelude::Resource;

/// Desired mouse cursor state, applied by the host each frame.
///
/// Locomotion locks and hides the cursor when a controller initializes.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    pub locked: bool,
    pub visible: bool,
}

impl Default for CursorState {
    fn default() -> Self {
        Self {
            locked: false,
            visible: true,
        }
    }
}

impl CursorState {
    pub fn lock(&mut self) {
        self.locked = true;
        self.visible = false;
    }

    pub fn release(&mut self) {
        self.locked = false;
        self.visible = true;
    }
}
