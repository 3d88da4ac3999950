use crate::key::Key;
use crate::pointer::{PointerAction, PointerEvent};
use glam::Vec2;
use mackcube_scene::SceneState;

/// Degrees of rotation per pixel dragged.
pub const TOUCH_SCALE: f32 = 0.2;

/// Fling velocity (px/s) divided by this becomes degrees per frame.
pub const FLING_DIVISOR: f32 = 10_000.0;

/// Speed change per D-pad press, in degrees per frame.
pub const SPEED_STEP: f32 = 0.1;

/// Two-finger spacing at or below this many pixels is not a pinch.
pub const MIN_ZOOM_SPACING: f32 = 10.0;

/// Tracking state for the gesture in progress. Nothing survives past it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TouchGestureState {
    pub previous: Vec2,
    pub zooming: bool,
    pub zoom_start_distance: f32,
    pub zoom_start_depth: f32,
}

/// Translates pointer, fling, tap and key events into [`SceneState`] changes.
#[derive(Debug, Default)]
pub struct InputMapper {
    touch: TouchGestureState,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch_state(&self) -> &TouchGestureState {
        &self.touch
    }

    /// Drag rotates, pinch zooms. Always reports the event as handled.
    pub fn on_pointer_event(&mut self, scene: &mut SceneState, event: &PointerEvent) -> bool {
        let position = event.position();

        match event.action {
            PointerAction::Down | PointerAction::Up => {}
            PointerAction::PointerUp => {
                if self.touch.zooming {
                    tracing::debug!("zoom off");
                }
                self.touch.zooming = false;
            }
            PointerAction::PointerDown => {
                self.touch.zoom_start_distance = event.spacing().unwrap_or_default();
                if self.touch.zoom_start_distance <= MIN_ZOOM_SPACING {
                    if self.touch.zooming {
                        tracing::debug!("zoom off");
                    }
                    self.touch.zooming = false;
                } else {
                    if !self.touch.zooming {
                        tracing::debug!(spacing = self.touch.zoom_start_distance, "zoom on");
                    }
                    self.touch.zooming = true;
                    self.touch.zoom_start_depth = scene.depth_z;
                }
            }
            PointerAction::Move => {
                if self.touch.zooming {
                    if let Some(distance) = event.spacing() {
                        scene.depth_z =
                            self.touch.zoom_start_depth * distance / self.touch.zoom_start_distance;
                    }
                } else {
                    // Horizontal drag spins about Y, vertical drag about X.
                    let delta = position - self.touch.previous;
                    scene.x_rotation += delta.y * TOUCH_SCALE;
                    scene.y_rotation += delta.x * TOUCH_SCALE;
                }
            }
        }

        self.touch.previous = position;
        true
    }

    /// Add a fling impulse to the angular velocity.
    pub fn on_fling(&mut self, scene: &mut SceneState, velocity: Vec2) -> bool {
        tracing::debug!(vx = velocity.x, vy = velocity.y, "fling");
        scene.y_speed += velocity.x / FLING_DIVISOR;
        scene.x_speed += velocity.y / FLING_DIVISOR;
        true
    }

    pub fn on_single_tap(&mut self, scene: &mut SceneState) -> bool {
        tracing::debug!("tap up");
        scene.stop();
        true
    }

    pub fn on_key_press(&mut self, scene: &mut SceneState, key: Key) -> bool {
        match key {
            Key::DpadLeft => scene.y_speed -= SPEED_STEP,
            Key::DpadRight => scene.y_speed += SPEED_STEP,
            Key::DpadUp => scene.x_speed -= SPEED_STEP,
            Key::DpadDown => scene.x_speed += SPEED_STEP,
            Key::DpadCenter => scene.cycle_filter(),
            Key::ToggleLighting => scene.toggle_lighting(),
        }
        true
    }
}
