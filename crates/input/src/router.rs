use crate::gesture::{Gesture, GestureDetector};
use crate::key::Key;
use crate::mapper::InputMapper;
use crate::pointer::PointerEvent;
use mackcube_scene::SceneState;

/// Front door for host input: the gesture detector sees pointer events first,
/// anything it does not claim goes to the [`InputMapper`].
#[derive(Debug, Default)]
pub struct InputRouter {
    gestures: GestureDetector,
    mapper: InputMapper,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mapper(&self) -> &InputMapper {
        &self.mapper
    }

    pub fn pointer_event(&mut self, scene: &mut SceneState, event: &PointerEvent) -> bool {
        match self.gestures.on_pointer_event(event) {
            Some(Gesture::SingleTap) => self.mapper.on_single_tap(scene),
            Some(Gesture::Fling { velocity }) => self.mapper.on_fling(scene, velocity),
            None => self.mapper.on_pointer_event(scene, event),
        }
    }

    pub fn key_press(&mut self, scene: &mut SceneState, key: Key) -> bool {
        self.mapper.on_key_press(scene, key)
    }
}
