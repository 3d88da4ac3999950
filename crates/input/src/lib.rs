//! Input Mapper: raw pointer, gesture and key events turned into scene mutations.
//!
//! # Invariants
//! - Handlers never read renderer state; they only write [`SceneState`].
//! - The gesture detector gets first refusal on every pointer event.
//! - Every handler reports the event as handled.
//!
//! [`SceneState`]: mackcube_scene::SceneState

pub mod gesture;
pub mod key;
pub mod mapper;
pub mod pointer;
pub mod router;

pub use gesture::{Gesture, GestureDetector};
pub use key::Key;
pub use mapper::{InputMapper, TouchGestureState};
pub use pointer::{PointerAction, PointerEvent, TouchPhase, TouchTracker};
pub use router::InputRouter;
