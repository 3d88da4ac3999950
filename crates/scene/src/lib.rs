//! Scene State: the camera/model parameters every frame is drawn from.
//!
//! # Invariants
//! - Scene state is plain data. Input handlers and the per-frame update step
//!   are the only writers.
//! - The frame renderer writes rotation angles only, never speeds.
//! - Nothing is clamped: rotations accumulate freely and the zoom depth
//!   follows the pinch ratio wherever it leads.
//!
//! The state is owned by whichever thread runs the event loop. Hosts with a
//! separate render thread must confine all access to one thread or add their
//! own synchronisation around [`SceneState`].

mod lighting;
mod state;

pub use lighting::LightingConfig;
pub use state::{INITIAL_DEPTH, ORBIT_RADIUS, SceneState, TextureFilter};
