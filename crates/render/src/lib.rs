//! Frame Renderer: backend-agnostic per-frame pipeline.
//!
//! # Invariants
//! - Transforms are explicit [`glam::Mat4`] values composed in a fixed order;
//!   there is no hidden matrix stack.
//! - Composing a frame never mutates the scene. The only scene write is the
//!   rotation integration in [`FrameRenderer::render_frame`], after a frame
//!   has been presented.
//!
//! Backends implement [`FrameRenderer`]; [`RecordingRenderer`] logs the
//! command stream instead of drawing it.

mod frame;
mod renderer;
mod transform;
mod viewport;

pub use frame::{CLEAR_COLOR, CUBE_COUNT, CubeDraw, Frame, cube_transforms};
pub use renderer::{FrameRenderer, FrameStatus, RecordingRenderer, RenderCommand};
pub use transform::ModelView;
pub use viewport::{FAR_PLANE, FIELD_OF_VIEW_DEGREES, NEAR_PLANE, Viewport};
