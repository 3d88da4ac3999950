use crate::frame::{CubeDraw, Frame};
use crate::viewport::Viewport;
use glam::Mat4;
use mackcube_scene::{LightingConfig, SceneState};
use std::convert::Infallible;

/// Outcome of drawing one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Presented,
    /// The surface could not take a frame this time (e.g. it was being
    /// reconfigured). Nothing was drawn.
    Skipped,
}

/// Surface lifecycle entry points every backend exposes.
///
/// The host calls [`on_surface_created`](Self::on_surface_created) once, then
/// [`on_resize`](Self::on_resize) whenever the surface size changes and
/// [`render_frame`](Self::render_frame) once per displayed frame, always with
/// a live graphics context.
pub trait FrameRenderer {
    type Error;

    /// One-time setup: upload the light, fixed pipeline state and the cube
    /// texture.
    fn on_surface_created(&mut self, lighting: &LightingConfig) -> Result<(), Self::Error>;

    /// Rebuild viewport and projection for a new surface size.
    fn on_resize(&mut self, width: u32, height: u32);

    /// Backend hook: put a composed frame on screen.
    fn draw(&mut self, frame: &Frame) -> Result<FrameStatus, Self::Error>;

    /// Draw the scene, then integrate one frame of angular velocity if the
    /// frame was presented.
    fn render_frame(&mut self, scene: &mut SceneState) -> Result<FrameStatus, Self::Error> {
        let frame = Frame::compose(scene);
        let status = self.draw(&frame)?;
        if status == FrameStatus::Presented {
            scene.advance_frame();
        }
        Ok(status)
    }
}

/// A command as a fixed-function backend would issue it.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    SurfaceCreated(LightingConfig),
    Viewport(Viewport),
    Projection(Mat4),
    LoadIdentity,
    Clear { color: [f32; 4], depth: f32 },
    Lighting(bool),
    DrawCube(CubeDraw),
}

/// Renderer that records the command stream instead of drawing.
///
/// Useful for tests and for inspecting frame composition without a GPU.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<RenderCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl FrameRenderer for RecordingRenderer {
    type Error = Infallible;

    fn on_surface_created(&mut self, lighting: &LightingConfig) -> Result<(), Infallible> {
        self.commands.push(RenderCommand::SurfaceCreated(*lighting));
        Ok(())
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        let viewport = Viewport::new(width, height);
        tracing::debug!(width, height = viewport.height, "recording resize");
        self.commands.push(RenderCommand::Viewport(viewport));
        self.commands.push(RenderCommand::Projection(viewport.projection()));
        self.commands.push(RenderCommand::LoadIdentity);
    }

    fn draw(&mut self, frame: &Frame) -> Result<FrameStatus, Infallible> {
        self.commands.push(RenderCommand::Clear {
            color: frame.clear_color,
            depth: frame.clear_depth,
        });
        self.commands.push(RenderCommand::LoadIdentity);
        self.commands.push(RenderCommand::Lighting(frame.lighting_enabled));
        self.commands
            .extend(frame.cubes.iter().copied().map(RenderCommand::DrawCube));
        Ok(FrameStatus::Presented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{CLEAR_COLOR, CUBE_COUNT, cube_transforms};
    use mackcube_scene::TextureFilter;

    struct SkippingRenderer;

    impl FrameRenderer for SkippingRenderer {
        type Error = Infallible;

        fn on_surface_created(&mut self, _: &LightingConfig) -> Result<(), Infallible> {
            Ok(())
        }

        fn on_resize(&mut self, _: u32, _: u32) {}

        fn draw(&mut self, _: &Frame) -> Result<FrameStatus, Infallible> {
            Ok(FrameStatus::Skipped)
        }
    }

    #[test]
    fn frame_commands_in_order() {
        let mut renderer = RecordingRenderer::new();
        let mut scene = SceneState::new();
        scene.lighting_enabled = true;
        let expected = cube_transforms(&scene);

        renderer.render_frame(&mut scene).unwrap();
        let commands = renderer.take_commands();

        assert_eq!(commands.len(), 3 + CUBE_COUNT);
        assert_eq!(
            commands[0],
            RenderCommand::Clear {
                color: CLEAR_COLOR,
                depth: 1.0
            }
        );
        assert_eq!(commands[1], RenderCommand::LoadIdentity);
        assert_eq!(commands[2], RenderCommand::Lighting(true));
        for (command, model) in commands[3..].iter().zip(expected) {
            assert_eq!(
                *command,
                RenderCommand::DrawCube(CubeDraw {
                    model,
                    filter: TextureFilter::Nearest
                })
            );
        }
    }

    #[test]
    fn frame_is_drawn_before_rotation_advances() {
        let mut renderer = RecordingRenderer::new();
        let mut scene = SceneState::new();
        scene.y_speed = 0.3;
        let before = cube_transforms(&scene);

        renderer.render_frame(&mut scene).unwrap();

        match &renderer.commands()[3] {
            RenderCommand::DrawCube(cube) => assert_eq!(cube.model, before[0]),
            other => panic!("unexpected command {other:?}"),
        }
        assert!((scene.y_rotation - 0.3).abs() < 1e-6);
        assert_eq!(scene.y_speed, 0.3);
    }

    #[test]
    fn rotation_accumulates_per_frame() {
        let mut renderer = RecordingRenderer::new();
        let mut scene = SceneState::new();
        scene.x_speed = 0.25;
        for _ in 0..100 {
            renderer.render_frame(&mut scene).unwrap();
        }
        assert!((scene.x_rotation - 25.0).abs() < 1e-3);
        assert_eq!(scene.x_speed, 0.25);
    }

    #[test]
    fn skipped_frame_does_not_integrate() {
        let mut scene = SceneState::new();
        scene.x_speed = 1.0;
        let status = SkippingRenderer.render_frame(&mut scene).unwrap();
        assert_eq!(status, FrameStatus::Skipped);
        assert_eq!(scene.x_rotation, 0.0);
    }

    #[test]
    fn resize_with_zero_height_matches_height_one() {
        let mut zero = RecordingRenderer::new();
        let mut one = RecordingRenderer::new();
        zero.on_resize(640, 0);
        one.on_resize(640, 1);
        assert_eq!(zero.commands(), one.commands());
    }

    #[test]
    fn resize_is_idempotent() {
        let mut renderer = RecordingRenderer::new();
        renderer.on_resize(1024, 768);
        let first = renderer.take_commands();
        renderer.on_resize(1024, 768);
        assert_eq!(renderer.take_commands(), first);
        assert_eq!(first[0], RenderCommand::Viewport(Viewport::new(1024, 768)));
        assert_eq!(first[2], RenderCommand::LoadIdentity);
    }

    #[test]
    fn surface_creation_records_lighting() {
        let mut renderer = RecordingRenderer::new();
        let light = LightingConfig::default();
        renderer.on_surface_created(&light).unwrap();
        assert_eq!(renderer.commands(), &[RenderCommand::SurfaceCreated(light)]);
    }
}
