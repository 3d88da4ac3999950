use crate::transform::ModelView;
use glam::{Mat4, Vec3};
use mackcube_scene::{SceneState, TextureFilter};

/// Centre cube plus four satellites.
pub const CUBE_COUNT: usize = 5;

/// Opaque black.
pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

const CENTER_SCALE: f32 = 0.8;
const SATELLITE_SCALE: f32 = 0.5;

/// One cube instance: where it goes and how its texture is sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeDraw {
    pub model: Mat4,
    pub filter: TextureFilter,
}

/// Everything a backend needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub clear_color: [f32; 4],
    pub clear_depth: f32,
    pub lighting_enabled: bool,
    pub cubes: [CubeDraw; CUBE_COUNT],
}

impl Frame {
    pub fn compose(scene: &SceneState) -> Self {
        let filter = scene.texture_filter;
        Self {
            clear_color: CLEAR_COLOR,
            clear_depth: 1.0,
            lighting_enabled: scene.lighting_enabled,
            cubes: cube_transforms(scene).map(|model| CubeDraw { model, filter }),
        }
    }
}

/// Model-view matrices for the five cubes: centre, +X, -X, +Y, -Y.
///
/// The satellites share one sub-transform hanging off the centre cube, so
/// they inherit its spin, and each is reached from the previous one by a
/// relative translation.
pub fn cube_transforms(scene: &SceneState) -> [Mat4; CUBE_COUNT] {
    let r = scene.orbit_radius;

    let center = ModelView::identity()
        .translate(Vec3::new(0.0, 0.0, scene.depth_z))
        .scale(CENTER_SCALE)
        .rotate(scene.x_rotation, Vec3::X)
        .rotate(scene.y_rotation, Vec3::Y);

    let orbit = center
        .scale(SATELLITE_SCALE)
        .rotate(scene.y_rotation, Vec3::new(1.0, 0.0, 1.0))
        .rotate(scene.x_rotation, Vec3::new(0.0, 1.0, 1.0));

    let pos_x = orbit.translate(Vec3::new(r, 0.0, 0.0));
    let neg_x = pos_x.translate(Vec3::new(-2.0 * r, 0.0, 0.0));
    let pos_y = neg_x.translate(Vec3::new(r, r, 0.0));
    let neg_y = pos_y.translate(Vec3::new(0.0, -2.0 * r, 0.0));

    [
        center.matrix(),
        pos_x.matrix(),
        neg_x.matrix(),
        pos_y.matrix(),
        neg_y.matrix(),
    ]
}
