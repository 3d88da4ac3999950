/// Depth of the cube cluster into the screen at startup.
pub const INITIAL_DEPTH: f32 = -10.0;

/// Distance of the four satellite cubes from the centre cube, in the
/// satellites' own (scaled, rotated) frame.
pub const ORBIT_RADIUS: f32 = 5.0;

/// Texture sampling mode, cycled with the centre key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureFilter {
    /// Nearest-neighbour, no mipmaps.
    #[default]
    Nearest,
    /// Bilinear, no mipmaps.
    Linear,
    /// Trilinear across the mip chain.
    MipmapLinear,
}

impl TextureFilter {
    pub const ALL: [TextureFilter; 3] = [
        TextureFilter::Nearest,
        TextureFilter::Linear,
        TextureFilter::MipmapLinear,
    ];

    pub fn index(self) -> usize {
        match self {
            TextureFilter::Nearest => 0,
            TextureFilter::Linear => 1,
            TextureFilter::MipmapLinear => 2,
        }
    }

    /// Filter for an arbitrary index, wrapped into range.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// The filter after this one: 0 → 1 → 2 → 0.
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }
}

/// Mutable record of cube orientation, angular velocity, zoom and render toggles.
///
/// Angles are in degrees, speeds in degrees per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    pub x_rotation: f32,
    pub y_rotation: f32,
    pub x_speed: f32,
    pub y_speed: f32,
    /// Camera-relative depth; negative is into the screen.
    pub depth_z: f32,
    pub orbit_radius: f32,
    pub lighting_enabled: bool,
    pub texture_filter: TextureFilter,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            x_rotation: 0.0,
            y_rotation: 0.0,
            x_speed: 0.0,
            y_speed: 0.0,
            depth_z: INITIAL_DEPTH,
            orbit_radius: ORBIT_RADIUS,
            lighting_enabled: false,
            texture_filter: TextureFilter::Nearest,
        }
    }
}

impl SceneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Integrate one frame of angular velocity into the rotation angles.
    pub fn advance_frame(&mut self) {
        self.x_rotation += self.x_speed;
        self.y_rotation += self.y_speed;
    }

    pub fn cycle_filter(&mut self) {
        self.texture_filter = self.texture_filter.next();
        tracing::debug!(filter = ?self.texture_filter, "texture filter changed");
    }

    pub fn toggle_lighting(&mut self) {
        self.lighting_enabled = !self.lighting_enabled;
        tracing::debug!(enabled = self.lighting_enabled, "lighting toggled");
    }

    /// Zero both angular velocities, leaving the current orientation.
    pub fn stop(&mut self) {
        self.x_speed = 0.0;
        self.y_speed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn default_scene() {
        let scene = SceneState::new();
        assert_eq!(scene.depth_z, -10.0);
        assert_eq!(scene.orbit_radius, 5.0);
        assert_eq!(scene.texture_filter, TextureFilter::Nearest);
        assert!(!scene.lighting_enabled);
        assert_eq!(scene.x_speed, 0.0);
        assert_eq!(scene.y_speed, 0.0);
    }

    #[test]
    fn filter_cycles_through_all_modes() {
        let mut scene = SceneState::new();
        let mut seen = Vec::new();
        for _ in 0..6 {
            seen.push(scene.texture_filter.index());
            scene.cycle_filter();
        }
        assert_eq!(seen, vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn filter_from_index_wraps() {
        assert_eq!(TextureFilter::from_index(3), TextureFilter::Nearest);
        assert_eq!(TextureFilter::from_index(5), TextureFilter::MipmapLinear);
    }

    #[test]
    fn advance_integrates_speed_over_frames() {
        let mut scene = SceneState::new();
        scene.x_rotation = 12.5;
        scene.x_speed = 0.7;
        scene.y_speed = -0.25;
        for _ in 0..40 {
            scene.advance_frame();
        }
        assert!((scene.x_rotation - (12.5 + 40.0 * 0.7)).abs() < EPS);
        assert!((scene.y_rotation - (-10.0)).abs() < EPS);
        assert_eq!(scene.x_speed, 0.7);
        assert_eq!(scene.y_speed, -0.25);
    }

    #[test]
    fn stop_keeps_orientation() {
        let mut scene = SceneState::new();
        scene.x_speed = 3.0;
        scene.y_speed = -1.0;
        scene.advance_frame();
        scene.stop();
        scene.advance_frame();
        assert_eq!(scene.x_rotation, 3.0);
        assert_eq!(scene.y_rotation, -1.0);
    }

    #[test]
    fn lighting_toggles() {
        let mut scene = SceneState::new();
        scene.toggle_lighting();
        assert!(scene.lighting_enabled);
        scene.toggle_lighting();
        assert!(!scene.lighting_enabled);
    }
}
