/// Static light source uploaded once when the rendering surface is created.
///
/// Colours are RGBA. The position is homogeneous and given in eye space
/// (`w = 1` makes it a point light).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingConfig {
    ambient: [f32; 4],
    diffuse: [f32; 4],
    position: [f32; 4],
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient: [0.5, 0.5, 0.5, 1.0],
            diffuse: [1.0, 1.0, 1.0, 1.0],
            position: [0.0, 0.0, 2.0, 1.0],
        }
    }
}

impl LightingConfig {
    pub fn new(ambient: [f32; 4], diffuse: [f32; 4], position: [f32; 4]) -> Self {
        Self {
            ambient,
            diffuse,
            position,
        }
    }

    pub fn ambient(&self) -> [f32; 4] {
        self.ambient
    }

    pub fn diffuse(&self) -> [f32; 4] {
        self.diffuse
    }

    pub fn position(&self) -> [f32; 4] {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_light_sits_in_front_of_camera() {
        let light = LightingConfig::default();
        assert_eq!(light.ambient(), [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(light.diffuse(), [1.0; 4]);
        assert_eq!(light.position(), [0.0, 0.0, 2.0, 1.0]);
    }
}
