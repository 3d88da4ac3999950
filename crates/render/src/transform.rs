use glam::{Mat4, Vec3};

/// Model-view transform built by post-multiplication.
///
/// Each call appends an operation in object space (`M = M * Op`), so the
/// last operation applied is the first one a vertex sees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelView(Mat4);

impl Default for ModelView {
    fn default() -> Self {
        Self::identity()
    }
}

impl ModelView {
    pub fn identity() -> Self {
        Self(Mat4::IDENTITY)
    }

    pub fn translate(self, offset: Vec3) -> Self {
        Self(self.0 * Mat4::from_translation(offset))
    }

    pub fn scale(self, factor: f32) -> Self {
        Self(self.0 * Mat4::from_scale(Vec3::splat(factor)))
    }

    /// Rotate by `degrees` about `axis`. The axis need not be unit length.
    pub fn rotate(self, degrees: f32, axis: Vec3) -> Self {
        Self(self.0 * Mat4::from_axis_angle(axis.normalize(), degrees.to_radians()))
    }

    pub fn matrix(self) -> Mat4 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operations_apply_in_object_space() {
        let mv = ModelView::identity()
            .translate(Vec3::new(0.0, 0.0, -10.0))
            .scale(2.0);
        let p = mv.matrix().transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!(p.abs_diff_eq(Vec3::new(2.0, 0.0, -10.0), 1e-5));
    }

    #[test]
    fn rotation_axis_is_normalized() {
        let a = ModelView::identity().rotate(30.0, Vec3::new(1.0, 0.0, 1.0));
        let b = ModelView::identity().rotate(30.0, Vec3::new(1.0, 0.0, 1.0).normalize());
        assert!(a.matrix().abs_diff_eq(b.matrix(), 1e-6));
    }

    #[test]
    fn composition_is_order_sensitive() {
        let xy = ModelView::identity()
            .rotate(90.0, Vec3::X)
            .rotate(90.0, Vec3::Y);
        let yx = ModelView::identity()
            .rotate(90.0, Vec3::Y)
            .rotate(90.0, Vec3::X);
        assert!(!xy.matrix().abs_diff_eq(yx.matrix(), 1e-3));
    }
}
