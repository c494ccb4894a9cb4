use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Parameters for the per-frame model transform. Defaults reproduce the
/// textured-quad demo: a slight upward offset, spin around +X, and a
/// scale that oscillates with wall-clock time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformParams {
    pub translation: [f32; 3],
    pub rotation_axis: [f32; 3],
    /// Radians per second.
    pub rotation_speed: f32,
    pub scale: [f32; 3],
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            translation: [0.0, 0.125, 0.0],
            rotation_axis: [1.0, 0.0, 0.0],
            rotation_speed: 1.0,
            scale: [1.0, 1.0, 1.0],
        }
    }
}

impl TransformParams {
    /// translate * rotate(speed * t, axis) * scale(s * sin t).
    ///
    /// At t = 0 the sine term makes the scale degenerate (all zeros);
    /// the quad is invisible for one instant and grows from there.
    pub fn model_matrix(&self, elapsed_secs: f32) -> Mat4 {
        let oscillation = elapsed_secs.sin();
        let translation = Mat4::from_translation(Vec3::from(self.translation));
        let rotation = Mat4::from_axis_angle(
            Vec3::from(self.rotation_axis).normalize_or_zero(),
            self.rotation_speed * elapsed_secs,
        );
        let scale = Mat4::from_scale(Vec3::from(self.scale) * oscillation);
        translation * rotation * scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_mat4_eq(a: Mat4, b: Mat4) {
        let (a, b) = (a.to_cols_array(), b.to_cols_array());
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-6, "matrices differ: {a:?} vs {b:?}");
        }
    }

    #[test]
    fn time_zero_has_degenerate_scale() {
        let params = TransformParams::default();
        let expected = Mat4::from_translation(Vec3::new(0.0, 0.125, 0.0))
            * Mat4::from_axis_angle(Vec3::X, 0.0)
            * Mat4::from_scale(Vec3::ZERO);
        assert_mat4_eq(params.model_matrix(0.0), expected);
    }

    #[test]
    fn matches_explicit_composition() {
        let params = TransformParams {
            translation: [0.25, -0.5, 0.0],
            rotation_axis: [0.0, 0.0, 1.0],
            rotation_speed: 2.0,
            scale: [1.0, 2.0, 1.0],
        };
        let t = 0.75;
        let expected = Mat4::from_translation(Vec3::new(0.25, -0.5, 0.0))
            * Mat4::from_axis_angle(Vec3::Z, 2.0 * t)
            * Mat4::from_scale(Vec3::new(1.0, 2.0, 1.0) * t.sin());
        assert_mat4_eq(params.model_matrix(t), expected);
    }

    #[test]
    fn scale_oscillates_in_sign() {
        let params = TransformParams {
            rotation_speed: 0.0,
            ..Default::default()
        };
        // sin is positive shortly after zero and negative after pi.
        let grow = params.model_matrix(0.5).to_cols_array();
        let shrink = params.model_matrix(4.0).to_cols_array();
        assert!(grow[0] > 0.0);
        assert!(shrink[0] < 0.0);
    }

    #[test]
    fn translation_is_unscaled() {
        let params = TransformParams::default();
        let m = params.model_matrix(1.3);
        let col = m.col(3);
        assert!((col.x - 0.0).abs() < 1e-6);
        assert!((col.y - 0.125).abs() < 1e-6);
        assert!((col.z - 0.0).abs() < 1e-6);
    }
}
