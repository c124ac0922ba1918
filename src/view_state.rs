//! # View State
//!
//! Runtime toggles that affect how the whole scene is drawn, and the projection matrix
//! built from them.

use nalgebra_glm::{Mat4, Vec2};

/// Near clipping plane shared by both projections.
pub const NEAR_PLANE: f32 = 0.1;

/// Far clipping plane shared by both projections.
pub const FAR_PLANE: f32 = 100.0;

/// Fraction of the window size used as the orthographic half-extent.
pub const ORTHO_EXTENT_FACTOR: f32 = 0.01;

/// Amount added to or removed from both UV-scale components per key press.
pub const UV_SCALE_STEP: f32 = 0.1;

/// Projection toggle and texture-coordinate scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub orthographic: bool,
    pub uv_scale: Vec2,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            orthographic: false,
            uv_scale: nalgebra_glm::vec2(1.0, 1.0),
        }
    }
}

impl ViewState {
    pub fn toggle_projection(&mut self) {
        self.orthographic = !self.orthographic;
    }

    pub fn increase_uv_scale(&mut self) {
        self.uv_scale.add_scalar_mut(UV_SCALE_STEP);
    }

    pub fn decrease_uv_scale(&mut self) {
        self.uv_scale.add_scalar_mut(-UV_SCALE_STEP);
    }

    /// Human-readable name of the active projection.
    pub fn projection_name(&self) -> &'static str {
        if self.orthographic {
            "Orthographic"
        } else {
            "Perspective"
        }
    }

    /// Builds the camera-to-clip transform.
    ///
    /// The orthographic volume spans 1% of the window size in each direction around the
    /// view axis. The perspective frustum uses `zoom_degrees` as its vertical field of
    /// view. Both map depth into wgpu's `[0, 1]` clip range.
    pub fn projection_matrix(&self, zoom_degrees: f32, width: u32, height: u32) -> Mat4 {
        let (width, height) = (width.max(1) as f32, height.max(1) as f32);
        if self.orthographic {
            let half_width = width * ORTHO_EXTENT_FACTOR;
            let half_height = height * ORTHO_EXTENT_FACTOR;
            nalgebra_glm::ortho_rh_zo(
                -half_width,
                half_width,
                -half_height,
                half_height,
                NEAR_PLANE,
                FAR_PLANE,
            )
        } else {
            nalgebra_glm::perspective_rh_zo(
                width / height,
                zoom_degrees.to_radians(),
                NEAR_PLANE,
                FAR_PLANE,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uv_scale_steps_round_trip() {
        let mut state = ViewState::default();
        assert_eq!(state.uv_scale, nalgebra_glm::vec2(1.0, 1.0));
        state.increase_uv_scale();
        assert!((state.uv_scale.x - 1.1).abs() < 1e-6);
        assert!((state.uv_scale.y - 1.1).abs() < 1e-6);
        state.decrease_uv_scale();
        assert!((state.uv_scale.x - 1.0).abs() < 1e-6);
        assert!((state.uv_scale.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn toggling_twice_restores_projection_exactly() {
        let mut state = ViewState::default();
        let before = state.projection_matrix(33.0, 800, 600);
        state.toggle_projection();
        let ortho = state.projection_matrix(33.0, 800, 600);
        assert_ne!(before, ortho);
        state.toggle_projection();
        let after = state.projection_matrix(33.0, 800, 600);
        assert_eq!(before, after);

        state.toggle_projection();
        state.toggle_projection();
        state.toggle_projection();
        assert_eq!(ortho, state.projection_matrix(33.0, 800, 600));
    }

    #[test]
    fn orthographic_extent_is_one_percent_of_window() {
        let state = ViewState {
            orthographic: true,
            ..ViewState::default()
        };
        let projection = state.projection_matrix(45.0, 800, 600);
        // Right edge of the volume at 8 units, top edge at 6 units.
        let corner = projection * nalgebra_glm::vec4(8.0, 6.0, -1.0, 1.0);
        assert!((corner.x - 1.0).abs() < 1e-6);
        assert!((corner.y - 1.0).abs() < 1e-6);
        // Zoom has no effect on the orthographic volume.
        assert_eq!(projection, state.projection_matrix(10.0, 800, 600));
    }

    #[test]
    fn perspective_maps_near_and_far_to_zero_and_one() {
        let state = ViewState::default();
        let projection = state.projection_matrix(45.0, 800, 600);
        let near = projection * nalgebra_glm::vec4(0.0, 0.0, -NEAR_PLANE, 1.0);
        let far = projection * nalgebra_glm::vec4(0.0, 0.0, -FAR_PLANE, 1.0);
        assert!((near.z / near.w).abs() < 1e-5);
        assert!((far.z / far.w - 1.0).abs() < 1e-5);
    }

    #[test]
    fn perspective_follows_zoom_and_aspect() {
        let state = ViewState::default();
        let narrow = state.projection_matrix(20.0, 800, 600);
        let wide = state.projection_matrix(45.0, 800, 600);
        assert!(narrow[(1, 1)] > wide[(1, 1)]);
        let aspect = wide[(1, 1)] / wide[(0, 0)];
        assert!((aspect - 800.0 / 600.0).abs() < 1e-5);
    }
}
