use cubescene_math::{MathError, Matrix};
use serde::{Deserialize, Serialize};

use crate::RenderError;

/// Projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 500.0,
        }
    }
}

impl RenderConfig {
    pub fn projection(&self, aspect: f32) -> Result<Matrix, MathError> {
        Matrix::perspective(self.fov_degrees.to_radians(), aspect, self.near, self.far)
    }

    /// Check the frustum without needing a viewport.
    pub fn validate(&self) -> Result<(), MathError> {
        self.projection(1.0).map(|_| ())
    }
}

/// Drawable area in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `width / height`. A zero-height viewport has no aspect ratio.
    pub fn aspect(&self) -> Result<f32, RenderError> {
        if self.height == 0 {
            return Err(RenderError::ZeroHeightViewport { width: self.width });
        }
        Ok(self.width as f32 / self.height as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_config_default() {
        let c = RenderConfig::default();
        assert_eq!(c.fov_degrees, 45.0);
        assert_eq!(c.near, 0.1);
        assert_eq!(c.far, 500.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn render_config_rejects_inverted_planes() {
        let c = RenderConfig {
            near: 10.0,
            far: 1.0,
            ..RenderConfig::default()
        };
        assert!(matches!(c.validate(), Err(MathError::InvalidFrustum { .. })));
    }

    #[test]
    fn viewport_aspect() {
        assert_eq!(Viewport::new(800, 600).aspect().unwrap(), 800.0 / 600.0);
        assert!(matches!(
            Viewport::new(800, 0).aspect(),
            Err(RenderError::ZeroHeightViewport { width: 800 })
        ));
    }
}
