//! Per-frame rendering context.

use glam::Vec2;

/// Everything a shading function needs to know about the current frame.
///
/// The host builds one of these per frame from the surface size and its own
/// clock; shading code receives it by reference and never mutates it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Viewport size in pixels.
    pub resolution: Vec2,
    /// Seconds since the host started animating.
    pub elapsed: f32,
}

impl FrameContext {
    pub fn new(width: u32, height: u32, elapsed: f32) -> Self {
        Self {
            resolution: Vec2::new(width as f32, height as f32),
            elapsed,
        }
    }

    /// Map normalized `uv` in [0, 1] to pixel coordinates centered on the
    /// viewport, so (0.5, 0.5) lands on the origin.
    pub fn pixel_coords(&self, uv: Vec2) -> Vec2 {
        (uv - 0.5) * self.resolution
    }

    pub fn aspect(&self) -> f32 {
        self.resolution.x / self.resolution.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_uv_maps_to_origin() {
        let frame = FrameContext::new(800, 600, 0.0);
        assert_eq!(frame.pixel_coords(Vec2::splat(0.5)), Vec2::ZERO);
    }

    #[test]
    fn corners_span_half_resolution() {
        let frame = FrameContext::new(800, 600, 0.0);
        assert_eq!(frame.pixel_coords(Vec2::ZERO), Vec2::new(-400.0, -300.0));
        assert_eq!(frame.pixel_coords(Vec2::ONE), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn aspect_ratio() {
        let frame = FrameContext::new(1920, 1080, 1.0);
        assert!((frame.aspect() - 16.0 / 9.0).abs() < 1e-6);
    }
}
