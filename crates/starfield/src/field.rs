//! The star field itself: cell hashing, glow and twinkle shaping, and
//! per-pixel shading across layers.

use glam::{Vec2, Vec3};

use nightfall_common::{fract_gl, remap, saturate, smoothstep, FrameContext};
use nightfall_noise::{hash3, noise3};

use crate::config::{LayerParams, StarfieldConfig};
use crate::framebuffer::Framebuffer;

/// A pixel's grid cell, resolved for one layer.
///
/// Transient: derived from the pixel coordinate on every sample and never
/// stored between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarCell {
    /// Cell id with the layer seed folded in; keys the hash.
    pub id: Vec2,
    /// Pixel position relative to the cell center.
    pub coords: Vec2,
    /// Raw cell hash, components in [-1, 1).
    pub hash: Vec3,
    /// Star brightness in [0, 1].
    pub brightness: f32,
}

impl StarCell {
    /// Star center relative to the cell center. The placement band pulls in
    /// by four radii so the glow never clips the cell border.
    pub fn star_position(&self, cell_width: f32, radius: f32) -> Vec2 {
        self.hash.truncate() * (cell_width * 0.5 - radius * 4.0)
    }
}

/// Resolve the cell containing `pixel` on a grid of `cell_width`, hashed
/// with a per-layer `seed`.
pub fn star_cell(pixel: Vec2, cell_width: f32, seed: f32) -> StarCell {
    let scaled = pixel / cell_width;
    let base = scaled.floor();
    let coords = (Vec2::new(fract_gl(scaled.x), fract_gl(scaled.y)) - 0.5) * cell_width;
    let id = base + seed / 100.0;
    let hash = hash3(id.extend(0.0));
    StarCell {
        id,
        coords,
        hash,
        brightness: saturate(hash.z),
    }
}

/// Radial glow falloff: 1 at the star center, under one percent beyond
/// three radii.
pub fn glow(dist: f32, radius: f32) -> f32 {
    (-2.0 * dist / radius).exp()
}

/// Length of the twinkle cross spikes for a noise sample in [-1, 1].
///
/// Low noise stretches the spikes to six radii, high noise shrinks them
/// almost away; that asymmetry is what makes the twinkle read as a glint.
pub fn twinkle_size(noise_sample: f32, radius: f32) -> f32 {
    remap(noise_sample, -1.0, 1.0, 1.0, 0.1) * radius * 6.0
}

/// Four-pointed cross around the star center.
///
/// Each arm is a product of a narrow ramp across the arm and a long ramp
/// along it; both use descending smoothsteps.
pub fn twinkle_cross(offset: Vec2, radius: f32, size: f32) -> f32 {
    let d = offset.abs();
    smoothstep(radius * 0.25, 0.0, d.y) * smoothstep(size, 0.0, d.x)
        + smoothstep(radius * 0.25, 0.0, d.x) * smoothstep(size, 0.0, d.y)
}

/// Shade one layer's contribution at `pixel`.
pub fn grid_stars(pixel: Vec2, layer: &LayerParams, twinkle_time: f32) -> f32 {
    let cell = star_cell(pixel, layer.cell_width, layer.seed);
    let offset = cell.coords - cell.star_position(layer.cell_width, layer.radius);

    let mut total = glow(offset.length(), layer.radius);
    if layer.twinkle {
        let sample = noise3(cell.id.extend(twinkle_time));
        total += twinkle_cross(offset, layer.radius, twinkle_size(sample, layer.radius));
    }
    total * cell.brightness
}

/// A complete field: a config plus its expanded layer schedule.
pub struct Starfield {
    config: StarfieldConfig,
    layers: Vec<LayerParams>,
}

impl Starfield {
    pub fn new(config: StarfieldConfig) -> Self {
        let layers = config.layer_schedule();
        Self { config, layers }
    }

    pub fn config(&self) -> &StarfieldConfig {
        &self.config
    }

    pub fn layers(&self) -> &[LayerParams] {
        &self.layers
    }

    /// Sum every layer's stars at `pixel`. Pre-gamma, unbounded, and gray:
    /// all three channels carry the same accumulated value.
    pub fn accumulate(&self, pixel: Vec2, elapsed: f32) -> Vec3 {
        let twinkle_time = elapsed * self.config.twinkle_speed;
        let mut stars = 0.0;
        for layer in &self.layers {
            stars += grid_stars(pixel, layer, twinkle_time);
        }
        Vec3::splat(stars)
    }

    /// Final color at `pixel`: background plus stars, clamped to [0, 1],
    /// then gamma-encoded.
    pub fn shade(&self, pixel: Vec2, elapsed: f32) -> Vec3 {
        let color = Vec3::from(self.config.background) + self.accumulate(pixel, elapsed);
        let clamped = color.clamp(Vec3::ZERO, Vec3::ONE);
        clamped.powf(1.0 / self.config.gamma)
    }

    /// Shade a full frame on the CPU, sampling pixel centers.
    pub fn render(&self, frame: &FrameContext) -> Framebuffer {
        let width = frame.resolution.x.max(1.0) as u32;
        let height = frame.resolution.y.max(1.0) as u32;
        let _span = tracing::info_span!("starfield_render", width, height).entered();

        let mut framebuffer = Framebuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let uv = Vec2::new(
                    (x as f32 + 0.5) / width as f32,
                    (y as f32 + 0.5) / height as f32,
                );
                let color = self.shade(frame.pixel_coords(uv), frame.elapsed);
                framebuffer.set(x, y, color.into());
            }
        }
        tracing::debug!(pixels = width * height, "frame shaded");
        framebuffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_field() -> Starfield {
        Starfield::new(StarfieldConfig::default())
    }

    #[test]
    fn brightness_is_bounded_across_many_cells() {
        let mut checked = 0usize;
        for seed in 0..5 {
            for ix in -25..25 {
                for iy in -20..20 {
                    let pixel = Vec2::new(ix as f32 * 37.0 + 11.0, iy as f32 * 53.0 + 7.0);
                    let cell = star_cell(pixel, 500.0, seed as f32);
                    assert!(
                        (0.0..=1.0).contains(&cell.brightness),
                        "brightness out of range: {}",
                        cell.brightness
                    );
                    checked += 1;
                }
            }
        }
        assert!(checked >= 10_000);
    }

    #[test]
    fn cell_coords_stay_within_half_width() {
        for ix in -30..30 {
            let pixel = Vec2::new(ix as f32 * 91.0 + 13.0, ix as f32 * 47.0 - 5.0);
            let cell = star_cell(pixel, 500.0, 0.0);
            assert!(cell.coords.x.abs() <= 250.0 + 1e-3);
            assert!(cell.coords.y.abs() <= 250.0 + 1e-3);
        }
    }

    #[test]
    fn star_stays_clear_of_cell_border() {
        let margin = 500.0 * 0.5 - 4.0 * 4.0;
        for seed in 0..5 {
            for ix in -10..10 {
                let pixel = Vec2::new(ix as f32 * 217.0, ix as f32 * 133.0);
                let cell = star_cell(pixel, 500.0, seed as f32);
                let star = cell.star_position(500.0, 4.0);
                assert!(star.x.abs() <= margin);
                assert!(star.y.abs() <= margin);
            }
        }
    }

    #[test]
    fn glow_peaks_at_center_and_decays() {
        let radius = 4.0;
        assert_eq!(glow(0.0, radius), 1.0);
        assert!(glow(3.0 * radius, radius) < 0.01);

        let mut prev = f32::INFINITY;
        for step in 0..100 {
            let value = glow(step as f32 * 0.25, radius);
            assert!(value < prev, "glow not strictly decreasing at step {step}");
            prev = value;
        }
    }

    #[test]
    fn twinkle_size_remap_endpoints() {
        let radius = 4.0;
        assert!((twinkle_size(-1.0, radius) - 6.0 * radius).abs() < 1e-4);
        assert!((twinkle_size(1.0, radius) - 0.6 * radius).abs() < 1e-4);
        assert!((twinkle_size(0.0, radius) - 3.3 * radius).abs() < 1e-4);
    }

    #[test]
    fn twinkle_cross_fades_with_distance() {
        let radius = 4.0;
        let size = twinkle_size(0.0, radius);
        let center = twinkle_cross(Vec2::ZERO, radius, size);
        let on_arm = twinkle_cross(Vec2::new(size * 0.5, 0.0), radius, size);
        let far = twinkle_cross(Vec2::splat(size * 2.0), radius, size);
        assert!(center > on_arm);
        assert!(on_arm > far);
        assert_eq!(far, 0.0);
    }

    #[test]
    fn static_layers_ignore_time() {
        let schedule = StarfieldConfig::default().layer_schedule();
        let static_layers: Vec<_> = schedule.iter().filter(|l| !l.twinkle).collect();
        assert!(!static_layers.is_empty());

        let pixel = Vec2::new(123.0, -77.0);
        for layer in static_layers {
            assert_eq!(grid_stars(pixel, layer, 0.0), grid_stars(pixel, layer, 999.0));
        }
    }

    #[test]
    fn twinkle_layers_respond_to_time() {
        let schedule = StarfieldConfig::default().layer_schedule();
        let layer = schedule[0];
        assert!(layer.twinkle);

        // Probe just off each cell's star center, along a cross arm, so the
        // time-driven arm length is the only varying term. Skip cells whose
        // star hashed to zero brightness.
        let mut varied = false;
        'cells: for i in 1..7 {
            for j in 1..7 {
                let cell_center = Vec2::new(
                    (i as f32 + 0.5) * layer.cell_width,
                    (j as f32 + 0.5) * layer.cell_width,
                );
                let cell = star_cell(cell_center, layer.cell_width, layer.seed);
                if cell.brightness < 0.01 {
                    continue;
                }
                let star = cell.star_position(layer.cell_width, layer.radius);
                let pixel = cell_center + star + Vec2::new(layer.radius * 0.375, 0.0);
                if grid_stars(pixel, &layer, 0.37) != grid_stars(pixel, &layer, 0.81) {
                    varied = true;
                    break 'cells;
                }
            }
        }
        assert!(varied, "no twinkle sample changed with time");
    }

    #[test]
    fn accumulation_is_gray_and_reproducible() {
        let field = default_field();
        let frame = FrameContext::new(800, 600, 0.0);
        let uv = Vec2::new(400.5 / 800.0, 300.5 / 600.0);
        let pixel = frame.pixel_coords(uv);

        let a = field.accumulate(pixel, frame.elapsed);
        let b = field.accumulate(pixel, frame.elapsed);
        assert_eq!(a, b);
        assert_eq!(a.x, a.y);
        assert_eq!(a.y, a.z);
        assert!(a.x.is_finite());
    }

    #[test]
    fn shaded_channels_stay_in_unit_range() {
        let field = default_field();
        for i in 0..600 {
            let pixel = Vec2::new(
                (i % 40) as f32 * 13.7 - 260.0,
                (i / 40) as f32 * 29.3 - 190.0,
            );
            let color = field.shade(pixel, 1.7);
            for channel in [color.x, color.y, color.z] {
                assert!(
                    (0.0..=1.0).contains(&channel),
                    "channel out of range: {channel}"
                );
            }
        }
    }

    #[test]
    fn background_shows_through_blank_cells() {
        // The origin cell hashes to (-1, -1, -1), so its star has zero
        // brightness and any pixel inside it accumulates nothing.
        let mut config = StarfieldConfig::default();
        config.layers = 1;
        config.background = [0.1, 0.2, 0.3];
        let field = Starfield::new(config);

        let pixel = Vec2::new(100.0, 50.0);
        assert_eq!(field.accumulate(pixel, 0.0), Vec3::ZERO);

        let color = field.shade(pixel, 0.0);
        assert!((color.x - 0.1_f32.powf(1.0 / 2.2)).abs() < 1e-5);
        assert!(color.z > color.y);
        assert!(color.y > color.x);
    }

    #[test]
    fn cpu_render_is_deterministic() {
        let field = default_field();
        let frame = FrameContext::new(16, 12, 0.5);
        let a = field.render(&frame);
        let b = field.render(&frame);
        assert_eq!(a.width(), 16);
        assert_eq!(a.height(), 12);
        for y in 0..12 {
            for x in 0..16 {
                assert_eq!(a.get(x, y), b.get(x, y));
            }
        }
    }

    #[test]
    fn render_matches_pointwise_shade() {
        let field = default_field();
        let frame = FrameContext::new(8, 8, 0.25);
        let fb = field.render(&frame);

        let uv = Vec2::new(3.5 / 8.0, 5.5 / 8.0);
        let direct = field.shade(frame.pixel_coords(uv), frame.elapsed);
        let from_frame = fb.get(3, 5);
        assert_eq!(from_frame, [direct.x, direct.y, direct.z]);
    }
}
