//! CPU-baked cube surface texture.

use std::time::Instant;

use glam::Vec3;
use nightfall_noise::{fbm, height_normal, FbmParams};

/// Bake a square RGBA8 surface for the cube: an fbm height field shaded by
/// its own normals, tinted slate. Deterministic for a given size.
pub fn bake_cube_texture(size: u32) -> Vec<u8> {
    let params = FbmParams::default();
    let light_dir = Vec3::new(0.3, 1.0, 0.5).normalize();
    let base_color = Vec3::new(0.42, 0.47, 0.58);

    let mut data = Vec::with_capacity((size as usize) * (size as usize) * 4);
    for y in 0..size {
        for x in 0..size {
            let u = (x as f32 + 0.5) / size as f32;
            let v = (y as f32 + 0.5) / size as f32;
            let pos = Vec3::new(u * 4.0, v * 4.0, 0.0);

            let height = fbm(pos, &params);
            let normal = height_normal(pos, Vec3::Z, &params);
            let lighting = 0.3 + normal.dot(light_dir).max(0.0) * 0.7;

            let color = (base_color * (0.6 + 0.4 * height) * lighting).clamp(Vec3::ZERO, Vec3::ONE);
            data.push((color.x * 255.0).round() as u8);
            data.push((color.y * 255.0).round() as u8);
            data.push((color.z * 255.0).round() as u8);
            data.push(255);
        }
    }
    data
}

/// Upload a baked surface as a filterable sRGB texture.
pub fn create_cube_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    size: u32,
) -> wgpu::TextureView {
    let started = Instant::now();
    let data = bake_cube_texture(size);
    tracing::debug!(size, elapsed = ?started.elapsed(), "cube texture baked");

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("cube_texture"),
        size: wgpu::Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &data,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(size * 4),
            rows_per_image: Some(size),
        },
        wgpu::Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
    );

    texture.create_view(&Default::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bake_fills_every_texel() {
        let data = bake_cube_texture(16);
        assert_eq!(data.len(), 16 * 16 * 4);
        for alpha in data.iter().skip(3).step_by(4) {
            assert_eq!(*alpha, 255);
        }
    }

    #[test]
    fn bake_is_deterministic() {
        assert_eq!(bake_cube_texture(8), bake_cube_texture(8));
    }

    #[test]
    fn bake_has_surface_variation() {
        let data = bake_cube_texture(32);
        let first = data[0];
        assert!(
            data.iter().step_by(4).any(|&r| r != first),
            "red channel constant across the whole bake"
        );
    }
}
