//! Cell hash and gradient noise, after Inigo Quilez's `Xsl3Dl` shader (MIT).

use glam::Vec3;
use nightfall_common::lerp;

/// Hash a 3D point to a pseudo-random vector with components in [-1, 1).
///
/// This is the sine-fract lattice hash; it is stable for the coordinate
/// magnitudes the starfield feeds it (cell ids, not raw pixels).
pub fn hash3(p: Vec3) -> Vec3 {
    let q = Vec3::new(
        p.dot(Vec3::new(127.1, 311.7, 74.7)),
        p.dot(Vec3::new(269.5, 183.3, 246.1)),
        p.dot(Vec3::new(113.5, 271.9, 124.6)),
    );
    let s = Vec3::new(q.x.sin(), q.y.sin(), q.z.sin()) * 43758.5453123;
    -1.0 + 2.0 * (s - s.floor())
}

/// Gradient noise over the integer lattice.
///
/// Returns zero exactly on lattice points and varies smoothly in between;
/// the twinkle animation samples this along a time axis.
pub fn noise3(p: Vec3) -> f32 {
    let i = p.floor();
    let f = p - i;
    let u = f * f * (3.0 - 2.0 * f);

    let corner = |dx: f32, dy: f32, dz: f32| -> f32 {
        let offset = Vec3::new(dx, dy, dz);
        hash3(i + offset).dot(f - offset)
    };

    lerp(
        lerp(
            lerp(corner(0.0, 0.0, 0.0), corner(1.0, 0.0, 0.0), u.x),
            lerp(corner(0.0, 1.0, 0.0), corner(1.0, 1.0, 0.0), u.x),
            u.y,
        ),
        lerp(
            lerp(corner(0.0, 0.0, 1.0), corner(1.0, 0.0, 1.0), u.x),
            lerp(corner(0.0, 1.0, 1.0), corner(1.0, 1.0, 1.0), u.x),
            u.y,
        ),
        u.z,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_components_stay_in_range() {
        for ix in -20..20 {
            for iy in -20..20 {
                let h = hash3(Vec3::new(ix as f32, iy as f32, 0.0));
                for c in [h.x, h.y, h.z] {
                    assert!((-1.0..1.0).contains(&c), "hash out of range: {c}");
                }
            }
        }
    }

    #[test]
    fn hash_is_deterministic() {
        let p = Vec3::new(12.0, -7.0, 3.5);
        assert_eq!(hash3(p), hash3(p));
    }

    #[test]
    fn neighboring_cells_hash_differently() {
        let a = hash3(Vec3::new(4.0, 9.0, 0.0));
        let b = hash3(Vec3::new(5.0, 9.0, 0.0));
        assert_ne!(a, b);
    }

    #[test]
    fn noise_vanishes_on_lattice_points() {
        for ix in -3..4 {
            for iz in -3..4 {
                let v = noise3(Vec3::new(ix as f32, 2.0, iz as f32));
                assert_eq!(v, 0.0);
            }
        }
    }

    #[test]
    fn noise_varies_off_lattice() {
        let a = noise3(Vec3::new(0.3, 0.7, 0.1));
        let b = noise3(Vec3::new(1.3, 0.7, 0.1));
        assert_ne!(a, b);
        assert!(a.abs() < 3.0);
        assert!(b.abs() < 3.0);
    }

    #[test]
    fn noise_is_deterministic() {
        let p = Vec3::new(0.25, 17.5, -4.75);
        assert_eq!(noise3(p), noise3(p));
    }
}
