//! Fractional Brownian motion over simplex noise, plus a derived surface
//! normal for height-field shading.

use glam::Vec3;

use crate::simplex::simplex3;

/// Octave schedule for [`fbm`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FbmParams {
    /// Number of octaves to accumulate. Must be at least 1.
    pub octaves: u32,
    /// Amplitude multiplier applied after each octave.
    pub persistence: f32,
    /// Frequency multiplier applied after each octave.
    pub lacunarity: f32,
    /// Exponent applied to the normalized sum; higher values carve valleys.
    pub exponentiation: f32,
}

impl Default for FbmParams {
    fn default() -> Self {
        Self {
            octaves: 6,
            persistence: 0.5,
            lacunarity: 2.0,
            exponentiation: 4.0,
        }
    }
}

/// Accumulate simplex octaves at `p`, normalize to [0, 1], and sharpen with
/// the configured exponent.
pub fn fbm(p: Vec3, params: &FbmParams) -> f32 {
    assert!(params.octaves > 0, "fbm needs at least one octave");

    let mut amplitude = 0.5;
    let mut frequency = 1.0;
    let mut total = 0.0;
    let mut normalization = 0.0;
    for _ in 0..params.octaves {
        total += simplex3(p * frequency).value * amplitude;
        normalization += amplitude;
        amplitude *= params.persistence;
        frequency *= params.lacunarity;
    }
    total /= normalization;
    (total * 0.5 + 0.5).powf(params.exponentiation)
}

/// Normal of the fbm height field at `pos`, by central differences.
///
/// `up` is the unperturbed surface normal; the slope scale matches the
/// epsilon so fine detail still reads at texture resolution.
pub fn height_normal(pos: Vec3, up: Vec3, params: &FbmParams) -> Vec3 {
    const E: f32 = 1e-4;
    let slope = Vec3::new(
        fbm(pos + Vec3::new(E, 0.0, 0.0), params) - fbm(pos - Vec3::new(E, 0.0, 0.0), params),
        fbm(pos + Vec3::new(0.0, E, 0.0), params) - fbm(pos - Vec3::new(0.0, E, 0.0), params),
        fbm(pos + Vec3::new(0.0, 0.0, E), params) - fbm(pos - Vec3::new(0.0, 0.0, E), params),
    );
    (up + -500.0 * slope).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_stays_normalized() {
        let params = FbmParams::default();
        for ix in 0..30 {
            for iy in 0..30 {
                let p = Vec3::new(ix as f32 * 0.41, iy as f32 * 0.29, 2.5);
                let v = fbm(p, &params);
                assert!((0.0..=1.0).contains(&v), "fbm out of range at {p:?}: {v}");
            }
        }
    }

    #[test]
    fn single_octave_reduces_to_remapped_simplex() {
        let params = FbmParams {
            octaves: 1,
            ..FbmParams::default()
        };
        let p = Vec3::new(1.3, -0.7, 4.2);
        let expected = (simplex3(p).value * 0.5 + 0.5).powf(params.exponentiation);
        assert!((fbm(p, &params) - expected).abs() < 1e-6);
    }

    #[test]
    fn is_deterministic() {
        let params = FbmParams::default();
        let p = Vec3::new(0.6, 8.1, -2.2);
        assert_eq!(fbm(p, &params), fbm(p, &params));
    }

    #[test]
    fn octave_count_changes_detail() {
        let coarse = FbmParams {
            octaves: 1,
            ..FbmParams::default()
        };
        let fine = FbmParams::default();
        let p = Vec3::new(0.37, 1.91, 0.53);
        assert_ne!(fbm(p, &coarse), fbm(p, &fine));
    }

    #[test]
    #[should_panic(expected = "at least one octave")]
    fn zero_octaves_panics() {
        let params = FbmParams {
            octaves: 0,
            ..FbmParams::default()
        };
        fbm(Vec3::ZERO, &params);
    }

    #[test]
    fn normals_are_unit_length() {
        let params = FbmParams::default();
        for i in 0..10 {
            let pos = Vec3::new(i as f32 * 0.73, 1.0 - i as f32 * 0.11, 0.2);
            let n = height_normal(pos, Vec3::Z, &params);
            assert!((n.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn normals_tilt_away_from_up_on_slopes() {
        let params = FbmParams::default();
        let mut tilted = 0;
        for i in 0..20 {
            let pos = Vec3::new(i as f32 * 0.631, i as f32 * 0.417, 0.9);
            let n = height_normal(pos, Vec3::Z, &params);
            if n.dot(Vec3::Z) < 0.999 {
                tilted += 1;
            }
        }
        assert!(tilted > 0, "every sampled normal was exactly vertical");
    }
}
