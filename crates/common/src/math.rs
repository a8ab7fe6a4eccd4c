//! Scalar helpers with GL shading-language semantics.

/// Clamp a value to [0, 1].
pub fn saturate(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Linear interpolation between `a` and `b` by `t`. `t` is not clamped.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Where `v` sits between `min` and `max`, as an unclamped parameter.
pub fn inverse_lerp(v: f32, min: f32, max: f32) -> f32 {
    (v - min) / (max - min)
}

/// Map `v` from [in_min, in_max] to [out_min, out_max].
pub fn remap(v: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    lerp(out_min, out_max, inverse_lerp(v, in_min, in_max))
}

/// Hermite ramp between two edges.
///
/// Edges may be reversed (`edge0 > edge1`), which yields a descending ramp;
/// the star cross shapes depend on that. Equal edges are undefined.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Fractional part per GL rules: `x - floor(x)`, always in [0, 1).
///
/// Differs from `f32::fract` for negative inputs, which truncates toward zero.
pub fn fract_gl(x: f32) -> f32 {
    x - x.floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturate_clamps_both_ends() {
        assert_eq!(saturate(-0.5), 0.0);
        assert_eq!(saturate(0.25), 0.25);
        assert_eq!(saturate(1.5), 1.0);
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
    }

    #[test]
    fn inverse_lerp_is_unclamped() {
        assert_eq!(inverse_lerp(5.0, 0.0, 10.0), 0.5);
        assert_eq!(inverse_lerp(-5.0, 0.0, 10.0), -0.5);
        assert_eq!(inverse_lerp(15.0, 0.0, 10.0), 1.5);
    }

    #[test]
    fn remap_matches_endpoints() {
        assert_eq!(remap(-1.0, -1.0, 1.0, 1.0, 0.1), 1.0);
        assert!((remap(1.0, -1.0, 1.0, 1.0, 0.1) - 0.1).abs() < 1e-6);
        assert!((remap(0.0, -1.0, 1.0, 1.0, 0.1) - 0.55).abs() < 1e-6);
    }

    #[test]
    fn smoothstep_ascending() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
    }

    #[test]
    fn smoothstep_reversed_edges_descend() {
        // Reversed edges ramp from 1 at the far edge down to 0 at the near one.
        assert_eq!(smoothstep(1.0, 0.0, 0.0), 1.0);
        assert_eq!(smoothstep(1.0, 0.0, 1.0), 0.0);
        let high = smoothstep(1.0, 0.0, 0.25);
        let low = smoothstep(1.0, 0.0, 0.75);
        assert!(high > low);
    }

    #[test]
    fn fract_gl_handles_negatives() {
        assert_eq!(fract_gl(1.25), 0.25);
        assert_eq!(fract_gl(-1.25), 0.75);
        assert_eq!(fract_gl(-0.5), 0.5);
    }
}
