//! Simplex noise with an analytic gradient, ported from the Ashima Arts /
//! Stefan Gustavson `webgl-noise` implementation (MIT).

use glam::{Vec3, Vec3Swizzles, Vec4, Vec4Swizzles};

/// One simplex noise sample: the value and its spatial gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplexSample {
    /// Noise value, roughly in [-1, 1].
    pub value: f32,
    /// Gradient of `value` with respect to the sample position.
    pub gradient: Vec3,
}

fn mod289_v3(x: Vec3) -> Vec3 {
    x - (x / 289.0).floor() * 289.0
}

fn mod289_v4(x: Vec4) -> Vec4 {
    x - (x / 289.0).floor() * 289.0
}

fn permute(x: Vec4) -> Vec4 {
    mod289_v4((x * 34.0 + 1.0) * x)
}

fn taylor_inv_sqrt(r: Vec4) -> Vec4 {
    1.79284291400159 - r * 0.85373472095314
}

fn step3(edge: Vec3, x: Vec3) -> Vec3 {
    Vec3::select(x.cmpge(edge), Vec3::ONE, Vec3::ZERO)
}

fn step4(edge: Vec4, x: Vec4) -> Vec4 {
    Vec4::select(x.cmpge(edge), Vec4::ONE, Vec4::ZERO)
}

/// Sample 3D simplex noise at `p`, returning value and analytic gradient.
///
/// The value feeds [`crate::fbm`]; the gradient is exposed for terrain-style
/// normal estimation. The gradient keeps the ported shader's softened
/// `-6 m^3` falloff term (the exact derivative of the quartic kernel would
/// carry `-8 m^3`), so it tracks finite differences closely only where a
/// single corner term is active.
pub fn simplex3(p: Vec3) -> SimplexSample {
    const C_X: f32 = 1.0 / 6.0;
    const C_Y: f32 = 1.0 / 3.0;

    // Skew into simplex space and find the cell origin.
    let i = (p + Vec3::splat(p.dot(Vec3::splat(C_Y)))).floor();
    let x0 = p - i + Vec3::splat(i.dot(Vec3::splat(C_X)));

    // Rank x0's components to pick the traversal order of the other corners.
    let g = step3(x0.yzx(), x0);
    let l = 1.0 - g;
    let i1 = g.min(l.zxy());
    let i2 = g.max(l.zxy());

    let x1 = x0 - i1 + C_X;
    let x2 = x0 - i2 + C_Y;
    let x3 = x0 - 0.5;

    // Hash the four corners through the 289-period permutation polynomial.
    let i = mod289_v3(i);
    let perm = permute(
        permute(
            permute(Vec4::splat(i.z) + Vec4::new(0.0, i1.z, i2.z, 1.0))
                + Vec4::splat(i.y)
                + Vec4::new(0.0, i1.y, i2.y, 1.0),
        ) + Vec4::splat(i.x)
            + Vec4::new(0.0, i1.x, i2.x, 1.0),
    );

    // Gradients: 7x7 points over a square, mapped onto an octahedron.
    let j = perm - 49.0 * (perm / 49.0).floor();
    let x_ = (j / 7.0).floor();
    let y_ = (j - 7.0 * x_).floor();

    let x = (x_ * 2.0 + 0.5) / 7.0 - 1.0;
    let y = (y_ * 2.0 + 0.5) / 7.0 - 1.0;
    let h = 1.0 - x.abs() - y.abs();

    let b0 = Vec4::new(x.x, x.y, y.x, y.y);
    let b1 = Vec4::new(x.z, x.w, y.z, y.w);

    let s0 = b0.floor() * 2.0 + 1.0;
    let s1 = b1.floor() * 2.0 + 1.0;
    let sh = -step4(h, Vec4::ZERO);

    let a0 = b0.xzyw() + s0.xzyw() * sh.xxyy();
    let a1 = b1.xzyw() + s1.xzyw() * sh.zzww();

    let mut g0 = Vec3::new(a0.x, a0.y, h.x);
    let mut g1 = Vec3::new(a0.z, a0.w, h.y);
    let mut g2 = Vec3::new(a1.x, a1.y, h.z);
    let mut g3 = Vec3::new(a1.z, a1.w, h.w);

    let norm = taylor_inv_sqrt(Vec4::new(g0.dot(g0), g1.dot(g1), g2.dot(g2), g3.dot(g3)));
    g0 *= norm.x;
    g1 *= norm.y;
    g2 *= norm.z;
    g3 *= norm.w;

    // Quartic falloff per corner, plus the analytic derivative of the sum.
    let m = (0.6 - Vec4::new(x0.dot(x0), x1.dot(x1), x2.dot(x2), x3.dot(x3))).max(Vec4::ZERO);
    let m2 = m * m;
    let m3 = m2 * m;
    let m4 = m2 * m2;

    let px = Vec4::new(x0.dot(g0), x1.dot(g1), x2.dot(g2), x3.dot(g3));
    let grad = -6.0 * m3.x * px.x * x0
        + m4.x * g0
        + -6.0 * m3.y * px.y * x1
        + m4.y * g1
        + -6.0 * m3.z * px.z * x2
        + m4.z * g2
        + -6.0 * m3.w * px.w * x3
        + m4.w * g3;

    SimplexSample {
        value: 42.0 * m4.dot(px),
        gradient: 42.0 * grad,
    }
}
