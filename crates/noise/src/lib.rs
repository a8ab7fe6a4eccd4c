//! Nightfall noise: the procedural primitives under the starfield and the
//! cube surface.
//!
//! # Invariants
//! - Every sampler is a pure function: the same input always produces the
//!   same output, with no hidden state and no allocation.
//! - `hash3` components lie in [-1, 1); `noise3` is exactly zero on integer
//!   lattice points; `fbm` output lies in [0, 1].

mod fbm;
mod gradient;
mod simplex;

pub use fbm::{fbm, height_normal, FbmParams};
pub use gradient::{hash3, noise3};
pub use simplex::{simplex3, SimplexSample};

pub fn crate_info() -> &'static str {
    "nightfall-noise v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("nightfall-noise"));
    }
}
