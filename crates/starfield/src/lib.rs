//! Nightfall starfield: layered grid stars with twinkle and gamma-corrected
//! shading.
//!
//! # Invariants
//! - Shading is pure: a pixel coordinate, an elapsed time, and a config fully
//!   determine the output color.
//! - Shaded channels lie in [0, 1]; accumulation before gamma is unbounded
//!   but always gray (equal channels).
//! - Layers without twinkle are time-invariant.

mod config;
mod field;
mod framebuffer;

pub use config::{ConfigError, LayerParams, StarfieldConfig};
pub use field::{glow, grid_stars, star_cell, twinkle_cross, twinkle_size, StarCell, Starfield};
pub use framebuffer::Framebuffer;

pub fn crate_info() -> &'static str {
    "nightfall-starfield v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("nightfall-starfield"));
    }
}
