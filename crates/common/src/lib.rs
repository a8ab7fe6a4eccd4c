//! Nightfall common: frame context and scalar math shared across the renderer.
//!
//! # Invariants
//! - A `FrameContext` is built fresh by the host every frame and passed down
//!   explicitly; nothing in this crate holds cross-frame state.
//! - The scalar helpers follow GL shading-language semantics (`fract_gl`,
//!   clamped `smoothstep`) so the CPU and GPU paths agree sample for sample.

mod frame;
mod math;

pub use frame::FrameContext;
pub use math::{fract_gl, inverse_lerp, lerp, remap, saturate, smoothstep};

pub fn crate_info() -> &'static str {
    "nightfall-common v0.1.0"
}
