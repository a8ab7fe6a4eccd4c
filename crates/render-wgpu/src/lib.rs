//! wgpu render backend for the nightfall scene.
//!
//! Each frame runs two passes: a fullscreen starfield pass that clears the
//! color target, then a cube pass that loads color and clears only depth, so
//! the cube composites over the animated background.
//!
//! # Invariants
//! - The renderer holds no frame state; resolution and time arrive via
//!   `FrameContext` every frame.
//! - The WGSL starfield mirrors the CPU shading in `nightfall-starfield`
//!   function for function.
//! - Shaders emit gamma-encoded colors; the surface must not re-encode.

mod camera;
mod gpu;
mod shaders;
mod texture;

pub use camera::{pointer_rotation, CubeRotation, OrthoCamera};
pub use gpu::NightfallRenderer;
pub use texture::bake_cube_texture;
