/// WGSL for the fullscreen starfield pass.
///
/// This mirrors `nightfall-starfield` on the CPU: same hash, same noise,
/// same glow and cross shaping, so a GPU frame and a CPU frame agree. The
/// `falloff` helper reimplements smoothstep because the builtin rejects
/// reversed edges on some backends and the cross shapes need them.
pub const STARFIELD_SHADER: &str = r#"
struct Uniforms {
    resolution: vec2<f32>,
    time: f32,
    base_radius: f32,
    background: vec3<f32>,
    gamma: f32,
    base_cell_width: f32,
    radius_falloff: f32,
    cell_falloff: f32,
    twinkle_speed: f32,
    layer_count: u32,
    twinkle_layers: u32,
    _pad: vec2<u32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VertexOutput {
    // Fullscreen triangle, no vertex buffer.
    let x = f32(i32(vertex_index & 1u) * 4 - 1);
    let y = f32(i32(vertex_index >> 1u) * 4 - 1);

    var out: VertexOutput;
    out.clip_position = vec4<f32>(x, y, 0.0, 1.0);
    out.uv = vec2<f32>((x + 1.0) * 0.5, (1.0 - y) * 0.5);
    return out;
}

fn hash3(p: vec3<f32>) -> vec3<f32> {
    let q = vec3<f32>(
        dot(p, vec3<f32>(127.1, 311.7, 74.7)),
        dot(p, vec3<f32>(269.5, 183.3, 246.1)),
        dot(p, vec3<f32>(113.5, 271.9, 124.6)),
    );
    return -1.0 + 2.0 * fract(sin(q) * 43758.5453123);
}

fn noise3(p: vec3<f32>) -> f32 {
    let i = floor(p);
    let f = p - i;
    let u = f * f * (3.0 - 2.0 * f);

    return mix(
        mix(
            mix(dot(hash3(i + vec3<f32>(0.0, 0.0, 0.0)), f - vec3<f32>(0.0, 0.0, 0.0)),
                dot(hash3(i + vec3<f32>(1.0, 0.0, 0.0)), f - vec3<f32>(1.0, 0.0, 0.0)), u.x),
            mix(dot(hash3(i + vec3<f32>(0.0, 1.0, 0.0)), f - vec3<f32>(0.0, 1.0, 0.0)),
                dot(hash3(i + vec3<f32>(1.0, 1.0, 0.0)), f - vec3<f32>(1.0, 1.0, 0.0)), u.x),
            u.y),
        mix(
            mix(dot(hash3(i + vec3<f32>(0.0, 0.0, 1.0)), f - vec3<f32>(0.0, 0.0, 1.0)),
                dot(hash3(i + vec3<f32>(1.0, 0.0, 1.0)), f - vec3<f32>(1.0, 0.0, 1.0)), u.x),
            mix(dot(hash3(i + vec3<f32>(0.0, 1.0, 1.0)), f - vec3<f32>(0.0, 1.0, 1.0)),
                dot(hash3(i + vec3<f32>(1.0, 1.0, 1.0)), f - vec3<f32>(1.0, 1.0, 1.0)), u.x),
            u.y),
        u.z);
}

// Hermite ramp that accepts reversed edges.
fn falloff(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = clamp((x - edge0) / (edge1 - edge0), 0.0, 1.0);
    return t * t * (3.0 - 2.0 * t);
}

fn remap(v: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let t = (v - in_min) / (in_max - in_min);
    return mix(out_min, out_max, t);
}

fn grid_stars(pixel: vec2<f32>, radius: f32, cell_width: f32, seed: f32, twinkle: bool, t: f32) -> f32 {
    let base = floor(pixel / cell_width);
    let cell_coords = (pixel / cell_width - base - 0.5) * cell_width;
    let cell_id = base + seed / 100.0;
    let cell_hash = hash3(vec3<f32>(cell_id, 0.0));

    let brightness = clamp(cell_hash.z, 0.0, 1.0);
    let star_position = cell_hash.xy * (cell_width * 0.5 - radius * 4.0);
    let offset = cell_coords - star_position;

    var total = exp(-2.0 * length(offset) / radius);
    if (twinkle) {
        let sample = noise3(vec3<f32>(cell_id, t));
        let size = remap(sample, -1.0, 1.0, 1.0, 0.1) * radius * 6.0;
        let d = abs(offset);
        total += falloff(radius * 0.25, 0.0, d.y) * falloff(size, 0.0, d.x)
            + falloff(radius * 0.25, 0.0, d.x) * falloff(size, 0.0, d.y);
    }
    return total * brightness;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let pixel = (in.uv - 0.5) * uniforms.resolution;
    let t = uniforms.time * uniforms.twinkle_speed;

    var stars = 0.0;
    var radius = uniforms.base_radius;
    var cell_width = uniforms.base_cell_width;
    for (var i = 0u; i < uniforms.layer_count; i = i + 1u) {
        stars += grid_stars(pixel, radius, cell_width, f32(i), i < uniforms.twinkle_layers, t);
        radius *= uniforms.radius_falloff;
        cell_width *= uniforms.cell_falloff;
    }

    var color = uniforms.background + vec3<f32>(stars);
    color = clamp(color, vec3<f32>(0.0), vec3<f32>(1.0));
    color = pow(color, vec3<f32>(1.0 / uniforms.gamma));
    return vec4<f32>(color, 1.0);
}
"#;

/// WGSL for the cube pass: textured, lambert-lit, gamma-encoded on output.
pub const CUBE_SHADER: &str = r#"
struct SceneUniforms {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: SceneUniforms;
@group(0) @binding(1)
var cube_texture: texture_2d<f32>;
@group(0) @binding(2)
var cube_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
    @location(1) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world_pos = uniforms.model * vec4<f32>(vertex.position, 1.0);
    let world_normal = (uniforms.model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.world_normal = normalize(world_normal);
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let light_dir = normalize(vec3<f32>(0.3, 1.0, 0.5));
    let ambient = 0.3;
    let diffuse = max(dot(in.world_normal, light_dir), 0.0);
    let lighting = ambient + diffuse * 0.7;
    let albedo = textureSample(cube_texture, cube_sampler, in.uv);
    let shaded = albedo.rgb * lighting;
    return vec4<f32>(pow(shaded, vec3<f32>(1.0 / 2.2)), 1.0);
}
"#;
