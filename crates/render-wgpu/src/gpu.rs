use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4, Quat, Vec3};
use wgpu::util::DeviceExt;

use nightfall_common::FrameContext;
use nightfall_starfield::StarfieldConfig;

use crate::camera::{CubeRotation, OrthoCamera};
use crate::shaders;
use crate::texture::create_cube_texture;

/// Cube edge length after scaling.
const CUBE_SCALE: f32 = 0.8;
/// Height of the cube above the scene origin.
const CUBE_HEIGHT: f32 = 2.75;
const CUBE_TEXTURE_SIZE: u32 = 256;

/// Uniform block for the starfield pass. Field order matches the WGSL
/// struct; offsets are fixed by vec2/vec3 alignment.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct StarfieldUniforms {
    resolution: [f32; 2],  // offset 0
    time: f32,             // offset 8
    base_radius: f32,      // offset 12
    background: [f32; 3],  // offset 16
    gamma: f32,            // offset 28
    base_cell_width: f32,  // offset 32
    radius_falloff: f32,   // offset 36
    cell_falloff: f32,     // offset 40
    twinkle_speed: f32,    // offset 44
    layer_count: u32,      // offset 48
    twinkle_layers: u32,   // offset 52
    _pad: [u32; 2],        // offset 56, total 64
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
    uv: [f32; 2],
}

/// Generate unit cube vertices and indices, one uv quad per face.
fn cube_mesh() -> (Vec<Vertex>, Vec<u16>) {
    let p = 0.5_f32;
    #[rustfmt::skip]
    let vertices = vec![
        // +Z face
        Vertex { position: [-p, -p,  p], normal: [0.0, 0.0, 1.0], uv: [0.0, 1.0] },
        Vertex { position: [ p, -p,  p], normal: [0.0, 0.0, 1.0], uv: [1.0, 1.0] },
        Vertex { position: [ p,  p,  p], normal: [0.0, 0.0, 1.0], uv: [1.0, 0.0] },
        Vertex { position: [-p,  p,  p], normal: [0.0, 0.0, 1.0], uv: [0.0, 0.0] },
        // -Z face
        Vertex { position: [ p, -p, -p], normal: [0.0, 0.0, -1.0], uv: [0.0, 1.0] },
        Vertex { position: [-p, -p, -p], normal: [0.0, 0.0, -1.0], uv: [1.0, 1.0] },
        Vertex { position: [-p,  p, -p], normal: [0.0, 0.0, -1.0], uv: [1.0, 0.0] },
        Vertex { position: [ p,  p, -p], normal: [0.0, 0.0, -1.0], uv: [0.0, 0.0] },
        // +X face
        Vertex { position: [ p, -p,  p], normal: [1.0, 0.0, 0.0], uv: [0.0, 1.0] },
        Vertex { position: [ p, -p, -p], normal: [1.0, 0.0, 0.0], uv: [1.0, 1.0] },
        Vertex { position: [ p,  p, -p], normal: [1.0, 0.0, 0.0], uv: [1.0, 0.0] },
        Vertex { position: [ p,  p,  p], normal: [1.0, 0.0, 0.0], uv: [0.0, 0.0] },
        // -X face
        Vertex { position: [-p, -p, -p], normal: [-1.0, 0.0, 0.0], uv: [0.0, 1.0] },
        Vertex { position: [-p, -p,  p], normal: [-1.0, 0.0, 0.0], uv: [1.0, 1.0] },
        Vertex { position: [-p,  p,  p], normal: [-1.0, 0.0, 0.0], uv: [1.0, 0.0] },
        Vertex { position: [-p,  p, -p], normal: [-1.0, 0.0, 0.0], uv: [0.0, 0.0] },
        // +Y face
        Vertex { position: [-p,  p,  p], normal: [0.0, 1.0, 0.0], uv: [0.0, 1.0] },
        Vertex { position: [ p,  p,  p], normal: [0.0, 1.0, 0.0], uv: [1.0, 1.0] },
        Vertex { position: [ p,  p, -p], normal: [0.0, 1.0, 0.0], uv: [1.0, 0.0] },
        Vertex { position: [-p,  p, -p], normal: [0.0, 1.0, 0.0], uv: [0.0, 0.0] },
        // -Y face
        Vertex { position: [-p, -p, -p], normal: [0.0, -1.0, 0.0], uv: [0.0, 1.0] },
        Vertex { position: [ p, -p, -p], normal: [0.0, -1.0, 0.0], uv: [1.0, 1.0] },
        Vertex { position: [ p, -p,  p], normal: [0.0, -1.0, 0.0], uv: [1.0, 0.0] },
        Vertex { position: [-p, -p,  p], normal: [0.0, -1.0, 0.0], uv: [0.0, 0.0] },
    ];
    #[rustfmt::skip]
    let indices: Vec<u16> = vec![
        0,1,2, 2,3,0,       // +Z
        4,5,6, 6,7,4,       // -Z
        8,9,10, 10,11,8,    // +X
        12,13,14, 14,15,12, // -X
        16,17,18, 18,19,16, // +Y
        20,21,22, 22,23,20, // -Y
    ];
    (vertices, indices)
}

/// Two-pass scene renderer: starfield background, then the cube.
pub struct NightfallRenderer {
    starfield_pipeline: wgpu::RenderPipeline,
    starfield_uniform_buffer: wgpu::Buffer,
    starfield_bind_group: wgpu::BindGroup,
    cube_pipeline: wgpu::RenderPipeline,
    scene_uniform_buffer: wgpu::Buffer,
    cube_bind_group: wgpu::BindGroup,
    cube_vertex_buffer: wgpu::Buffer,
    cube_index_buffer: wgpu::Buffer,
    cube_index_count: u32,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl NightfallRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        // Starfield pass: one uniform block, no vertex buffers.
        let starfield_uniform_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("starfield_uniform_buffer"),
                contents: bytemuck::bytes_of(&StarfieldUniforms::zeroed()),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let starfield_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("starfield_bind_group_layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let starfield_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("starfield_bind_group"),
            layout: &starfield_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: starfield_uniform_buffer.as_entire_binding(),
            }],
        });

        let starfield_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("starfield_pipeline_layout"),
            bind_group_layouts: &[&starfield_bind_group_layout],
            push_constant_ranges: &[],
        });

        let starfield_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("starfield_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::STARFIELD_SHADER.into()),
        });

        let starfield_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("starfield_pipeline"),
            layout: Some(&starfield_layout),
            vertex: wgpu::VertexState {
                module: &starfield_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &starfield_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Cube pass: matrices plus the baked surface texture.
        let scene_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene_uniform_buffer"),
            contents: bytemuck::bytes_of(&SceneUniforms {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
                model: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let cube_texture = create_cube_texture(device, queue, CUBE_TEXTURE_SIZE);
        let cube_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("cube_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let cube_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("cube_bind_group_layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let cube_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("cube_bind_group"),
            layout: &cube_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: scene_uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&cube_texture),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&cube_sampler),
                },
            ],
        });

        let cube_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("cube_pipeline_layout"),
            bind_group_layouts: &[&cube_bind_group_layout],
            push_constant_ranges: &[],
        });

        let cube_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("cube_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::CUBE_SHADER.into()),
        });

        let cube_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("cube_pipeline"),
            layout: Some(&cube_layout),
            vertex: wgpu::VertexState {
                module: &cube_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3,
                        2 => Float32x2,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &cube_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let (cube_verts, cube_indices) = cube_mesh();
        let cube_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vertex_buffer"),
            contents: bytemuck::cast_slice(&cube_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let cube_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_index_buffer"),
            contents: bytemuck::cast_slice(&cube_indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let cube_index_count = cube_indices.len() as u32;

        let depth_texture = Self::create_depth_texture(device, width, height);
        tracing::debug!("render pipelines created");

        Self {
            starfield_pipeline,
            starfield_uniform_buffer,
            starfield_bind_group,
            cube_pipeline,
            scene_uniform_buffer,
            cube_bind_group,
            cube_vertex_buffer,
            cube_index_buffer,
            cube_index_count,
            depth_texture,
            surface_format,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Render one frame: starfield background, then the cube over it.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        frame: &FrameContext,
        field: &StarfieldConfig,
        camera: &OrthoCamera,
        rotation: CubeRotation,
    ) {
        queue.write_buffer(
            &self.starfield_uniform_buffer,
            0,
            bytemuck::bytes_of(&StarfieldUniforms {
                resolution: frame.resolution.to_array(),
                time: frame.elapsed,
                base_radius: field.base_radius,
                background: field.background,
                gamma: field.gamma,
                base_cell_width: field.base_cell_width,
                radius_falloff: field.radius_falloff,
                cell_falloff: field.cell_falloff,
                twinkle_speed: field.twinkle_speed,
                layer_count: field.layers,
                twinkle_layers: field.twinkle_layers,
                _pad: [0; 2],
            }),
        );

        let model = Mat4::from_scale_rotation_translation(
            Vec3::splat(CUBE_SCALE),
            Quat::from_euler(EulerRot::XYZ, rotation.pitch, rotation.yaw, 0.0),
            Vec3::new(0.0, CUBE_HEIGHT, 0.0),
        );
        queue.write_buffer(
            &self.scene_uniform_buffer,
            0,
            bytemuck::bytes_of(&SceneUniforms {
                view_proj: camera.view_projection().to_cols_array_2d(),
                model: model.to_cols_array_2d(),
            }),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("starfield_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            pass.set_pipeline(&self.starfield_pipeline);
            pass.set_bind_group(0, &self.starfield_bind_group, &[]);
            pass.draw(0..3, 0..1);
        }

        {
            // The cube pass keeps the starfield underneath it, so color
            // loads while depth clears.
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("cube_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.cube_pipeline);
            pass.set_bind_group(0, &self.cube_bind_group, &[]);
            pass.set_vertex_buffer(0, self.cube_vertex_buffer.slice(..));
            pass.set_index_buffer(self.cube_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..self.cube_index_count, 0, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}
