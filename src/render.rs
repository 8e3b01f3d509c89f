use bytemuck::{Pod, Zeroable};
use std::num::NonZeroU64;
use wgpu::util::DeviceExt;

use crate::board::Board;
use crate::geometry::{GridGeometry, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channels as floats. Color channels are linearized for sRGB targets so
    /// the window shows the same shade as the 8-bit value.
    pub fn to_f32(self, srgb_target: bool) -> [f32; 4] {
        let channel = |c: u8| {
            let c = c as f32 / 255.0;
            if !srgb_target {
                c
            } else if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        [channel(self.r), channel(self.g), channel(self.b), self.a as f32 / 255.0]
    }
}

pub const BACKGROUND: Color = Color::rgba(255, 255, 255, 255);
pub const ALIVE: Color = Color::rgba(20, 20, 20, 255);
pub const DEAD: Color = Color::rgba(255, 255, 255, 255);
pub const HOVER: Color = Color::rgba(150, 150, 150, 15);

/// Drawing surface the board is painted onto
pub trait Canvas {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
}

/// Paint every cell, overlaying the hover color on the cell under the cursor
/// within the same pass.
pub fn draw_board(
    canvas: &mut impl Canvas,
    board: &Board,
    geometry: &GridGeometry,
    cursor: Option<(f32, f32)>,
) {
    canvas.clear(BACKGROUND);
    if geometry.is_empty() {
        return;
    }

    let columns = board.columns();
    for (i, cell) in board.cells().iter().enumerate() {
        let rect = geometry.cell_rect(i / columns, i % columns);
        canvas.fill_rect(rect, if cell.alive { ALIVE } else { DEAD });

        if let Some((x, y)) = cursor {
            if rect.contains(x, y) {
                canvas.fill_rect(rect, HOVER);
            }
        }
    }
}

// Per-instance vertex data
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct RectInstance {
    pub origin: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 4],
}

impl RectInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2, 2 => Float32x4];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RectInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

// Uniforms specific to rendering
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct ViewportParams {
    pub size: [f32; 2],
    pub _padding: [f32; 2], // Ensure 16-byte alignment
}

/// Canvas that records a frame as GPU instances.
#[derive(Debug, Default)]
pub struct RectBatch {
    srgb_target: bool,
    clear_color: [f32; 4],
    instances: Vec<RectInstance>,
}

impl RectBatch {
    pub fn new(srgb_target: bool) -> Self {
        Self {
            srgb_target,
            clear_color: BACKGROUND.to_f32(srgb_target),
            instances: Vec::new(),
        }
    }

    pub fn instances(&self) -> &[RectInstance] {
        &self.instances
    }

    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.clear_color;
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        }
    }
}

impl Canvas for RectBatch {
    fn clear(&mut self, color: Color) {
        self.clear_color = color.to_f32(self.srgb_target);
        self.instances.clear();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.instances.push(RectInstance {
            origin: [rect.x, rect.y],
            size: [rect.w, rect.h],
            color: color.to_f32(self.srgb_target),
        });
    }
}

pub fn create_render_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Render Bind Group Layout"),
        entries: &[
            // ViewportParams Uniform (Binding 0)
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<ViewportParams>() as u64),
                },
                count: None,
            },
        ],
    })
}

/// Instanced rectangle pipeline: one draw call per frame for the whole board.
pub struct RectRenderer {
    pipeline: wgpu::RenderPipeline,
    viewport_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    capacity: usize,
    instance_count: u32,
}

impl RectRenderer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, capacity: usize) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Rect Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../render.wgsl").into()),
        });

        let viewport_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Viewport Parameters"),
            contents: bytemuck::bytes_of(&ViewportParams {
                size: [1.0, 1.0],
                _padding: [0.0; 2],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = create_render_bind_group_layout(device);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Render Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[RectInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    // The hover overlay is translucent
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let capacity = capacity.max(1);
        Self {
            pipeline,
            viewport_buffer,
            bind_group,
            instance_buffer: Self::create_instance_buffer(device, capacity),
            capacity,
            instance_count: 0,
        }
    }

    fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Rect Instance Buffer"),
            size: (capacity * std::mem::size_of::<RectInstance>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    pub fn resize(&self, queue: &wgpu::Queue, width: u32, height: u32) {
        queue.write_buffer(&self.viewport_buffer, 0, bytemuck::bytes_of(&ViewportParams {
            size: [width.max(1) as f32, height.max(1) as f32],
            _padding: [0.0; 2],
        }));
    }

    /// Upload the batch, growing the instance buffer when it no longer fits.
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, batch: &RectBatch) {
        let instances = batch.instances();
        if instances.len() > self.capacity {
            self.capacity = instances.len().next_power_of_two();
            self.instance_buffer = Self::create_instance_buffer(device, self.capacity);
            log::debug!("rect instance buffer grown to {} instances", self.capacity);
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(instances));
        }
        self.instance_count = instances.len() as u32;
    }

    pub fn render<'rp>(&'rp self, render_pass: &mut wgpu::RenderPass<'rp>) {
        if self.instance_count == 0 {
            return;
        }
        let bytes = self.instance_count as u64 * std::mem::size_of::<RectInstance>() as u64;
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.instance_buffer.slice(..bytes));
        render_pass.draw(0..6, 0..self.instance_count);
    }
}
