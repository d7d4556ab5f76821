//! Aspect-fit blit of the latest stream frame onto the window surface.
//!
//! The frame lands in an `Rgba8UnormSrgb` texture (recreated whenever the
//! source resolution changes) and is drawn with a fullscreen-triangle pass.
//! A scale/offset uniform letterboxes or pillarboxes the image; everything
//! outside it is black, as is the whole surface while detached.

use bytemuck::{Pod, Zeroable};
use wgpu::{
    BindGroup, BindGroupDescriptor, BindGroupEntry, BindGroupLayout, BindGroupLayoutDescriptor,
    BindGroupLayoutEntry, BindingResource, BindingType, BufferBindingType, ColorTargetState,
    CommandEncoder, Device, FragmentState, PipelineCompilationOptions, PipelineLayoutDescriptor,
    PrimitiveState, Queue, RenderPipeline, SamplerBindingType, ShaderStages, TextureFormat,
    TextureSampleType, TextureView, TextureViewDimension, VertexState,
};

use crate::stream::VideoFrame;

// Fullscreen triangle via the vertex_index trick: no vertex buffer needed.
const VIDEO_BLIT_SHADER: &str = r#"
struct VertexOutput {
    @builtin(position) position: vec4f,
    @location(0) uv: vec2f,
}

@vertex
fn vs_main(@builtin(vertex_index) vi: u32) -> VertexOutput {
    let x = f32(i32(vi & 1u) * 4) - 1.0;
    let y = f32(i32(vi & 2u) * 2) - 1.0;
    var out: VertexOutput;
    out.position = vec4f(x, y, 0.0, 1.0);
    // Map clip coords [-1,1] to UVs [0,1], flip Y for texture sampling
    out.uv = vec2f((x + 1.0) * 0.5, (1.0 - y) * 0.5);
    return out;
}

struct FitUniforms {
    scale: vec2f,
    offset: vec2f,
}

@group(0) @binding(0) var frame_tex: texture_2d<f32>;
@group(0) @binding(1) var frame_samp: sampler;
@group(0) @binding(2) var<uniform> fit: FitUniforms;

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4f {
    let uv = (in.uv - fit.offset) / fit.scale;
    let color = textureSampleLevel(frame_tex, frame_samp, clamp(uv, vec2f(0.0), vec2f(1.0)), 0.0);
    let inside = all(uv >= vec2f(0.0)) && all(uv <= vec2f(1.0));
    return select(vec4f(0.0, 0.0, 0.0, 1.0), vec4f(color.rgb, 1.0), inside);
}
"#;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct FitUniforms {
    scale: [f32; 2],
    offset: [f32; 2],
}

/// Letterbox/pillarbox transform fitting media into a viewport.
/// Returns (scale, offset) in UV space: the image spans
/// `[offset, offset + scale]` on each axis.
pub fn fit_transform(
    media_w: u32,
    media_h: u32,
    viewport_w: u32,
    viewport_h: u32,
) -> ([f32; 2], [f32; 2]) {
    let media_aspect = media_w as f32 / media_h.max(1) as f32;
    let viewport_aspect = viewport_w as f32 / viewport_h.max(1) as f32;

    let (scale_x, scale_y) = if media_aspect > viewport_aspect {
        // Media is wider — fit width, letterbox top/bottom
        (1.0, viewport_aspect / media_aspect)
    } else {
        // Media is taller — fit height, pillarbox left/right
        (media_aspect / viewport_aspect, 1.0)
    };

    let offset_x = (1.0 - scale_x) * 0.5;
    let offset_y = (1.0 - scale_y) * 0.5;

    ([scale_x, scale_y], [offset_x, offset_y])
}

struct FrameTexture {
    texture: wgpu::Texture,
    bind_group: BindGroup,
    width: u32,
    height: u32,
}

pub struct VideoSurface {
    pipeline: RenderPipeline,
    bind_group_layout: BindGroupLayout,
    sampler: wgpu::Sampler,
    uniform_buffer: wgpu::Buffer,
    frame: Option<FrameTexture>,
    attached: bool,
    viewport: (u32, u32),
}

impl VideoSurface {
    pub fn new(device: &Device, surface_format: TextureFormat, width: u32, height: u32) -> Self {
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("video-frame-sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            ..Default::default()
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("video-fit-uniforms"),
            size: std::mem::size_of::<FitUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Bind group layout: texture(0), sampler(1), uniform(2)
        let bind_group_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("video-blit-bgl"),
            entries: &[
                BindGroupLayoutEntry {
                    binding: 0,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Texture {
                        sample_type: TextureSampleType::Float { filterable: true },
                        view_dimension: TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                BindGroupLayoutEntry {
                    binding: 1,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Sampler(SamplerBindingType::Filtering),
                    count: None,
                },
                BindGroupLayoutEntry {
                    binding: 2,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Buffer {
                        ty: BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: std::num::NonZeroU64::new(
                            std::mem::size_of::<FitUniforms>() as u64,
                        ),
                    },
                    count: None,
                },
            ],
        });

        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("video-blit"),
            source: wgpu::ShaderSource::Wgsl(VIDEO_BLIT_SHADER.into()),
        });
        let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("video-blit-layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("video-blit-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: VertexState {
                module: &shader_module,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: PipelineCompilationOptions::default(),
            },
            fragment: Some(FragmentState {
                module: &shader_module,
                entry_point: Some("fs_main"),
                targets: &[Some(ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: PipelineCompilationOptions::default(),
            }),
            primitive: PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            bind_group_layout,
            sampler,
            uniform_buffer,
            frame: None,
            attached: false,
            viewport: (width.max(1), height.max(1)),
        }
    }

    /// Attach or detach the display surface. Detaching drops the last frame
    /// so a later session starts from black, not a stale image.
    pub fn set_attached(&mut self, attached: bool) {
        if self.attached && !attached {
            self.frame = None;
        }
        self.attached = attached;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn resize(&mut self, queue: &Queue, width: u32, height: u32) {
        self.viewport = (width.max(1), height.max(1));
        if let Some(ref frame) = self.frame {
            self.write_fit_uniforms(queue, frame.width, frame.height);
        }
    }

    /// Upload a decoded frame, recreating the texture on size change.
    pub fn upload_frame(&mut self, device: &Device, queue: &Queue, frame: &VideoFrame) {
        if !self.attached {
            return;
        }

        let needs_texture = self
            .frame
            .as_ref()
            .is_none_or(|t| t.width != frame.width || t.height != frame.height);
        if needs_texture {
            self.frame = Some(self.create_frame_texture(device, frame.width, frame.height));
            self.write_fit_uniforms(queue, frame.width, frame.height);
            log::debug!("Frame texture created: {}x{}", frame.width, frame.height);
        }

        let Some(target) = self.frame.as_ref() else {
            return;
        };
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &target.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &frame.data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(frame.width * 4),
                rows_per_image: Some(frame.height),
            },
            wgpu::Extent3d {
                width: frame.width,
                height: frame.height,
                depth_or_array_layers: 1,
            },
        );
    }

    /// Clear to black and, when attached with a frame, blit it aspect-fit.
    pub fn render(&self, encoder: &mut CommandEncoder, view: &TextureView) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("video-pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if let Some(ref frame) = self.frame {
            if self.attached {
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &frame.bind_group, &[]);
                pass.draw(0..3, 0..1);
            }
        }
    }

    fn create_frame_texture(&self, device: &Device, width: u32, height: u32) -> FrameTexture {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("video-frame"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some("video-blit-bg"),
            layout: &self.bind_group_layout,
            entries: &[
                BindGroupEntry {
                    binding: 0,
                    resource: BindingResource::TextureView(&view),
                },
                BindGroupEntry {
                    binding: 1,
                    resource: BindingResource::Sampler(&self.sampler),
                },
                BindGroupEntry {
                    binding: 2,
                    resource: self.uniform_buffer.as_entire_binding(),
                },
            ],
        });
        FrameTexture {
            texture,
            bind_group,
            width,
            height,
        }
    }

    fn write_fit_uniforms(&self, queue: &Queue, media_w: u32, media_h: u32) {
        let (scale, offset) = fit_transform(media_w, media_h, self.viewport.0, self.viewport.1);
        let uniforms = FitUniforms { scale, offset };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_fit_is_identity() {
        let (scale, offset) = fit_transform(1280, 720, 1280, 720);
        assert_eq!(scale, [1.0, 1.0]);
        assert_eq!(offset, [0.0, 0.0]);
    }

    #[test]
    fn wide_media_letterboxes() {
        // 2:1 media in a 1:1 viewport fills width, half the height
        let (scale, offset) = fit_transform(200, 100, 100, 100);
        assert_eq!(scale, [1.0, 0.5]);
        assert_eq!(offset, [0.0, 0.25]);
    }

    #[test]
    fn tall_media_pillarboxes() {
        // 1:2 media in a 1:1 viewport fills height, half the width
        let (scale, offset) = fit_transform(100, 200, 100, 100);
        assert_eq!(scale, [0.5, 1.0]);
        assert_eq!(offset, [0.25, 0.0]);
    }

    #[test]
    fn degenerate_dimensions_do_not_divide_by_zero() {
        let (scale, _) = fit_transform(100, 0, 0, 100);
        assert!(scale[0].is_finite() && scale[1].is_finite());
    }

    #[test]
    fn centered_on_both_axes() {
        let (scale, offset) = fit_transform(1920, 1080, 500, 500);
        assert!((offset[0] - (1.0 - scale[0]) * 0.5).abs() < 1e-6);
        assert!((offset[1] - (1.0 - scale[1]) * 0.5).abs() < 1e-6);
    }
}
