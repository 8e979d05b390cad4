//! Presentation of a software framebuffer.
//!
//! The framebuffer's packed `0x00RRGGBB` words are uploaded unchanged: on a
//! little-endian host their byte order is B, G, R, X, which is exactly
//! `Bgra8UnormSrgb`. The texture is drawn with one full-surface triangle and
//! nearest sampling, so each framebuffer pixel lands on one surface pixel when
//! the sizes match.

use crate::raster::Framebuffer;
use crate::render::shader::{ProgramDesc, ShaderProgram};
use crate::render::{RenderCtx, RenderTarget};

const PRESENT_WGSL: &str = include_str!("shaders/present.wgsl");

const FRAME_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Bgra8UnormSrgb;

/// Size-matched texture + bind group for the current framebuffer extent.
struct FrameTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
}

/// Uploads a [`Framebuffer`] and draws it over the whole render target.
#[derive(Default)]
pub struct FramebufferPresenter {
    program: Option<ShaderProgram>,
    program_failed: Option<wgpu::TextureFormat>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    sampler: Option<wgpu::Sampler>,
    frame: Option<FrameTexture>,
}

impl FramebufferPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads `fb` and draws it. The texture is recreated whenever the
    /// framebuffer extent changes.
    pub fn present(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, fb: &Framebuffer) {
        self.ensure_layout(ctx);
        self.ensure_program(ctx);
        self.ensure_frame_texture(ctx, fb.width(), fb.height());

        let Some(program) = self.program.as_ref() else { return };
        let Some(frame) = self.frame.as_ref() else { return };

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &frame.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(fb.pixels()),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * frame.width),
                rows_per_image: Some(frame.height),
            },
            wgpu::Extent3d {
                width: frame.width,
                height: frame.height,
                depth_or_array_layers: 1,
            },
        );

        let mut rpass = target.load_pass("ultraui present pass");
        rpass.set_pipeline(program.pipeline());
        rpass.set_bind_group(0, &frame.bind_group, &[]);
        rpass.draw(0..3, 0..1);
    }

    fn ensure_layout(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group_layout.is_some() && self.sampler.is_some() {
            return;
        }

        self.bind_group_layout = Some(ctx.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("ultraui present bgl"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            },
        ));

        self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("ultraui present sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));

        // Layout changed: everything bound against it is stale.
        self.program = None;
        self.frame = None;
    }

    fn ensure_program(&mut self, ctx: &RenderCtx<'_>) {
        if let Some(p) = &self.program {
            if p.format() == ctx.surface_format {
                return;
            }
        }
        if self.program_failed == Some(ctx.surface_format) {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let desc = ProgramDesc {
            label: "ultraui present program",
            vertex_source: PRESENT_WGSL,
            fragment_source: PRESENT_WGSL,
            vertex_buffers: &[],
            bind_group_layouts: &[bgl],
            format: ctx.surface_format,
        };

        match ShaderProgram::build(ctx.device, &desc) {
            Ok(p) => {
                self.program = Some(p);
                self.program_failed = None;
            }
            Err(e) => {
                log::error!("{e}");
                self.program = None;
                self.program_failed = Some(ctx.surface_format);
            }
        }
    }

    fn ensure_frame_texture(&mut self, ctx: &RenderCtx<'_>, width: u32, height: u32) {
        if let Some(f) = &self.frame {
            if f.width == width && f.height == height {
                return;
            }
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        let Some(sampler) = self.sampler.as_ref() else { return };

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("ultraui framebuffer texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: FRAME_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ultraui present bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        log::debug!("framebuffer texture resized to {width}x{height}");

        self.frame = Some(FrameTexture {
            texture,
            bind_group,
            width,
            height,
        });
    }
}
