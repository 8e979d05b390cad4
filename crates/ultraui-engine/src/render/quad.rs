use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Vec2;
use crate::render::shader::{ProgramDesc, ShaderProgram};
use crate::render::{RenderCtx, RenderTarget};

const QUAD_VS: &str = include_str!("shaders/quad_vs.wgsl");
const QUAD_FS: &str = include_str!("shaders/quad_fs.wgsl");

/// Two triangles over corners listed in winding order.
const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct NdcVertex {
    pos: [f32; 2],
}

impl NdcVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<NdcVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Lazily-built program state.
enum ProgramSlot {
    Empty,
    Ready(ShaderProgram),
    /// Compilation failed for this surface format; drawing is skipped.
    Failed(wgpu::TextureFormat),
}

/// Immediate-mode filled quad renderer.
///
/// Vertices are given in normalized device coordinates and re-uploaded on
/// every [`draw`](Self::draw); the vertex and index buffers themselves are
/// created once and retained.
///
/// If the program fails to compile, the diagnostic is logged once and every
/// subsequent draw is a no-op.
pub struct QuadRenderer {
    program: ProgramSlot,
    vbo: Option<wgpu::Buffer>,
    ibo: Option<wgpu::Buffer>,
}

impl Default for QuadRenderer {
    fn default() -> Self {
        Self {
            program: ProgramSlot::Empty,
            vbo: None,
            ibo: None,
        }
    }
}

impl QuadRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills the quad whose corners are `corners` (NDC, winding order).
    pub fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, corners: [Vec2; 4]) {
        self.ensure_program(ctx);
        self.ensure_buffers(ctx);

        let ProgramSlot::Ready(program) = &self.program else { return };
        let Some(vbo) = self.vbo.as_ref() else { return };
        let Some(ibo) = self.ibo.as_ref() else { return };

        let vertices = corners.map(|c| NdcVertex { pos: [c.x, c.y] });
        ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&vertices));

        let mut rpass = target.load_pass("ultraui quad pass");
        rpass.set_pipeline(program.pipeline());
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }

    fn ensure_program(&mut self, ctx: &RenderCtx<'_>) {
        match &self.program {
            ProgramSlot::Ready(p) if p.format() == ctx.surface_format => return,
            ProgramSlot::Failed(f) if *f == ctx.surface_format => return,
            _ => {}
        }

        let layouts = [NdcVertex::layout()];
        let desc = ProgramDesc {
            label: "ultraui quad program",
            vertex_source: QUAD_VS,
            fragment_source: QUAD_FS,
            vertex_buffers: &layouts,
            bind_group_layouts: &[],
            format: ctx.surface_format,
        };

        self.program = match ShaderProgram::build(ctx.device, &desc) {
            Ok(p) => ProgramSlot::Ready(p),
            Err(e) => {
                log::error!("{e}");
                ProgramSlot::Failed(ctx.surface_format)
            }
        };
    }

    fn ensure_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.vbo.is_some() && self.ibo.is_some() {
            return;
        }

        self.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ultraui quad vbo"),
            size: (4 * std::mem::size_of::<NdcVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));

        self.ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ultraui quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }
}
