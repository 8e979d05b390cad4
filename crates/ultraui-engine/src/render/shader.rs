//! Vertex/fragment program compilation.
//!
//! Each stage is compiled into its own `wgpu::ShaderModule` and its
//! compilation messages are collected into a diagnostic log. Warnings are
//! logged; any error fails the build with [`ShaderError`]. The two modules are
//! then linked into a render pipeline.

use std::fmt;

/// Pipeline stage a diagnostic belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Compile failure with the backend's diagnostic log.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ShaderError {
    Compile { stage: ShaderStage, log: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile { stage, log } => {
                write!(f, "{stage} shader compilation failed:\n{log}")
            }
        }
    }
}

impl std::error::Error for ShaderError {}

/// Everything needed to build one program.
pub struct ProgramDesc<'a> {
    pub label: &'static str,
    pub vertex_source: &'a str,
    pub fragment_source: &'a str,
    pub vertex_buffers: &'a [wgpu::VertexBufferLayout<'a>],
    pub bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    pub format: wgpu::TextureFormat,
}

/// A linked vertex + fragment pipeline.
///
/// Entry points are `vs_main` in the vertex source and `fs_main` in the
/// fragment source. Topology is a triangle list with no culling.
pub struct ShaderProgram {
    pipeline: wgpu::RenderPipeline,
    format: wgpu::TextureFormat,
}

impl ShaderProgram {
    pub fn build(device: &wgpu::Device, desc: &ProgramDesc<'_>) -> Result<Self, ShaderError> {
        let vs = compile_stage(device, desc.label, ShaderStage::Vertex, desc.vertex_source)?;
        let fs = compile_stage(device, desc.label, ShaderStage::Fragment, desc.fragment_source)?;

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(desc.label),
            bind_group_layouts: desc.bind_group_layouts,
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(desc.label),
            layout: Some(&layout),

            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: desc.vertex_buffers,
            },

            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: desc.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("linked shader program '{}' for {:?}", desc.label, desc.format);

        Ok(Self {
            pipeline,
            format: desc.format,
        })
    }

    #[inline]
    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    /// Surface format the program was linked against.
    #[inline]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

fn compile_stage(
    device: &wgpu::Device,
    label: &'static str,
    stage: ShaderStage,
    source: &str,
) -> Result<wgpu::ShaderModule, ShaderError> {
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    let info = pollster::block_on(module.get_compilation_info());

    let mut errors = Vec::new();
    for msg in &info.messages {
        let line = format_message(msg);
        match msg.message_type {
            wgpu::CompilationMessageType::Error => errors.push(line),
            wgpu::CompilationMessageType::Warning => log::warn!("{label} ({stage}): {line}"),
            _ => log::debug!("{label} ({stage}): {line}"),
        }
    }

    if errors.is_empty() {
        Ok(module)
    } else {
        Err(ShaderError::Compile {
            stage,
            log: errors.join("\n"),
        })
    }
}

fn format_message(msg: &wgpu::CompilationMessage) -> String {
    match &msg.location {
        Some(loc) => format_diagnostic(loc.line_number, loc.line_position, &msg.message),
        None => msg.message.clone(),
    }
}

fn format_diagnostic(line: u32, column: u32, message: &str) -> String {
    format!("{line}:{column}: {message}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_carries_position() {
        assert_eq!(format_diagnostic(3, 14, "expected ';'"), "3:14: expected ';'");
    }

    #[test]
    fn compile_error_display_names_stage_and_log() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "1:1: unknown type".into(),
        };
        assert_eq!(
            err.to_string(),
            "fragment shader compilation failed:\n1:1: unknown type"
        );
    }

    #[test]
    fn stage_display() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
    }
}
