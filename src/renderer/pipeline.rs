use crate::{
    error::SkinviewError,
    gpu::{
        pipeline_helpers::{create_mesh_pipeline, mesh_layout_entries},
        render_context::RenderContext,
        shader_composer::{ShaderComposer, MESH_SHADER, MESH_SHADER_PATH},
    },
    mesh::Topology,
};

/// The mesh shader compiled once per primitive topology, sharing one bind
/// group layout.
pub struct MeshPipelines {
    bind_group_layout: wgpu::BindGroupLayout,
    triangles: wgpu::RenderPipeline,
    lines: wgpu::RenderPipeline,
    points: wgpu::RenderPipeline,
}

impl MeshPipelines {
    /// Compose the mesh shader and build the pipelines for `format`.
    ///
    /// # Errors
    ///
    /// Returns [`SkinviewError::Shader`] if the shader fails to compose.
    pub fn new(
        context: &RenderContext,
        composer: &mut ShaderComposer,
        format: wgpu::TextureFormat,
    ) -> Result<Self, SkinviewError> {
        let device = &context.device;
        let shader = composer.compose(
            device,
            "Mesh Shader",
            MESH_SHADER,
            MESH_SHADER_PATH,
        )?;

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Mesh Bind Group Layout"),
                entries: &mesh_layout_entries(),
            });
        let layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Mesh Pipeline Layout"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            });

        let build = |label: &str, topology: Topology| {
            create_mesh_pipeline(
                device,
                label,
                &shader,
                &layout,
                format,
                topology.to_wgpu(),
            )
        };
        let triangles = build("Mesh Triangles", Topology::Triangles);
        let lines = build("Mesh Lines", Topology::Lines);
        let points = build("Mesh Points", Topology::Points);
        log::debug!("mesh pipelines created for {format:?}");

        Ok(Self {
            bind_group_layout,
            triangles,
            lines,
            points,
        })
    }

    /// Pipeline drawing `topology`.
    #[must_use]
    pub fn get(&self, topology: Topology) -> &wgpu::RenderPipeline {
        match topology {
            Topology::Triangles => &self.triangles,
            Topology::Lines => &self.lines,
            Topology::Points => &self.points,
        }
    }

    /// Layout of the per-draw bind group (bindings 1-7 of group 0).
    #[must_use]
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }
}
