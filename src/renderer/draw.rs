use super::pipeline::MeshPipelines;
use crate::{
    error::SkinviewError,
    gpu::{
        dynamic_buffer::TypedBuffer,
        render_context::RenderContext,
        shader_composer::ShaderComposer,
        texture::{GpuTexture, RenderTarget},
        uniform_buffer::UniformBuffer,
    },
    mesh::{Mesh, Topology, Vertex},
    texture::TextureImage,
    uniforms::{
        DrawUniforms, JointMatrices, Lighting, Material, SettingsBlock,
        Transforms, SAMPLER_BINDING, TEXTURE_BINDING,
    },
};

/// Vertex and index buffers of an uploaded [`Mesh`].
pub struct GpuMesh {
    name: String,
    vertices: TypedBuffer<Vertex>,
    indices: TypedBuffer<u32>,
    topology: Topology,
    skinned: bool,
}

impl GpuMesh {
    /// Upload `mesh`.
    #[must_use]
    pub fn new(device: &wgpu::Device, mesh: &Mesh) -> Self {
        Self {
            name: mesh.name.clone(),
            vertices: TypedBuffer::new_with_data(
                device,
                &format!("{} Vertices", mesh.name),
                &mesh.vertices,
                wgpu::BufferUsages::VERTEX,
            ),
            indices: TypedBuffer::new_with_data(
                device,
                &format!("{} Indices", mesh.name),
                &mesh.indices,
                wgpu::BufferUsages::INDEX,
            ),
            topology: mesh.topology,
            skinned: mesh.is_skinned(),
        }
    }

    /// Replace the uploaded data with `mesh`, growing the buffers if needed.
    pub fn update(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        mesh: &Mesh,
    ) {
        let _ = self.vertices.write(device, queue, &mesh.vertices);
        let _ = self.indices.write(device, queue, &mesh.indices);
        self.topology = mesh.topology;
        self.skinned = mesh.is_skinned();
    }

    /// Debug name of the source mesh.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Primitive topology.
    #[must_use]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Number of indices drawn.
    #[must_use]
    pub fn index_count(&self) -> u32 {
        self.indices.count() as u32
    }

    /// True if the source mesh carried joint weights.
    #[must_use]
    pub fn is_skinned(&self) -> bool {
        self.skinned
    }
}

/// Per-draw uniform buffers and the bind group tying them to a texture.
pub struct DrawState {
    transforms: UniformBuffer<Transforms>,
    joints: UniformBuffer<JointMatrices>,
    settings: UniformBuffer<SettingsBlock>,
    material: UniformBuffer<Material>,
    lighting: UniformBuffer<Lighting>,
    bind_group: wgpu::BindGroup,
}

impl DrawState {
    /// Allocate the buffers, upload `uniforms` and bind `texture`.
    ///
    /// # Errors
    ///
    /// Returns [`SkinviewError::UniformLayout`] if a block fails to encode.
    pub fn new(
        context: &RenderContext,
        pipelines: &MeshPipelines,
        texture: &GpuTexture,
        uniforms: &DrawUniforms,
    ) -> Result<Self, SkinviewError> {
        let (device, queue) = (&context.device, &context.queue);
        let transforms =
            UniformBuffer::new(device, queue, &uniforms.transforms)?;
        let joints = UniformBuffer::new(device, queue, &uniforms.joints)?;
        let settings =
            UniformBuffer::new(device, queue, &uniforms.settings.block())?;
        let material = UniformBuffer::new(device, queue, &uniforms.material)?;
        let lighting = UniformBuffer::new(device, queue, &uniforms.lighting)?;

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Mesh Bind Group"),
            layout: pipelines.bind_group_layout(),
            entries: &[
                transforms.entry(),
                joints.entry(),
                settings.entry(),
                material.entry(),
                lighting.entry(),
                wgpu::BindGroupEntry {
                    binding: TEXTURE_BINDING,
                    resource: wgpu::BindingResource::TextureView(
                        &texture.view,
                    ),
                },
                wgpu::BindGroupEntry {
                    binding: SAMPLER_BINDING,
                    resource: wgpu::BindingResource::Sampler(
                        &texture.sampler,
                    ),
                },
            ],
        });

        Ok(Self {
            transforms,
            joints,
            settings,
            material,
            lighting,
            bind_group,
        })
    }

    /// Queue every block of `uniforms` for upload.
    ///
    /// # Errors
    ///
    /// Returns [`SkinviewError::UniformLayout`] if a block fails to encode.
    pub fn write(
        &self,
        queue: &wgpu::Queue,
        uniforms: &DrawUniforms,
    ) -> Result<(), SkinviewError> {
        self.transforms.write(queue, &uniforms.transforms)?;
        self.joints.write(queue, &uniforms.joints)?;
        self.settings.write(queue, &uniforms.settings.block())?;
        self.material.write(queue, &uniforms.material)?;
        self.lighting.write(queue, &uniforms.lighting)
    }

    /// Bind group for group 0.
    #[must_use]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// One draw of a frame.
pub struct DrawCall<'a> {
    /// Geometry to draw.
    pub mesh: &'a GpuMesh,
    /// Buffers this draw reads; must not be shared with another draw of
    /// the same frame.
    pub state: &'a DrawState,
    /// Uniform values written into `state` before the pass.
    pub uniforms: &'a DrawUniforms,
}

/// Records mesh draws into color + depth targets.
pub struct Renderer {
    pipelines: MeshPipelines,
    white: GpuTexture,
    clear_color: wgpu::Color,
}

impl Renderer {
    /// Compose the mesh shader and build pipelines for `format`.
    ///
    /// # Errors
    ///
    /// Returns [`SkinviewError::Shader`] if shader composition fails.
    pub fn new(
        context: &RenderContext,
        format: wgpu::TextureFormat,
    ) -> Result<Self, SkinviewError> {
        let mut composer = ShaderComposer::new()?;
        let pipelines = MeshPipelines::new(context, &mut composer, format)?;
        let white = GpuTexture::from_image(
            &context.device,
            &context.queue,
            "White Texture",
            &TextureImage::white(),
        );
        Ok(Self {
            pipelines,
            white,
            clear_color: wgpu::Color::BLACK,
        })
    }

    /// The pipelines and bind group layout.
    #[must_use]
    pub fn pipelines(&self) -> &MeshPipelines {
        &self.pipelines
    }

    /// Set the color targets are cleared to.
    pub fn set_clear_color(&mut self, rgba: [f32; 4]) {
        let [r, g, b, a] = rgba.map(f64::from);
        self.clear_color = wgpu::Color { r, g, b, a };
    }

    /// Upload a mesh.
    #[must_use]
    pub fn upload_mesh(
        &self,
        context: &RenderContext,
        mesh: &Mesh,
    ) -> GpuMesh {
        log::debug!(
            "uploading mesh '{}' ({} vertices, {} indices)",
            mesh.name,
            mesh.vertex_count(),
            mesh.index_count()
        );
        GpuMesh::new(&context.device, mesh)
    }

    /// Upload a texture image.
    #[must_use]
    pub fn upload_texture(
        &self,
        context: &RenderContext,
        label: &str,
        image: &TextureImage,
    ) -> GpuTexture {
        GpuTexture::from_image(&context.device, &context.queue, label, image)
    }

    /// Per-draw state bound to `texture`, or to a 1x1 white texture when the
    /// material has none.
    ///
    /// # Errors
    ///
    /// Returns [`SkinviewError::UniformLayout`] if a block fails to encode.
    pub fn create_draw_state(
        &self,
        context: &RenderContext,
        texture: Option<&GpuTexture>,
        uniforms: &DrawUniforms,
    ) -> Result<DrawState, SkinviewError> {
        DrawState::new(
            context,
            &self.pipelines,
            texture.unwrap_or(&self.white),
            uniforms,
        )
    }

    /// Write every draw's uniforms, then record all draws into one render
    /// pass that clears `color_view` and `depth_view`, and submit.
    ///
    /// # Errors
    ///
    /// Returns [`SkinviewError::UniformLayout`] if a block fails to encode.
    pub fn render(
        &self,
        context: &RenderContext,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        draws: &[DrawCall<'_>],
    ) -> Result<(), SkinviewError> {
        for (i, draw) in draws.iter().enumerate() {
            if draws[..i].iter().any(|d| std::ptr::eq(d.state, draw.state)) {
                log::warn!(
                    "draw {i} ('{}') reuses a DrawState; earlier draws will \
                     see its uniforms",
                    draw.mesh.name()
                );
            }
            draw.state.write(&context.queue, draw.uniforms)?;
        }

        let mut encoder = context.create_encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Mesh Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: color_view,
                            resolve_target: None,
                            depth_slice: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(self.clear_color),
                                store: wgpu::StoreOp::Store,
                            },
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: depth_view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });

            for draw in draws {
                let count = draw.mesh.index_count();
                if count == 0 {
                    continue;
                }
                pass.set_pipeline(self.pipelines.get(draw.mesh.topology()));
                pass.set_bind_group(0, draw.state.bind_group(), &[]);
                pass.set_vertex_buffer(0, draw.mesh.vertices.slice());
                pass.set_index_buffer(
                    draw.mesh.indices.slice(),
                    wgpu::IndexFormat::Uint32,
                );
                pass.draw_indexed(0..count, 0, 0..1);
            }
        }
        context.submit(encoder);
        Ok(())
    }

    /// [`render`](Self::render) into an off-screen target.
    ///
    /// # Errors
    ///
    /// Returns [`SkinviewError::UniformLayout`] if a block fails to encode.
    pub fn render_to_target(
        &self,
        context: &RenderContext,
        target: &RenderTarget,
        draws: &[DrawCall<'_>],
    ) -> Result<(), SkinviewError> {
        self.render(context, &target.view, &target.depth_view, draws)
    }
}
