//! One GPU buffer per std140 uniform block.

use std::marker::PhantomData;

use crate::{error::SkinviewError, uniforms::UniformBlock};

/// A uniform buffer sized for block `T`, written through encase.
pub struct UniformBuffer<T> {
    buffer: wgpu::Buffer,
    _marker: PhantomData<T>,
}

impl<T: UniformBlock> UniformBuffer<T> {
    /// Allocate the buffer and upload `initial`.
    ///
    /// # Errors
    ///
    /// Returns [`SkinviewError::UniformLayout`] if the value cannot be
    /// encoded.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        initial: &T,
    ) -> Result<Self, SkinviewError> {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(T::LABEL),
            size: T::byte_size(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let uniform = Self {
            buffer,
            _marker: PhantomData,
        };
        uniform.write(queue, initial)?;
        Ok(uniform)
    }

    /// Encode `value` and queue it for upload. The write lands before the
    /// next submitted command buffer executes.
    ///
    /// # Errors
    ///
    /// Returns [`SkinviewError::UniformLayout`] if the value cannot be
    /// encoded.
    pub fn write(
        &self,
        queue: &wgpu::Queue,
        value: &T,
    ) -> Result<(), SkinviewError> {
        let bytes = value.to_std140()?;
        queue.write_buffer(&self.buffer, 0, &bytes);
        Ok(())
    }

    /// The underlying GPU buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Bind group entry exposing this buffer at the block's binding.
    #[must_use]
    pub fn entry(&self) -> wgpu::BindGroupEntry<'_> {
        wgpu::BindGroupEntry {
            binding: T::BINDING,
            resource: self.buffer.as_entire_binding(),
        }
    }
}
