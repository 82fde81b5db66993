//! Render targets, the depth buffer, sampled textures and pixel read-back.

use wgpu::util::DeviceExt;

use crate::{
    error::SkinviewError,
    texture::{SamplerDesc, TextureImage},
};

/// Depth buffer format shared by every mesh pipeline.
pub const DEPTH_FORMAT: wgpu::TextureFormat =
    wgpu::TextureFormat::Depth32Float;

/// Row pitch of a texture-to-buffer copy of `width` RGBA8 texels, padded to
/// wgpu's 256-byte alignment.
#[must_use]
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * 4;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// An off-screen color target with a matching depth buffer.
///
/// The color texture is created with `RENDER_ATTACHMENT | TEXTURE_BINDING
/// | COPY_SRC` so it can be read back after rendering.
pub struct RenderTarget {
    /// The color texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view of the color texture.
    pub view: wgpu::TextureView,
    /// View of the depth buffer.
    pub depth_view: wgpu::TextureView,
    width: u32,
    height: u32,
    format: wgpu::TextureFormat,
}

impl RenderTarget {
    /// Create a color + depth target with the given dimensions and color
    /// format.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Render Target"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let depth = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Target"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let depth_view =
            depth.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            depth_view,
            width,
            height,
            format,
        }
    }

    /// Width and height in pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Color format.
    #[must_use]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Copy the color texture back to the host as tightly packed RGBA8 rows,
    /// top row first. Blocks until the GPU finishes.
    ///
    /// # Errors
    ///
    /// Returns [`SkinviewError::Readback`] if the target is not a 4-byte
    /// format or the buffer cannot be mapped.
    pub fn read_pixels(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> Result<Vec<u8>, SkinviewError> {
        if self.format.block_copy_size(None) != Some(4) {
            return Err(SkinviewError::Readback(format!(
                "unsupported read-back format {:?}",
                self.format
            )));
        }
        let padded = padded_bytes_per_row(self.width);
        let staging = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Readback Buffer"),
            size: u64::from(padded) * u64::from(self.height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder =
            device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Readback Encoder"),
            });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &staging,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
        let _ = queue.submit(std::iter::once(encoder.finish()));

        let buffer_slice = staging.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        let _ = device
            .poll(wgpu::PollType::Wait)
            .map_err(|e| SkinviewError::Readback(e.to_string()))?;
        receiver
            .recv()
            .map_err(|e| SkinviewError::Readback(e.to_string()))?
            .map_err(|e| SkinviewError::Readback(e.to_string()))?;

        let row_bytes = (self.width * 4) as usize;
        let mut pixels = Vec::with_capacity(row_bytes * self.height as usize);
        {
            let data = buffer_slice.get_mapped_range();
            for row in data.chunks(padded as usize) {
                pixels.extend_from_slice(&row[..row_bytes]);
            }
        }
        staging.unmap();
        Ok(pixels)
    }
}

/// A sampled texture with its view and sampler, ready to bind as
/// `my_texture` / `my_sampler`.
pub struct GpuTexture {
    /// The GPU texture.
    pub texture: wgpu::Texture,
    /// Full-texture view.
    pub view: wgpu::TextureView,
    /// Sampler built from the image's sampler state.
    pub sampler: wgpu::Sampler,
}

impl GpuTexture {
    /// Upload an RGBA8 sRGB image.
    #[must_use]
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        image: &TextureImage,
    ) -> Self {
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width: image.width(),
                    height: image.height(),
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING
                    | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            image.pixels(),
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = create_sampler(device, label, &image.sampler);
        Self {
            texture,
            view,
            sampler,
        }
    }
}

/// Sampler matching the CPU sampling rules of [`TextureImage::sample`].
#[must_use]
pub fn create_sampler(
    device: &wgpu::Device,
    label: &str,
    desc: &SamplerDesc,
) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        address_mode_u: desc.wrap_u.to_wgpu(),
        address_mode_v: desc.wrap_v.to_wgpu(),
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: desc.mag_filter.to_wgpu(),
        min_filter: desc.min_filter.to_wgpu(),
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_padded_to_copy_alignment() {
        assert_eq!(padded_bytes_per_row(1), 256);
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(65), 512);
        assert_eq!(padded_bytes_per_row(256), 1024);
    }
}
