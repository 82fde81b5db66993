//! Host-side RGBA8 texture images and the sampling rules shared with the
//! GPU sampler.
//!
//! [`TextureImage::sample`] follows wgpu's sampling of an `Rgba8UnormSrgb`
//! texture without mipmaps: texel centers at half-integer coordinates,
//! per-axis wrap modes, nearest or bilinear filtering, and sRGB decode before
//! filtering. The CPU shading path uses it so its output can be compared
//! with rendered pixels.

use glam::{Vec2, Vec4};

use crate::error::SkinviewError;

/// How texture coordinates outside `[0, 1]` are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// Tile the texture.
    #[default]
    Repeat,
    /// Clamp to the edge texel.
    ClampToEdge,
    /// Tile, mirroring every other repetition.
    MirroredRepeat,
}

impl WrapMode {
    /// The matching wgpu address mode.
    #[must_use]
    pub fn to_wgpu(self) -> wgpu::AddressMode {
        match self {
            Self::Repeat => wgpu::AddressMode::Repeat,
            Self::ClampToEdge => wgpu::AddressMode::ClampToEdge,
            Self::MirroredRepeat => wgpu::AddressMode::MirrorRepeat,
        }
    }

    /// Resolve an integer texel coordinate into `0..size`.
    fn resolve(self, coord: i64, size: u32) -> u32 {
        let size = i64::from(size.max(1));
        let resolved = match self {
            Self::Repeat => coord.rem_euclid(size),
            Self::ClampToEdge => coord.clamp(0, size - 1),
            Self::MirroredRepeat => {
                let period = coord.rem_euclid(size * 2);
                if period < size {
                    period
                } else {
                    2 * size - 1 - period
                }
            }
        };
        resolved as u32
    }
}

/// Texel filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Nearest texel.
    Nearest,
    /// Bilinear blend of the four closest texels.
    #[default]
    Linear,
}

impl FilterMode {
    /// The matching wgpu filter mode.
    #[must_use]
    pub fn to_wgpu(self) -> wgpu::FilterMode {
        match self {
            Self::Nearest => wgpu::FilterMode::Nearest,
            Self::Linear => wgpu::FilterMode::Linear,
        }
    }
}

/// Sampler state of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SamplerDesc {
    /// Wrap mode along U.
    pub wrap_u: WrapMode,
    /// Wrap mode along V.
    pub wrap_v: WrapMode,
    /// Filter used when magnifying.
    pub mag_filter: FilterMode,
    /// Filter used when minifying.
    pub min_filter: FilterMode,
}

impl SamplerDesc {
    /// Nearest filtering on both axes with clamp-to-edge wrapping.
    pub const NEAREST_CLAMP: Self = Self {
        wrap_u: WrapMode::ClampToEdge,
        wrap_v: WrapMode::ClampToEdge,
        mag_filter: FilterMode::Nearest,
        min_filter: FilterMode::Nearest,
    };
}

/// An RGBA8 sRGB image with its sampler state.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    /// Sampler applied when this image is sampled.
    pub sampler: SamplerDesc,
}

impl TextureImage {
    /// Wrap existing RGBA8 pixel data (row-major, top row first).
    ///
    /// # Errors
    ///
    /// Returns [`SkinviewError::TextureSize`] if `pixels` does not hold
    /// exactly `width * height * 4` bytes.
    pub fn from_rgba8(
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Result<Self, SkinviewError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected || expected == 0 {
            return Err(SkinviewError::TextureSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
            sampler: SamplerDesc::default(),
        })
    }

    /// 1x1 image of a single color. Bound when a material has no texture so
    /// the base color factor alone decides the surface color.
    #[must_use]
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: rgba.to_vec(),
            sampler: SamplerDesc::NEAREST_CLAMP,
        }
    }

    /// 1x1 opaque white.
    #[must_use]
    pub fn white() -> Self {
        Self::solid([255; 4])
    }

    /// Two-color checkerboard with `cell`-sized squares.
    #[must_use]
    pub fn checkerboard(size: u32, cell: u32, a: [u8; 4], b: [u8; 4]) -> Self {
        let size = size.max(1);
        let cell = cell.max(1);
        let mut pixels = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let even = ((x / cell) + (y / cell)) % 2 == 0;
                let color = if even { a } else { b };
                pixels.extend_from_slice(&color);
            }
        }
        Self {
            width: size,
            height: size,
            pixels,
            sampler: SamplerDesc::default(),
        }
    }

    /// Replace the sampler state.
    #[must_use]
    pub fn with_sampler(mut self, sampler: SamplerDesc) -> Self {
        self.sampler = sampler;
        self
    }

    /// Width in texels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in texels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Decoded (linear) color of the texel at `(x, y)`.
    #[must_use]
    pub fn texel(&self, x: u32, y: u32) -> Vec4 {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        let offset = ((y * self.width + x) * 4) as usize;
        let px = &self.pixels[offset..offset + 4];
        Vec4::new(
            srgb_to_linear(px[0]),
            srgb_to_linear(px[1]),
            srgb_to_linear(px[2]),
            f32::from(px[3]) / 255.0,
        )
    }

    /// Sample at normalized texture coordinates.
    ///
    /// A single mip level is sampled, so the magnification filter applies.
    #[must_use]
    pub fn sample(&self, uv: Vec2) -> Vec4 {
        let x = uv.x * self.width as f32 - 0.5;
        let y = uv.y * self.height as f32 - 0.5;
        match self.sampler.mag_filter {
            FilterMode::Nearest => {
                let tx = self.wrap_x((x + 0.5).floor() as i64);
                let ty = self.wrap_y((y + 0.5).floor() as i64);
                self.texel(tx, ty)
            }
            FilterMode::Linear => {
                let x0 = x.floor();
                let y0 = y.floor();
                let fx = x - x0;
                let fy = y - y0;
                let (x0, y0) = (x0 as i64, y0 as i64);
                let (ax, bx) =
                    (self.wrap_x(x0), self.wrap_x(x0.saturating_add(1)));
                let (ay, by) =
                    (self.wrap_y(y0), self.wrap_y(y0.saturating_add(1)));
                let top = self.texel(ax, ay).lerp(self.texel(bx, ay), fx);
                let bottom = self.texel(ax, by).lerp(self.texel(bx, by), fx);
                top.lerp(bottom, fy)
            }
        }
    }

    fn wrap_x(&self, x: i64) -> u32 {
        self.sampler.wrap_u.resolve(x, self.width)
    }

    fn wrap_y(&self, y: i64) -> u32 {
        self.sampler.wrap_v.resolve(y, self.height)
    }
}

/// sRGB transfer function decode for one 8-bit channel.
#[must_use]
pub fn srgb_to_linear(channel: u8) -> f32 {
    let c = f32::from(channel) / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB transfer function encode of a linear value into 8 bits.
#[must_use]
pub fn linear_to_srgb(value: f32) -> u8 {
    let v = value.clamp(0.0, 1.0);
    let c = if v <= 0.003_130_8 {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    };
    (c * 255.0).round() as u8
}
