// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! The canonical, format-independent description of a decoded texture.
//!
//! Every decode produces a fresh [`TextureDescriptor`]; descriptors are never patched in place.
//! Whether two loads can share one GPU-side texture is decided by [`TextureDescriptor::same_shape`].

use crate::pixel_formats::ResourceFormat;

/// Number of spatial dimensions of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureDimension {
    D1,
    D2,
    D3,
}

impl TextureDimension {
    pub fn as_u32(self) -> u32 {
        match self {
            TextureDimension::D1 => 1,
            TextureDimension::D2 => 2,
            TextureDimension::D3 => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureType {
    Texture1D,
    Texture1DArray,
    Texture2D,
    Texture2DArray,
    TextureCube,
    TextureCubeArray,
    Texture3D,
}

/// How the texture is presented to the host.  A viewed image behaves like a swapchain image
/// that was rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureCategory {
    pub swap_buffer: bool,
    pub color_target: bool,
}

impl TextureCategory {
    pub const VIEWED_IMAGE: TextureCategory = TextureCategory {
        swap_buffer: true,
        color_target: true,
    };
}

/// Width, height, depth, layering and pixel format of one texture.
///
/// `depth`, `array_size` and `mip_count` are always at least 1.  The dimensionality is never
/// stored; it is derived from the other fields by [`TextureDescriptor::dimension`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureDescriptor {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub array_size: u32,
    pub mip_count: u32,
    pub cubemap: bool,
    pub format: ResourceFormat,
    pub sample_count: u32,
    pub creation_flags: TextureCategory,
    /// Total decoded bytes across every mip and slice.
    pub byte_size: u64,
}

impl Default for TextureDescriptor {
    /// The placeholder used before (or instead of) a successful decode: a single 1x1 RGBA8 sRGB
    /// texel with one mip, one slice and one sample.
    ///
    /// The placeholder gets no special dimensionality.  Like any decoded 1x1 image it reports
    /// [`TextureDimension::D1`].
    fn default() -> Self {
        TextureDescriptor {
            width: 1,
            height: 1,
            depth: 1,
            array_size: 1,
            mip_count: 1,
            cubemap: false,
            format: ResourceFormat::RGBA8_UNORM_SRGB,
            sample_count: 1,
            creation_flags: TextureCategory::VIEWED_IMAGE,
            byte_size: 0,
        }
    }
}

impl TextureDescriptor {
    /// A flat, single-mip, single-slice 2D image.
    pub fn flat(width: u32, height: u32, format: ResourceFormat) -> Self {
        TextureDescriptor {
            width,
            height,
            format,
            byte_size: format.image_bytes(width, height, 1),
            ..TextureDescriptor::default()
        }
    }

    /// Depth wins, then cubemaps, then anything wider than one texel is 2D.
    pub fn dimension(&self) -> TextureDimension {
        if self.depth > 1 {
            TextureDimension::D3
        } else if self.cubemap || self.width > 1 {
            TextureDimension::D2
        } else {
            TextureDimension::D1
        }
    }

    pub fn texture_type(&self) -> TextureType {
        let arrayed = self.array_size > 1;
        match self.dimension() {
            TextureDimension::D3 => TextureType::Texture3D,
            TextureDimension::D2 if self.cubemap => {
                // cube arrays count faces, so more than one cube means more than six slices
                if self.array_size > 6 {
                    TextureType::TextureCubeArray
                } else {
                    TextureType::TextureCube
                }
            }
            TextureDimension::D2 if arrayed => TextureType::Texture2DArray,
            TextureDimension::D2 => TextureType::Texture2D,
            TextureDimension::D1 if arrayed => TextureType::Texture1DArray,
            TextureDimension::D1 => TextureType::Texture1D,
        }
    }

    /// Number of separately uploaded sub-buffers (one per array slice per mip).
    pub fn subresource_count(&self) -> u32 {
        self.array_size * self.mip_count
    }

    /// Whether a texture allocated for `self` can hold `other` without being recreated.
    ///
    /// Every shape field takes part: width, height, depth, cubemap, mip count, array size and
    /// pixel format.
    pub fn same_shape(&self, other: &TextureDescriptor) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.depth == other.depth
            && self.cubemap == other.cubemap
            && self.mip_count == other.mip_count
            && self.array_size == other.array_size
            && self.format == other.format
    }
}
