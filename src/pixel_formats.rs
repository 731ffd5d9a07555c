// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Runtime pixel format descriptions for decoded textures.
//!
//! Every decoded image carries a [`ResourceFormat`] describing how its texels are laid out:
//!
//! - Number of components (R, RG, RGB, RGBA)
//! - Byte width of each component (1, 2 or 4)
//! - How each component is interpreted ([`CompType`])
//! - Whether the layout is a plain per-component layout or a packed/block-compressed one
//!   ([`ResourceFormatType`])
//!
//! # Design Philosophy
//!
//! Unlike compile-time pixel formats, the format of an image file is only known once the file
//! has been read, and it may change between two loads of the same file.  Formats are therefore
//! plain values, compared wholesale when deciding whether a texture can be reused.
//!
//! # Available Formats
//!
//! The non-container image families always produce one of two formats:
//! - [`ResourceFormat::RGBA8_UNORM_SRGB`] - 4-channel 8-bit normalized with sRGB encoding
//! - [`ResourceFormat::RGBA32_FLOAT`] - 4-channel 32-bit float (16 bytes total)
//!
//! DDS files carry their native format, which may be any regular layout or one of the
//! packed and block-compressed layouts.
//!
//! # Examples
//!
//! ```
//! use image_replay::pixel_formats::{CompType, ResourceFormat};
//!
//! let format = ResourceFormat::RGBA32_FLOAT;
//! assert_eq!(format.comp_type, CompType::Float);
//! assert_eq!(format.bytes_per_pixel(), Some(16));
//! ```

use std::fmt::Display;

/// How the components of a format are interpreted when sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompType {
    /// Untyped storage.
    Typeless,
    /// IEEE 754 floating point (half or single precision depending on byte width).
    Float,
    /// Floating point without a sign bit, as in unsigned BC6H.
    UFloat,
    /// Normalized unsigned integer, 0..=max mapped to 0.0..=1.0.
    UNorm,
    /// Normalized signed integer, mapped to -1.0..=1.0.
    SNorm,
    /// Unsigned integer, not normalized.
    UInt,
    /// Signed integer, not normalized.
    SInt,
    /// Normalized unsigned integer with sRGB encoding.
    UNormSRGB,
}

/// The memory layout family of a format.
///
/// [`ResourceFormatType::Regular`] formats are described entirely by their component count and
/// byte width.  The remaining variants are packed or block-compressed layouts whose size cannot
/// be derived from per-component information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceFormatType {
    Regular,
    BC1,
    BC2,
    BC3,
    BC4,
    BC5,
    BC6,
    BC7,
    R10G10B10A2,
    R11G11B10,
    R9G9B9E5,
    R5G6B5,
    R5G5B5A1,
    R4G4B4A4,
}

impl ResourceFormatType {
    /// Bytes per 4x4 block, for block-compressed layouts.
    pub fn block_bytes(self) -> Option<u32> {
        match self {
            ResourceFormatType::BC1 | ResourceFormatType::BC4 => Some(8),
            ResourceFormatType::BC2
            | ResourceFormatType::BC3
            | ResourceFormatType::BC5
            | ResourceFormatType::BC6
            | ResourceFormatType::BC7 => Some(16),
            _ => None,
        }
    }
}

/// A complete description of a texture's pixel format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceFormat {
    pub format_type: ResourceFormatType,
    pub comp_type: CompType,
    /// Number of components.  For packed and compressed layouts this is the number of logical
    /// channels rather than a storage unit.
    pub comp_count: u8,
    /// Bytes per component.  Only meaningful for [`ResourceFormatType::Regular`].
    pub comp_byte_width: u8,
    /// Components are stored in BGRA rather than RGBA order.
    pub bgra_order: bool,
}

impl ResourceFormat {
    /// 4-channel 8-bit normalized with sRGB encoding.  The format of every generic bitmap load.
    pub const RGBA8_UNORM_SRGB: ResourceFormat =
        ResourceFormat::regular(4, 1, CompType::UNormSRGB);

    /// 4-channel 32-bit float.  The format of every OpenEXR and Radiance load.
    pub const RGBA32_FLOAT: ResourceFormat = ResourceFormat::regular(4, 4, CompType::Float);

    /// A plain per-component format.
    pub const fn regular(comp_count: u8, comp_byte_width: u8, comp_type: CompType) -> Self {
        ResourceFormat {
            format_type: ResourceFormatType::Regular,
            comp_type,
            comp_count,
            comp_byte_width,
            bgra_order: false,
        }
    }

    /// A packed or block-compressed format.
    pub const fn special(
        format_type: ResourceFormatType,
        comp_count: u8,
        comp_type: CompType,
    ) -> Self {
        ResourceFormat {
            format_type,
            comp_type,
            comp_count,
            comp_byte_width: 1,
            bgra_order: false,
        }
    }

    /// The same format with components stored in BGRA order.
    pub const fn bgra(mut self) -> Self {
        self.bgra_order = true;
        self
    }

    pub fn is_block_compressed(&self) -> bool {
        self.format_type.block_bytes().is_some()
    }

    /// Bytes occupied by one texel, or `None` for block-compressed formats.
    pub fn bytes_per_pixel(&self) -> Option<u32> {
        match self.format_type {
            ResourceFormatType::Regular => {
                Some(self.comp_count as u32 * self.comp_byte_width as u32)
            }
            ResourceFormatType::R10G10B10A2
            | ResourceFormatType::R11G11B10
            | ResourceFormatType::R9G9B9E5 => Some(4),
            ResourceFormatType::R5G6B5
            | ResourceFormatType::R5G5B5A1
            | ResourceFormatType::R4G4B4A4 => Some(2),
            _ => None,
        }
    }

    /// Bytes needed to store one `width`x`height`x`depth` image of this format, tightly packed.
    ///
    /// Block-compressed formats round each dimension up to whole 4x4 blocks.
    pub fn image_bytes(&self, width: u32, height: u32, depth: u32) -> u64 {
        let depth = depth.max(1) as u64;
        match self.format_type.block_bytes() {
            Some(block) => {
                let blocks_wide = width.div_ceil(4).max(1) as u64;
                let blocks_high = height.div_ceil(4).max(1) as u64;
                blocks_wide * blocks_high * block as u64 * depth
            }
            None => {
                let bpp = self.bytes_per_pixel().unwrap_or(0) as u64;
                width as u64 * height as u64 * depth * bpp
            }
        }
    }
}

impl Display for ResourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let order = if self.bgra_order { "BGRA" } else { "RGBA" };
        match self.format_type {
            ResourceFormatType::Regular => write!(
                f,
                "{}{} {:?}",
                &order[..self.comp_count.clamp(1, 4) as usize],
                self.comp_byte_width as u32 * 8,
                self.comp_type
            ),
            other => write!(f, "{:?} {:?}", other, self.comp_type),
        }
    }
}
