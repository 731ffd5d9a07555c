// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Mapping DDS pixel format descriptions to [`ResourceFormat`].

use super::{
    DDPF_ALPHA, DDPF_ALPHAPIXELS, DDPF_FOURCC, DDPF_LUMINANCE, DDPF_RGB, DdsPixelFormat,
};
use crate::pixel_formats::{CompType, ResourceFormat, ResourceFormatType};

use CompType::{Float, SInt, SNorm, UFloat, UInt, UNorm, UNormSRGB};
use ResourceFormatType::*;

const fn regular(count: u8, width: u8, comp_type: CompType) -> Option<ResourceFormat> {
    Some(ResourceFormat::regular(count, width, comp_type))
}

const fn special(
    format_type: ResourceFormatType,
    count: u8,
    comp_type: CompType,
) -> Option<ResourceFormat> {
    Some(ResourceFormat::special(format_type, count, comp_type))
}

/// Formats from the `DDS_HEADER_DXT10` extension, keyed by `DXGI_FORMAT` value.
pub(super) fn from_dxgi(dxgi_format: u32) -> Option<ResourceFormat> {
    match dxgi_format {
        2 => regular(4, 4, Float),
        3 => regular(4, 4, UInt),
        4 => regular(4, 4, SInt),
        6 => regular(3, 4, Float),
        10 => regular(4, 2, Float),
        11 => regular(4, 2, UNorm),
        12 => regular(4, 2, UInt),
        13 => regular(4, 2, SNorm),
        14 => regular(4, 2, SInt),
        16 => regular(2, 4, Float),
        24 => special(R10G10B10A2, 4, UNorm),
        25 => special(R10G10B10A2, 4, UInt),
        26 => special(R11G11B10, 3, Float),
        28 => regular(4, 1, UNorm),
        29 => regular(4, 1, UNormSRGB),
        30 => regular(4, 1, UInt),
        31 => regular(4, 1, SNorm),
        32 => regular(4, 1, SInt),
        34 => regular(2, 2, Float),
        35 => regular(2, 2, UNorm),
        41 => regular(1, 4, Float),
        49 => regular(2, 1, UNorm),
        54 => regular(1, 2, Float),
        56 => regular(1, 2, UNorm),
        61 => regular(1, 1, UNorm),
        67 => special(R9G9B9E5, 3, Float),
        71 => special(BC1, 4, UNorm),
        72 => special(BC1, 4, UNormSRGB),
        74 => special(BC2, 4, UNorm),
        75 => special(BC2, 4, UNormSRGB),
        77 => special(BC3, 4, UNorm),
        78 => special(BC3, 4, UNormSRGB),
        80 => special(BC4, 1, UNorm),
        81 => special(BC4, 1, SNorm),
        83 => special(BC5, 2, UNorm),
        84 => special(BC5, 2, SNorm),
        85 => special(R5G6B5, 3, UNorm).map(ResourceFormat::bgra),
        86 => special(R5G5B5A1, 4, UNorm).map(ResourceFormat::bgra),
        // the X variants still occupy four bytes per texel
        87 | 88 => regular(4, 1, UNorm).map(ResourceFormat::bgra),
        91 | 93 => regular(4, 1, UNormSRGB).map(ResourceFormat::bgra),
        95 => special(BC6, 3, UFloat),
        96 => special(BC6, 3, Float),
        98 => special(BC7, 4, UNorm),
        99 => special(BC7, 4, UNormSRGB),
        115 => special(R4G4B4A4, 4, UNorm).map(ResourceFormat::bgra),
        _ => None,
    }
}

fn from_fourcc(fourcc: &[u8; 4]) -> Option<ResourceFormat> {
    match fourcc {
        b"DXT1" => special(BC1, 4, UNorm),
        b"DXT2" | b"DXT3" => special(BC2, 4, UNorm),
        b"DXT4" | b"DXT5" => special(BC3, 4, UNorm),
        b"ATI1" | b"BC4U" => special(BC4, 1, UNorm),
        b"BC4S" => special(BC4, 1, SNorm),
        b"ATI2" | b"BC5U" => special(BC5, 2, UNorm),
        b"BC5S" => special(BC5, 2, SNorm),
        // D3DFORMAT enum values stored in the FourCC field
        _ => match u32::from_le_bytes(*fourcc) {
            36 => regular(4, 2, UNorm),
            110 => regular(4, 2, SNorm),
            111 => regular(1, 2, Float),
            112 => regular(2, 2, Float),
            113 => regular(4, 2, Float),
            114 => regular(1, 4, Float),
            115 => regular(2, 4, Float),
            116 => regular(4, 4, Float),
            _ => None,
        },
    }
}

fn from_masks(pf: &DdsPixelFormat) -> Option<ResourceFormat> {
    let alpha = if pf.flags & (DDPF_ALPHAPIXELS | DDPF_ALPHA) != 0 {
        pf.a_bit_mask
    } else {
        0
    };
    let masks = (pf.r_bit_mask, pf.g_bit_mask, pf.b_bit_mask, alpha);

    if pf.flags & DDPF_RGB != 0 {
        return match (pf.rgb_bit_count, masks) {
            (32, (0xff, 0xff00, 0xff0000, 0xff000000 | 0)) => regular(4, 1, UNorm),
            (32, (0xff0000, 0xff00, 0xff, 0xff000000 | 0)) => {
                regular(4, 1, UNorm).map(ResourceFormat::bgra)
            }
            (32, (0x3ff, 0xffc00, 0x3ff00000, 0xc0000000)) => special(R10G10B10A2, 4, UNorm),
            (32, (0xffff, 0xffff0000, 0, 0)) => regular(2, 2, UNorm),
            (24, (0xff, 0xff00, 0xff0000, 0)) => regular(3, 1, UNorm),
            (24, (0xff0000, 0xff00, 0xff, 0)) => regular(3, 1, UNorm).map(ResourceFormat::bgra),
            (16, (0xf800, 0x7e0, 0x1f, 0)) => special(R5G6B5, 3, UNorm).map(ResourceFormat::bgra),
            (16, (0x7c00, 0x3e0, 0x1f, 0x8000)) => {
                special(R5G5B5A1, 4, UNorm).map(ResourceFormat::bgra)
            }
            (16, (0xf00, 0xf0, 0xf, 0xf000)) => {
                special(R4G4B4A4, 4, UNorm).map(ResourceFormat::bgra)
            }
            _ => None,
        };
    }
    if pf.flags & DDPF_LUMINANCE != 0 {
        return match (pf.rgb_bit_count, pf.r_bit_mask, alpha) {
            (8, 0xff, 0) => regular(1, 1, UNorm),
            (16, 0xffff, 0) => regular(1, 2, UNorm),
            (16, 0xff, 0xff00) => regular(2, 1, UNorm),
            _ => None,
        };
    }
    if pf.flags & DDPF_ALPHA != 0 && pf.rgb_bit_count == 8 {
        return regular(1, 1, UNorm);
    }
    None
}

/// Formats described by the legacy `DDS_PIXELFORMAT` alone.
pub(super) fn from_legacy(pf: &DdsPixelFormat) -> Option<ResourceFormat> {
    if pf.flags & DDPF_FOURCC != 0 {
        from_fourcc(&pf.fourcc)
    } else {
        from_masks(pf)
    }
}
