// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! DDS (DirectDraw Surface) container reading.
//!
//! The header yields the full layout (size, depth, array size, mips, cubemap) and the native
//! pixel format.  Pixel data is handed on exactly as stored, one sub-buffer per
//! (array slice, mip level), with no conversion or recompression.
//!
//! Based on the Microsoft DDS reference:
//! https://docs.microsoft.com/en-us/windows/win32/direct3ddds/dds-header

mod format;

use std::io::{ErrorKind, Read, Seek, SeekFrom};

use crate::decode::{DecodeError, DecodedImage, ImageFamily, Payload};
use crate::pixel_formats::ResourceFormat;
use crate::texture::TextureDescriptor;

const FAMILY: ImageFamily = ImageFamily::Dds;

/// Magic plus the 124-byte header.
const HEADER_LEN: usize = 128;
const DX10_HEADER_LEN: usize = 20;

// DDS header flags (DDSD_*)
const DDSD_MIPMAPCOUNT: u32 = 0x20000;

// DDS pixel format flags (DDPF_*)
pub(crate) const DDPF_ALPHAPIXELS: u32 = 0x1;
pub(crate) const DDPF_ALPHA: u32 = 0x2;
pub(crate) const DDPF_FOURCC: u32 = 0x4;
pub(crate) const DDPF_RGB: u32 = 0x40;
pub(crate) const DDPF_LUMINANCE: u32 = 0x20000;

// DDS caps2 flags (DDSCAPS2_*)
const DDSCAPS2_CUBEMAP: u32 = 0x200;
const DDSCAPS2_CUBEMAP_ALL_FACES: u32 = 0xFC00;
const DDSCAPS2_VOLUME: u32 = 0x200000;

// DX10 extension
const DX10_DIMENSION_TEXTURE3D: u32 = 4;
const DX10_MISC_TEXTURECUBE: u32 = 0x4;

/// DDS pixel format structure (32 bytes).
#[derive(Debug, Clone)]
pub(crate) struct DdsPixelFormat {
    pub flags: u32,
    pub fourcc: [u8; 4],
    pub rgb_bit_count: u32,
    pub r_bit_mask: u32,
    pub g_bit_mask: u32,
    pub b_bit_mask: u32,
    pub a_bit_mask: u32,
}

impl DdsPixelFormat {
    fn has_dx10_header(&self) -> bool {
        self.flags & DDPF_FOURCC != 0 && &self.fourcc == b"DX10"
    }
}

/// The fields of the DDS header this reader uses.
#[derive(Debug, Clone)]
pub(crate) struct DdsHeader {
    pub flags: u32,
    pub height: u32,
    pub width: u32,
    pub depth: u32,
    pub mipmap_count: u32,
    pub pixel_format: DdsPixelFormat,
    pub caps2: u32,
}

/// `DDS_HEADER_DXT10`, present when the FourCC is `"DX10"`.
#[derive(Debug, Clone)]
pub(crate) struct Dx10Header {
    pub dxgi_format: u32,
    pub resource_dimension: u32,
    pub misc_flag: u32,
    pub array_size: u32,
}

fn le_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

impl DdsHeader {
    fn parse(bytes: &[u8; HEADER_LEN]) -> Result<Self, DecodeError> {
        let size = le_u32(bytes, 4);
        if size != 124 {
            return Err(DecodeError::corrupt(FAMILY, format!("header size {size}")));
        }
        let pixel_format_size = le_u32(bytes, 76);
        if pixel_format_size != 32 {
            return Err(DecodeError::corrupt(
                FAMILY,
                format!("pixel format size {pixel_format_size}"),
            ));
        }
        Ok(DdsHeader {
            flags: le_u32(bytes, 8),
            height: le_u32(bytes, 12),
            width: le_u32(bytes, 16),
            depth: le_u32(bytes, 24),
            mipmap_count: le_u32(bytes, 28),
            pixel_format: DdsPixelFormat {
                flags: le_u32(bytes, 80),
                fourcc: [bytes[84], bytes[85], bytes[86], bytes[87]],
                rgb_bit_count: le_u32(bytes, 88),
                r_bit_mask: le_u32(bytes, 92),
                g_bit_mask: le_u32(bytes, 96),
                b_bit_mask: le_u32(bytes, 100),
                a_bit_mask: le_u32(bytes, 104),
            },
            caps2: le_u32(bytes, 112),
        })
    }
}

impl Dx10Header {
    fn parse(bytes: &[u8; DX10_HEADER_LEN]) -> Self {
        Dx10Header {
            dxgi_format: le_u32(bytes, 0),
            resource_dimension: le_u32(bytes, 4),
            misc_flag: le_u32(bytes, 8),
            array_size: le_u32(bytes, 12),
        }
    }
}

/// Texture layout resolved from the header(s).
#[derive(Debug, Clone, PartialEq)]
struct Layout {
    width: u32,
    height: u32,
    depth: u32,
    /// Counts cube faces, so a single cubemap has six slices.
    array_size: u32,
    mip_count: u32,
    cubemap: bool,
    format: ResourceFormat,
}

impl Layout {
    fn resolve(header: &DdsHeader, dx10: Option<&Dx10Header>) -> Result<Self, DecodeError> {
        if header.width == 0 || header.height == 0 {
            return Err(DecodeError::DimensionsOutOfRange {
                family: FAMILY,
                width: header.width as u64,
                height: header.height as u64,
            });
        }

        let (format, depth, array_size, cubemap) = match dx10 {
            Some(dx10) => {
                let format = format::from_dxgi(dx10.dxgi_format).ok_or(
                    DecodeError::UnsupportedVariant {
                        family: FAMILY,
                        reason: "DXGI format",
                    },
                )?;
                let volume = dx10.resource_dimension == DX10_DIMENSION_TEXTURE3D;
                let cubemap = dx10.misc_flag & DX10_MISC_TEXTURECUBE != 0;
                let array_size = dx10.array_size.max(1);
                if volume && array_size > 1 {
                    return Err(DecodeError::UnsupportedVariant {
                        family: FAMILY,
                        reason: "volume texture array",
                    });
                }
                let depth = if volume { header.depth.max(1) } else { 1 };
                let slices = if cubemap {
                    array_size.checked_mul(6).ok_or_else(|| {
                        DecodeError::corrupt(FAMILY, format!("cube array of {array_size}"))
                    })?
                } else {
                    array_size
                };
                (format, depth, slices, cubemap)
            }
            None => {
                let format = format::from_legacy(&header.pixel_format).ok_or(
                    DecodeError::UnsupportedVariant {
                        family: FAMILY,
                        reason: "legacy pixel format",
                    },
                )?;
                let cubemap = header.caps2 & DDSCAPS2_CUBEMAP != 0;
                if cubemap && header.caps2 & DDSCAPS2_CUBEMAP_ALL_FACES != DDSCAPS2_CUBEMAP_ALL_FACES
                {
                    return Err(DecodeError::UnsupportedVariant {
                        family: FAMILY,
                        reason: "cubemap without all six faces",
                    });
                }
                let depth = if header.caps2 & DDSCAPS2_VOLUME != 0 {
                    header.depth.max(1)
                } else {
                    1
                };
                (format, depth, if cubemap { 6 } else { 1 }, cubemap)
            }
        };

        let largest = header.width.max(header.height).max(depth);
        let max_mips = u32::BITS - largest.leading_zeros();
        let mip_count = if header.flags & DDSD_MIPMAPCOUNT != 0 || header.mipmap_count > 1 {
            header.mipmap_count.max(1)
        } else {
            1
        };
        if mip_count > max_mips {
            return Err(DecodeError::corrupt(
                FAMILY,
                format!("{mip_count} mips for a {largest} texel texture"),
            ));
        }

        Ok(Layout {
            width: header.width,
            height: header.height,
            depth,
            array_size,
            mip_count,
            cubemap,
            format,
        })
    }

    /// Byte size of every sub-buffer in file order (slice-major, then mip).
    ///
    /// Fails as soon as the running total exceeds `available` bytes, so a partially written file
    /// is rejected before anything is allocated for it.
    fn subresource_sizes(&self, available: u64) -> Result<Vec<usize>, DecodeError> {
        let mut sizes = Vec::new();
        let mut total: u64 = 0;
        for _slice in 0..self.array_size {
            for mip in 0..self.mip_count {
                let width = (self.width >> mip).max(1);
                let height = (self.height >> mip).max(1);
                let depth = (self.depth >> mip).max(1);
                let size = self.format.image_bytes(width, height, depth);
                total = total.saturating_add(size);
                if total > available {
                    return Err(DecodeError::corrupt(
                        FAMILY,
                        format!("file holds {available} bytes of pixel data, header declares more"),
                    ));
                }
                // bounded by `available`, which came from a seekable stream
                sizes.push(size as usize);
            }
        }
        Ok(sizes)
    }
}

fn read_exact_or_corrupt<R: Read>(file: &mut R, buf: &mut [u8]) -> Result<(), DecodeError> {
    file.read_exact(buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => DecodeError::corrupt(FAMILY, "file is truncated"),
        _ => DecodeError::Io(e),
    })
}

pub(super) fn decode<R: Read + Seek>(file: &mut R) -> Result<DecodedImage, DecodeError> {
    let file_len = file.seek(SeekFrom::End(0))?;
    file.seek(SeekFrom::Start(0))?;

    let mut raw = [0u8; HEADER_LEN];
    read_exact_or_corrupt(file, &mut raw)?;
    let header = DdsHeader::parse(&raw)?;
    let dx10 = if header.pixel_format.has_dx10_header() {
        let mut raw = [0u8; DX10_HEADER_LEN];
        read_exact_or_corrupt(file, &mut raw)?;
        Some(Dx10Header::parse(&raw))
    } else {
        None
    };

    let layout = Layout::resolve(&header, dx10.as_ref())?;
    let data_start = file.stream_position()?;
    let sizes = layout.subresource_sizes(file_len.saturating_sub(data_start))?;

    let mut subresources = Vec::with_capacity(sizes.len());
    for size in sizes {
        let mut data = vec![0u8; size];
        read_exact_or_corrupt(file, &mut data)?;
        subresources.push(data);
    }
    let payload = Payload::Subresources(subresources);

    let descriptor = TextureDescriptor {
        width: layout.width,
        height: layout.height,
        depth: layout.depth,
        array_size: layout.array_size,
        mip_count: layout.mip_count,
        cubemap: layout.cubemap,
        format: layout.format,
        byte_size: payload.byte_len(),
        ..TextureDescriptor::default()
    };

    Ok(DecodedImage {
        family: FAMILY,
        descriptor,
        payload,
    })
}
