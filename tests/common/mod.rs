// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Fixture files shared by the integration tests.
#![allow(dead_code)]

use std::io::Cursor;
use std::path::{Path, PathBuf};

pub const DDPF_ALPHAPIXELS: u32 = 0x1;
pub const DDPF_FOURCC: u32 = 0x4;
pub const DDPF_RGB: u32 = 0x40;
pub const DDSCAPS2_CUBEMAP_ALL: u32 = 0x200 | 0xFC00;

pub fn png_bytes(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    let mut encoder = png::Encoder::new(&mut bytes, width, height);
    encoder.set_color(color);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().expect("png header");
    writer.write_image_data(data).expect("png data");
    writer.finish().expect("png finish");
    bytes
}

pub fn rgba_png(width: u32, height: u32, fill: u8) -> Vec<u8> {
    png_bytes(
        width,
        height,
        png::ColorType::Rgba,
        &vec![fill; (width * height * 4) as usize],
    )
}

/// An uncompressed Radiance file.  Widths below 8 are always stored flat.
pub fn radiance_bytes(width: u32, height: u32, rgbe: [u8; 4]) -> Vec<u8> {
    assert!(width < 8);
    let mut bytes = format!("#?RADIANCE\nFORMAT=32-bit_rle_rgbe\n\n-Y {height} +X {width}\n")
        .into_bytes();
    for _ in 0..width * height {
        bytes.extend_from_slice(&rgbe);
    }
    bytes
}

/// A single-part scanline EXR.
pub fn exr_bytes(
    width: usize,
    height: usize,
    channels: Vec<(&str, exr::prelude::FlatSamples)>,
) -> Vec<u8> {
    use exr::prelude::*;
    let list: Vec<AnyChannel<FlatSamples>> = channels
        .into_iter()
        .map(|(name, samples)| AnyChannel::new(name, samples))
        .collect();
    // scanline blocks; the default encoding writes tiles
    let image = Image::from_encoded_channels(
        (width, height),
        Encoding::UNCOMPRESSED,
        AnyChannels::sort(list.into()),
    );
    let mut bytes = Vec::new();
    image
        .write()
        .to_buffered(Cursor::new(&mut bytes))
        .expect("write exr");
    bytes
}

/// An uncompressed 24-bit TGA stored top row first.  `bgr` holds one triple per texel.
pub fn tga_bytes(width: u16, height: u16, bgr: &[u8]) -> Vec<u8> {
    let mut bytes = vec![0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0];
    bytes.extend_from_slice(&width.to_le_bytes());
    bytes.extend_from_slice(&height.to_le_bytes());
    bytes.extend_from_slice(&[24, 0x20]);
    bytes.extend_from_slice(bgr);
    bytes
}

/// Legacy DDS header (no DX10 extension).
pub struct DdsSpec {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub mips: u32,
    pub caps2: u32,
    pub pf_flags: u32,
    pub fourcc: [u8; 4],
    pub bit_count: u32,
    pub masks: [u32; 4],
}

impl DdsSpec {
    pub fn rgba8(width: u32, height: u32) -> Self {
        DdsSpec {
            width,
            height,
            depth: 0,
            mips: 1,
            caps2: 0,
            pf_flags: DDPF_RGB | DDPF_ALPHAPIXELS,
            fourcc: [0; 4],
            bit_count: 32,
            masks: [0xff, 0xff00, 0xff0000, 0xff000000],
        }
    }

    pub fn dxt1(width: u32, height: u32, mips: u32) -> Self {
        DdsSpec {
            mips,
            pf_flags: DDPF_FOURCC,
            fourcc: *b"DXT1",
            bit_count: 0,
            masks: [0; 4],
            ..Self::rgba8(width, height)
        }
    }

    pub fn header(&self) -> Vec<u8> {
        let mut words = vec![
            u32::from_le_bytes(*b"DDS "),
            124,
            0x1 | 0x2 | 0x4 | 0x1000 | 0x20000,
            self.height,
            self.width,
            0,
            self.depth,
            self.mips,
        ];
        words.extend([0; 11]);
        words.extend([
            32,
            self.pf_flags,
            u32::from_le_bytes(self.fourcc),
            self.bit_count,
        ]);
        words.extend(self.masks);
        words.extend([0x1000, self.caps2, 0, 0, 0]);
        words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    /// The header followed by `data`.
    pub fn file(&self, data: &[u8]) -> Vec<u8> {
        let mut bytes = self.header();
        bytes.extend_from_slice(data);
        bytes
    }
}

/// `len` bytes that differ between neighbouring positions.
pub fn ramp(len: usize, seed: u8) -> Vec<u8> {
    (0..len).map(|i| (i as u8).wrapping_add(seed)).collect()
}

pub fn write(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write fixture");
    path
}
