// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Magic-byte family detection.

use std::fmt::Display;

use image::ImageFormat;

/// How many leading bytes [`sniff`] needs to see.
pub const HEADER_PROBE_LEN: usize = 128;

const DDS_MAGIC: &[u8; 4] = b"DDS ";
pub(crate) const EXR_MAGIC: &[u8; 4] = &[0x76, 0x2f, 0x31, 0x01];

/// The three image families, in detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFamily {
    /// DirectDraw Surface container: mips, arrays, cubemaps, native formats.
    Dds,
    /// OpenEXR scientific float image.
    OpenExr,
    /// Anything the generic bitmap loader recognises (PNG, JPEG, BMP, GIF, TGA, PNM,
    /// Radiance HDR).
    Bitmap(ImageFormat),
}

impl ImageFamily {
    /// Whether this family decodes to 32-bit float texels.
    pub fn is_float(&self) -> bool {
        matches!(
            self,
            ImageFamily::OpenExr | ImageFamily::Bitmap(ImageFormat::Hdr)
        )
    }
}

impl Display for ImageFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageFamily::Dds => write!(f, "DDS"),
            ImageFamily::OpenExr => write!(f, "EXR"),
            ImageFamily::Bitmap(format) => write!(f, "{:?}", format),
        }
    }
}

/// Identifies the family of a file from its first bytes.
///
/// `header` should hold the first [`HEADER_PROBE_LEN`] bytes of the file (or the whole file,
/// if shorter).  Returns `None` when no family claims the bytes.
pub fn sniff(header: &[u8]) -> Option<ImageFamily> {
    if header.starts_with(DDS_MAGIC) {
        return Some(ImageFamily::Dds);
    }
    if header.starts_with(EXR_MAGIC) {
        return Some(ImageFamily::OpenExr);
    }
    match image::guess_format(header) {
        // the loader knows more magic numbers than it was built to decode
        Ok(format) if format.reading_enabled() => Some(ImageFamily::Bitmap(format)),
        _ if looks_like_tga(header) => Some(ImageFamily::Bitmap(ImageFormat::Tga)),
        _ => None,
    }
}

const TGA_HEADER_LEN: usize = 18;

/// TGA has no magic number, so the fixed header fields are checked for plausible values.
fn looks_like_tga(header: &[u8]) -> bool {
    if header.len() < TGA_HEADER_LEN || !ImageFormat::Tga.reading_enabled() {
        return false;
    }
    let colormap_type = header[1];
    let image_type = header[2];
    let colormap_entry_bits = header[7];
    let width = u16::from_le_bytes([header[12], header[13]]);
    let height = u16::from_le_bytes([header[14], header[15]]);
    let pixel_bits = header[16];
    let descriptor = header[17];

    let layout_ok = match colormap_type {
        // colour-mapped, raw or run-length encoded
        1 => {
            matches!(image_type, 1 | 9)
                && matches!(colormap_entry_bits, 8 | 15 | 16 | 24 | 32)
                && matches!(pixel_bits, 8 | 16)
        }
        // true-colour or greyscale, raw or run-length encoded
        0 => matches!(image_type, 2 | 3 | 10 | 11) && matches!(pixel_bits, 8 | 15 | 16 | 24 | 32),
        _ => false,
    };
    // the top two descriptor bits are an interleave scheme nothing writes anymore
    layout_ok && width > 0 && height > 0 && descriptor & 0xc0 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dds_wins() {
        assert_eq!(sniff(b"DDS \x7c\x00\x00\x00"), Some(ImageFamily::Dds));
    }

    #[test]
    fn exr_magic() {
        assert_eq!(
            sniff(&[0x76, 0x2f, 0x31, 0x01, 2, 0, 0, 0]),
            Some(ImageFamily::OpenExr)
        );
    }

    #[test]
    fn png_signature() {
        let header = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR";
        assert_eq!(sniff(header), Some(ImageFamily::Bitmap(ImageFormat::Png)));
    }

    #[test]
    fn radiance_is_float() {
        let family = sniff(b"#?RADIANCE\nFORMAT=32-bit_rle_rgbe\n").unwrap();
        assert_eq!(family, ImageFamily::Bitmap(ImageFormat::Hdr));
        assert!(family.is_float());
        assert!(!ImageFamily::Dds.is_float());
    }

    fn tga_header(colormap_type: u8, image_type: u8, pixel_bits: u8) -> Vec<u8> {
        let mut header = vec![0u8; TGA_HEADER_LEN];
        header[1] = colormap_type;
        header[2] = image_type;
        if colormap_type == 1 {
            header[5] = 2;
            header[7] = 24;
        }
        header[12] = 2;
        header[14] = 2;
        header[16] = pixel_bits;
        header[17] = 0x20;
        header
    }

    #[test]
    fn tga_is_recognised_by_its_header() {
        let tga = ImageFamily::Bitmap(ImageFormat::Tga);
        assert_eq!(sniff(&tga_header(0, 2, 24)), Some(tga));
        assert_eq!(sniff(&tga_header(0, 10, 32)), Some(tga));
        assert_eq!(sniff(&tga_header(0, 3, 8)), Some(tga));
        assert_eq!(sniff(&tga_header(1, 1, 8)), Some(tga));
    }

    #[test]
    fn implausible_tga_headers_are_not_claimed() {
        // colour map with a true-colour image type
        assert_eq!(sniff(&tga_header(1, 2, 24)), None);
        assert_eq!(sniff(&tga_header(0, 4, 24)), None);
        assert_eq!(sniff(&tga_header(0, 2, 12)), None);
        let mut empty = tga_header(0, 2, 24);
        empty[12] = 0;
        assert_eq!(sniff(&empty), None);
        assert_eq!(sniff(&tga_header(0, 2, 24)[..17]), None);
    }

    #[test]
    fn extension_is_irrelevant() {
        // nothing but the bytes is consulted
        assert_eq!(sniff(b""), None);
        assert_eq!(sniff(b"DDS"), None);
        assert_eq!(sniff(b"plain text that happens to be named image.dds"), None);
    }
}
