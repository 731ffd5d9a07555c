// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Image family detection and decoding.

A file is identified by its leading bytes, never its name, as one of:

| Family        | Probe                                  | Output                                      |
|---------------|----------------------------------------|---------------------------------------------|
| DDS           | `"DDS "` magic                         | native format, one sub-buffer per slice/mip |
| OpenEXR       | `76 2f 31 01` magic + version flags    | RGBA32 float, one contiguous buffer         |
| Bitmap        | any header the bitmap loader knows     | RGBA8 sRGB (RGBA32 float for Radiance HDR)  |

The probes run in that order and are mutually exclusive.

Every failure, whether the bytes are not an image at all or an image this crate cannot read,
is a [`DecodeError`].  Callers are expected to treat every variant the same way ("not a
viewable image"); the variants only exist so the reason can be logged.
*/

mod bitmap;
mod dds;
mod exr;
mod sniff;

use std::fmt::Display;
use std::io::{Read, Seek, SeekFrom};

use crate::texture::TextureDescriptor;

pub use sniff::{HEADER_PROBE_LEN, ImageFamily, sniff};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("not a recognized image")]
    NotAnImage,
    #[error("unsupported {family} variant: {reason}")]
    UnsupportedVariant {
        family: ImageFamily,
        reason: &'static str,
    },
    #[error("{family} dimensions {width}x{height} are out of range")]
    DimensionsOutOfRange {
        family: ImageFamily,
        width: u64,
        height: u64,
    },
    #[error("{family} file recognised, but couldn't load: {reason}")]
    Corrupt { family: ImageFamily, reason: String },
    #[error("I/O error {0}")]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    pub(crate) fn corrupt(family: ImageFamily, reason: impl Display) -> Self {
        DecodeError::Corrupt {
            family,
            reason: reason.to_string(),
        }
    }
}

/// Decoded pixel bytes, in one of two shapes depending on the family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// One interleaved RGBA buffer covering the single mip of the single slice.
    Whole(Vec<u8>),
    /// One buffer per (array slice, mip level), slice-major: sub-buffer `i` holds slice
    /// `i / mip_count`, mip `i % mip_count`.
    Subresources(Vec<Vec<u8>>),
}

impl Payload {
    pub fn byte_len(&self) -> u64 {
        match self {
            Payload::Whole(data) => data.len() as u64,
            Payload::Subresources(subs) => subs.iter().map(|s| s.len() as u64).sum(),
        }
    }
}

/// The result of one successful decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub family: ImageFamily,
    pub descriptor: TextureDescriptor,
    pub payload: Payload,
}

/// Reads the leading bytes of `file` and identifies its family, leaving the stream rewound.
pub fn probe<R: Read + Seek>(file: &mut R) -> Result<Option<ImageFamily>, std::io::Error> {
    file.seek(SeekFrom::Start(0))?;
    let mut header = Vec::with_capacity(HEADER_PROBE_LEN);
    file.by_ref()
        .take(HEADER_PROBE_LEN as u64)
        .read_to_end(&mut header)?;
    file.seek(SeekFrom::Start(0))?;
    Ok(sniff(&header))
}

/// Identifies and fully decodes `file`.
///
/// The stream is read from its start regardless of its current position.  Nothing is retried;
/// a file that is still being written simply fails to decode.
pub fn decode<R: Read + Seek>(file: &mut R) -> Result<DecodedImage, DecodeError> {
    let family = probe(file)?.ok_or(DecodeError::NotAnImage)?;
    let decoded = match family {
        ImageFamily::Dds => dds::decode(file)?,
        ImageFamily::OpenExr => exr::decode(file)?,
        ImageFamily::Bitmap(format) => bitmap::decode(file, format)?,
    };
    debug_assert_eq!(decoded.descriptor.byte_size, decoded.payload.byte_len());
    Ok(decoded)
}
