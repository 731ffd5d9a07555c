// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Generic bitmap loading through the `image` crate.

use std::io::{BufReader, Read, Seek, SeekFrom};

use image::{ImageFormat, ImageReader};

use crate::decode::{DecodeError, DecodedImage, ImageFamily, Payload};
use crate::pixel_formats::ResourceFormat;
use crate::texture::TextureDescriptor;

/// Exclusive upper bound on either dimension of a bitmap.
const MAX_DIMENSION: u32 = 65536;

/// Rejects probed dimensions that are zero or not below [`MAX_DIMENSION`].
pub(crate) fn check_dimensions(
    family: ImageFamily,
    width: u32,
    height: u32,
) -> Result<(), DecodeError> {
    if width == 0 || height == 0 || width >= MAX_DIMENSION || height >= MAX_DIMENSION {
        return Err(DecodeError::DimensionsOutOfRange {
            family,
            width: width as u64,
            height: height as u64,
        });
    }
    Ok(())
}

pub(super) fn decode<R: Read + Seek>(
    file: &mut R,
    format: ImageFormat,
) -> Result<DecodedImage, DecodeError> {
    let family = ImageFamily::Bitmap(format);

    // dimensions first, so absurd headers never reach the full decode
    let (width, height) = ImageReader::with_format(BufReader::new(&mut *file), format)
        .into_dimensions()
        .map_err(|e| DecodeError::corrupt(family, e))?;
    check_dimensions(family, width, height)?;

    file.seek(SeekFrom::Start(0))?;
    let image = ImageReader::with_format(BufReader::new(&mut *file), format)
        .decode()
        .map_err(|e| DecodeError::corrupt(family, e))?;

    // the loader may apply orientation or other transforms, so trust the decoded size
    let (width, height) = (image.width(), image.height());
    let (format, data) = if family.is_float() {
        let texels = image.into_rgba32f().into_raw();
        let data = texels.iter().flat_map(|f| f.to_ne_bytes()).collect();
        (ResourceFormat::RGBA32_FLOAT, data)
    } else {
        (ResourceFormat::RGBA8_UNORM_SRGB, image.into_rgba8().into_raw())
    };

    Ok(DecodedImage {
        family,
        descriptor: TextureDescriptor::flat(width, height, format),
        payload: Payload::Whole(data),
    })
}
