// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! OpenEXR loading.
//!
//! Only single-part scanline images are accepted.  Every channel is read as 32-bit float and
//! routed into an RGBA slot by the first letter of its name.

use std::io::{Read, Seek, SeekFrom};

use crate::decode::sniff::EXR_MAGIC;
use crate::decode::{DecodeError, DecodedImage, ImageFamily, Payload};
use crate::pixel_formats::ResourceFormat;
use crate::texture::TextureDescriptor;

const FAMILY: ImageFamily = ImageFamily::OpenExr;

// version field flags
const TILED: u32 = 0x200;
const NON_IMAGE: u32 = 0x800;
const MULTIPART: u32 = 0x1000;

/// Checks the magic number and version field of an EXR file.
///
/// Tiled, deep (non-image) and multipart files are rejected outright.
pub(crate) fn check_version(header: &[u8]) -> Result<(), DecodeError> {
    if header.len() < 8 || !header.starts_with(EXR_MAGIC) {
        return Err(DecodeError::corrupt(FAMILY, "truncated version header"));
    }
    let version = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
    if version & 0xff != 2 {
        return Err(DecodeError::corrupt(
            FAMILY,
            format!("unknown file version {}", version & 0xff),
        ));
    }
    if version & (MULTIPART | NON_IMAGE | TILED) != 0 {
        return Err(DecodeError::UnsupportedVariant {
            family: FAMILY,
            reason: "multipart, tiled or non-image file",
        });
    }
    Ok(())
}

struct Channel {
    first_letter: Option<u8>,
    samples: Vec<f32>,
}

struct Channels {
    width: usize,
    height: usize,
    list: Vec<Channel>,
}

fn read_channels(bytes: &[u8]) -> std::result::Result<Channels, exr::error::Error> {
    use exr::prelude::*;
    let image = read()
        .no_deep_data()
        .largest_resolution_level()
        .all_channels()
        .first_valid_layer()
        .all_attributes()
        .from_buffered(std::io::Cursor::new(bytes))?;
    let layer = image.layer_data;
    let list = layer
        .channel_data
        .list
        .iter()
        .map(|channel| Channel {
            first_letter: channel.name.as_slice().first().copied(),
            samples: channel.sample_data.values_as_f32().collect(),
        })
        .collect();
    Ok(Channels {
        width: layer.size.0,
        height: layer.size.1,
        list,
    })
}

/// Maps named channels into RGBA slots.  A later channel with the same first letter wins.
fn rgba_slots(list: &[Channel]) -> [Option<usize>; 4] {
    let mut slots = [None; 4];
    for (index, channel) in list.iter().enumerate() {
        match channel.first_letter {
            Some(b'R') => slots[0] = Some(index),
            Some(b'G') => slots[1] = Some(index),
            Some(b'B') => slots[2] = Some(index),
            Some(b'A') => slots[3] = Some(index),
            _ => {}
        }
    }
    slots
}

pub(super) fn decode<R: Read + Seek>(file: &mut R) -> Result<DecodedImage, DecodeError> {
    file.seek(SeekFrom::Start(0))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    check_version(&bytes)?;

    let channels = read_channels(&bytes).map_err(|e| DecodeError::corrupt(FAMILY, e))?;
    let (Ok(width), Ok(height)) = (
        u32::try_from(channels.width),
        u32::try_from(channels.height),
    ) else {
        return Err(DecodeError::DimensionsOutOfRange {
            family: FAMILY,
            width: channels.width as u64,
            height: channels.height as u64,
        });
    };
    let texels = channels.width * channels.height;
    if channels.list.iter().any(|c| c.samples.len() != texels) {
        return Err(DecodeError::UnsupportedVariant {
            family: FAMILY,
            reason: "subsampled channels",
        });
    }

    let slots = rgba_slots(&channels.list);
    let mut data = Vec::with_capacity(texels * 4 * size_of::<f32>());
    for texel in 0..texels {
        for (component, slot) in slots.iter().enumerate() {
            let value = match slot {
                Some(index) => channels.list[*index].samples[texel],
                // missing colour is black, missing alpha is opaque
                None if component < 3 => 0.0,
                None => 1.0,
            };
            data.extend_from_slice(&value.to_ne_bytes());
        }
    }

    Ok(DecodedImage {
        family: FAMILY,
        descriptor: TextureDescriptor::flat(width, height, ResourceFormat::RGBA32_FLOAT),
        payload: Payload::Whole(data),
    })
}
