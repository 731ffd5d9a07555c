// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Decoding real files of every family from disk.

mod common;

use std::fs::File;
use std::path::Path;

use exr::prelude::FlatSamples;
use half::f16;
use image::ImageFormat;
use image_replay::decode::{DecodeError, DecodedImage, ImageFamily, Payload, decode, probe};
use image_replay::pixel_formats::{CompType, ResourceFormat, ResourceFormatType};
use image_replay::texture::{TextureDimension, TextureType};

use common::*;

fn decode_path(path: &Path) -> Result<DecodedImage, DecodeError> {
    decode(&mut File::open(path).unwrap())
}

fn whole(decoded: &DecodedImage) -> &[u8] {
    match &decoded.payload {
        Payload::Whole(data) => data,
        Payload::Subresources(_) => panic!("expected one buffer"),
    }
}

fn floats(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}

#[test]
fn rgb_png_gains_opaque_alpha() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "rgb.png",
        &png_bytes(3, 2, png::ColorType::Rgb, &ramp(3 * 2 * 3, 1)),
    );
    let decoded = decode_path(&path).unwrap();
    assert_eq!(decoded.family, ImageFamily::Bitmap(ImageFormat::Png));
    assert_eq!(decoded.descriptor.format, ResourceFormat::RGBA8_UNORM_SRGB);
    assert_eq!((decoded.descriptor.width, decoded.descriptor.height), (3, 2));
    assert_eq!(decoded.descriptor.texture_type(), TextureType::Texture2D);

    let data = whole(&decoded);
    assert_eq!(data.len(), 3 * 2 * 4);
    assert_eq!(&data[..8], &[1, 2, 3, 255, 4, 5, 6, 255]);
}

#[test]
fn grayscale_png_expands_to_rgba() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "gray.png",
        &png_bytes(2, 1, png::ColorType::Grayscale, &[10, 200]),
    );
    let decoded = decode_path(&path).unwrap();
    assert_eq!(whole(&decoded), &[10, 10, 10, 255, 200, 200, 200, 255]);
}

#[test]
fn tga_is_found_without_a_magic_number() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "texture",
        &tga_bytes(2, 2, &[3, 2, 1, 6, 5, 4, 9, 8, 7, 12, 11, 10]),
    );
    let decoded = decode_path(&path).unwrap();
    assert_eq!(decoded.family, ImageFamily::Bitmap(ImageFormat::Tga));
    assert_eq!(decoded.descriptor.format, ResourceFormat::RGBA8_UNORM_SRGB);
    assert_eq!((decoded.descriptor.width, decoded.descriptor.height), (2, 2));
    assert_eq!(
        whole(&decoded),
        &[1, 2, 3, 255, 4, 5, 6, 255, 7, 8, 9, 255, 10, 11, 12, 255]
    );
}

#[test]
fn radiance_decodes_to_float() {
    let dir = tempfile::tempdir().unwrap();
    // mantissas scaled by 2^(129 - 136): 128 -> 1.0, 64 -> 0.5
    let path = write(dir.path(), "sky.hdr", &radiance_bytes(2, 3, [128, 64, 0, 129]));
    let decoded = decode_path(&path).unwrap();
    assert_eq!(decoded.family, ImageFamily::Bitmap(ImageFormat::Hdr));
    assert_eq!(decoded.descriptor.format, ResourceFormat::RGBA32_FLOAT);
    assert_eq!((decoded.descriptor.width, decoded.descriptor.height), (2, 3));
    let values = floats(whole(&decoded));
    assert_eq!(values.len(), 2 * 3 * 4);
    for texel in values.chunks_exact(4) {
        assert!((texel[0] - 1.0).abs() < 0.01, "{texel:?}");
        assert!((texel[1] - 0.5).abs() < 0.01, "{texel:?}");
        assert_eq!(texel[2], 0.0);
        assert_eq!(texel[3], 1.0);
    }
}

#[test]
fn half_float_exr_is_widened() {
    let dir = tempfile::tempdir().unwrap();
    let half = |v: f32| FlatSamples::F16(vec![f16::from_f32(v); 4]);
    let path = write(
        dir.path(),
        "half.exr",
        &exr_bytes(
            2,
            2,
            vec![
                ("R", half(0.5)),
                ("G", half(0.25)),
                ("B", half(2.0)),
                ("A", half(0.75)),
            ],
        ),
    );
    let decoded = decode_path(&path).unwrap();
    assert_eq!(decoded.family, ImageFamily::OpenExr);
    assert_eq!(decoded.descriptor.format, ResourceFormat::RGBA32_FLOAT);
    let values = floats(whole(&decoded));
    assert_eq!(values.len(), 16);
    for texel in values.chunks_exact(4) {
        assert_eq!(texel, &[0.5, 0.25, 2.0, 0.75]);
    }
}

#[test]
fn green_only_exr_fills_black_and_opaque() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "green.exr",
        &exr_bytes(3, 1, vec![("G", FlatSamples::F32(vec![0.1, 0.2, 0.3]))]),
    );
    let values = floats(whole(&decode_path(&path).unwrap()));
    assert_eq!(
        values,
        vec![0.0, 0.1, 0.0, 1.0, 0.0, 0.2, 0.0, 1.0, 0.0, 0.3, 0.0, 1.0]
    );
}

#[test]
fn multipart_exr_is_unsupported() {
    let dir = tempfile::tempdir().unwrap();
    let mut bytes = exr_bytes(1, 1, vec![("R", FlatSamples::F32(vec![1.0]))]);
    let plain = write(dir.path(), "plain.exr", &bytes);
    assert!(decode_path(&plain).is_ok());

    // set the multipart bit in the version field
    bytes[5] |= 0x10;
    let path = write(dir.path(), "multi.exr", &bytes);
    let err = decode_path(&path).unwrap_err();
    assert!(matches!(err, DecodeError::UnsupportedVariant { .. }), "{err}");
}

#[test]
fn dds_mip_chain_is_kept_per_level() {
    let dir = tempfile::tempdir().unwrap();
    // 8x8, 4x4, 2x2: four blocks, then one block each
    let data = ramp(32 + 8 + 8, 0);
    let path = write(dir.path(), "chain.dds", &DdsSpec::dxt1(8, 8, 3).file(&data));
    let decoded = decode_path(&path).unwrap();
    let descriptor = &decoded.descriptor;
    assert_eq!(descriptor.mip_count, 3);
    assert_eq!(descriptor.format.format_type, ResourceFormatType::BC1);
    assert_eq!(descriptor.format.comp_type, CompType::UNorm);
    let Payload::Subresources(subs) = &decoded.payload else {
        panic!("dds keeps sub-buffers");
    };
    assert_eq!(subs.len(), 3);
    assert_eq!(subs[0], data[..32]);
    assert_eq!(subs[1], data[32..40]);
    assert_eq!(subs[2], data[40..]);
}

#[test]
fn dds_cubemap_counts_six_slices() {
    let dir = tempfile::tempdir().unwrap();
    let spec = DdsSpec {
        caps2: DDSCAPS2_CUBEMAP_ALL,
        ..DdsSpec::rgba8(4, 4)
    };
    let path = write(dir.path(), "cube.dds", &spec.file(&ramp(6 * 64, 0)));
    let decoded = decode_path(&path).unwrap();
    assert!(decoded.descriptor.cubemap);
    assert_eq!(decoded.descriptor.array_size, 6);
    assert_eq!(decoded.descriptor.dimension(), TextureDimension::D2);
    assert_eq!(decoded.descriptor.texture_type(), TextureType::TextureCube);
}

#[test]
fn half_written_dds_is_not_partially_decoded() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "partial.dds",
        &DdsSpec::rgba8(16, 16).file(&ramp(16 * 16 * 4 - 1, 0)),
    );
    assert!(matches!(
        decode_path(&path),
        Err(DecodeError::Corrupt { .. })
    ));
}

/// One small, valid file of every family.
fn every_family(dir: &Path) -> Vec<std::path::PathBuf> {
    vec![
        write(dir, "a.png", &rgba_png(5, 3, 7)),
        write(dir, "a.hdr", &radiance_bytes(4, 2, [100, 50, 25, 130])),
        write(
            dir,
            "a.exr",
            &exr_bytes(
                4,
                2,
                vec![
                    ("B", FlatSamples::F32(vec![0.5; 8])),
                    ("R", FlatSamples::F32(vec![0.25; 8])),
                ],
            ),
        ),
        write(dir, "a.dds", &DdsSpec::dxt1(12, 4, 2).file(&ramp(24 + 16, 0))),
        write(dir, "b.dds", &DdsSpec::rgba8(3, 3).file(&ramp(36, 9))),
        write(dir, "a.tga", &tga_bytes(3, 1, &ramp(9, 4))),
    ]
}

#[test]
fn descriptor_accounts_for_every_payload_byte() {
    let dir = tempfile::tempdir().unwrap();
    for path in every_family(dir.path()) {
        let decoded = decode_path(&path).unwrap();
        let descriptor = &decoded.descriptor;
        assert_eq!(descriptor.byte_size, decoded.payload.byte_len(), "{path:?}");
        if let Some(bpp) = descriptor.format.bytes_per_pixel() {
            if descriptor.mip_count == 1 && descriptor.array_size == 1 {
                let expected = descriptor.width as u64 * descriptor.height as u64 * bpp as u64;
                assert_eq!(decoded.payload.byte_len(), expected, "{path:?}");
            }
        }
    }
}

#[test]
fn decoding_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    for path in every_family(dir.path()) {
        assert_eq!(decode_path(&path).unwrap(), decode_path(&path).unwrap(), "{path:?}");
    }
}

#[test]
fn oversized_bitmap_is_rejected_before_decoding() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "wide.png",
        &png_bytes(70000, 1, png::ColorType::Grayscale, &vec![0; 70000]),
    );
    assert!(matches!(
        decode_path(&path),
        Err(DecodeError::DimensionsOutOfRange {
            width: 70000,
            height: 1,
            ..
        })
    ));
}

#[test]
fn extension_does_not_decide_family() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "lies.dds", &rgba_png(1, 1, 0));
    let mut file = File::open(&path).unwrap();
    assert_eq!(
        probe(&mut file).unwrap(),
        Some(ImageFamily::Bitmap(ImageFormat::Png))
    );

    let path = write(dir.path(), "notes.png", b"just some text");
    assert!(matches!(decode_path(&path), Err(DecodeError::NotAnImage)));
}
