//! File-level read/write through format detection.

use pano_core::Image;
use pano_io::{read, write, write_with_quality, Format, IoError};

fn checker(width: u32, height: u32) -> Image {
    let mut img = Image::new(width, height, 3);
    for y in 0..height {
        for x in 0..width {
            let v = if (x / 4 + y / 4) % 2 == 0 { 1.0 } else { 0.0 };
            img.pixel_mut(x, y).copy_from_slice(&[v, v, v]);
        }
    }
    img
}

#[test]
fn test_png_file_is_exact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("checker.png");
    let img = checker(16, 8);

    write(&path, &img).unwrap();
    assert_eq!(Format::detect(&path).unwrap(), Format::Png);
    assert_eq!(read(&path).unwrap(), img);
}

#[test]
fn test_uppercase_jpeg_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("FACE.JPG");
    let img = checker(16, 16);

    write_with_quality(&path, &img, 90).unwrap();
    let loaded = read(&path).unwrap();
    assert_eq!(loaded.dimensions(), (16, 16));
    assert_eq!(loaded.channels(), 3);
}

#[test]
fn test_magic_bytes_beat_extension() {
    let dir = tempfile::tempdir().unwrap();
    let png_path = dir.path().join("real.png");
    write(&png_path, &checker(8, 8)).unwrap();

    let misnamed = dir.path().join("looks_like.jpg");
    std::fs::copy(&png_path, &misnamed).unwrap();
    assert_eq!(Format::detect(&misnamed).unwrap(), Format::Png);
    assert_eq!(read(&misnamed).unwrap().dimensions(), (8, 8));
}

#[test]
fn test_bmp_file_is_exact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("OLD.BMP");
    let img = checker(12, 6);

    write(&path, &img).unwrap();
    assert_eq!(Format::detect(&path).unwrap(), Format::Bmp);
    assert_eq!(read(&path).unwrap(), img);
}

#[test]
fn test_corrupt_bmp_is_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("old.bmp");
    std::fs::write(&path, b"BM\0\0\0\0\0\0").unwrap();
    assert!(matches!(read(&path), Err(IoError::DecodeError(_))));
}

#[test]
fn test_unknown_extension_is_unsupported() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        write(dir.path().join("out.tga"), &checker(4, 4)),
        Err(IoError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(read(dir.path().join("nope.png")), Err(IoError::Io(_))));
}
