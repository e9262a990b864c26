use super::*;
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 7, 255]));
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .expect("png encode should succeed");
    out.into_inner()
}

#[test]
fn load_image_rejects_unsupported_extension_before_io() {
    let store = AssetStore::new(PathBuf::from("."));

    let err = match store.load_image(Path::new("entities/theme.ogg")) {
        Ok(_) => panic!("non-image extension must be rejected"),
        Err(err) => err,
    };

    assert!(matches!(err, AssetError::UnsupportedExtension(_)));
}

#[test]
fn read_bytes_blocks_traversal() {
    let store = AssetStore::new(PathBuf::from("."));
    let err = store
        .read_bytes(Path::new("../secret.png"))
        .expect_err("parent components must be rejected");
    assert!(matches!(err, AssetError::Traversal));
}

#[test]
fn list_files_filters_by_extension_and_sorts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let entities = dir.path().join("entities");
    fs::create_dir_all(entities.join("nested")).expect("mkdir");
    fs::write(entities.join("b.ent"), "<entity/>").expect("write");
    fs::write(entities.join("a.ENT"), "<entity/>").expect("write");
    fs::write(entities.join("a.png"), [0u8]).expect("write");
    fs::write(entities.join("nested").join("c.ent"), "<entity/>").expect("write");

    let store = AssetStore::new(dir.path());
    let files = store.list_files(Path::new("entities"), "ent");

    assert_eq!(
        files,
        vec![
            PathBuf::from("entities").join("a.ENT"),
            PathBuf::from("entities").join("b.ent"),
        ]
    );
}

#[test]
fn list_files_on_missing_directory_is_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = AssetStore::new(dir.path());
    assert!(store.list_files(Path::new("entities"), "ent").is_empty());
}

#[test]
fn decodes_png_through_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("sheet.png"), png_bytes(8, 4)).expect("write png");

    let store = AssetStore::new(dir.path());
    let image = store
        .load_image(Path::new("sheet.png"))
        .expect("png should decode");

    assert_eq!((image.width(), image.height()), (8, 4));
    assert_eq!(image.pixel(3, 2), Some([3, 2, 7, 255]));
}

#[test]
fn decode_rejects_oversized_dimensions() {
    let limits = AssetLimits {
        max_width: 4,
        ..AssetLimits::default()
    };
    let err = decode_image(&png_bytes(8, 4), &limits).expect_err("too wide");
    assert!(matches!(err, AssetError::InvalidDimensions { width: 8, .. }));
}

#[test]
fn decode_reports_garbage_as_decode_error() {
    let err = decode_image(b"not an image", &AssetLimits::default()).expect_err("garbage");
    assert!(matches!(err, AssetError::Decode(_)));
}

#[test]
fn crop_clamps_to_image_bounds() {
    let image = decode_image(&png_bytes(8, 4), &AssetLimits::default()).expect("decode");
    let tile = image.crop(PixelRect {
        x: 6,
        y: 2,
        width: 4,
        height: 4,
    });
    assert_eq!((tile.width(), tile.height()), (2, 2));
    assert_eq!(tile.pixel(0, 0), Some([6, 2, 7, 255]));
}

#[test]
fn placeholder_has_border_and_label() {
    let image = render_placeholder(64, 64, "crate");
    assert_eq!((image.width(), image.height()), (64, 64));
    assert_eq!(image.pixel(0, 0), Some([255, 0, 255, 255]));
    assert_eq!(image.pixel(63, 63), Some([255, 0, 255, 255]));
    let white = (0..64)
        .flat_map(|y| (0..64).map(move |x| (x, y)))
        .filter(|&(x, y)| image.pixel(x, y) == Some([255, 255, 255, 255]))
        .count();
    assert!(white > 0, "label should be stamped into the placeholder");
}

#[test]
fn placeholder_survives_tiny_sizes() {
    let image = render_placeholder(3, 1, "long-name");
    assert_eq!((image.width(), image.height()), (3, 1));
    let empty = render_placeholder(0, 0, "x");
    assert!(empty.is_empty());
}

#[test]
fn memory_source_lists_only_direct_children() {
    let source = MemorySource::new()
        .with_file("entities/tree.ent", "<entity/>")
        .with_file("entities/tree.xml", "<sprites/>")
        .with_file("entities/deep/rock.ent", "<entity/>")
        .with_file("other/bush.ent", "<entity/>");

    let files = source.list_files(Path::new("entities"), "ent");

    assert_eq!(files, vec![PathBuf::from("entities/tree.ent")]);
    assert!(source.exists(Path::new("entities/tree.xml")));
    assert!(matches!(
        source.read_bytes(Path::new("entities/missing.png")),
        Err(AssetError::NotFound(_))
    ));
}
