use std::path::{Path, PathBuf};

use slidecast::{SlidecastError, prepare_config};

fn write_png(path: &Path, width: u32, height: u32, rgba: [u8; 4]) {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

fn project_json(images: &[&str], overlay_inner: Option<&str>) -> String {
    let mut spec = serde_json::json!({
        "images": images,
        "inner_canvas": { "width": 64, "height": 64 },
        "outer_canvas": { "width": 128, "height": 128 },
        "transition": { "kind": "push", "direction": "left", "duration_ms": 500 },
        "export": { "duration_seconds": 4, "fps": 10 }
    });
    if let Some(overlay) = overlay_inner {
        spec["overlay_inner"] = serde_json::json!(overlay);
    }
    serde_json::to_string_pretty(&spec).unwrap()
}

#[test]
fn prepare_config_loads_images_relative_to_project_root() {
    let dir = PathBuf::from("target").join("project_load_ok");
    std::fs::create_dir_all(&dir).unwrap();
    write_png(&dir.join("a.png"), 10, 6, [255, 0, 0, 255]);
    write_png(&dir.join("b.png"), 8, 8, [0, 255, 0, 255]);
    write_png(&dir.join("frame.png"), 4, 4, [255, 255, 255, 128]);

    let json = project_json(&["a.png", "b.png"], Some("frame.png"));
    let spec: slidecast::ProjectSpec = serde_json::from_str(&json).unwrap();
    let config = prepare_config(&spec, &dir).unwrap();

    assert_eq!(config.images.len(), 2);
    assert_eq!((config.images[0].width, config.images[0].height), (10, 6));
    let overlay = config.overlay_inner.as_ref().unwrap();
    assert_eq!((overlay.width, overlay.height), (4, 4));
    assert!(config.overlay_outer.is_none());

    // Overlay alpha is premultiplied on load.
    assert_eq!(&overlay.rgba8_premul[0..4], &[128, 128, 128, 128]);
}

#[test]
fn prepare_config_reports_missing_image_path() {
    let dir = PathBuf::from("target").join("project_load_missing");
    std::fs::create_dir_all(&dir).unwrap();
    write_png(&dir.join("a.png"), 4, 4, [255, 0, 0, 255]);

    let json = project_json(&["a.png", "nope.png"], None);
    let spec: slidecast::ProjectSpec = serde_json::from_str(&json).unwrap();

    let err = prepare_config(&spec, &dir).unwrap_err();
    assert!(matches!(err, SlidecastError::Decode(_)));
    assert!(err.to_string().contains("nope.png"));
}

#[test]
fn prepare_config_validates_after_loading() {
    let dir = PathBuf::from("target").join("project_load_invalid");
    std::fs::create_dir_all(&dir).unwrap();
    write_png(&dir.join("a.png"), 4, 4, [255, 0, 0, 255]);

    let json = project_json(&["a.png"], None);
    let mut spec: slidecast::ProjectSpec = serde_json::from_str(&json).unwrap();
    spec.export.fps = 0;

    let err = prepare_config(&spec, &dir).unwrap_err();
    assert!(matches!(err, SlidecastError::Validation(_)));
}
