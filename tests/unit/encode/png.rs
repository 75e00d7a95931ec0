use super::*;
use crate::foundation::core::{Canvas, Fps, PixelPos, Rgb8};

#[test]
fn writes_numbered_pngs() {
    let dir = PathBuf::from("target").join("png_unit").join("seq");
    let _ = std::fs::remove_dir_all(&dir);

    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(SinkConfig {
        width: 3,
        height: 2,
        fps: Fps::default(),
    })
    .unwrap();

    let mut frame = FrameRgb::filled(Canvas::new(3, 2), Rgb8::black());
    frame.put(PixelPos::new(2, 1), Rgb8::new(9, 99, 199));
    sink.push_frame(FrameIndex(0), &frame).unwrap();
    sink.push_frame(FrameIndex(1), &frame).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.written(), 2);
    let path = sink.frame_path(FrameIndex(1));
    assert!(path.ends_with("frame_00001.png"));
    let back = image::open(&path).unwrap().to_rgb8();
    assert_eq!(back.dimensions(), (3, 2));
    assert_eq!(back.get_pixel(2, 1).0, [9, 99, 199]);
}
