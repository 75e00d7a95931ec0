use super::*;

#[test]
fn preprocess_keeps_aspect_and_even_dims() {
    let img = RgbImage::new(1000, 600);
    let out = preprocess(&img, 480).unwrap();
    // 480 * 1000/600 = 800
    assert_eq!(out.dimensions(), (800, 480));

    let odd = RgbImage::new(641, 480);
    let out = preprocess(&odd, 480).unwrap();
    assert_eq!(out.dimensions(), (640, 480));

    let out = preprocess(&RgbImage::new(10, 10), 7).unwrap();
    assert_eq!(out.dimensions(), (6, 6));
}

#[test]
fn preprocess_tiny_aspect_still_has_two_columns() {
    let tall = RgbImage::new(1, 1000);
    let out = preprocess(&tall, 100).unwrap();
    assert_eq!(out.dimensions(), (2, 100));
}

#[test]
fn preprocess_rejects_bad_inputs() {
    assert!(matches!(
        preprocess(&RgbImage::new(0, 0), 480),
        Err(MorphError::Precondition(_))
    ));
    assert!(matches!(
        preprocess(&RgbImage::new(4, 4), 1),
        Err(MorphError::Precondition(_))
    ));
}

#[test]
fn resize_to_match_is_exact_and_identity_when_equal() {
    let mut img = RgbImage::new(4, 2);
    img.put_pixel(1, 1, image::Rgb([9, 8, 7]));

    let same = resize_to_match(&img, Canvas::new(4, 2)).unwrap();
    assert_eq!(same, img);

    let other = resize_to_match(&img, Canvas::new(6, 8)).unwrap();
    assert_eq!(canvas_of(&other), Canvas::new(6, 8));

    assert!(resize_to_match(&img, Canvas::new(0, 8)).is_err());
}
