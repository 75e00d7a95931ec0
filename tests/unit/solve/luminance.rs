use super::*;

fn gray_samples(values: &[u8]) -> Vec<PixelSample> {
    let img = RgbImage::from_fn(values.len() as u32, 1, |x, _| {
        let v = values[x as usize];
        image::Rgb([v, v, v])
    });
    sample_pixels(&img)
}

#[test]
fn weights_follow_channel_roles() {
    assert!((luminance(Rgb8::new(255, 0, 0)) - 0.299 * 255.0).abs() < 1e-9);
    assert!((luminance(Rgb8::new(0, 255, 0)) - 0.587 * 255.0).abs() < 1e-9);
    assert!((luminance(Rgb8::new(0, 0, 255)) - 0.114 * 255.0).abs() < 1e-9);
    assert!(luminance(Rgb8::new(0, 255, 0)) > luminance(Rgb8::new(255, 0, 0)));
}

#[test]
fn sample_pixels_is_row_major() {
    let img = RgbImage::from_fn(2, 2, |x, y| image::Rgb([x as u8, y as u8, 0]));
    let samples = sample_pixels(&img);
    let positions: Vec<_> = samples.iter().map(|s| (s.index, s.position)).collect();
    assert_eq!(
        positions,
        vec![
            (0, PixelPos::new(0, 0)),
            (1, PixelPos::new(1, 0)),
            (2, PixelPos::new(0, 1)),
            (3, PixelPos::new(1, 1)),
        ]
    );
    assert_eq!(samples[3].color, Rgb8::new(1, 1, 0));
}

#[test]
fn ranking_is_ascending_permutation() {
    let samples = gray_samples(&[200, 3, 90, 17, 255, 0]);
    let order = rank_by_luminance(&samples);
    assert_eq!(order, vec![5, 1, 3, 2, 0, 4]);
    for w in order.windows(2) {
        assert!(samples[w[0]].luminance <= samples[w[1]].luminance);
    }
}

#[test]
fn ties_keep_original_index_order() {
    let samples = gray_samples(&[50, 10, 50, 10, 50, 10]);
    assert_eq!(rank_by_luminance(&samples), vec![1, 3, 5, 0, 2, 4]);

    // Different colors, identical luminance.
    let img = RgbImage::from_fn(3, 1, |_, _| image::Rgb([0, 0, 0]));
    let mut samples = sample_pixels(&img);
    for s in &mut samples {
        s.luminance = 42.0;
    }
    assert_eq!(rank_by_luminance(&samples), vec![0, 1, 2]);
}

#[test]
fn ranking_is_reproducible_on_large_inputs() {
    let img = RgbImage::from_fn(97, 61, |x, y| {
        let v = ((x * 7 + y * 13) % 5) as u8;
        image::Rgb([v, v, v])
    });
    let samples = sample_pixels(&img);
    let a = rank_by_luminance(&samples);
    let b = rank_by_luminance(&samples);
    assert_eq!(a, b);
    for w in a.windows(2) {
        let (la, lb) = (samples[w[0]].luminance, samples[w[1]].luminance);
        assert!(la < lb || (la == lb && w[0] < w[1]));
    }
}
