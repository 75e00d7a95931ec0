use super::*;
use crate::solve::correspondence::PixelTrack;

const RED: Rgb8 = Rgb8::new(255, 0, 0);
const BLUE: Rgb8 = Rgb8::new(0, 0, 255);

#[test]
fn untouched_pixels_keep_background() {
    let comp = Compositor::new(Canvas::new(3, 2), Rgb8::new(1, 2, 3));
    let frame = comp.composite(&[PixelPos::new(2, 1)], &[RED]).unwrap();
    assert_eq!(frame.data.len(), 3 * 2 * 3);
    assert_eq!(frame.pixel(PixelPos::new(2, 1)), Some(RED));
    assert_eq!(frame.pixel(PixelPos::new(0, 0)), Some(Rgb8::new(1, 2, 3)));
    assert_eq!(frame.pixel(PixelPos::new(3, 0)), None);
}

#[test]
fn default_background_is_black() {
    let comp = Compositor::new(Canvas::new(2, 2), Rgb8::black());
    let frame = comp.composite(&[], &[]).unwrap();
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn collisions_resolve_to_last_writer() {
    let comp = Compositor::new(Canvas::new(2, 2), Rgb8::black());
    let at = PixelPos::new(1, 1);

    let frame = comp.composite(&[at, at], &[RED, BLUE]).unwrap();
    assert_eq!(frame.pixel(at), Some(BLUE));

    let frame = comp.composite(&[at, at], &[BLUE, RED]).unwrap();
    assert_eq!(frame.pixel(at), Some(RED));
}

#[test]
fn track_collisions_follow_correspondence_order() {
    let canvas = Canvas::new(2, 1);
    let tracks = vec![
        PixelTrack {
            start: PixelPos::new(0, 0),
            end: PixelPos::new(0, 0),
            color: RED,
        },
        PixelTrack {
            start: PixelPos::new(1, 0),
            end: PixelPos::new(0, 0),
            color: BLUE,
        },
    ];
    let corr = Correspondence::from_tracks(canvas, tracks).unwrap();
    let comp = Compositor::new(canvas, Rgb8::black());
    let ends: Vec<_> = corr.tracks().iter().map(|t| t.end).collect();
    let frame = comp.composite_tracks(&corr, &ends).unwrap();
    assert_eq!(frame.pixel(PixelPos::new(0, 0)), Some(BLUE));
    assert_eq!(frame.pixel(PixelPos::new(1, 0)), Some(Rgb8::black()));
}

#[test]
fn length_mismatch_is_rejected() {
    let comp = Compositor::new(Canvas::new(2, 2), Rgb8::black());
    assert!(comp.composite(&[PixelPos::new(0, 0)], &[]).is_err());
}

#[test]
fn compositor_keeps_no_state_between_frames() {
    let comp = Compositor::new(Canvas::new(2, 2), Rgb8::black());
    let _ = comp.composite(&[PixelPos::new(0, 0)], &[RED]).unwrap();
    let second = comp.composite(&[PixelPos::new(1, 1)], &[BLUE]).unwrap();
    assert_eq!(second.pixel(PixelPos::new(0, 0)), Some(Rgb8::black()));
}
