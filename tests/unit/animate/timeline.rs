use super::*;

#[test]
fn samples_cover_endpoints_and_increase() {
    for n in [2u64, 3, 7, 120, 150, 1001] {
        let tl = Timeline::new(n).unwrap();
        let s = tl.samples();
        assert_eq!(s.len() as u64, n);
        assert_eq!(s[0], 0.0);
        assert_eq!(*s.last().unwrap(), 1.0);
        for w in s.windows(2) {
            assert!(w[0] < w[1], "not strictly increasing for n={n}");
        }
    }
}

#[test]
fn t_at_matches_samples() {
    let tl = Timeline::new(5).unwrap();
    let s = tl.samples();
    for (i, t) in s.iter().enumerate() {
        assert_eq!(tl.t_at(FrameIndex(i as u64)).unwrap(), *t);
    }
    assert_eq!(tl.t_at(FrameIndex(2)).unwrap(), 0.5);
    assert!(tl.t_at(FrameIndex(5)).is_err());
}

#[test]
fn fewer_than_two_frames_is_rejected() {
    assert!(matches!(Timeline::new(0), Err(MorphError::Precondition(_))));
    assert!(matches!(Timeline::new(1), Err(MorphError::Precondition(_))));
    assert_eq!(Timeline::new(2).unwrap().samples(), vec![0.0, 1.0]);
}
