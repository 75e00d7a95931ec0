use std::path::PathBuf;

use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Canvas;
use crate::foundation::error::MorphError;
use crate::session::progress::NoProgress;

struct RejectAll;

impl SubjectGate for RejectAll {
    fn contains_subject(&self, _image: &RgbImage) -> MorphResult<bool> {
        Ok(false)
    }
}

struct BrokenGate;

impl SubjectGate for BrokenGate {
    fn contains_subject(&self, _image: &RgbImage) -> MorphResult<bool> {
        Err(MorphError::detector("model missing"))
    }
}

fn gradient(w: u32, h: u32) -> RgbImage {
    RgbImage::from_fn(w, h, |x, y| image::Rgb([(x * 7) as u8, (y * 11) as u8, 128]))
}

fn small_config() -> MorphConfig {
    MorphConfig {
        frame_count: 3,
        target_height: 10,
        seed: Some(5),
        ..MorphConfig::default()
    }
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pixmorph_pipeline_{}_{name}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn prepare_images_resizes_target_onto_source_canvas() {
    let pipeline = MorphPipeline::new(small_config()).unwrap();
    let session = pipeline
        .prepare_images(&gradient(40, 20), &gradient(7, 13))
        .unwrap()
        .expect("accepted");
    assert_eq!(session.correspondence().canvas(), Canvas::new(20, 10));
    assert_eq!(session.correspondence().len(), 200);
    assert_eq!(session.seed(), 5);
}

#[test]
fn run_streams_every_frame() {
    let dir = scratch_dir("run");
    let src = dir.join("source.png");
    let dst = dir.join("target.png");
    gradient(30, 20).save(&src).unwrap();
    gradient(16, 16).save(&dst).unwrap();

    let pipeline = MorphPipeline::new(small_config()).unwrap();
    let mut sink = InMemorySink::new();
    let outcome = pipeline.run(&src, &dst, &mut sink, &mut NoProgress).unwrap();

    assert_eq!(
        outcome,
        MorphOutcome::Rendered(RenderStats {
            frames_total: 3,
            frames_emitted: 3
        })
    );
    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height), (14, 10));
    assert_eq!(sink.frames().len(), 3);
    assert!(sink.is_ended());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn rejected_source_skips_target_and_sink() {
    let dir = scratch_dir("reject");
    let src = dir.join("source.png");
    gradient(12, 12).save(&src).unwrap();

    let pipeline = MorphPipeline::new(small_config())
        .unwrap()
        .with_gate(RejectAll);
    let mut sink = InMemorySink::new();
    // The target does not exist; it must never be read.
    let outcome = pipeline
        .run(&src, &dir.join("missing.png"), &mut sink, &mut NoProgress)
        .unwrap();

    assert_eq!(outcome, MorphOutcome::NoSubject);
    assert!(sink.config().is_none());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn gate_errors_propagate() {
    let pipeline = MorphPipeline::new(small_config())
        .unwrap()
        .with_gate(BrokenGate);
    assert!(matches!(
        pipeline.prepare_images(&gradient(8, 8), &gradient(8, 8)),
        Err(MorphError::Detector(_))
    ));
}

#[test]
fn missing_source_is_an_error() {
    let pipeline = MorphPipeline::new(small_config()).unwrap();
    let mut sink = InMemorySink::new();
    let dir = scratch_dir("missing");
    assert!(
        pipeline
            .run(
                &dir.join("nope.png"),
                &dir.join("nope2.png"),
                &mut sink,
                &mut NoProgress
            )
            .is_err()
    );
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = MorphConfig {
        frame_count: 1,
        ..MorphConfig::default()
    };
    assert!(matches!(
        MorphPipeline::new(cfg),
        Err(MorphError::Precondition(_))
    ));
}
