//! End-to-end morph: load, gate, solve, render.

use std::path::Path;
use std::sync::Arc;

use image::RgbImage;

use crate::assets::decode::load_image;
use crate::assets::resize::{canvas_of, preprocess, resize_to_match};
use crate::config::MorphConfig;
use crate::encode::sink::FrameSink;
use crate::foundation::error::MorphResult;
use crate::gate::{AcceptAll, SubjectGate};
use crate::session::morph_session::{MorphSession, RenderStats};
use crate::session::progress::ProgressObserver;
use crate::solve::correspondence::Correspondence;

/// Result of a pipeline run that did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MorphOutcome {
    /// Every frame reached the sink.
    Rendered(RenderStats),
    /// The gate found no subject in the source image; nothing was rendered.
    NoSubject,
}

/// Configured morph pipeline.
pub struct MorphPipeline {
    config: MorphConfig,
    gate: Box<dyn SubjectGate>,
}

impl MorphPipeline {
    /// Pipeline with the given configuration, accepting every source image.
    pub fn new(config: MorphConfig) -> MorphResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            gate: Box::new(AcceptAll),
        })
    }

    /// Replace the subject gate.
    pub fn with_gate(mut self, gate: impl SubjectGate + 'static) -> Self {
        self.gate = Box::new(gate);
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &MorphConfig {
        &self.config
    }

    /// Load both images and build a session, or `None` when the gate rejects the source.
    pub fn prepare(&self, source: &Path, target: &Path) -> MorphResult<Option<MorphSession>> {
        let source = load_image(source)?;
        let source = preprocess(&source, self.config.target_height)?;
        if !self.admits(&source)? {
            return Ok(None);
        }
        let target = load_image(target)?;
        self.session_for(&source, &target).map(Some)
    }

    /// Same as [`MorphPipeline::prepare`] for images already in memory.
    pub fn prepare_images(
        &self,
        source: &RgbImage,
        target: &RgbImage,
    ) -> MorphResult<Option<MorphSession>> {
        let source = preprocess(source, self.config.target_height)?;
        if !self.admits(&source)? {
            return Ok(None);
        }
        self.session_for(&source, target).map(Some)
    }

    /// Morph `source` into `target` and stream every frame into `sink`.
    #[tracing::instrument(skip_all, fields(source = %source.display(), target = %target.display()))]
    pub fn run(
        &self,
        source: &Path,
        target: &Path,
        sink: &mut dyn FrameSink,
        progress: &mut dyn ProgressObserver,
    ) -> MorphResult<MorphOutcome> {
        let Some(session) = self.prepare(source, target)? else {
            return Ok(MorphOutcome::NoSubject);
        };
        tracing::info!(seed = session.seed(), "rendering morph");
        session.render(sink, progress).map(MorphOutcome::Rendered)
    }

    fn admits(&self, source: &RgbImage) -> MorphResult<bool> {
        let present = self.gate.contains_subject(source)?;
        if !present {
            tracing::info!("no subject detected in source image");
        }
        Ok(present)
    }

    fn session_for(&self, source: &RgbImage, target: &RgbImage) -> MorphResult<MorphSession> {
        let target = resize_to_match(target, canvas_of(source))?;
        let corr = Correspondence::solve(source, &target)?;
        MorphSession::new(Arc::new(corr), &self.config)
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
