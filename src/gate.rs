//! Subject-presence gating.
//!
//! The pipeline only animates images in which a gate reports a subject.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use image::RgbImage;

use crate::foundation::error::{MorphError, MorphResult};

/// Yes/no predicate over a prepared source image.
pub trait SubjectGate: Send + Sync {
    /// Return `true` when the image contains a subject worth animating.
    fn contains_subject(&self, image: &RgbImage) -> MorphResult<bool>;
}

/// Gate that accepts every image.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl SubjectGate for AcceptAll {
    fn contains_subject(&self, _image: &RgbImage) -> MorphResult<bool> {
        Ok(true)
    }
}

/// Gate backed by an external detector program.
///
/// The image is written as PNG to a temporary file whose path is appended to `args`. Exit
/// status 0 means a subject was found, 1 means none was found; anything else is an error.
#[derive(Clone, Debug)]
pub struct CommandGate {
    program: OsString,
    args: Vec<OsString>,
}

impl CommandGate {
    /// Create a gate running `program args... <image.png>`.
    pub fn new(
        program: impl Into<OsString>,
        args: impl IntoIterator<Item = impl Into<OsString>>,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a gate from a command line split on whitespace (first word is the program).
    pub fn from_command_line(line: &str) -> MorphResult<Self> {
        let mut words = line.split_whitespace();
        let program = words
            .next()
            .ok_or_else(|| MorphError::config("detector command is empty"))?;
        Ok(Self::new(program, words))
    }
}

impl SubjectGate for CommandGate {
    fn contains_subject(&self, image: &RgbImage) -> MorphResult<bool> {
        let probe = TempPng::write(image)?;

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(&probe.0)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                MorphError::detector(format!(
                    "failed to run detector '{}': {e}",
                    self.program.to_string_lossy()
                ))
            })?;

        match output.status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(MorphError::detector(format!(
                "detector '{}' exited with status {}: {}",
                self.program.to_string_lossy(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ))),
        }
    }
}

struct TempPng(PathBuf);

impl TempPng {
    fn write(image: &RgbImage) -> MorphResult<Self> {
        let path = std::env::temp_dir().join(format!(
            "pixmorph_gate_{}_{}.png",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0)
        ));
        image
            .save_with_format(&path, image::ImageFormat::Png)
            .map_err(|e| MorphError::detector(format!("write probe image: {e}")))?;
        Ok(Self(path))
    }
}

impl Drop for TempPng {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

#[cfg(test)]
#[path = "../tests/unit/gate/gate.rs"]
mod tests;
