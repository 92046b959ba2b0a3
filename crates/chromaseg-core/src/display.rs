//! Display sinks, where walkthrough frames end up.
//!
//! A [`DisplaySink`] receives frames in order, is told where the walkthrough
//! would wait for the viewer, and is finished exactly once.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::image::Frame;
use crate::io::save_frame;

/// Receiver for rendered walkthrough frames.
pub trait DisplaySink {
    /// Present a labelled frame.
    fn show(&mut self, label: &str, frame: &Frame) -> Result<()>;

    /// The walkthrough waits for the viewer here.
    fn pause(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called once after the last frame.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes every frame as a numbered PNG into a directory.
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    /// Create the sink, creating `dir` if it does not exist.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl DisplaySink for DirectorySink {
    fn show(&mut self, label: &str, frame: &Frame) -> Result<()> {
        let name = format!("{:02}-{}.png", self.written.len(), slug(label));
        let path = self.dir.join(name);
        save_frame(&path, frame)?;
        tracing::debug!("wrote {}", path.display());
        self.written.push(path);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        tracing::info!(
            "wrote {} frames to {}",
            self.written.len(),
            self.dir.display()
        );
        Ok(())
    }
}

/// Forwards every call to several sinks, in order.
pub struct MultiSink {
    sinks: Vec<Box<dyn DisplaySink>>,
}

impl MultiSink {
    pub fn new(sinks: Vec<Box<dyn DisplaySink>>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: Box<dyn DisplaySink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl DisplaySink for MultiSink {
    fn show(&mut self, label: &str, frame: &Frame) -> Result<()> {
        self.sinks.iter_mut().try_for_each(|s| s.show(label, frame))
    }

    fn pause(&mut self) -> Result<()> {
        self.sinks.iter_mut().try_for_each(|s| s.pause())
    }

    fn finish(&mut self) -> Result<()> {
        self.sinks.iter_mut().try_for_each(|s| s.finish())
    }
}

/// Lowercase ASCII file stem: runs of anything else collapse to one `-`.
pub fn slug(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for c in label.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        "frame".to_string()
    } else {
        trimmed.to_string()
    }
}
