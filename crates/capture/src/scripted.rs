use std::collections::VecDeque;

use bytes::Bytes;

use crate::source::{FrameMetadata, VideoSource};

/// Minimal JPEG-magic still used by tests and demos.
pub const JPEG_STUB: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x01, 0x02, 0xFF, 0xD9];

/// Deterministic device for tests and replay tooling: plays a fixed queue of
/// stills, with stream metadata optionally withheld to model a device that
/// never finishes negotiating.
pub struct ScriptedSource {
    metadata: Option<FrameMetadata>,
    frames: VecDeque<Bytes>,
}

impl ScriptedSource {
    pub fn new(width: u32, height: u32, frames: impl IntoIterator<Item = Bytes>) -> Self {
        Self {
            metadata: Some(FrameMetadata { width, height }),
            frames: frames.into_iter().collect(),
        }
    }

    pub fn without_metadata(frames: impl IntoIterator<Item = Bytes>) -> Self {
        Self {
            metadata: None,
            frames: frames.into_iter().collect(),
        }
    }

    pub fn push_frame(&mut self, frame: Bytes) {
        self.frames.push_back(frame);
    }

    pub fn set_metadata(&mut self, width: u32, height: u32) {
        self.metadata = Some(FrameMetadata { width, height });
    }
}

impl VideoSource for ScriptedSource {
    fn metadata(&self) -> Option<FrameMetadata> {
        self.metadata
    }

    fn poll_frame(&mut self) -> Option<Bytes> {
        self.frames.pop_front()
    }
}
