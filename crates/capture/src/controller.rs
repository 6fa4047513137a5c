use bytes::Bytes;

use sign_interface::{EncodedFrame, FrameFormat};

use crate::source::{FrameMetadata, VideoSource};

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// Stream metadata or a first decodable frame has not arrived yet.
    #[error("capture device is not ready")]
    NotReady,

    /// Device denied or unavailable. Permanent for the owning session.
    #[error("capture device unavailable: {0}")]
    AccessDenied(String),
}

/// Owns the video capture device and produces an encoded single-frame
/// snapshot on demand.
pub struct CaptureController<S: VideoSource> {
    source: S,
    // Last known-good still, reused across captures.
    scratch: Vec<u8>,
    metadata: Option<FrameMetadata>,
    ready: bool,
}

impl<S: VideoSource> CaptureController<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            scratch: Vec::new(),
            metadata: None,
            ready: false,
        }
    }

    /// True once the stream has both metadata and at least one decodable
    /// frame. Latches for the session's lifetime.
    pub fn ensure_ready(&mut self) -> bool {
        if self.ready {
            return true;
        }
        let Some(metadata) = self.source.metadata() else {
            return false;
        };
        self.refresh_scratch();
        if self.scratch.is_empty() {
            return false;
        }
        self.metadata = Some(metadata);
        self.ready = true;
        tracing::debug!(
            width = metadata.width,
            height = metadata.height,
            "capture_ready"
        );
        true
    }

    /// Snapshot of the current video frame as a compact encoded still at the
    /// device's native dimensions. No side effect beyond scratch-buffer
    /// reuse; safe to call repeatedly.
    pub fn capture_frame(&mut self) -> Result<EncodedFrame, CaptureError> {
        if !self.ensure_ready() {
            return Err(CaptureError::NotReady);
        }
        self.refresh_scratch();

        let metadata = self.metadata.ok_or(CaptureError::NotReady)?;
        EncodedFrame::new(
            metadata.width,
            metadata.height,
            Bytes::copy_from_slice(&self.scratch),
        )
        .ok_or(CaptureError::NotReady)
    }

    /// Read-only view of the latched readiness flag; `ensure_ready` is the
    /// polling variant that can advance it.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Access to the underlying device, for hosts that feed it themselves.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    // Pulls the newest still into the scratch buffer, keeping the previous
    // one when the device produced nothing new or an undecodable blob.
    fn refresh_scratch(&mut self) {
        if let Some(frame) = self.source.poll_frame() {
            if FrameFormat::sniff(&frame).is_some() {
                self.scratch.clear();
                self.scratch.extend_from_slice(&frame);
            } else {
                tracing::debug!(len = frame.len(), "discarding_undecodable_frame");
            }
        }
    }
}
