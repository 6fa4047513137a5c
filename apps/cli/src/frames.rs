use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use bytes::Bytes;

use sign_capture::{CaptureError, FrameMetadata, VideoSource};
use sign_interface::CaptureParams;

/// Replays still images from a directory as the capture device, cycling
/// through them in filename order. Stands in for a live camera on machines
/// without one.
pub struct FrameDirSource {
    metadata: FrameMetadata,
    frames: VecDeque<Bytes>,
}

impl FrameDirSource {
    pub fn open(dir: &Path, params: &CaptureParams) -> Result<Self, CaptureError> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(|e| CaptureError::AccessDenied(format!("{}: {e}", dir.display())))?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| {
                matches!(
                    path.extension().and_then(|ext| ext.to_str()),
                    Some("jpg" | "jpeg" | "png")
                )
            })
            .collect();
        paths.sort();

        let mut frames = VecDeque::new();
        for path in paths {
            let data = std::fs::read(&path)
                .map_err(|e| CaptureError::AccessDenied(format!("{}: {e}", path.display())))?;
            frames.push_back(Bytes::from(data));
        }
        if frames.is_empty() {
            return Err(CaptureError::AccessDenied(format!(
                "no frames found under {}",
                dir.display()
            )));
        }
        tracing::info!(count = frames.len(), dir = %dir.display(), "frame_dir_loaded");

        Ok(Self {
            // Replayed stills are served at the requested capture size.
            metadata: FrameMetadata {
                width: params.width,
                height: params.height,
            },
            frames,
        })
    }
}

impl VideoSource for FrameDirSource {
    fn metadata(&self) -> Option<FrameMetadata> {
        Some(self.metadata)
    }

    fn poll_frame(&mut self) -> Option<Bytes> {
        let frame = self.frames.pop_front()?;
        self.frames.push_back(frame.clone());
        Some(frame)
    }
}
