use bytes::Bytes;

/// Stream dimensions as negotiated by the device. Captured frames carry
/// these, not the requested constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameMetadata {
    pub width: u32,
    pub height: u32,
}

/// The platform device seam. Implementations own the actual stream — a
/// webcam, a directory of stills, a scripted test source — and surface the
/// latest encoded still on demand.
///
/// Both methods are non-blocking: stream acquisition happens when the
/// implementation is constructed, on the host's schedule. `metadata()` is
/// `None` until the stream has been negotiated; `poll_frame()` is `None`
/// until a new still has been produced since the previous poll.
pub trait VideoSource: Send {
    fn metadata(&self) -> Option<FrameMetadata>;

    fn poll_frame(&mut self) -> Option<Bytes>;
}
