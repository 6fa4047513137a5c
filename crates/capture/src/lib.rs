mod controller;
mod scripted;
mod source;

pub use controller::{CaptureController, CaptureError};
pub use scripted::{JPEG_STUB, ScriptedSource};
pub use source::{FrameMetadata, VideoSource};
