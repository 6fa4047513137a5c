mod frame;
mod label;
mod params;
mod state;

pub use frame::{DataUrlError, EncodedFrame, FrameFormat, decode_data_url};
pub use label::{Prediction, Sentinel};
pub use params::CaptureParams;
pub use state::{ConnectionState, PredictionState};
