//! # Capture session
//!
//! Ties the capture device, the inference connection, and the transcript
//! together behind one state machine. A session is created for one sitting
//! and discarded on exit; there is no background reconnection or retry.

mod config;
mod session;
mod status;

pub use config::SessionConfig;
pub use session::{CaptureOutcome, Session};
pub use status::{SessionSnapshot, SessionStatus};
