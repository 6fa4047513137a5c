mod log;

pub use log::{Token, TranscriptLog};
