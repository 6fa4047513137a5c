use sign_interface::{ConnectionState, PredictionState};

/// Single user-facing status line, folded from the connection state, the
/// device readiness, and the exchange gate. Device failure wins over
/// everything; an in-flight exchange only shows once both resources are up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, strum::Display)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    #[strum(serialize = "Webcam Error")]
    WebcamError,
    #[strum(serialize = "Initializing Webcam")]
    WebcamInitializing,
    #[strum(serialize = "Connecting")]
    Connecting,
    #[strum(serialize = "Ready")]
    Ready,
    #[strum(serialize = "Analyzing")]
    Analyzing,
    #[strum(serialize = "Offline")]
    Offline,
    #[strum(serialize = "Connection Error")]
    ConnectionError,
}

/// Everything a presentation layer needs to render one frame of UI. This is
/// the rendering contract: consumers read the snapshot, never the session's
/// internals.
#[derive(Debug, Clone, serde::Serialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub status_text: String,
    pub current_label: String,
    pub transcript_text: String,
    pub connection_state: ConnectionState,
    pub prediction_state: PredictionState,
    pub webcam_ready: bool,
}
