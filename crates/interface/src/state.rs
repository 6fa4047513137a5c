/// Transport lifecycle as observed by the session. `Connecting` is the
/// initial state; `Ready` ↔ `Error`/`Closed` transitions are driven by the
/// transport, everything else is monotonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Connecting,
    Ready,
    Closed,
    Error,
}

/// The one-request-at-a-time exchange gate. `InFlight` means a capture
/// payload has been transmitted and its reply has not arrived; at most one
/// exchange is outstanding system-wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub enum PredictionState {
    Idle,
    InFlight,
}
