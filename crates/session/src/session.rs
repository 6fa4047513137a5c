use sign_capture::{CaptureController, CaptureError, VideoSource};
use sign_interface::{ConnectionState, Prediction, PredictionState, Sentinel};
use sign_transcript::TranscriptLog;
use sign_ws_client::WsConnection;

use crate::config::SessionConfig;
use crate::status::{SessionSnapshot, SessionStatus};

/// What a `capture` call did. Guard failures are reported, never thrown; a
/// rejected capture leaves every piece of state exactly where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Frame encoded and transmitted; the exchange gate is now `InFlight`.
    Sent,
    /// A previous capture is still awaiting its reply.
    AlreadyInFlight,
    WebcamNotReady,
    ConnectionNotReady,
}

/// One sitting: device stream in, classified labels out, transcript built
/// from the labels the user accepts.
///
/// Exactly one capture exchange is outstanding at any time, enforced by the
/// `Idle`/`InFlight` gate. Resource failures never tear the session down on
/// their own; they surface through `status` and block further captures.
pub struct Session<S: VideoSource> {
    conn: Option<WsConnection>,
    capture: Option<CaptureController<S>>,
    webcam_error: Option<String>,
    transcript: TranscriptLog,
    prediction_state: PredictionState,
    current: Prediction,
    torn_down: bool,
}

impl<S: VideoSource> Session<S> {
    /// Acquires both resources eagerly: one connection attempt against the
    /// configured endpoint plus installation of the capture device. Failures
    /// are absorbed into observable state, so starting never fails hard.
    pub async fn start(config: SessionConfig, source: Result<S, CaptureError>) -> Self {
        let mut builder = WsConnection::builder(&config.endpoint);
        for (name, value) in &config.extra_headers {
            builder = builder.header(name, value);
        }

        let conn = match builder.build() {
            Ok(mut conn) => {
                if let Err(e) = conn.open().await {
                    tracing::warn!(error = %e, "session_connection_failed");
                }
                Some(conn)
            }
            Err(e) => {
                tracing::warn!(error = %e, endpoint = %config.endpoint, "invalid_endpoint");
                None
            }
        };

        let (capture, webcam_error) = match source {
            Ok(source) => (Some(CaptureController::new(source)), None),
            Err(e) => {
                tracing::warn!(error = %e, "webcam_unavailable");
                (None, Some(e.to_string()))
            }
        };

        tracing::info!("session_started");
        Self {
            conn,
            capture,
            webcam_error,
            transcript: TranscriptLog::new(),
            prediction_state: PredictionState::Idle,
            current: Prediction::default(),
            torn_down: false,
        }
    }

    /// Snapshots the current video frame and transmits it for classification.
    /// Rejected without side effects unless the gate is `Idle`, the device
    /// has produced a decodable frame, and the connection is `Ready`.
    pub async fn capture(&mut self) -> CaptureOutcome {
        if self.prediction_state == PredictionState::InFlight {
            tracing::debug!("capture_rejected_in_flight");
            return CaptureOutcome::AlreadyInFlight;
        }
        if self.webcam_error.is_some() {
            return CaptureOutcome::WebcamNotReady;
        }
        let Some(controller) = self.capture.as_mut() else {
            return CaptureOutcome::WebcamNotReady;
        };
        if !controller.ensure_ready() {
            return CaptureOutcome::WebcamNotReady;
        }

        let ready = self
            .conn
            .as_ref()
            .is_some_and(|conn| conn.status() == ConnectionState::Ready);
        if !ready {
            return CaptureOutcome::ConnectionNotReady;
        }

        let frame = match controller.capture_frame() {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(error = %e, "capture_frame_failed");
                return CaptureOutcome::WebcamNotReady;
            }
        };

        let conn = match self.conn.as_mut() {
            Some(conn) => conn,
            None => return CaptureOutcome::ConnectionNotReady,
        };
        match conn.send(frame.to_data_url()).await {
            Ok(()) => {
                self.prediction_state = PredictionState::InFlight;
                self.current = Prediction::Sentinel(Sentinel::Pending);
                tracing::debug!(bytes = frame.data.len(), "capture_sent");
                CaptureOutcome::Sent
            }
            Err(e) => {
                tracing::warn!(error = %e, "capture_send_failed");
                CaptureOutcome::ConnectionNotReady
            }
        }
    }

    /// Awaits the connection's next inbound payload and applies it. A peer
    /// close or transport failure while a capture is outstanding also settles
    /// the gate back to `Idle`, with `error` as the displayed label. There is
    /// no timeout: a reply the service never sends keeps the gate in flight.
    pub async fn await_response(&mut self) {
        if self.torn_down {
            tracing::warn!("await_response_after_teardown");
            return;
        }
        let outcome = match self.conn.as_mut() {
            Some(conn) => conn.recv().await,
            None => {
                self.settle_after_loss();
                return;
            }
        };

        match outcome {
            Ok(Some(raw)) => self.apply_prediction(&raw),
            Ok(None) => {
                tracing::info!("connection_lost_while_waiting");
                self.settle_after_loss();
            }
            Err(e) => {
                tracing::warn!(error = %e, "transport_failed_while_waiting");
                self.settle_after_loss();
            }
        }
    }

    /// Applies one inbound classification payload. Guarded against stale
    /// deliveries: after teardown this is a logged no-op, so a late reply can
    /// never mutate a session whose resources are gone.
    pub fn apply_prediction(&mut self, raw: &str) {
        if self.torn_down {
            tracing::warn!(label = raw, "stale_prediction_ignored");
            return;
        }
        if self.prediction_state == PredictionState::Idle {
            tracing::debug!(label = raw, "unsolicited_prediction");
        }
        self.current = Prediction::from_raw(raw);
        self.prediction_state = PredictionState::Idle;
        tracing::debug!(label = %self.current, "prediction_applied");
    }

    /// Pushes the current label into the transcript. Returns `false` when the
    /// label is a sentinel (or empty) and nothing was appended.
    pub fn accept_current(&mut self) -> bool {
        let accepted = self.transcript.append(&self.current);
        if !accepted {
            tracing::debug!(label = %self.current, "accept_rejected_sentinel");
        }
        accepted
    }

    pub fn insert_space(&mut self) {
        self.transcript.insert_space();
    }

    pub fn delete_last(&mut self) {
        self.transcript.delete_last();
    }

    /// Lets the device make readiness progress outside of a capture call.
    /// Returns the latched readiness.
    pub fn poll_webcam(&mut self) -> bool {
        self.webcam_error.is_none()
            && self
                .capture
                .as_mut()
                .is_some_and(|controller| controller.ensure_ready())
    }

    /// Closes the connection and releases the capture device. Idempotent and
    /// unconditional: runs the same way on every exit path, whatever the
    /// exchange gate was doing. `Drop` covers the path where this graceful
    /// variant was never awaited.
    pub async fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        if let Some(conn) = self.conn.as_mut() {
            conn.close().await;
        }
        self.conn = None;
        self.capture = None;
        tracing::info!("session_torn_down");
    }

    pub fn status(&self) -> SessionStatus {
        if self.webcam_error.is_some() {
            return SessionStatus::WebcamError;
        }
        match self.connection_state() {
            ConnectionState::Connecting => SessionStatus::Connecting,
            ConnectionState::Closed => SessionStatus::Offline,
            ConnectionState::Error => SessionStatus::ConnectionError,
            ConnectionState::Ready => {
                if !self.webcam_ready() {
                    SessionStatus::WebcamInitializing
                } else if self.prediction_state == PredictionState::InFlight {
                    SessionStatus::Analyzing
                } else {
                    SessionStatus::Ready
                }
            }
        }
    }

    pub fn webcam_ready(&self) -> bool {
        self.webcam_error.is_none()
            && self
                .capture
                .as_ref()
                .is_some_and(|controller| controller.is_ready())
    }

    pub fn current(&self) -> &Prediction {
        &self.current
    }

    pub fn current_label(&self) -> String {
        self.current.to_string()
    }

    pub fn transcript_text(&self) -> String {
        self.transcript.text()
    }

    pub fn transcript(&self) -> &TranscriptLog {
        &self.transcript
    }

    pub fn prediction_state(&self) -> PredictionState {
        self.prediction_state
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let status = self.status();
        SessionSnapshot {
            status,
            status_text: status.to_string(),
            current_label: self.current_label(),
            transcript_text: self.transcript_text(),
            connection_state: self.connection_state(),
            prediction_state: self.prediction_state,
            webcam_ready: self.webcam_ready(),
        }
    }

    fn connection_state(&self) -> ConnectionState {
        match &self.conn {
            Some(conn) => conn.status(),
            None if self.torn_down => ConnectionState::Closed,
            None => ConnectionState::Error,
        }
    }

    // The awaited reply can never arrive anymore; release the gate so the
    // session is usable again if the host keeps it around. A torn-down
    // session is frozen and never settled.
    fn settle_after_loss(&mut self) {
        if !self.torn_down && self.prediction_state == PredictionState::InFlight {
            self.prediction_state = PredictionState::Idle;
            self.current = Prediction::Sentinel(Sentinel::Error);
        }
    }
}

impl<S: VideoSource> Drop for Session<S> {
    fn drop(&mut self) {
        if !self.torn_down {
            // Dropping the socket and device releases both, without the
            // close handshake.
            self.torn_down = true;
            self.conn = None;
            self.capture = None;
            tracing::debug!("session_dropped_without_teardown");
        }
    }
}
