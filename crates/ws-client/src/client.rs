use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::ClientRequestBuilder;
use tokio_tungstenite::tungstenite::http::Uri;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use sign_interface::ConnectionState;

use crate::error::WsError;

pub struct WsConnectionBuilder {
    endpoint: String,
    extra_headers: Vec<(String, String)>,
}

impl WsConnectionBuilder {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            extra_headers: Vec::new(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    pub fn build(self) -> Result<WsConnection, WsError> {
        let uri: Uri = self.endpoint.parse()?;
        let mut request = ClientRequestBuilder::new(uri);
        for (name, value) in self.extra_headers {
            request = request.with_header(name, value);
        }
        Ok(WsConnection {
            state: ConnectionState::Connecting,
            request,
            stream: None,
        })
    }
}

/// One persistent bidirectional connection to the inference service.
///
/// Exactly one capture payload is ever outstanding on this connection, so
/// replies need no correlation id; the transport's own message ordering is
/// the contract.
pub struct WsConnection {
    state: ConnectionState,
    request: ClientRequestBuilder,
    stream: Option<WebSocketStream<MaybeTlsStream<TcpStream>>>,
}

impl WsConnection {
    pub fn builder(endpoint: impl Into<String>) -> WsConnectionBuilder {
        WsConnectionBuilder::new(endpoint)
    }

    pub fn status(&self) -> ConnectionState {
        self.state
    }

    /// Establishes the transport. Single attempt: success lands in `Ready`,
    /// failure in `Error`. No retry or reconnection is performed here.
    pub async fn open(&mut self) -> Result<(), WsError> {
        if self.state != ConnectionState::Connecting {
            return Err(WsError::AlreadyOpened { state: self.state });
        }

        match connect_async(self.request.clone()).await {
            Ok((stream, _response)) => {
                self.stream = Some(stream);
                self.state = ConnectionState::Ready;
                tracing::info!("connection_established");
                Ok(())
            }
            Err(e) => {
                self.state = ConnectionState::Error;
                tracing::warn!(error = %e, "connection_failed");
                Err(WsError::Transport(e))
            }
        }
    }

    /// Transmits one text payload. Nothing is queued or buffered when the
    /// connection is not `Ready`.
    pub async fn send(&mut self, payload: String) -> Result<(), WsError> {
        if self.state != ConnectionState::Ready {
            return Err(WsError::ConnectionUnavailable { state: self.state });
        }
        let Some(stream) = self.stream.as_mut() else {
            return Err(WsError::ConnectionUnavailable { state: self.state });
        };

        if let Err(e) = stream.send(Message::Text(payload.into())).await {
            self.state = ConnectionState::Error;
            self.stream = None;
            tracing::warn!(error = %e, "send_failed");
            return Err(WsError::Transport(e));
        }
        Ok(())
    }

    /// Awaits the next inbound text payload. `Ok(None)` means the peer
    /// closed the connection (state moves to `Closed`); a transport failure
    /// moves state to `Error` before the error is returned.
    pub async fn recv(&mut self) -> Result<Option<String>, WsError> {
        loop {
            let next = match self.stream.as_mut() {
                Some(stream) => stream.next().await,
                None => return Err(WsError::ConnectionUnavailable { state: self.state }),
            };

            match next {
                Some(Ok(Message::Text(text))) => return Ok(Some(text.to_string())),
                Some(Ok(Message::Close(frame))) => {
                    tracing::info!(?frame, "connection_closed_by_peer");
                    self.state = ConnectionState::Closed;
                    self.stream = None;
                    return Ok(None);
                }
                Some(Ok(other)) => {
                    tracing::debug!(kind = ?other, "ignoring_non_text_message");
                }
                Some(Err(e)) => {
                    self.state = ConnectionState::Error;
                    self.stream = None;
                    tracing::warn!(error = %e, "transport_error");
                    return Err(WsError::Transport(e));
                }
                None => {
                    self.state = ConnectionState::Closed;
                    self.stream = None;
                    return Ok(None);
                }
            }
        }
    }

    /// Idempotent. Always lands in `Closed` and releases the socket,
    /// whatever state the connection was in.
    pub async fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            if let Err(e) = stream.close(None).await {
                tracing::debug!(error = %e, "close_handshake_failed");
            }
        }
        if self.state != ConnectionState::Closed {
            tracing::info!("connection_closed");
        }
        self.state = ConnectionState::Closed;
    }
}
