use sign_interface::ConnectionState;

#[derive(Debug, thiserror::Error)]
pub enum WsError {
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] tokio_tungstenite::tungstenite::http::uri::InvalidUri),

    #[error("connection unavailable (state: {state:?})")]
    ConnectionUnavailable { state: ConnectionState },

    #[error("open() is only valid from the connecting state (state: {state:?})")]
    AlreadyOpened { state: ConnectionState },

    #[error("websocket transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),
}
