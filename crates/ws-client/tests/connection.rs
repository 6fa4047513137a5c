mod common;

use bytes::Bytes;
use common::{start_closing_service, start_mock_service};
use sign_interface::{ConnectionState, EncodedFrame, decode_data_url};
use sign_ws_client::{WsConnection, WsError};

const JPEG_STUB: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x01, 0x02, 0xFF, 0xD9];

#[tokio::test]
async fn open_then_exchange_round_trip() {
    let server = start_mock_service(vec!["A".into()]).await;
    let mut conn = WsConnection::builder(server.ws_url()).build().unwrap();
    assert_eq!(conn.status(), ConnectionState::Connecting);

    conn.open().await.unwrap();
    assert_eq!(conn.status(), ConnectionState::Ready);

    let frame = EncodedFrame::new(640, 480, Bytes::from_static(JPEG_STUB)).unwrap();
    conn.send(frame.to_data_url()).await.unwrap();

    let reply = conn.recv().await.unwrap();
    assert_eq!(reply.as_deref(), Some("A"));

    let captured = server.captured_payloads();
    assert_eq!(captured.len(), 1);
    let (_, data) = decode_data_url(&captured[0]).unwrap();
    assert_eq!(data, JPEG_STUB);
}

#[tokio::test]
async fn send_requires_ready() {
    let server = start_mock_service(vec![]).await;
    let mut conn = WsConnection::builder(server.ws_url()).build().unwrap();

    let err = conn.send("data:image/jpeg;base64,".into()).await.unwrap_err();
    assert!(matches!(
        err,
        WsError::ConnectionUnavailable {
            state: ConnectionState::Connecting
        }
    ));
    assert!(server.captured_payloads().is_empty());
}

#[tokio::test]
async fn failed_open_lands_in_error() {
    // Grab a port that is guaranteed not to be listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut conn = WsConnection::builder(format!("ws://{addr}")).build().unwrap();
    assert!(conn.open().await.is_err());
    assert_eq!(conn.status(), ConnectionState::Error);

    let err = conn.send("x".into()).await.unwrap_err();
    assert!(matches!(err, WsError::ConnectionUnavailable { .. }));
}

#[tokio::test]
async fn peer_close_is_observed_as_closed() {
    let server = start_closing_service().await;
    let mut conn = WsConnection::builder(server.ws_url()).build().unwrap();
    conn.open().await.unwrap();

    let reply = conn.recv().await.unwrap();
    assert_eq!(reply, None);
    assert_eq!(conn.status(), ConnectionState::Closed);
}

#[tokio::test]
async fn close_is_idempotent() {
    let server = start_mock_service(vec![]).await;
    let mut conn = WsConnection::builder(server.ws_url()).build().unwrap();
    conn.open().await.unwrap();

    conn.close().await;
    assert_eq!(conn.status(), ConnectionState::Closed);
    conn.close().await;
    assert_eq!(conn.status(), ConnectionState::Closed);

    let err = conn.send("x".into()).await.unwrap_err();
    assert!(matches!(
        err,
        WsError::ConnectionUnavailable {
            state: ConnectionState::Closed
        }
    ));
}

#[tokio::test]
async fn reopen_is_rejected() {
    let server = start_mock_service(vec![]).await;
    let mut conn = WsConnection::builder(server.ws_url()).build().unwrap();
    conn.open().await.unwrap();

    let err = conn.open().await.unwrap_err();
    assert!(matches!(err, WsError::AlreadyOpened { .. }));
    assert_eq!(conn.status(), ConnectionState::Ready);
}

#[test]
fn invalid_endpoint_is_rejected_at_build() {
    assert!(matches!(
        WsConnection::builder("not a url").build(),
        Err(WsError::InvalidEndpoint(_))
    ));
}
