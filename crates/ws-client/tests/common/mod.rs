use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

pub struct MockServiceHandle {
    addr: SocketAddr,
    captured: Arc<Mutex<Vec<String>>>,
}

impl MockServiceHandle {
    pub fn ws_url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    pub fn captured_payloads(&self) -> Vec<String> {
        self.captured
            .lock()
            .map(|payloads| payloads.clone())
            .unwrap_or_default()
    }
}

/// Plays the inference service: accepts a single connection and answers each
/// inbound text message with the next scripted label, closing once the
/// script runs out. One instance per test, for isolation.
pub async fn start_mock_service(replies: Vec<String>) -> MockServiceHandle {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured = Arc::new(Mutex::new(Vec::new()));
    let captured_task = captured.clone();

    tokio::spawn(async move {
        let Ok((stream, _)) = listener.accept().await else {
            return;
        };
        let Ok(ws) = accept_async(stream).await else {
            return;
        };
        let (mut tx, mut rx) = ws.split();
        let mut replies = replies.into_iter();

        while let Some(Ok(msg)) = rx.next().await {
            if let Message::Text(text) = msg {
                if let Ok(mut payloads) = captured_task.lock() {
                    payloads.push(text.to_string());
                }
                match replies.next() {
                    Some(label) => {
                        if tx.send(Message::Text(label.into())).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
        }

        let _ = tx.close().await;
    });

    MockServiceHandle { addr, captured }
}

/// A service that accepts the connection and immediately closes it.
pub async fn start_closing_service() -> MockServiceHandle {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured = Arc::new(Mutex::new(Vec::new()));

    tokio::spawn(async move {
        let Ok((stream, _)) = listener.accept().await else {
            return;
        };
        let Ok(mut ws) = accept_async(stream).await else {
            return;
        };
        let _ = ws.close(None).await;
    });

    MockServiceHandle { addr, captured }
}
