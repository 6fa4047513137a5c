mod frames;

use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use sign_interface::CaptureParams;
use sign_session::{CaptureOutcome, Session, SessionConfig};

use crate::frames::FrameDirSource;

#[derive(Parser)]
#[command(name = "signwire", about = "Sign-language capture REPL")]
struct Cli {
    /// WebSocket endpoint of the inference service.
    #[arg(long, env = "SIGNWIRE_ENDPOINT")]
    endpoint: String,

    /// Directory of still images replayed as the capture device.
    #[arg(long, env = "SIGNWIRE_FRAMES")]
    frames: PathBuf,

    #[arg(long, default_value_t = 640)]
    width: u32,

    #[arg(long, default_value_t = 480)]
    height: u32,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let params = CaptureParams {
        width: cli.width,
        height: cli.height,
    };
    let source = FrameDirSource::open(&cli.frames, &params);

    let mut session = Session::start(SessionConfig::new(&cli.endpoint), source).await;
    session.poll_webcam();
    println!("{}", session.status());
    println!("commands: capture | add | space | del | text | status | quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        match line.trim() {
            "" => {}
            "capture" => match session.capture().await {
                CaptureOutcome::Sent => {
                    session.await_response().await;
                    println!("{}", session.current_label());
                }
                outcome => println!("capture rejected: {outcome:?}"),
            },
            "add" => {
                if session.accept_current() {
                    println!("{}", session.transcript_text());
                } else {
                    println!("nothing to add: {}", session.current_label());
                }
            }
            "space" => {
                session.insert_space();
                println!("{}", session.transcript_text());
            }
            "del" => {
                session.delete_last();
                println!("{}", session.transcript_text());
            }
            "text" => println!("{}", session.transcript_text()),
            "status" => match serde_json::to_string_pretty(&session.snapshot()) {
                Ok(json) => println!("{json}"),
                Err(e) => tracing::error!(error = %e, "snapshot_serialize_failed"),
            },
            "quit" | "exit" => break,
            other => println!("unknown command: {other}"),
        }
    }

    session.teardown().await;
}
