mod client;
mod error;

pub use client::{WsConnection, WsConnectionBuilder};
pub use error::WsError;
