//! Server module
//!
//! Listener setup, the accept loop, per-connection serving, and
//! shutdown signal handling.

mod connection;
mod listener;
mod signal;

pub use listener::create_listener;
pub use signal::spawn_signal_handler;

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use crate::config::AppState;
use crate::logger;

/// Accept connections until the shutdown signal fires.
///
/// Each connection is served on its own task; a failed accept is
/// logged and the loop keeps going. Shutdown closes the listener
/// immediately, in-flight connections are abandoned at process exit.
pub async fn run(listener: TcpListener, state: Arc<AppState>, shutdown: Arc<Notify>) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::handle_connection(stream, peer_addr, Arc::clone(&state));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => {
                break;
            }
        }
    }
    drop(listener);
}
