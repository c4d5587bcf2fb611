//! Connection loop: one task per accepted TCP connection.
//!
//! ```text
//! AWAITING_CONNECT --/connect ok--> ACTIVE
//!        |                            |
//!        +---- EOF / error / /quit / idle / shutdown ----> CLOSED (cleanup once)
//! ```
//!
//! The connected state is not tracked here: the dispatcher keys it on the
//! registry's peer mapping.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use hiroba_shared::protocol::WELCOME_BANNER;
use thiserror::Error;
use tokio::{net::TcpStream, sync::mpsc, task::JoinHandle};
use tokio_util::{
    codec::{Framed, LinesCodec, LinesCodecError},
    sync::CancellationToken,
};

use crate::{
    config::ConnectionSettings,
    domain::ConnectionHandle,
    infrastructure::outbox::ChannelOutbox,
    usecase::{ChatService, Flow},
};

/// How long cleanup waits for queued lines to reach the peer
const FLUSH_TIMEOUT: Duration = Duration::from_secs(2);

type LineSink = SplitSink<Framed<TcpStream, LinesCodec>, String>;
type LineStream = SplitStream<Framed<TcpStream, LinesCodec>>;

/// Reasons the read side stops producing lines
#[derive(Debug, Error)]
enum ReadError {
    #[error("Line exceeds the maximum length of {0} bytes")]
    TooLong(usize),

    #[error("No input for {0:?}")]
    Idle(Duration),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Run the read/dispatch loop for one connection until it closes, then clean
/// up. Never returns an error: failures end only this connection.
pub async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    service: Arc<ChatService>,
    settings: ConnectionSettings,
    shutdown: CancellationToken,
) {
    let framed = Framed::new(
        stream,
        LinesCodec::new_with_max_length(settings.max_line_length),
    );
    let (sink, mut lines) = framed.split();
    let (outbox, rx) = ChannelOutbox::channel();
    let writer = pusher_loop(rx, sink, peer);
    let connection = service.open_connection(peer, Arc::new(outbox));

    tracing::info!(%peer, "Connection accepted");
    send(&connection, WELCOME_BANNER);

    loop {
        let next = tokio::select! {
            _ = shutdown.cancelled() => {
                tracing::info!(%peer, "Server is shutting down, closing connection");
                break;
            }
            next = next_line(&mut lines, &settings) => next,
        };

        let line = match next {
            Ok(Some(line)) => line,
            Ok(None) => {
                tracing::info!(%peer, "Peer closed the connection");
                break;
            }
            Err(e @ ReadError::TooLong(_)) => {
                tracing::warn!(%peer, "{}", e);
                send(&connection, &e.to_string());
                break;
            }
            Err(e @ ReadError::Idle(_)) => {
                tracing::info!(%peer, "{}, closing connection", e);
                break;
            }
            Err(ReadError::Io(e)) => {
                tracing::warn!(%peer, "Read error: {}", e);
                break;
            }
        };

        tracing::info!(%peer, "Received: {}", line.trim());
        match service.dispatch(&line, &connection).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Disconnect) => {
                tracing::info!(%peer, "Client requested disconnect");
                break;
            }
            Err(e) => {
                tracing::warn!(%peer, "Command rejected: {}", e);
                send(&connection, &e.to_string());
            }
        }
    }

    let departed = service.disconnect(&connection).await;
    match departed {
        Some(username) => tracing::info!(%peer, "'{}' disconnected", username),
        None => tracing::info!(%peer, "Disconnected before /connect"),
    }

    // The registry released its copy in `disconnect`. Dropping ours closes the
    // channel: the writer flushes what is queued, then shuts the socket down.
    // A peer that stopped reading gets FLUSH_TIMEOUT, then the writer is aborted.
    drop(connection);
    finish_writer(writer, peer).await;
}

async fn finish_writer(mut writer: JoinHandle<()>, peer: SocketAddr) {
    match tokio::time::timeout(FLUSH_TIMEOUT, &mut writer).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!(%peer, "Writer task failed: {}", e),
        Err(_) => {
            tracing::warn!(%peer, "Peer is not reading, dropping unsent lines");
            writer.abort();
        }
    }
}

/// Push to our own connection. A failure means the writer is gone, which the
/// read side will notice on its own.
fn send(connection: &ConnectionHandle, line: &str) {
    if let Err(e) = connection.push(line) {
        tracing::debug!(peer = %connection.peer(), "Dropped line for closed connection: {}", e);
    }
}

/// Spawns the task that drains the outbox channel into the socket, writing and
/// flushing one line at a time.
///
/// # Returns
///
/// A `JoinHandle` that completes once every sender is gone and the socket has
/// been shut down, or as soon as a write fails.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sink: LineSink,
    peer: SocketAddr,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            if let Err(e) = sink.send(line).await {
                tracing::warn!(%peer, "Failed to write to connection: {}", e);
                return;
            }
        }
        if let Err(e) = sink.close().await {
            tracing::debug!(%peer, "Failed to shut down connection: {}", e);
        }
    })
}

async fn next_line(
    lines: &mut LineStream,
    settings: &ConnectionSettings,
) -> Result<Option<String>, ReadError> {
    let read = lines.next();
    let result = match settings.idle_timeout {
        Some(limit) => tokio::time::timeout(limit, read)
            .await
            .map_err(|_| ReadError::Idle(limit))?,
        None => read.await,
    };

    match result {
        None => Ok(None),
        Some(Ok(line)) => Ok(Some(line)),
        Some(Err(LinesCodecError::MaxLineLengthExceeded)) => {
            Err(ReadError::TooLong(settings.max_line_length))
        }
        Some(Err(LinesCodecError::Io(e))) => Err(e.into()),
    }
}
