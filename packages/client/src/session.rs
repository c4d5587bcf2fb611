//! One connection to the chat server.

use futures_util::{SinkExt, StreamExt};
use hiroba_shared::protocol::{CONNECT_COMMAND, QUIT_COMMAND, QUIT_LINE};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_util::codec::{Framed, LinesCodec};

use crate::{command::translate_input, error::ClientError, ui::Output};

pub struct Session {
    lines: Framed<TcpStream, LinesCodec>,
}

impl Session {
    pub async fn connect(host: &str, port: u16) -> Result<Self, ClientError> {
        let stream = TcpStream::connect((host, port))
            .await
            .map_err(|source| ClientError::Connect {
                addr: format!("{host}:{port}"),
                source,
            })?;
        tracing::info!("Connected to {}:{}", host, port);

        Ok(Self {
            lines: Framed::new(stream, LinesCodec::new()),
        })
    }

    /// Identify as `username`, then relay input to the server and server
    /// lines to `out` until the server sends `/quit`.
    ///
    /// When `input` closes, `/quit` is sent on the user's behalf and the
    /// session keeps reading until the server confirms.
    pub async fn run<O: Output>(
        self,
        username: &str,
        mut input: mpsc::UnboundedReceiver<String>,
        out: &mut O,
    ) -> Result<(), ClientError> {
        let (mut sink, mut stream) = self.lines.split();
        sink.send(format!("{CONNECT_COMMAND} {username}")).await?;

        let mut input_open = true;
        loop {
            tokio::select! {
                received = stream.next() => match received {
                    Some(Ok(line)) => {
                        out.show(&line);
                        if line == QUIT_LINE {
                            tracing::info!("Server closed the session");
                            return Ok(());
                        }
                    }
                    Some(Err(e)) => return Err(e.into()),
                    None => return Err(ClientError::ServerClosed),
                },
                typed = input.recv(), if input_open => match typed {
                    Some(raw) => match translate_input(&raw, username) {
                        Ok(Some(line)) => {
                            tracing::debug!("Sending: {}", line);
                            sink.send(line).await?;
                        }
                        Ok(None) => {}
                        Err(e) => out.show(&e.to_string()),
                    },
                    None => {
                        input_open = false;
                        sink.send(QUIT_COMMAND.to_string()).await?;
                    }
                },
            }
        }
    }
}
