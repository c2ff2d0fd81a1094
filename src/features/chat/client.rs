//! Live chat connection worker.
//!
//! Keeps an anonymous read-only connection to a Twitch channel open forever:
//! on any close or error it waits a fixed delay and reconnects, without
//! backoff or an attempt limit. Everything it learns is pushed to the UI
//! thread as [`ChatEvent`]s.

use anyhow::Result;
use crossbeam_channel::Sender;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader},
    net::TcpStream,
    runtime::Handle,
    task::JoinHandle,
    time::{sleep, Duration},
};
use tracing::{info, warn};

use super::irc::{self, IrcLine};
use crate::config::ChatConfig;

/// Longest line kept from the server: IRCv3 tags plus a classic 512-byte message.
pub const MAX_LINE_BYTES: usize = 8192 + 512;

/// Connection state shown next to the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// Opening the connection.
    Connecting,
    /// Joined the named channel.
    Connected(String),
    /// The connection failed.
    Error(String),
    /// The connection closed; a reconnect is scheduled.
    Disconnected,
    /// Live connection disabled, messages come from manual input.
    TestMode,
    /// No channel configured.
    NotConfigured,
}

impl ConnectionStatus {
    /// Whether the feed is currently live.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connecting => write!(f, "Connecting to Twitch..."),
            Self::Connected(channel) => write!(f, "Connected: #{channel}"),
            Self::Error(reason) => write!(f, "Connection error: {reason}"),
            Self::Disconnected => write!(f, "Disconnected"),
            Self::TestMode => write!(f, "Test mode"),
            Self::NotConfigured => write!(f, "No Twitch channel configured"),
        }
    }
}

/// Event delivered from the worker to the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// A chat line was received.
    Message {
        /// Sender login.
        username: String,
        /// Message text.
        text: String,
    },
    /// The connection state changed.
    Status(ConnectionStatus),
}

/// Settings for the connection worker.
#[derive(Debug, Clone)]
pub struct ChatClientConfig {
    /// IRC host.
    pub host: String,
    /// IRC port.
    pub port: u16,
    /// Channel without `#`.
    pub channel: String,
    /// Anonymous nick.
    pub nick: String,
    /// Fixed wait between reconnect attempts.
    pub reconnect_delay: Duration,
}

impl From<&ChatConfig> for ChatClientConfig {
    fn from(config: &ChatConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            channel: irc::normalize_channel(&config.channel),
            nick: config.nick.clone(),
            reconnect_delay: Duration::from_secs(config.reconnect_seconds),
        }
    }
}

/// How a session ended without an I/O error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The server closed the stream.
    Closed,
    /// Nobody is listening for events any more.
    ReceiverGone,
}

/// Spawn the connection worker on `handle`.
pub fn spawn_chat_worker(
    handle: &Handle,
    config: ChatClientConfig,
    tx: Sender<ChatEvent>,
) -> JoinHandle<()> {
    handle.spawn(async move {
        run_chat_loop(config, tx).await;
    })
}

async fn run_chat_loop(config: ChatClientConfig, tx: Sender<ChatEvent>) {
    let channel = irc::normalize_channel(&config.channel);
    if channel.is_empty() {
        warn!("chat worker started without a channel");
        let _ = tx.send(ChatEvent::Status(ConnectionStatus::NotConfigured));
        return;
    }

    info!(channel = %channel, host = %config.host, "starting chat worker");

    loop {
        if !emit_status(&tx, ConnectionStatus::Connecting) {
            return;
        }

        match TcpStream::connect((config.host.as_str(), config.port)).await {
            Ok(stream) => match run_session(stream, &channel, &config.nick, &tx).await {
                Ok(SessionEnd::ReceiverGone) => {
                    warn!("chat receiver dropped; stopping chat worker");
                    return;
                }
                Ok(SessionEnd::Closed) => {
                    info!(channel = %channel, "chat connection closed");
                }
                Err(err) => {
                    warn!(?err, channel = %channel, "chat connection failed");
                    emit_status(&tx, ConnectionStatus::Error(err.to_string()));
                }
            },
            Err(err) => {
                warn!(?err, channel = %channel, "chat worker failed to connect");
                emit_status(&tx, ConnectionStatus::Error(err.to_string()));
            }
        }

        if !emit_status(&tx, ConnectionStatus::Disconnected) {
            return;
        }
        info!(delay = ?config.reconnect_delay, "reconnecting to chat");
        sleep(config.reconnect_delay).await;
    }
}

/// Run one connection: handshake, then read lines until the stream ends.
///
/// # Errors
///
/// Returns an error if reading from or writing to the stream fails.
pub async fn run_session<S>(
    stream: S,
    channel: &str,
    nick: &str,
    tx: &Sender<ChatEvent>,
) -> Result<SessionEnd>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (read_half, mut write_half) = tokio::io::split(stream);

    for line in irc::handshake(channel, nick) {
        write_line(&mut write_half, &line).await?;
    }

    info!(channel = %channel, nick = %nick, "chat connected");
    if !emit_status(tx, ConnectionStatus::Connected(channel.to_string())) {
        return Ok(SessionEnd::ReceiverGone);
    }

    let mut reader = BufReader::new(read_half);
    let mut buf = Vec::with_capacity(512);
    loop {
        let line = match read_line_lossy(&mut reader, &mut buf).await? {
            ReadLine::Line(line) => line,
            ReadLine::TooLong => {
                warn!(limit = MAX_LINE_BYTES, "dropping oversized chat line");
                continue;
            }
            ReadLine::Eof => break,
        };
        match irc::parse_line(&line) {
            IrcLine::Ping => write_line(&mut write_half, irc::PONG).await?,
            IrcLine::Privmsg { username, text } => {
                if tx.send(ChatEvent::Message { username, text }).is_err() {
                    return Ok(SessionEnd::ReceiverGone);
                }
            }
            IrcLine::Other => {}
        }
    }

    Ok(SessionEnd::Closed)
}

enum ReadLine {
    Line(String),
    TooLong,
    Eof,
}

/// Read one line of at most [`MAX_LINE_BYTES`], replacing invalid UTF-8.
///
/// A longer line is consumed up to its newline and reported as `TooLong`.
async fn read_line_lossy<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<ReadLine>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    let limit = u64::try_from(MAX_LINE_BYTES + 1).unwrap_or(u64::MAX);
    let read = (&mut *reader).take(limit).read_until(b'\n', buf).await?;
    if read == 0 {
        return Ok(ReadLine::Eof);
    }

    if buf.len() > MAX_LINE_BYTES && buf.last() != Some(&b'\n') {
        skip_rest_of_line(reader).await?;
        return Ok(ReadLine::TooLong);
    }

    Ok(ReadLine::Line(String::from_utf8_lossy(buf).into_owned()))
}

async fn skip_rest_of_line<R>(reader: &mut R) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let (used, done) = {
            let chunk = reader.fill_buf().await?;
            match chunk.iter().position(|&b| b == b'\n') {
                Some(pos) => (pos + 1, true),
                None => (chunk.len(), chunk.is_empty()),
            }
        };
        reader.consume(used);
        if done {
            return Ok(());
        }
    }
}

fn emit_status(tx: &Sender<ChatEvent>, status: ConnectionStatus) -> bool {
    tx.send(ChatEvent::Status(status)).is_ok()
}

async fn write_line<W>(writer: &mut W, line: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\r\n").await?;
    writer.flush().await?;
    Ok(())
}
