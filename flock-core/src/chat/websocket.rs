// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! WebSocket Transport
//!
//! Real transport implementation using tungstenite for chat sockets.
//! Supports both native-tls and rustls TLS backends. Frames are JSON text.

use std::net::TcpStream;
use std::time::Duration;

#[cfg(all(feature = "network-native-tls", not(feature = "network-rustls")))]
use native_tls::TlsConnector;

#[cfg(feature = "network-rustls")]
use rustls::pki_types::ServerName;
#[cfg(feature = "network-rustls")]
use std::sync::Arc;

use tungstenite::client::IntoClientRequest;
use tungstenite::protocol::frame::coding::CloseCode;
use tungstenite::protocol::CloseFrame;
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Message, WebSocket};

use super::error::ChatError;
use super::frame::ChatFrame;
use super::transport::{ChatEndpoint, ChatResult, ChatTransport, ConnectionState};

/// WebSocket transport for a single chat.
///
/// Supports both ws:// (plaintext) and wss:// (TLS) connections.
///
/// # Example
///
/// ```ignore
/// use flock_core::chat::{ChatEndpoint, ChatTransport, WebSocketTransport};
///
/// let mut transport = WebSocketTransport::new();
/// transport.connect(&endpoint)?;
/// transport.send(&ChatFrame::Ping)?;
/// ```
pub struct WebSocketTransport {
    socket: Option<WebSocket<MaybeTlsStream<TcpStream>>>,
    state: ConnectionState,
    last_close_code: Option<u16>,
}

impl WebSocketTransport {
    /// Creates a new WebSocket transport.
    pub fn new() -> Self {
        WebSocketTransport {
            socket: None,
            state: ConnectionState::Disconnected,
            last_close_code: None,
        }
    }

    /// Parses a WebSocket URL into host and port.
    fn parse_url(url: &str) -> Result<(String, u16, bool), ChatError> {
        let is_tls = url.starts_with("wss://");
        let url_without_scheme = url
            .strip_prefix("wss://")
            .or_else(|| url.strip_prefix("ws://"))
            .ok_or_else(|| {
                ChatError::ConnectionFailed("Invalid URL scheme (expected ws:// or wss://)".into())
            })?;

        // Split host:port/path
        let host_port = url_without_scheme
            .split('/')
            .next()
            .unwrap_or(url_without_scheme);

        let (host, port) = if let Some(colon_pos) = host_port.rfind(':') {
            let host = &host_port[..colon_pos];
            let port_str = &host_port[colon_pos + 1..];
            let port: u16 = port_str
                .parse()
                .map_err(|_| ChatError::ConnectionFailed(format!("Invalid port: {}", port_str)))?;
            (host.to_string(), port)
        } else {
            let default_port = if is_tls { 443 } else { 80 };
            (host_port.to_string(), default_port)
        };

        Ok((host, port, is_tls))
    }

    /// Create a TLS stream using native-tls
    #[cfg(all(feature = "network-native-tls", not(feature = "network-rustls")))]
    fn create_tls_stream(
        host: &str,
        tcp_stream: TcpStream,
    ) -> Result<MaybeTlsStream<TcpStream>, ChatError> {
        let connector = TlsConnector::new()
            .map_err(|e| ChatError::ConnectionFailed(format!("TLS error: {}", e)))?;
        let tls_stream = connector
            .connect(host, tcp_stream)
            .map_err(|e| ChatError::ConnectionFailed(format!("TLS handshake failed: {}", e)))?;
        Ok(MaybeTlsStream::NativeTls(tls_stream))
    }

    /// Create a TLS stream using rustls
    #[cfg(feature = "network-rustls")]
    fn create_tls_stream(
        host: &str,
        tcp_stream: TcpStream,
    ) -> Result<MaybeTlsStream<TcpStream>, ChatError> {
        let mut root_store = rustls::RootCertStore::empty();
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let config = rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        let server_name: ServerName<'_> = host
            .try_into()
            .map_err(|_| ChatError::ConnectionFailed(format!("Invalid server name: {}", host)))?;

        let tls_conn = rustls::ClientConnection::new(Arc::new(config), server_name.to_owned())
            .map_err(|e| ChatError::ConnectionFailed(format!("TLS setup failed: {}", e)))?;

        let tls_stream = rustls::StreamOwned::new(tls_conn, tcp_stream);
        Ok(MaybeTlsStream::Rustls(tls_stream))
    }
}

impl Default for WebSocketTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatTransport for WebSocketTransport {
    fn connect(&mut self, endpoint: &ChatEndpoint) -> ChatResult<()> {
        if matches!(self.state, ConnectionState::Connected) {
            return Ok(());
        }

        self.state = ConnectionState::Connecting;
        self.last_close_code = None;

        let url = endpoint.url();
        let (host, port, is_tls) = Self::parse_url(&url)?;
        let addr = format!("{}:{}", host, port);

        // Create TCP connection with timeout
        let tcp_stream = TcpStream::connect(&addr).map_err(|e| {
            self.state = ConnectionState::Disconnected;
            ChatError::ConnectionFailed(e.to_string())
        })?;

        tcp_stream
            .set_read_timeout(Some(Duration::from_millis(endpoint.io_timeout_ms)))
            .map_err(|e| ChatError::ConnectionFailed(e.to_string()))?;
        tcp_stream
            .set_write_timeout(Some(Duration::from_millis(endpoint.io_timeout_ms)))
            .map_err(|e| ChatError::ConnectionFailed(e.to_string()))?;

        // Wrap in TLS if needed
        let stream: MaybeTlsStream<TcpStream> = if is_tls {
            Self::create_tls_stream(&host, tcp_stream).inspect_err(|_| {
                self.state = ConnectionState::Disconnected;
            })?
        } else {
            MaybeTlsStream::Plain(tcp_stream)
        };

        // WebSocket handshake - use IntoClientRequest for proper HTTP/1.1 request
        let request = url.as_str().into_client_request().map_err(|e| {
            self.state = ConnectionState::Disconnected;
            ChatError::ConnectionFailed(format!("Invalid WebSocket request: {}", e))
        })?;

        let (socket, _response) = tungstenite::client(request, stream).map_err(|e| {
            self.state = ConnectionState::Disconnected;
            ChatError::ConnectionFailed(format!("WebSocket handshake failed: {}", e))
        })?;

        self.socket = Some(socket);
        self.state = ConnectionState::Connected;

        Ok(())
    }

    fn disconnect(&mut self) -> ChatResult<()> {
        if let Some(mut socket) = self.socket.take() {
            // Explicit code 1000 so the server sees an intentional close
            let _ = socket.close(Some(CloseFrame {
                code: CloseCode::Normal,
                reason: "".into(),
            }));
        }
        self.state = ConnectionState::Disconnected;
        Ok(())
    }

    fn state(&self) -> ConnectionState {
        self.state.clone()
    }

    fn send(&mut self, frame: &ChatFrame) -> ChatResult<()> {
        let socket = self.socket.as_mut().ok_or(ChatError::NotConnected)?;

        let encoded =
            serde_json::to_string(frame).map_err(|e| ChatError::InvalidFrame(e.to_string()))?;

        socket.send(Message::Text(encoded.into())).map_err(|e| {
            if matches!(
                e,
                tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed
            ) {
                self.state = ConnectionState::Disconnected;
                ChatError::ConnectionClosed
            } else {
                ChatError::SendFailed(e.to_string())
            }
        })?;

        // Flush to ensure the frame is on the wire
        socket
            .flush()
            .map_err(|e| ChatError::SendFailed(format!("Flush failed: {}", e)))?;

        Ok(())
    }

    fn receive(&mut self) -> ChatResult<Option<ChatFrame>> {
        let socket = self.socket.as_mut().ok_or(ChatError::NotConnected)?;

        match socket.read() {
            Ok(Message::Text(data)) => match serde_json::from_str::<ChatFrame>(data.as_str()) {
                Ok(frame) => Ok(Some(frame)),
                Err(e) => {
                    // Malformed frames degrade to nothing rather than
                    // killing the connection
                    log::warn!("dropping malformed chat frame: {}", e);
                    Ok(None)
                }
            },
            Ok(Message::Ping(data)) => {
                // Respond to transport ping with pong
                let _ = socket.send(Message::Pong(data));
                Ok(None)
            }
            Ok(Message::Pong(_)) => Ok(None),
            Ok(Message::Close(close_frame)) => {
                self.last_close_code = close_frame.map(|f| f.code.into());
                self.state = ConnectionState::Disconnected;
                Err(ChatError::ConnectionClosed)
            }
            Ok(Message::Binary(_)) => {
                // The chat protocol is text-only
                Err(ChatError::ReceiveFailed("Unexpected binary message".into()))
            }
            Ok(Message::Frame(_)) => Ok(None),
            Err(tungstenite::Error::Io(ref e))
                if e.kind() == std::io::ErrorKind::WouldBlock
                    || e.kind() == std::io::ErrorKind::TimedOut =>
            {
                // No frame available (timeout)
                Ok(None)
            }
            Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                self.state = ConnectionState::Disconnected;
                Err(ChatError::ConnectionClosed)
            }
            Err(e) => Err(ChatError::ReceiveFailed(e.to_string())),
        }
    }

    fn last_close_code(&self) -> Option<u16> {
        self.last_close_code
    }
}
