//! UDP adapter - datagram listener and one-shot command sender

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;
use crate::application::errors::ListenerError;
use crate::application::messaging::{DispatchOutcome, Dispatcher, PayloadParser};
use crate::infrastructure::config::ListenerConfig;

/// Receives command datagrams and dispatches them one at a time
pub struct UdpListener {
    socket: UdpSocket,
    buffer: Vec<u8>,
    parser: PayloadParser,
    dispatcher: Dispatcher,
}

impl UdpListener {
    /// Bind the configured endpoint. Failure here is fatal for the caller.
    pub async fn bind(config: &ListenerConfig, dispatcher: Dispatcher) -> Result<Self, ListenerError> {
        let addr = config.socket_addr();
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|source| ListenerError::Bind { addr, source })?;

        Ok(Self {
            socket,
            buffer: vec![0u8; config.buffer_size],
            parser: PayloadParser::new(),
            dispatcher,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ListenerError> {
        self.socket.local_addr().map_err(ListenerError::LocalAddr)
    }

    /// Receive and dispatch a single datagram
    ///
    /// Returns `None` when the payload could not be decoded and was skipped.
    pub async fn recv_once(&mut self) -> Result<Option<DispatchOutcome>, ListenerError> {
        let (len, sender) = self
            .socket
            .recv_from(&mut self.buffer)
            .await
            .map_err(ListenerError::Receive)?;

        let token = match self.parser.parse(&self.buffer[..len]) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Skipping datagram from {}: {}", sender, e);
                return Ok(None);
            }
        };

        tracing::info!("Received command '{}' from {}", token, sender);
        Ok(Some(self.dispatcher.dispatch(&token).await))
    }

    /// Serve commands until the process is terminated
    pub async fn run(&mut self) {
        loop {
            if let Err(e) = self.recv_once().await {
                tracing::warn!("{}", e);
            }
        }
    }
}

/// Send one command datagram to a listener. No reply is expected.
pub async fn send_command(target: SocketAddr, command: &str) -> Result<usize, ListenerError> {
    let local = match target.ip() {
        IpAddr::V4(_) => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0),
        IpAddr::V6(_) => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0),
    };

    let socket = UdpSocket::bind(local).await.map_err(ListenerError::Send)?;
    let sent = socket
        .send_to(command.as_bytes(), target)
        .await
        .map_err(ListenerError::Send)?;

    tracing::info!("Command '{}' sent to {}", command, target);
    Ok(sent)
}
