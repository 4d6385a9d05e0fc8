use std::io;

use thiserror::Error;
use trestle_net::{HttpConnectError, SocksError};

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("ENOTFOUND no address found for {0}")]
    HostNotFound(String),
    #[error("ECONNECTTIMEOUT connection to {host}:{port} timed out")]
    ConnectTimeout { host: String, port: u16 },
    #[error("ESOCKETTIMEOUT socket timed out")]
    SocketTimeout,
    #[error("EENDFIN remote peer closed the connection")]
    EndFin,
    #[error("ESOCKETCLOSED socket closed unexpectedly")]
    SocketClosed,
    #[error("invalid proxy configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Socks(#[from] SocksError),
    #[error(transparent)]
    HttpConnect(#[from] HttpConnectError),
    #[error("proxy connection failed: {0}")]
    Proxy(Box<ConnectError>),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ConnectError {
    pub(crate) fn from_connect_io(err: io::Error, host: &str) -> Self {
        // tokio reports resolution failures as uncategorized io errors;
        // NotFound covers custom resolvers.
        let resolution_failure = err.kind() == io::ErrorKind::NotFound
            || err.to_string().contains("failed to lookup address");
        if resolution_failure {
            return Self::HostNotFound(host.to_string());
        }
        Self::Io(err)
    }

    pub(crate) fn into_proxy(self) -> Self {
        match self {
            Self::Proxy(_) => self,
            other => Self::Proxy(Box::new(other)),
        }
    }

    pub fn is_proxy_error(&self) -> bool {
        matches!(self, Self::Proxy(_))
    }
}
