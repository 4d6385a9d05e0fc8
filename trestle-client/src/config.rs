use serde::{Deserialize, Serialize};

pub const DEFAULT_PROXY_TIMEOUT_MS: u32 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectOptions {
    pub host: String,
    pub port: u16,
    pub timeout_ms: Option<u32>,
}

impl ConnectOptions {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProxyOptions {
    pub host: String,
    pub port: u16,
    pub kind: ProxyKind,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_ms: u32,
}

impl ProxyOptions {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            kind: ProxyKind::default(),
            username: None,
            password: None,
            timeout_ms: DEFAULT_PROXY_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProxyKind {
    #[default]
    Socks5,
    Http,
}
