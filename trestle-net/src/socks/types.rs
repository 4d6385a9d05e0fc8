use std::net::{Ipv4Addr, Ipv6Addr};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetAddress {
    IpV4([u8; 4]),
    IpV6([u8; 16]),
    Domain(String),
}

impl TargetAddress {
    pub fn classify(host: &str) -> Result<Self, SocksError> {
        if let Ok(ip) = host.parse::<Ipv4Addr>() {
            return Ok(Self::IpV4(ip.octets()));
        }
        if let Ok(ip) = host.parse::<Ipv6Addr>() {
            return Ok(Self::IpV6(ip.octets()));
        }
        if !host.is_empty() && host.len() <= 255 {
            return Ok(Self::Domain(host.to_string()));
        }
        Err(SocksError::UnsupportedAddressType)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocksReply {
    Succeeded,
    GeneralFailure,
    RulesetNotAllowed,
    NetworkUnreachable,
    HostUnreachable,
    ConnectionRefused,
    TtlExpired,
    CommandNotSupported,
    AddressTypeNotSupported,
    Other(u8),
}

impl SocksReply {
    pub fn from_code(code: u8) -> Self {
        match code {
            0x00 => Self::Succeeded,
            0x01 => Self::GeneralFailure,
            0x02 => Self::RulesetNotAllowed,
            0x03 => Self::NetworkUnreachable,
            0x04 => Self::HostUnreachable,
            0x05 => Self::ConnectionRefused,
            0x06 => Self::TtlExpired,
            0x07 => Self::CommandNotSupported,
            0x08 => Self::AddressTypeNotSupported,
            other => Self::Other(other),
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::GeneralFailure => "proxy server failure",
            Self::RulesetNotAllowed => "ruleset disallows connection",
            Self::NetworkUnreachable => "network unreachable",
            Self::HostUnreachable => "host unreachable",
            Self::ConnectionRefused => "connection refused",
            Self::TtlExpired => "TTL expired",
            Self::CommandNotSupported => "command not supported",
            Self::AddressTypeNotSupported => "address type not supported",
            Self::Other(_) => "unknown target-connect failure",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SocksError {
    #[error("unexpected reply length {0}")]
    BadByteCount(usize),
    #[error("unexpected SOCKS version {0:#04x}")]
    BadVersion(u8),
    #[error("unsupported authentication method {0:#04x}")]
    UnsupportedAuthMethod(u8),
    #[error("unexpected auth reply version {0:#04x}")]
    BadAuthVersion(u8),
    #[error("authentication failed")]
    AuthFailed,
    #[error("unsupported target address type")]
    UnsupportedAddressType,
    #[error("target connect failed: {}", .reply.message())]
    TargetConnect { reply: SocksReply },
    #[error("truncated reply at offset {0}")]
    TruncatedReply(usize),
}
