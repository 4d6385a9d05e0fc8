use super::types::{SocksError, SocksReply, TargetAddress};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectReply {
    pub reply: SocksReply,
    pub bound: TargetAddress,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyParseStatus {
    NeedMore,
    Complete { reply: ConnectReply },
    Error { error: SocksError },
}

#[derive(Debug, Default)]
pub struct ReplyParser {
    buffer: Vec<u8>,
}

impl ReplyParser {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub fn push(&mut self, bytes: &[u8]) -> ReplyParseStatus {
        self.buffer.extend_from_slice(bytes);
        match parse_full_reply(&self.buffer) {
            Ok(reply) => ReplyParseStatus::Complete { reply },
            Err(SocksError::TruncatedReply(_)) => ReplyParseStatus::NeedMore,
            Err(error) => ReplyParseStatus::Error { error },
        }
    }
}

pub fn parse_full_reply(bytes: &[u8]) -> Result<ConnectReply, SocksError> {
    if bytes.len() < 4 {
        return Err(SocksError::TruncatedReply(bytes.len()));
    }
    if bytes[0] != 0x05 {
        return Err(SocksError::BadVersion(bytes[0]));
    }
    let reply = SocksReply::from_code(bytes[1]);

    let mut cursor = 4;
    let bound = match bytes[3] {
        0x01 => {
            if bytes.len() < cursor + 4 {
                return Err(SocksError::TruncatedReply(bytes.len()));
            }
            let ip = [
                bytes[cursor],
                bytes[cursor + 1],
                bytes[cursor + 2],
                bytes[cursor + 3],
            ];
            cursor += 4;
            TargetAddress::IpV4(ip)
        }
        0x03 => {
            if bytes.len() < cursor + 1 {
                return Err(SocksError::TruncatedReply(bytes.len()));
            }
            let len = bytes[cursor] as usize;
            cursor += 1;
            if bytes.len() < cursor + len {
                return Err(SocksError::TruncatedReply(bytes.len()));
            }
            let domain = String::from_utf8_lossy(&bytes[cursor..cursor + len]).to_string();
            cursor += len;
            TargetAddress::Domain(domain)
        }
        0x04 => {
            if bytes.len() < cursor + 16 {
                return Err(SocksError::TruncatedReply(bytes.len()));
            }
            let mut ip = [0u8; 16];
            ip.copy_from_slice(&bytes[cursor..cursor + 16]);
            cursor += 16;
            TargetAddress::IpV6(ip)
        }
        _ => return Err(SocksError::UnsupportedAddressType),
    };

    if bytes.len() < cursor + 2 {
        return Err(SocksError::TruncatedReply(bytes.len()));
    }
    let port = u16::from_be_bytes([bytes[cursor], bytes[cursor + 1]]);

    Ok(ConnectReply { reply, bound, port })
}
