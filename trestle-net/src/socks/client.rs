use super::types::{SocksError, SocksReply, TargetAddress};

pub const METHOD_NO_AUTH: u8 = 0x00;
pub const METHOD_USERPASS: u8 = 0x02;

pub fn build_greeting() -> Vec<u8> {
    vec![0x05, 0x02, METHOD_NO_AUTH, METHOD_USERPASS]
}

pub fn parse_method_reply(bytes: &[u8]) -> Result<u8, SocksError> {
    if bytes.len() != 2 {
        return Err(SocksError::BadByteCount(bytes.len()));
    }
    if bytes[0] != 0x05 {
        return Err(SocksError::BadVersion(bytes[0]));
    }
    match bytes[1] {
        METHOD_NO_AUTH | METHOD_USERPASS => Ok(bytes[1]),
        method => Err(SocksError::UnsupportedAuthMethod(method)),
    }
}

pub fn build_auth_request(username: &str, password: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(3 + username.len() + password.len());
    buf.push(0x01);
    buf.push(username.len() as u8);
    buf.extend_from_slice(username.as_bytes());
    buf.push(password.len() as u8);
    buf.extend_from_slice(password.as_bytes());
    buf
}

pub fn parse_auth_reply(bytes: &[u8]) -> Result<(), SocksError> {
    if bytes.len() != 2 {
        return Err(SocksError::BadByteCount(bytes.len()));
    }
    if bytes[0] != 0x01 {
        return Err(SocksError::BadAuthVersion(bytes[0]));
    }
    if bytes[1] != 0x00 {
        return Err(SocksError::AuthFailed);
    }
    Ok(())
}

pub fn build_socks5_connect(address: &TargetAddress, port: u16) -> Result<Vec<u8>, SocksError> {
    let mut buf = Vec::new();
    buf.push(0x05);
    buf.push(0x01);
    buf.push(0x00);

    encode_address(&mut buf, address)?;
    buf.extend_from_slice(&port.to_be_bytes());
    Ok(buf)
}

pub fn parse_connect_reply(bytes: &[u8]) -> Result<(), SocksError> {
    if bytes.len() < 2 {
        return Err(SocksError::BadByteCount(bytes.len()));
    }
    if bytes[0] != 0x05 {
        return Err(SocksError::BadVersion(bytes[0]));
    }
    match SocksReply::from_code(bytes[1]) {
        SocksReply::Succeeded => Ok(()),
        reply => Err(SocksError::TargetConnect { reply }),
    }
}

fn encode_address(buf: &mut Vec<u8>, address: &TargetAddress) -> Result<(), SocksError> {
    match address {
        TargetAddress::IpV4(ip) => {
            buf.push(0x01);
            buf.extend_from_slice(ip);
        }
        TargetAddress::Domain(domain) => {
            // the length prefix is a single byte; a longer domain cannot
            // be encoded
            if domain.len() > 255 {
                return Err(SocksError::UnsupportedAddressType);
            }
            buf.push(0x03);
            buf.push(domain.len() as u8);
            buf.extend_from_slice(domain.as_bytes());
        }
        TargetAddress::IpV6(ip) => {
            buf.push(0x04);
            buf.extend_from_slice(ip);
        }
    }
    Ok(())
}
