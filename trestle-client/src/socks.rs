use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, trace};

use trestle_net::{
    METHOD_USERPASS, ReplyParseStatus, ReplyParser, TargetAddress, build_auth_request,
    build_greeting, build_socks5_connect, parse_auth_reply, parse_connect_reply,
    parse_method_reply,
};

use crate::config::{ConnectOptions, ProxyOptions};
use crate::error::ConnectError;
use crate::stream::BufferedStream;

pub(crate) async fn negotiate<S>(
    stream: &mut BufferedStream<S>,
    target: &ConnectOptions,
    proxy: &ProxyOptions,
) -> Result<(), ConnectError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let timeout = Some(Duration::from_millis(u64::from(proxy.timeout_ms)));

    stream.write_all(&build_greeting()).await?;
    trace!(proxy = %proxy.host, "socks5 greeting sent");
    let reply = stream
        .read_and_clear(|bytes: &[u8]| bytes.len() >= 2, timeout)
        .await?;
    let method = parse_method_reply(&reply)?;
    trace!(method, "socks5 method chosen");

    if method == METHOD_USERPASS {
        let username = proxy.username.as_deref().unwrap_or("");
        let password = proxy.password.as_deref().unwrap_or("");
        stream
            .write_all(&build_auth_request(username, password))
            .await?;
        let reply = stream
            .read_and_clear(|bytes: &[u8]| bytes.len() >= 2, timeout)
            .await?;
        parse_auth_reply(&reply)?;
        trace!("socks5 authentication accepted");
    }

    let address = TargetAddress::classify(&target.host)?;
    let request = build_socks5_connect(&address, target.port)?;
    stream.write_all(&request).await?;
    let reply = stream
        .read_and_clear(|bytes: &[u8]| bytes.len() >= 2, timeout)
        .await?;
    parse_connect_reply(&reply)?;

    // the 2-byte check above is the contract; when the bound-address echo
    // arrived in full, validate its shape too
    if reply.len() > 2 {
        let mut parser = ReplyParser::new();
        if let ReplyParseStatus::Error { error } = parser.push(&reply) {
            return Err(error.into());
        }
    }

    debug!(host = %target.host, port = target.port, "socks5 tunnel established");
    Ok(())
}
