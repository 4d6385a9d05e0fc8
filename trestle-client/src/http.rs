use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, trace};

use trestle_net::{build_http_connect, check_http_connect_response};

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

    let credentials = proxy
        .username
        .as_deref()
        .map(|username| (username, proxy.password.as_deref().unwrap_or("")));
    stream
        .write_all(&build_http_connect(&target.host, target.port, credentials))
        .await?;
    trace!(proxy = %proxy.host, "connect request sent");

    // the first data arrival is taken as the whole status line; a line
    // fragmented across deliveries is rejected as malformed
    let response = stream.read_and_clear(|_: &[u8]| true, timeout).await?;
    check_http_connect_response(&response)?;

    debug!(host = %target.host, port = target.port, "http tunnel established");
    Ok(())
}
