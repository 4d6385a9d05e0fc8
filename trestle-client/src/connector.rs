use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tracing::debug;

use crate::config::{ConnectOptions, ProxyKind, ProxyOptions};
use crate::error::ConnectError;
use crate::stream::BufferedStream;
use crate::{http, socks};

pub async fn connect(
    target: &ConnectOptions,
    proxy: Option<&ProxyOptions>,
) -> Result<BufferedStream<TcpStream>, ConnectError> {
    let Some(proxy) = proxy else {
        return BufferedStream::connect(target).await;
    };

    validate_proxy(proxy)?;
    let proxy_connect = ConnectOptions {
        host: proxy.host.clone(),
        port: proxy.port,
        timeout_ms: Some(proxy.timeout_ms),
    };
    debug!(proxy = %proxy.host, port = proxy.port, kind = ?proxy.kind, "connecting via proxy");
    let mut stream = BufferedStream::connect(&proxy_connect)
        .await
        .map_err(ConnectError::into_proxy)?;
    establish_tunnel(&mut stream, target, proxy).await?;
    Ok(stream)
}

pub async fn establish_tunnel<S>(
    stream: &mut BufferedStream<S>,
    target: &ConnectOptions,
    proxy: &ProxyOptions,
) -> Result<(), ConnectError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let result = match proxy.kind {
        ProxyKind::Socks5 => socks::negotiate(stream, target, proxy).await,
        ProxyKind::Http => http::negotiate(stream, target, proxy).await,
    };
    result.map_err(ConnectError::into_proxy)
}

fn validate_proxy(proxy: &ProxyOptions) -> Result<(), ConnectError> {
    if proxy.host.is_empty() {
        return Err(ConnectError::Config("proxy host is required".to_string()));
    }
    if proxy.port == 0 {
        return Err(ConnectError::Config("proxy port is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn rejects_empty_proxy_host_before_any_io() {
        let target = ConnectOptions::new("example.com", 443);
        let proxy = ProxyOptions::new("", 1080);
        let err = connect(&target, Some(&proxy)).await.unwrap_err();
        assert_matches!(err, ConnectError::Config(_));
    }

    #[tokio::test]
    async fn rejects_zero_proxy_port_before_any_io() {
        let target = ConnectOptions::new("example.com", 443);
        let proxy = ProxyOptions::new("proxy.test", 0);
        let err = connect(&target, Some(&proxy)).await.unwrap_err();
        assert_matches!(err, ConnectError::Config(_));
    }

    #[tokio::test]
    async fn negotiation_failures_are_wrapped_as_proxy_errors() {
        let (client, mut server) = tokio::io::duplex(256);
        let mut stream = BufferedStream::new(client);

        let script = tokio::spawn(async move {
            use tokio::io::{AsyncReadExt, AsyncWriteExt};
            let mut greeting = [0u8; 4];
            server.read_exact(&mut greeting).await.unwrap();
            server.write_all(&[0x05, 0x00]).await.unwrap();
            let mut request = [0u8; 10];
            server.read_exact(&mut request).await.unwrap();
            server.write_all(&[0x05, 0x02]).await.unwrap();
        });

        let target = ConnectOptions::new("1.2.3.4", 80);
        let proxy = ProxyOptions::new("proxy.test", 1080);
        let err = establish_tunnel(&mut stream, &target, &proxy)
            .await
            .unwrap_err();
        assert!(err.is_proxy_error());
        assert!(err.to_string().contains("ruleset"));
        script.await.unwrap();
    }

    #[tokio::test]
    async fn direct_connect_errors_are_not_wrapped() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let target = ConnectOptions::new("127.0.0.1", address.port());
        let err = connect(&target, None).await.unwrap_err();
        assert!(!err.is_proxy_error());
    }
}
