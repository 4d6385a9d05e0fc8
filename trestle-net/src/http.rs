use base64::Engine;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpConnectError {
    #[error("invalid response from proxy: {response}")]
    Rejected { response: String },
}

pub fn build_http_connect(
    host: &str,
    port: u16,
    credentials: Option<(&str, &str)>,
) -> Vec<u8> {
    let mut request = format!(
        "CONNECT {host}:{port} HTTP/1.1\r\nConnection: keep-alive\r\nContent-Length: 0\r\n"
    );
    if let Some((username, password)) = credentials {
        let token =
            base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
        request.push_str(&format!("Proxy-Authorization: Basic {token}\r\n"));
    }
    request.push_str("\r\n");
    request.into_bytes()
}

pub fn check_http_connect_response(response: &[u8]) -> Result<(), HttpConnectError> {
    let text = String::from_utf8_lossy(response);
    let trimmed = text.trim();
    let accepted = [&b"HTTP/1.1 200"[..], &b"HTTP/1.0 200"[..]]
        .iter()
        .any(|prefix| {
            trimmed
                .as_bytes()
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        });
    if accepted {
        Ok(())
    } else {
        Err(HttpConnectError::Rejected {
            response: trimmed.to_string(),
        })
    }
}
