use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time;

use crate::buffer::ReceiveBuffer;
use crate::config::ConnectOptions;
use crate::error::ConnectError;

const READ_CHUNK: usize = 8192;

#[derive(Debug)]
pub struct BufferedStream<S> {
    stream: S,
    buffer: ReceiveBuffer,
    idle_timeout: Option<Duration>,
    closed: bool,
}

impl BufferedStream<TcpStream> {
    pub async fn connect(options: &ConnectOptions) -> Result<Self, ConnectError> {
        let connect = TcpStream::connect((options.host.as_str(), options.port));
        let stream = match options.timeout_ms {
            Some(timeout_ms) => {
                time::timeout(Duration::from_millis(u64::from(timeout_ms)), connect)
                    .await
                    .map_err(|_| ConnectError::ConnectTimeout {
                        host: options.host.clone(),
                        port: options.port,
                    })?
                    .map_err(|err| ConnectError::from_connect_io(err, &options.host))?
            }
            None => connect
                .await
                .map_err(|err| ConnectError::from_connect_io(err, &options.host))?,
        };
        Ok(Self::new(stream))
    }
}

impl<S> BufferedStream<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            buffer: ReceiveBuffer::new(),
            idle_timeout: None,
            closed: false,
        }
    }

    pub fn set_idle_timeout(&mut self, timeout: Option<Duration>) {
        self.idle_timeout = timeout;
    }

    pub fn buffered(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    pub fn splice(&mut self, start: usize, end: usize) -> Vec<u8> {
        self.buffer.splice(start, end)
    }

    pub async fn read_until<F>(
        &mut self,
        mut predicate: F,
        timeout: Option<Duration>,
    ) -> Result<Vec<u8>, ConnectError>
    where
        F: FnMut(&[u8]) -> bool,
    {
        if !self.buffer.is_empty() && predicate(self.buffer.as_slice()) {
            return Ok(self.buffer.as_slice().to_vec());
        }
        if self.closed {
            return Err(ConnectError::SocketClosed);
        }

        let ambient = timeout.is_none();
        let bound = timeout.or(self.idle_timeout);
        let mut deadline = bound.map(|bound| time::Instant::now() + bound);

        let mut chunk = [0u8; READ_CHUNK];
        loop {
            let read = self.stream.read(&mut chunk);
            let result = match deadline {
                Some(deadline) => match time::timeout_at(deadline, read).await {
                    Ok(result) => result,
                    Err(_) => {
                        if ambient {
                            self.destroy().await;
                        }
                        return Err(ConnectError::SocketTimeout);
                    }
                },
                None => read.await,
            };
            let n = match result {
                Ok(n) => n,
                Err(err) => {
                    self.closed = true;
                    return Err(ConnectError::Io(err));
                }
            };
            if n == 0 {
                self.closed = true;
                return Err(ConnectError::EndFin);
            }
            self.buffer.append(&chunk[..n]);
            if predicate(self.buffer.as_slice()) {
                return Ok(self.buffer.as_slice().to_vec());
            }
            // the idle timeout measures silence, not total operation time;
            // each received chunk pushes it out
            if ambient {
                deadline = bound.map(|bound| time::Instant::now() + bound);
            }
        }
    }

    pub async fn read_and_clear<F>(
        &mut self,
        predicate: F,
        timeout: Option<Duration>,
    ) -> Result<Vec<u8>, ConnectError>
    where
        F: FnMut(&[u8]) -> bool,
    {
        let resolved = self.read_until(predicate, timeout).await?;
        // no await between resolution and splice, so the consumed range is
        // exactly what the predicate saw
        self.buffer.splice(0, resolved.len());
        Ok(resolved)
    }

    pub async fn write_all(&mut self, data: &[u8]) -> Result<(), ConnectError> {
        if self.closed {
            return Err(ConnectError::SocketClosed);
        }
        self.stream.write_all(data).await?;
        self.stream.flush().await?;
        Ok(())
    }

    pub async fn destroy(&mut self) {
        let _ = self.stream.shutdown().await;
        self.closed = true;
    }

    pub fn into_inner(self) -> S {
        self.stream
    }

    pub fn into_parts(self) -> (S, ReceiveBuffer) {
        (self.stream, self.buffer)
    }
}
