mod buffer;
mod config;
mod connector;
mod error;
mod http;
mod socks;
mod stream;

pub use buffer::ReceiveBuffer;
pub use config::{ConnectOptions, DEFAULT_PROXY_TIMEOUT_MS, ProxyKind, ProxyOptions};
pub use connector::{connect, establish_tunnel};
pub use error::ConnectError;
pub use stream::BufferedStream;

pub use trestle_net::{HttpConnectError, SocksError, SocksReply, TargetAddress};
