mod client;
mod parser;
mod types;

pub use client::{
    METHOD_NO_AUTH, METHOD_USERPASS, build_auth_request, build_greeting, build_socks5_connect,
    parse_auth_reply, parse_connect_reply, parse_method_reply,
};
pub use parser::{ConnectReply, ReplyParseStatus, ReplyParser};
pub use types::{SocksError, SocksReply, TargetAddress};
