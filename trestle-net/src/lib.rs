mod http;
mod socks;

pub use http::{HttpConnectError, build_http_connect, check_http_connect_response};

pub use socks::{
    ConnectReply, METHOD_NO_AUTH, METHOD_USERPASS, ReplyParseStatus, ReplyParser, SocksError,
    SocksReply, TargetAddress, build_auth_request, build_greeting, build_socks5_connect,
    parse_auth_reply, parse_connect_reply, parse_method_reply,
};
