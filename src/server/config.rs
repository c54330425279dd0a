use std::net::{Ipv4Addr, SocketAddr};

pub const DEFAULT_MAX_KEY_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Port 0 picks an ephemeral port.
    pub bind_address: SocketAddr,
    pub max_key_len: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
            max_key_len: DEFAULT_MAX_KEY_LEN,
        }
    }
}
