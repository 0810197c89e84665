use std::net::SocketAddr;

pub const DEFAULT_BIND: &str = "0.0.0.0:9001";
pub const DEFAULT_LOG_FILTER: &str = "track_reward_server=info";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
}

impl ServerConfig {
    pub fn new(bind: SocketAddr) -> Self {
        Self { bind }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 9001)),
        }
    }
}
