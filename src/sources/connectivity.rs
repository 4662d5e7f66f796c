//! Network reachability probe.

use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Try to open a TCP connection to `addr` within `limit`.
pub async fn is_online(addr: &str, limit: Duration) -> bool {
    match timeout(limit, TcpStream::connect(addr)).await {
        Ok(Ok(_)) => {
            debug!("Connectivity probe to {} succeeded", addr);
            true
        }
        Ok(Err(e)) => {
            warn!("Connectivity probe to {} failed: {}", addr, e);
            false
        }
        Err(_) => {
            warn!("Connectivity probe to {} timed out after {:?}", addr, limit);
            false
        }
    }
}
