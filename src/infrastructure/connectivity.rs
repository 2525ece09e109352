// src/infrastructure/connectivity.rs
//
// Network Reachability Probe
//
// RULES:
// - A probe answers "is the network usable right now", nothing more
// - Consulted when load results arrive, not when a load starts
// - Must never block longer than its timeout

use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

use tracing::debug;

/// Answers whether the machine currently has a usable network path
///
/// The listing flow consults this when a load comes back empty, to tell
/// "the catalog has nothing to show" apart from "we are offline".
#[cfg_attr(test, mockall::automock)]
pub trait ConnectivityProbe: Send + Sync {
    fn is_online(&self) -> bool;
}

/// Probe that opens a short-lived TCP connection to a well-known endpoint
pub struct TcpConnectivityProbe {
    target: SocketAddr,
    timeout: Duration,
}

impl TcpConnectivityProbe {
    pub fn new(target: SocketAddr) -> Self {
        Self {
            target,
            timeout: Duration::from_millis(1500),
        }
    }
}

impl ConnectivityProbe for TcpConnectivityProbe {
    fn is_online(&self) -> bool {
        match TcpStream::connect_timeout(&self.target, self.timeout) {
            Ok(_) => true,
            Err(e) => {
                debug!("Connectivity probe to {} failed: {}", self.target, e);
                false
            }
        }
    }
}
