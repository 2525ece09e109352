// src/infrastructure/mod.rs
//
// Infrastructure Layer
//
// Contains implementation details that support the domain
// but are not part of the domain itself.
//
// RULES:
// - Infrastructure serves the domain
// - Infrastructure never dictates domain behavior
// - Infrastructure is replaceable

pub mod connectivity;
pub mod poster_cache;
pub mod preferences;

pub use connectivity::{ConnectivityProbe, TcpConnectivityProbe};
pub use poster_cache::PosterCache;
pub use preferences::PreferenceStore;
