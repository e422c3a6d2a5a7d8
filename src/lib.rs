//! Proxy Probe - forward proxy checker
//!
//! Walks a list of proxy endpoints and, for each one, checks that it can
//! reach a well-known site and which public IP its traffic leaves from.
//!
//! ## Features
//!
//! - HTTP and SOCKS5 proxies, with optional credentials
//! - Strictly sequential probing with a per-request timeout
//! - Per-endpoint error isolation: one dead proxy never stops the run
//! - Environment-based configuration with the built-in proxy list as default

pub mod config;
pub mod error;
pub mod models;
pub mod probe;

pub use config::Config;
pub use error::{CheckError, Result, TransportError};
pub use probe::{ConsoleReport, HyperProbeClient, ProbeClient, ProxyChecker};
