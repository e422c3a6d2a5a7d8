//! Proxy probing
//!
//! This module provides:
//! - Dialing HTTP and SOCKS5 proxies
//! - An HTTP/1.1 probe client with per-request timeouts
//! - The sequential two-probe checker
//! - The console report

pub mod checker;
pub mod client;
pub mod report;
pub mod transport;

pub use checker::ProxyChecker;
pub use client::{HyperProbeClient, ProbeClient};
pub use report::ConsoleReport;
