//! Opens the TCP stream a probe request is written to.
//!
//! HTTP proxies receive the request directly; SOCKS5 proxies are asked to
//! tunnel to the target first.

use tokio::net::TcpStream;
use tokio_socks::tcp::Socks5Stream;
use tracing::{debug, instrument};

use crate::error::TransportError;
use crate::models::{ProxyEndpoint, ProxyProtocol};

/// Dial `endpoint`, tunnelling to `target_host:target_port` when the
/// protocol requires it.
#[instrument(skip(endpoint), fields(proxy = %endpoint, protocol = %endpoint.protocol))]
pub async fn connect(
    endpoint: &ProxyEndpoint,
    target_host: &str,
    target_port: u16,
) -> Result<TcpStream, TransportError> {
    let proxy_addr = endpoint.address();

    match endpoint.protocol {
        ProxyProtocol::Http => TcpStream::connect(&proxy_addr)
            .await
            .map_err(|e| TransportError::Connect(format!("TCP connect to {} failed: {}", proxy_addr, e))),
        ProxyProtocol::Socks5 => connect_via_socks5(endpoint, &proxy_addr, target_host, target_port)
            .await
            .map_err(|e| {
                TransportError::Connect(format!(
                    "SOCKS5 connect failed ({} -> {}:{}): {}",
                    proxy_addr, target_host, target_port, e
                ))
            }),
    }
}

async fn connect_via_socks5(
    endpoint: &ProxyEndpoint,
    proxy_addr: &str,
    target_host: &str,
    target_port: u16,
) -> std::result::Result<TcpStream, anyhow::Error> {
    let socket = TcpStream::connect(proxy_addr).await?;

    let stream = match (&endpoint.username, &endpoint.password) {
        (Some(username), Some(password)) if !password.is_empty() => {
            Socks5Stream::connect_with_password_and_socket(
                socket,
                (target_host, target_port),
                username,
                password,
            )
            .await?
        }
        (Some(_), _) => anyhow::bail!("SOCKS5 auth requires a non-empty password"),
        _ => Socks5Stream::connect_with_socket(socket, (target_host, target_port)).await?,
    };

    debug!("SOCKS5 tunnel established");
    Ok(stream.into_inner())
}
