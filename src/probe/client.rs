//! HTTP client used by the probes.
//!
//! Every request opens a fresh connection to the proxy; nothing is pooled.

use std::time::{Duration, Instant};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper::header::{HOST, PROXY_AUTHORIZATION, USER_AGENT};
use hyper::{Method, Request};
use hyper_util::rt::TokioIo;
use tracing::{debug, instrument};
use url::Url;

use crate::error::TransportError;
use crate::models::{ProbeResult, ProxyEndpoint, ProxyProtocol};
use crate::probe::transport;

const PROBE_USER_AGENT: &str = concat!("proxy-probe/", env!("CARGO_PKG_VERSION"));

/// Issues a GET through a proxy
#[async_trait::async_trait]
pub trait ProbeClient: Send + Sync {
    /// GET `target` through `proxy`, failing if the whole exchange takes
    /// longer than `timeout`
    async fn get(
        &self,
        proxy: &ProxyEndpoint,
        target: &Url,
        timeout: Duration,
    ) -> Result<ProbeResult, TransportError>;
}

/// `ProbeClient` speaking HTTP/1.1 over hyper
#[derive(Debug, Clone, Default)]
pub struct HyperProbeClient;

impl HyperProbeClient {
    pub fn new() -> Self {
        Self
    }

    async fn exchange(&self, proxy: &ProxyEndpoint, target: &Url) -> Result<ProbeResult, TransportError> {
        let start = Instant::now();
        let (target_host, target_port) = parse_target(target)?;

        let stream = transport::connect(proxy, &target_host, target_port).await?;
        let request = build_request(proxy, target, &target_host, target_port)?;

        let io = TokioIo::new(stream);
        let (mut sender, conn) = hyper::client::conn::http1::Builder::new()
            .title_case_headers(true)
            .handshake(io)
            .await
            .map_err(|e| TransportError::Connect(format!("Handshake failed: {}", e)))?;

        tokio::spawn(async move {
            if let Err(e) = conn.await {
                debug!("Connection ended: {}", e);
            }
        });

        let response = sender.send_request(request).await?;

        let status_code = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    title_case(name.as_str()),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?
            .to_bytes();

        Ok(ProbeResult {
            status_code,
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
            elapsed: start.elapsed(),
        })
    }
}

#[async_trait::async_trait]
impl ProbeClient for HyperProbeClient {
    #[instrument(skip(self, proxy, target, timeout), fields(proxy = %proxy, target = %target))]
    async fn get(
        &self,
        proxy: &ProxyEndpoint,
        target: &Url,
        timeout: Duration,
    ) -> Result<ProbeResult, TransportError> {
        let result = tokio::time::timeout(timeout, self.exchange(proxy, target))
            .await
            .map_err(|_| TransportError::Timeout(timeout))??;

        debug!(
            status = result.status_code,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "Probe response received"
        );
        Ok(result)
    }
}

/// Host and port of an http target
fn parse_target(target: &Url) -> Result<(String, u16), TransportError> {
    if target.scheme() != "http" {
        return Err(TransportError::UnsupportedScheme(target.scheme().to_string()));
    }

    let host = target
        .host_str()
        .ok_or_else(|| TransportError::InvalidTarget(format!("missing host in {}", target)))?;
    let host = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    let port = target.port_or_known_default().unwrap_or(80);

    Ok((host.to_string(), port))
}

/// Build the GET for `target`.
///
/// HTTP proxies get the absolute-form request target; a SOCKS5 tunnel is
/// already connected to the origin and gets the origin form.
fn build_request(
    proxy: &ProxyEndpoint,
    target: &Url,
    target_host: &str,
    target_port: u16,
) -> Result<Request<Empty<Bytes>>, TransportError> {
    let path_and_query = match target.query() {
        Some(query) => format!("{}?{}", target.path(), query),
        None => target.path().to_string(),
    };
    let uri = match proxy.protocol {
        ProxyProtocol::Http => format!("http://{}{}", host_header(target_host, target_port), path_and_query),
        ProxyProtocol::Socks5 => path_and_query,
    };

    let mut builder = Request::builder()
        .method(Method::GET)
        .uri(&uri)
        .header(HOST, host_header(target_host, target_port))
        .header(USER_AGENT, PROBE_USER_AGENT)
        .header("Accept", "*/*");

    if proxy.protocol == ProxyProtocol::Http {
        if let Some(username) = &proxy.username {
            let password = proxy.password.as_deref().unwrap_or("");
            let credentials = format!("{}:{}", username, password);
            builder = builder.header(
                PROXY_AUTHORIZATION,
                format!("Basic {}", BASE64.encode(credentials.as_bytes())),
            );
        }
    }

    builder
        .body(Empty::new())
        .map_err(|e| TransportError::InvalidTarget(format!("Failed to build request: {}", e)))
}

/// `content-type` -> `Content-Type`; hyper hands header names back lowercased
fn title_case(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn host_header(host: &str, port: u16) -> String {
    let host = if host.contains(':') {
        format!("[{}]", host)
    } else {
        host.to_string()
    };

    if port == 80 {
        host
    } else {
        format!("{}:{}", host, port)
    }
}
