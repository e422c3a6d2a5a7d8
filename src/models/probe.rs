use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use super::ProxyEndpoint;

/// Response to a single probe request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub status_code: u16,
    /// Header name/value pairs in the order the response carried them
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub elapsed: Duration,
}

impl ProbeResult {
    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Display adapter rendering headers as `{"name": "value", ...}`
    pub fn headers_display(&self) -> HeadersDisplay<'_> {
        HeadersDisplay(&self.headers)
    }
}

pub struct HeadersDisplay<'a>(&'a [(String, String)]);

impl fmt::Display for HeadersDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "\"{}\": \"{}\"", name, value)?;
        }
        f.write_str("}")
    }
}

/// Body returned by the IP echo service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdentityResponse {
    pub origin: String,
}

/// Everything learned about one endpoint during a pass
#[derive(Debug, Clone)]
pub struct EndpointReport {
    pub endpoint: ProxyEndpoint,
    pub connectivity: Option<ProbeResult>,
    pub identity: Option<ProbeResult>,
    /// Origin IP, only set when the identity probe answered 200
    pub origin: Option<String>,
    /// Error message when the endpoint's checks were cut short
    pub error: Option<String>,
}

impl EndpointReport {
    pub fn new(endpoint: ProxyEndpoint) -> Self {
        Self {
            endpoint,
            connectivity: None,
            identity: None,
            origin: None,
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Number of probe responses received
    pub fn probes_completed(&self) -> usize {
        self.connectivity.iter().count() + self.identity.iter().count()
    }
}
