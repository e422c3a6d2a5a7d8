use std::fmt;

/// Proxy protocol type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProxyProtocol {
    #[default]
    Http,
    Socks5,
}

impl ProxyProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProxyProtocol::Http => "http",
            ProxyProtocol::Socks5 => "socks5",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "http" => Some(ProxyProtocol::Http),
            "socks5" | "socks5h" => Some(ProxyProtocol::Socks5),
            _ => None,
        }
    }
}

impl fmt::Display for ProxyProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A forward proxy to probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyEndpoint {
    pub host: String,
    pub port: u16,
    pub protocol: ProxyProtocol,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ProxyEndpoint {
    /// Plain HTTP proxy without credentials
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            protocol: ProxyProtocol::Http,
            username: None,
            password: None,
        }
    }

    pub fn with_protocol(mut self, protocol: ProxyProtocol) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// `host:port`, bracketing IPv6 literals
    pub fn address(&self) -> String {
        if self.host.contains(':') && !(self.host.starts_with('[') && self.host.ends_with(']')) {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Proxy URL without credentials
    pub fn url(&self) -> String {
        format!("{}://{}", self.protocol.as_str(), self.address())
    }

    /// Scheme-to-proxy mapping used for every probe through this endpoint
    pub fn settings(&self) -> ProxySettings {
        let url = self.url();
        ProxySettings {
            http: url.clone(),
            https: url,
        }
    }
}

impl fmt::Display for ProxyEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address())
    }
}

/// Which proxy URL serves each target scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySettings {
    pub http: String,
    pub https: String,
}

impl fmt::Display for ProxySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{\"http\": \"{}\", \"https\": \"{}\"}}", self.http, self.https)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_protocol_parsing() {
        assert_eq!(ProxyProtocol::from_str("HTTP"), Some(ProxyProtocol::Http));
        assert_eq!(ProxyProtocol::from_str("socks5h"), Some(ProxyProtocol::Socks5));
        assert_eq!(ProxyProtocol::from_str("socks4"), None);
        assert_eq!(ProxyProtocol::default(), ProxyProtocol::Http);
        assert_eq!(ProxyProtocol::Socks5.to_string(), "socks5");
    }

    #[test]
    fn test_settings_map_both_schemes_to_proxy() {
        let endpoint = ProxyEndpoint::new("4.213.32.142", 3128);
        let settings = endpoint.settings();

        assert_eq!(settings.http, "http://4.213.32.142:3128");
        assert_eq!(settings.https, "http://4.213.32.142:3128");
        assert_eq!(
            settings.to_string(),
            r#"{"http": "http://4.213.32.142:3128", "https": "http://4.213.32.142:3128"}"#
        );
    }

    #[test]
    fn test_url_omits_credentials() {
        let endpoint = ProxyEndpoint::new("10.0.0.1", 1080)
            .with_protocol(ProxyProtocol::Socks5)
            .with_credentials("user", "secret");

        assert_eq!(endpoint.url(), "socks5://10.0.0.1:1080");
        assert!(!endpoint.settings().to_string().contains("secret"));
    }

    #[test]
    fn test_address_brackets_ipv6() {
        assert_eq!(ProxyEndpoint::new("::1", 3128).address(), "[::1]:3128");
        assert_eq!(ProxyEndpoint::new("[::1]", 3128).address(), "[::1]:3128");
        assert_eq!(ProxyEndpoint::new("proxy.local", 8080).to_string(), "proxy.local:8080");
    }
}
