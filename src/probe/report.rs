//! Human-readable console report.

use std::io::{self, Write};

use crate::models::{ProbeResult, ProxyEndpoint, ProxySettings};

/// Writes probe progress and results as they happen
pub struct ConsoleReport<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn endpoint_started(&mut self, endpoint: &ProxyEndpoint) -> io::Result<()> {
        writeln!(self.out, "\nTesting proxy server at {}", endpoint.address())
    }

    pub fn connectivity_started(&mut self) -> io::Result<()> {
        writeln!(self.out, "\nTest 1: Checking basic connectivity...")
    }

    pub fn connectivity_result(&mut self, result: &ProbeResult) -> io::Result<()> {
        writeln!(self.out, "Status Code: {}", result.status_code)?;
        writeln!(self.out, "Response Headers: {}", result.headers_display())
    }

    pub fn identity_started(&mut self) -> io::Result<()> {
        writeln!(self.out, "\nTest 2: Checking IP address...")
    }

    pub fn identity_result(&mut self, result: &ProbeResult) -> io::Result<()> {
        writeln!(self.out, "Status Code: {}", result.status_code)?;
        writeln!(self.out, "Response Body: {}", result.body)
    }

    pub fn origin(&mut self, origin: &str) -> io::Result<()> {
        writeln!(self.out, "Your IP appears as: {}", origin)
    }

    pub fn failure(&mut self, message: &str, settings: &ProxySettings) -> io::Result<()> {
        writeln!(self.out, "Error: {}", message)?;
        writeln!(self.out, "\nDebug Information:")?;
        writeln!(self.out, "Proxy Settings: {}", settings)?;
        self.out.flush()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_failure_block_layout() {
        let endpoint = ProxyEndpoint::new("4.213.32.142", 3128);
        let mut report = ConsoleReport::new(Vec::new());

        report.endpoint_started(&endpoint).unwrap();
        report.connectivity_started().unwrap();
        report
            .failure("Request timed out after 10s", &endpoint.settings())
            .unwrap();

        let text = String::from_utf8(report.into_inner()).unwrap();
        assert_eq!(
            text,
            "\nTesting proxy server at 4.213.32.142:3128\n\
             \nTest 1: Checking basic connectivity...\n\
             Error: Request timed out after 10s\n\
             \nDebug Information:\n\
             Proxy Settings: {\"http\": \"http://4.213.32.142:3128\", \"https\": \"http://4.213.32.142:3128\"}\n"
        );
    }

    #[test]
    fn test_identity_lines() {
        let result = ProbeResult {
            status_code: 500,
            headers: Vec::new(),
            body: "upstream exploded".to_string(),
            elapsed: Duration::from_millis(1),
        };
        let mut report = ConsoleReport::new(Vec::new());
        report.identity_result(&result).unwrap();

        let text = String::from_utf8(report.into_inner()).unwrap();
        assert_eq!(text, "Status Code: 500\nResponse Body: upstream exploded\n");
    }
}
