//! Two-probe check of each proxy endpoint
//!
//! Endpoints are checked one after another. For each endpoint a connectivity
//! probe runs first, then an identity probe against an IP echo service. A
//! failure in either ends that endpoint's checks and the run moves on.

use std::io::{self, Write};
use std::time::Duration;

use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::CheckerConfig;
use crate::error::{Result, TransportError};
use crate::models::{EndpointReport, IdentityResponse, ProxyEndpoint};
use crate::probe::client::ProbeClient;
use crate::probe::report::ConsoleReport;

/// Why an endpoint's checks stopped early
enum Interrupted {
    Probe(TransportError),
    Output(io::Error),
}

impl From<TransportError> for Interrupted {
    fn from(err: TransportError) -> Self {
        Interrupted::Probe(err)
    }
}

impl From<io::Error> for Interrupted {
    fn from(err: io::Error) -> Self {
        Interrupted::Output(err)
    }
}

/// Drives the connectivity and identity probes for each endpoint
pub struct ProxyChecker<C: ProbeClient> {
    client: C,
    timeout: Duration,
    connectivity_url: Url,
    identity_url: Url,
}

impl<C: ProbeClient> ProxyChecker<C> {
    pub fn new(client: C, config: &CheckerConfig) -> Self {
        Self {
            client,
            timeout: config.timeout,
            connectivity_url: config.connectivity_url.clone(),
            identity_url: config.identity_url.clone(),
        }
    }

    /// Check every endpoint in order.
    ///
    /// Probe failures are reported and never abort the run; only a failure
    /// to write the report does.
    pub async fn run_all_checks<W: Write>(
        &self,
        endpoints: &[ProxyEndpoint],
        report: &mut ConsoleReport<W>,
    ) -> Result<Vec<EndpointReport>> {
        info!("Checking {} proxies", endpoints.len());

        let mut reports = Vec::with_capacity(endpoints.len());
        for endpoint in endpoints {
            reports.push(self.check_endpoint(endpoint, report).await?);
        }

        let healthy = reports.iter().filter(|r| r.is_success()).count();
        debug!(
            "Check pass complete: {} ok, {} failed",
            healthy,
            reports.len() - healthy
        );

        Ok(reports)
    }

    /// Run both probes against one endpoint
    #[instrument(skip(self, endpoint, report), fields(proxy = %endpoint))]
    pub async fn check_endpoint<W: Write>(
        &self,
        endpoint: &ProxyEndpoint,
        report: &mut ConsoleReport<W>,
    ) -> Result<EndpointReport> {
        let settings = endpoint.settings();
        let mut outcome = EndpointReport::new(endpoint.clone());

        report.endpoint_started(endpoint)?;

        let probes = async {
            report.connectivity_started()?;
            let connectivity = self
                .client
                .get(endpoint, &self.connectivity_url, self.timeout)
                .await?;
            report.connectivity_result(&connectivity)?;
            outcome.connectivity = Some(connectivity);

            report.identity_started()?;
            let identity = self
                .client
                .get(endpoint, &self.identity_url, self.timeout)
                .await?;
            report.identity_result(&identity)?;

            // Keep the response even when its body turns out not to be JSON.
            let parsed = identity
                .is_ok()
                .then(|| serde_json::from_str::<IdentityResponse>(&identity.body));
            outcome.identity = Some(identity);

            if let Some(parsed) = parsed {
                let parsed = parsed.map_err(TransportError::from)?;
                report.origin(&parsed.origin)?;
                outcome.origin = Some(parsed.origin);
            }

            report.flush()?;
            Ok::<(), Interrupted>(())
        };

        match probes.await {
            Ok(()) => {
                info!(origin = ?outcome.origin, "Proxy {} passed both probes", endpoint);
            }
            Err(Interrupted::Probe(e)) => {
                warn!("Proxy {} failed: {}", endpoint, e);
                let message = e.to_string();
                report.failure(&message, &settings)?;
                outcome.error = Some(message);
            }
            Err(Interrupted::Output(e)) => return Err(e.into()),
        }

        Ok(outcome)
    }
}
