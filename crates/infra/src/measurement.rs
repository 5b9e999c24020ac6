//! HTTP transport for a Measurement-Protocol-style collector.

use storepulse_analytics::{AnalyticsTransport, PurchasePayload, TransportError};

/// Default GA4-style collector endpoint.
pub const DEFAULT_COLLECT_ENDPOINT: &str = "https://www.google-analytics.com/mp/collect";

/// Blocking HTTP transport posting purchase payloads to a collector.
///
/// Authenticates with the measurement-id/api-secret query pair the
/// Measurement Protocol expects. Timeouts and retries are this layer's
/// concern, not the orchestrator's; a conservative request timeout keeps a
/// slow collector from stalling the host's invoice transaction.
#[derive(Debug)]
pub struct MeasurementProtocolTransport {
    http: reqwest::blocking::Client,
    endpoint: String,
    measurement_id: String,
    api_secret: String,
}

impl MeasurementProtocolTransport {
    pub fn new(
        measurement_id: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<Self, TransportError> {
        Self::with_endpoint(DEFAULT_COLLECT_ENDPOINT, measurement_id, api_secret)
    }

    pub fn with_endpoint(
        endpoint: impl Into<String>,
        measurement_id: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<Self, TransportError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(5))
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            measurement_id: measurement_id.into(),
            api_secret: api_secret.into(),
        })
    }
}

impl AnalyticsTransport for MeasurementProtocolTransport {
    fn send(&self, payload: &PurchasePayload) -> Result<(), TransportError> {
        let response = self
            .http
            .post(&self.endpoint)
            .query(&[
                ("measurement_id", self.measurement_id.as_str()),
                ("api_secret", self.api_secret.as_str()),
            ])
            .json(payload)
            .send()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Rejected(status.as_u16()));
        }
        Ok(())
    }
}
