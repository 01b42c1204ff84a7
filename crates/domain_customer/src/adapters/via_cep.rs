//! ViaCEP Address Adapter
//!
//! This module provides the adapter for the ViaCEP postal-code service,
//! implementing the `AddressLookupPort` trait over its REST API.
//!
//! # Protocol
//!
//! `GET {base_url}/{postal_code}/json` answers with a JSON object using the
//! provider's Portuguese field names (`logradouro`, `bairro`, `localidade`,
//! `uf`, ...). An unknown but well-formed code still answers `200` with
//! `{"erro": true}`; a malformed one answers `400`.
//!
//! # Error Handling
//!
//! Provider outcomes are mapped to `PortError` variants:
//! - `{"erro": true}`, 400, 404 -> `PortError::NotFound`
//! - 429 -> `PortError::RateLimited`
//! - 5xx -> `PortError::ServiceUnavailable`
//! - Timeouts -> `PortError::Timeout`
//! - Connect failures -> `PortError::Connection`
//! - Undecodable bodies -> `PortError::Transformation`
//!
//! Each call issues exactly one request. There is no retry and no circuit
//! breaker; the caller decides what an upstream failure means.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{header::RETRY_AFTER, Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError};

use crate::address::NewAddress;
use crate::ports::AddressLookupPort;

const ADAPTER_ID: &str = "viacep-adapter";

/// Configuration for the ViaCEP adapter
#[derive(Debug, Clone)]
pub struct ViaCepConfig {
    /// Base URL of the API (e.g., "https://viacep.com.br/ws")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ViaCepConfig {
    fn default() -> Self {
        Self {
            base_url: "https://viacep.com.br/ws".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Address lookup backed by ViaCEP
#[derive(Debug, Clone)]
pub struct ViaCepAdapter {
    config: ViaCepConfig,
    base_url: Url,
    client: Client,
}

impl ViaCepAdapter {
    /// Creates a new adapter with the given configuration
    ///
    /// # Errors
    ///
    /// Returns `PortError::Internal` if the base URL cannot be parsed or the
    /// HTTP client cannot be built
    pub fn new(config: ViaCepConfig) -> Result<Self, PortError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| PortError::internal(format!("Invalid ViaCEP base URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(PortError::internal(format!(
                "ViaCEP base URL cannot carry a path: {}",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PortError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            base_url,
            client,
        })
    }

    /// Builds `{base}/{postal_code}/json`, percent-encoding the code
    fn lookup_url(&self, postal_code: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(postal_code).push("json");
        }
        url
    }

    fn map_transport_error(&self, operation: &str, error: reqwest::Error) -> PortError {
        if error.is_timeout() {
            PortError::Timeout {
                operation: operation.to_string(),
                duration_ms: self.config.timeout_secs * 1000,
            }
        } else if error.is_connect() {
            PortError::Connection {
                message: format!("Could not reach ViaCEP: {}", error),
                source: Some(Box::new(error)),
            }
        } else {
            PortError::Internal {
                message: format!("ViaCEP request failed: {}", error),
                source: Some(Box::new(error)),
            }
        }
    }
}

impl DomainPort for ViaCepAdapter {}

#[async_trait]
impl HealthCheckable for ViaCepAdapter {
    /// Reports the adapter without calling the provider
    ///
    /// ViaCEP has no health endpoint and every request is a real lookup.
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::new(ADAPTER_ID, AdapterHealth::Unknown, 0)
            .with_message(format!("Not checked, lookups go to {}", self.config.base_url))
    }
}

#[async_trait]
impl AddressLookupPort for ViaCepAdapter {
    #[instrument(skip(self), fields(adapter = ADAPTER_ID))]
    async fn lookup(&self, postal_code: &str) -> Result<NewAddress, PortError> {
        let url = self.lookup_url(postal_code);
        let operation = format!("GET {}", url);
        let start = Instant::now();

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_transport_error(&operation, e))?;

        let status = response.status();
        debug!(status = status.as_u16(), latency_ms = start.elapsed().as_millis() as u64, "ViaCEP responded");

        match status {
            s if s.is_success() => {}
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => {
                return Err(PortError::not_found("PostalCode", postal_code));
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after_secs = response
                    .headers()
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(0);
                return Err(PortError::RateLimited { retry_after_secs });
            }
            s if s.is_server_error() => {
                warn!(status = s.as_u16(), "ViaCEP unavailable");
                return Err(PortError::ServiceUnavailable {
                    service: format!("viacep ({})", s),
                });
            }
            s => {
                return Err(PortError::internal(format!(
                    "Unexpected ViaCEP status {} for {}",
                    s, operation
                )));
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(&operation, e))?;

        parse_lookup_body(postal_code, &body)
    }
}

/// Body returned by ViaCEP
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    logradouro: Option<String>,
    complemento: Option<String>,
    bairro: Option<String>,
    localidade: Option<String>,
    uf: Option<String>,
    /// `true` (or `"true"` in newer API versions) for unknown codes
    erro: Option<serde_json::Value>,
}

impl ViaCepResponse {
    fn is_error(&self) -> bool {
        match &self.erro {
            Some(serde_json::Value::Bool(flag)) => *flag,
            Some(serde_json::Value::String(flag)) => flag.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

/// Maps a ViaCEP body to address data stored under the requested code
fn parse_lookup_body(postal_code: &str, body: &str) -> Result<NewAddress, PortError> {
    let parsed: ViaCepResponse = serde_json::from_str(body).map_err(|e| {
        PortError::Transformation {
            message: format!("Invalid ViaCEP body for {}: {}", postal_code, e),
        }
    })?;

    if parsed.is_error() {
        return Err(PortError::not_found("PostalCode", postal_code));
    }

    Ok(NewAddress {
        postal_code: postal_code.to_string(),
        street: non_empty(parsed.logradouro),
        complement: non_empty(parsed.complemento),
        neighborhood: non_empty(parsed.bairro),
        city: non_empty(parsed.localidade),
        state: non_empty(parsed.uf),
    })
}

// ViaCEP sends "" for fields it has no value for
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ViaCepConfig::default();
        assert_eq!(config.base_url, "https://viacep.com.br/ws");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_lookup_url_appends_code_and_format() {
        let adapter = ViaCepAdapter::new(ViaCepConfig::default()).unwrap();
        assert_eq!(
            adapter.lookup_url("01001-000").as_str(),
            "https://viacep.com.br/ws/01001-000/json"
        );
    }

    #[test]
    fn test_lookup_url_tolerates_trailing_slash_and_encodes() {
        let adapter = ViaCepAdapter::new(ViaCepConfig {
            base_url: "http://localhost:9000/ws/".to_string(),
            timeout_secs: 1,
        })
        .unwrap();
        assert_eq!(
            adapter.lookup_url("01 001/000").as_str(),
            "http://localhost:9000/ws/01%20001%2F000/json"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = ViaCepAdapter::new(ViaCepConfig {
            base_url: "not a url".to_string(),
            timeout_secs: 1,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_full_body() {
        let body = r#"{
            "cep": "01001-000",
            "logradouro": "Praça da Sé",
            "complemento": "lado ímpar",
            "bairro": "Sé",
            "localidade": "São Paulo",
            "uf": "SP",
            "ibge": "3550308",
            "ddd": "11"
        }"#;

        let address = parse_lookup_body("01001000", body).unwrap();
        assert_eq!(address.postal_code, "01001000");
        assert_eq!(address.street.as_deref(), Some("Praça da Sé"));
        assert_eq!(address.complement.as_deref(), Some("lado ímpar"));
        assert_eq!(address.neighborhood.as_deref(), Some("Sé"));
        assert_eq!(address.city.as_deref(), Some("São Paulo"));
        assert_eq!(address.state.as_deref(), Some("SP"));
    }

    #[test]
    fn test_parse_blank_fields_become_none() {
        let body = r#"{"cep": "69900-000", "logradouro": "", "complemento": "", "bairro": "", "localidade": "Rio Branco", "uf": "AC"}"#;

        let address = parse_lookup_body("69900-000", body).unwrap();
        assert!(address.street.is_none());
        assert!(address.complement.is_none());
        assert!(address.neighborhood.is_none());
        assert_eq!(address.city.as_deref(), Some("Rio Branco"));
    }

    #[test]
    fn test_parse_error_flag() {
        let error = parse_lookup_body("99999-999", r#"{"erro": true}"#).unwrap_err();
        assert!(error.is_not_found());

        let error = parse_lookup_body("99999-999", r#"{"erro": "true"}"#).unwrap_err();
        assert!(error.is_not_found());
    }

    #[test]
    fn test_parse_garbage_is_transformation_error() {
        let error = parse_lookup_body("01001-000", "<html>").unwrap_err();
        assert!(matches!(error, PortError::Transformation { .. }));
    }

    #[tokio::test]
    async fn test_health_check_reports_unknown_without_a_request() {
        let adapter = ViaCepAdapter::new(ViaCepConfig::default()).unwrap();
        let result = adapter.health_check().await;
        assert_eq!(result.adapter_id, ADAPTER_ID);
        assert_eq!(result.status, AdapterHealth::Unknown);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_lookup_url_ends_with_code_and_format(code in "[0-9]{5}-?[0-9]{3}") {
                let adapter = ViaCepAdapter::new(ViaCepConfig::default()).unwrap();
                let url = adapter.lookup_url(&code);
                let expected = format!("/ws/{}/json", code);
                prop_assert!(url.path().ends_with(&expected));
            }

            #[test]
            fn test_parsed_address_keeps_requested_code(
                code in "[0-9]{5}-[0-9]{3}",
                city in "[A-Za-z ]{1,20}",
            ) {
                let body = serde_json::json!({ "cep": "00000-000", "localidade": city }).to_string();
                let address = parse_lookup_body(&code, &body).unwrap();
                prop_assert_eq!(address.postal_code, code);
            }
        }
    }
}
