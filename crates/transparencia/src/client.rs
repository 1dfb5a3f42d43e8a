//! Portal da Transparência API client
//!
//! Thin wrapper around `reqwest::blocking::Client` that centralizes the
//! API-key header, Accept header, and USER_AGENT. Responses are returned
//! as raw JSON with no schema validation and no retries.

use crate::config::network::USER_AGENT;
use crate::config::portal::{API_BASE_URL, API_KEY_HEADER};
use crate::error::{PortalError, Result};

use serde_json::Value;

/// Client for the transparency data REST API
pub struct PortalClient {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl PortalClient {
    /// Create a client against the production API
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, API_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing or mirrors)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// The configured API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Build a full API URL from an endpoint path
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET an endpoint and return the JSON body verbatim.
    ///
    /// Only parameters with non-empty values reach the query string; an
    /// empty value means "not filtered", never `?campo=`. A non-success
    /// status becomes [`PortalError::Upstream`] with the raw body text.
    pub fn query(&self, endpoint: &str, params: &[(String, String)]) -> Result<Value> {
        let query = defined_params(params);
        let url = self.url(endpoint);
        tracing::debug!(endpoint, params = query.len(), "portal API request");

        let response = self
            .client
            .get(&url)
            .query(&query)
            .header(API_KEY_HEADER, &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(PortalError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json()?)
    }
}

/// Drop parameters whose value is empty
fn defined_params(params: &[(String, String)]) -> Vec<(&str, &str)> {
    params
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_client_creation() {
        let client = PortalClient::new("some-key");
        assert!(client.is_ok());
    }

    #[test]
    fn test_url_building() {
        let client = PortalClient::with_base_url("k", "https://api.example.com").unwrap();
        assert_eq!(
            client.url("/servidores"),
            "https://api.example.com/servidores"
        );
    }

    #[test]
    fn test_api_key_accessor() {
        let client = PortalClient::with_base_url("minha-chave", "http://localhost").unwrap();
        assert_eq!(client.api_key(), "minha-chave");
    }

    #[test]
    fn test_defined_params_drops_empty_values() {
        let params = pairs(&[
            ("dataEmissaoDe", "01/01/2024"),
            ("codigoOrgao", ""),
            ("pagina", "2"),
        ]);
        let kept = defined_params(&params);
        assert_eq!(kept, vec![("dataEmissaoDe", "01/01/2024"), ("pagina", "2")]);
    }

    #[test]
    fn test_defined_params_all_empty() {
        let params = pairs(&[("a", ""), ("b", "")]);
        assert!(defined_params(&params).is_empty());
    }

    #[test]
    fn test_query_sends_api_key_and_accept_headers() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/servidores")
                .header("chave-api-dados", "chave-teste")
                .header("accept", "application/json");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!([]));
        });

        let client = PortalClient::with_base_url("chave-teste", server.base_url()).unwrap();
        let result = client.query("/servidores", &[]);

        mock.assert();
        assert!(result.is_ok());
    }

    #[test]
    fn test_query_forwards_parameters() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/despesas")
                .query_param("dataEmissaoDe", "01/01/2024")
                .query_param("pagina", "2");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"total": 0}));
        });

        let client = PortalClient::with_base_url("k", server.base_url()).unwrap();
        let params = pairs(&[
            ("dataEmissaoDe", "01/01/2024"),
            ("codigoOrgao", ""),
            ("pagina", "2"),
        ]);
        let data = client.query("/despesas", &params).unwrap();

        mock.assert();
        assert_eq!(data, json!({"total": 0}));
    }

    #[test]
    fn test_query_returns_body_verbatim() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/contratos");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!([{"id": 1, "extra": {"nested": true}}]));
        });

        let client = PortalClient::with_base_url("k", server.base_url()).unwrap();
        let data = client.query("/contratos", &[]).unwrap();
        assert_eq!(data, json!([{"id": 1, "extra": {"nested": true}}]));
    }

    #[test]
    fn test_query_error_status_carries_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/viagens");
            then.status(500).body("server error");
        });

        let client = PortalClient::with_base_url("k", server.base_url()).unwrap();
        let err = client.query("/viagens", &[]).unwrap_err();

        match err {
            PortalError::Upstream { status, ref body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "server error");
            }
            other => panic!("expected Upstream error, got {other:?}"),
        }
        assert!(err.to_string().contains("server error"));
    }

    #[test]
    fn test_query_forbidden_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/beneficios");
            then.status(401).body("Chave de API invalida");
        });

        let client = PortalClient::with_base_url("chave-errada", server.base_url()).unwrap();
        let err = client.query("/beneficios", &[]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("401"));
        assert!(msg.contains("Chave de API invalida"));
    }

    #[test]
    fn test_query_unreachable_host() {
        let client = PortalClient::with_base_url("k", "http://invalid.invalid.invalid").unwrap();
        let result = client.query("/servidores", &[]);
        assert!(matches!(result, Err(PortalError::Network(_))));
    }
}
