//! Blocking HTTP client for the monetizer API.
//!
//! Every request carries the timeout given at construction. Non-2xx answers are
//! decoded from the server's `{ error, message }` body back into the matching
//! `MonetizerError` variant; bodies that are not in that shape fall back to the
//! HTTP status. Wallet addresses and symbols are percent-encoded as single path
//! segments.
use crate::sequencer::QuoteSource;
use log::debug;
use monetizer_common::error::ErrorBody;
use monetizer_common::net::API_PREFIX;
use monetizer_common::settings::{SettingsUpdate, SuccessResponse};
use monetizer_common::tokens::Token;
use monetizer_common::{ExchangeQuote, MonetizerError, Result, SettingsRecord};
use reqwest::Url;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Thin wrapper over `reqwest::blocking::Client` bound to one server.
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Client for the server at `base_url`; every request gives up after `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url.trim()).map_err(|e| {
            MonetizerError::Configuration(format!("Invalid server URL {}: {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(MonetizerError::Configuration(format!(
                "Server URL {} cannot carry a path",
                base_url
            )));
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MonetizerError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { http, base_url })
    }

    /// `<base>/api/<segments...>`, each segment encoded on its own.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut endpoint = self.base_url.clone();
        endpoint
            .path_segments_mut()
            .map_err(|_| {
                MonetizerError::Configuration(format!(
                    "Server URL {} cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push(API_PREFIX.trim_start_matches('/'))
            .extend(segments);
        Ok(endpoint)
    }

    pub fn get_settings(&self, wallet_address: &str) -> Result<SettingsRecord> {
        let endpoint = self.endpoint(&["settings", wallet_address])?;
        debug!("GET {}", endpoint);
        decode(self.http.get(endpoint).send().map_err(transport)?)
    }

    pub fn save_settings(&self, wallet_address: &str, payout_address: &str) -> Result<()> {
        let endpoint = self.endpoint(&["settings"])?;
        debug!("POST {}", endpoint);
        let response = self
            .http
            .post(endpoint)
            .json(&SettingsUpdate::new(wallet_address, payout_address))
            .send()
            .map_err(transport)?;
        let _: SuccessResponse = decode(response)?;
        Ok(())
    }

    pub fn get_rates(&self, symbol: &str) -> Result<Vec<ExchangeQuote>> {
        let endpoint = self.endpoint(&["rates", symbol])?;
        debug!("GET {}", endpoint);
        decode(self.http.get(endpoint).send().map_err(transport)?)
    }

    pub fn get_tokens(&self, chain_id: u64) -> Result<Vec<Token>> {
        let endpoint = self.endpoint(&["tokens", &chain_id.to_string()])?;
        debug!("GET {}", endpoint);
        decode(self.http.get(endpoint).send().map_err(transport)?)
    }
}

impl QuoteSource for ApiClient {
    fn fetch_quotes(&self, symbol: &str) -> Result<Vec<ExchangeQuote>> {
        self.get_rates(symbol)
    }
}

fn transport(err: reqwest::Error) -> MonetizerError {
    if err.is_timeout() {
        MonetizerError::Transport("Request timed out. Please check your connection and try again.".to_string())
    } else {
        MonetizerError::Transport(err.to_string())
    }
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().map_err(transport)?;
    if status.is_success() {
        Ok(serde_json::from_str(&body)?)
    } else {
        Err(error_from_response(status.as_u16(), &body))
    }
}

/// Maps a failed response to the error the server meant.
pub fn error_from_response(status: u16, body: &str) -> MonetizerError {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return MonetizerError::from(parsed);
    }
    let text = if body.trim().is_empty() {
        format!("HTTP {}", status)
    } else {
        body.trim().to_string()
    };
    match status {
        400 | 422 => MonetizerError::Validation(text),
        503 => MonetizerError::ServiceUnavailable(text),
        _ => MonetizerError::Transport(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_body_wins_over_status() {
        let err = error_from_response(
            500,
            r#"{"error":"configuration_error","message":"Settings database is not configured."}"#,
        );
        assert!(matches!(err, MonetizerError::Configuration(ref m) if m.contains("not configured")));
    }

    #[test]
    fn plain_503_is_unavailable() {
        let err = error_from_response(503, "");
        assert!(matches!(err, MonetizerError::ServiceUnavailable(ref m) if m == "HTTP 503"));
    }

    #[test]
    fn plain_text_client_error_is_validation() {
        let err = error_from_response(422, "Failed to deserialize the JSON body");
        assert!(matches!(err, MonetizerError::Validation(_)));
    }

    #[test]
    fn endpoints_join_prefix() {
        for base in ["http://localhost:3000/", "http://localhost:3000"] {
            let client = ApiClient::new(base, Duration::from_secs(1)).unwrap();
            assert_eq!(
                client.endpoint(&["rates", "ETH"]).unwrap().as_str(),
                "http://localhost:3000/api/rates/ETH"
            );
        }
    }

    #[test]
    fn path_values_are_encoded_as_one_segment() {
        let client = ApiClient::new("http://localhost:3000", Duration::from_secs(1)).unwrap();
        let endpoint = client.endpoint(&["settings", "a/b?c#d"]).unwrap();
        assert_eq!(
            endpoint.as_str(),
            "http://localhost:3000/api/settings/a%2Fb%3Fc%23d"
        );
        assert_eq!(endpoint.query(), None);
        assert_eq!(endpoint.fragment(), None);
    }

    #[test]
    fn unparseable_server_url_is_a_configuration_error() {
        let err = ApiClient::new("localhost:3000/api", Duration::from_secs(1)).err();
        assert!(matches!(err, Some(MonetizerError::Configuration(_))));
    }
}
