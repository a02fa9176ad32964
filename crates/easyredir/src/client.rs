//! Transport: one authenticated HTTP call per operation, with response
//! classification shared by every resource.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{ApiErrors, Error};

const MEDIA_TYPE: &str = "application/json; charset=utf-8";
const HEADER_IDEMPOTENCY_KEY: &str = "Idempotency-Key";
const HEADER_RATELIMIT_LIMIT: &str = "X-Ratelimit-Limit";
const HEADER_RATELIMIT_REMAINING: &str = "X-Ratelimit-Remaining";
const HEADER_RATELIMIT_RESET: &str = "X-Ratelimit-Reset";

/// Client for the Easyredir REST API.
///
/// Holds the HTTP client and the connection settings; cheap to clone and
/// carries no mutable state, so one value can serve any number of calls.
/// Operations never retry on their own.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    config: Config,
}

impl Client {
    /// Build a client from the given settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] when the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: Config) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(Error::Transport)?;
        Ok(Self { http, config })
    }

    /// Settings the client was built with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Issue one authenticated request and classify the outcome.
    ///
    /// Attaches HTTP Basic credentials and the JSON media type; mutating
    /// verbs additionally carry a fresh `Idempotency-Key` per call, never
    /// reused, so a caller-driven retry always presents a new token.
    pub(crate) async fn send_request(
        &self,
        path_query: &str,
        method: Method,
        body: Option<String>,
    ) -> Result<Response, Error> {
        let url = format!("{}{}", self.config.base_url(), path_query);
        tracing::debug!(method = %method, url = %url, "sending request");

        let mutating = matches!(method.as_str(), "POST" | "PUT" | "PATCH");
        let mut request = self
            .http
            .request(method, url)
            .basic_auth(self.config.api_key(), Some(self.config.api_secret()))
            .header(CONTENT_TYPE, MEDIA_TYPE)
            .header(ACCEPT, MEDIA_TYPE);

        if mutating {
            request = request.header(HEADER_IDEMPOTENCY_KEY, Uuid::new_v4().to_string());
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(Error::Transport)?;
        classify(response).await
    }
}

/// Map a response to the error taxonomy, in priority order: rate limit,
/// structured API error, generic status error. Success passes the response
/// through for the caller to decode.
async fn classify(response: Response) -> Result<Response, Error> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(Error::RateLimited {
            limit: header_value(&response, HEADER_RATELIMIT_LIMIT),
            remaining: header_value(&response, HEADER_RATELIMIT_REMAINING),
            reset: header_value(&response, HEADER_RATELIMIT_RESET),
        });
    }

    let code = status.as_u16();
    if !(200..400).contains(&code) {
        let body = response.bytes().await.unwrap_or_default();
        if let Ok(api) = serde_json::from_slice::<ApiErrors>(&body) {
            return Err(Error::Api(api));
        }
        return Err(Error::Status(code));
    }

    Ok(response)
}

fn header_value(response: &Response, name: &str) -> String {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Decode a successful response body, consuming it fully.
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
    response.json().await.map_err(Error::Decode)
}
