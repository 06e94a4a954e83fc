use std::time::Duration;

use admin_logging::{admin_debug, admin_trace};
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::ApiError;

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            user_agent: concat!("scraper-admin/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

/// GraphQL-over-HTTP transport for the scraping backend.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    endpoint: reqwest::Url,
    api_key: Option<String>,
    settings: ClientSettings,
    client: reqwest::Client,
}

impl GraphqlClient {
    pub fn new(
        endpoint: &str,
        api_key: Option<String>,
        settings: ClientSettings,
    ) -> Result<Self, ApiError> {
        let endpoint = reqwest::Url::parse(endpoint)
            .map_err(|err| ApiError::InvalidEndpoint(format!("{endpoint}: {err}")))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        Ok(Self {
            endpoint,
            api_key,
            settings,
            client,
        })
    }

    /// Runs one operation and decodes `data.<field>`. A `null` field decodes
    /// into `T` as-is, so `Option<_>` targets see `None`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
        field: &str,
    ) -> Result<T, ApiError> {
        let body = json!({ "query": query, "variables": variables });
        let body = serde_json::to_vec(&body).map_err(|err| ApiError::Decode(err.to_string()))?;
        admin_trace!("graphql request field={} bytes={}", field, body.len());

        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, self.settings.user_agent.as_str())
            .body(body);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key.as_str());
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).chars().take(200).collect();
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GraphqlResponse =
            serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode(err.to_string()))?;
        if !envelope.errors.is_empty() {
            let messages = envelope.errors.into_iter().map(|e| e.message).collect();
            return Err(ApiError::Graphql(messages));
        }

        let mut data = envelope
            .data
            .ok_or_else(|| ApiError::MissingData(field.to_string()))?;
        let value = data
            .get_mut(field)
            .map(Value::take)
            .ok_or_else(|| ApiError::MissingData(field.to_string()))?;
        admin_debug!("graphql response field={} ok", field);
        serde_json::from_value(value).map_err(|err| ApiError::Decode(format!("{field}: {err}")))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout;
    }
    ApiError::Network(err.to_string())
}
