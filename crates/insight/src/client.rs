use crate::error::InsightError;
use crate::response::extract_text;
use fabwatch_config::InsightConfig;
use serde_json::{json, Map, Value};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// One prompt-in / text-out request.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f32>,
    /// When set, the service is asked for JSON matching this schema.
    pub json_schema: Option<Value>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }
}

/// Anything that turns a prompt into text.
///
/// An empty string means the service answered without any text.
pub trait TextGenerator {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<String, InsightError>> + Send;
}

/// HTTP client for the Gemini `generateContent` API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http:         reqwest::Client,
    endpoint:     String,
    model:        String,
    api_key:      Option<String>,
    api_key_env:  String,
    max_attempts: u32,
    backoff:      Duration,
}

impl GeminiClient {
    /// Build a client from config, reading the API key from the configured
    /// environment variable. A missing key is reported on first use; only a
    /// failure to set up the HTTP stack is an error here.
    pub fn from_config(config: &InsightConfig) -> Result<Self, InsightError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            warn!(
                "${} is not set; AI insight requests will fail",
                config.api_key_env
            );
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            api_key_env: config.api_key_env.clone(),
            max_attempts: config.max_attempts.max(1),
            backoff: Duration::from_millis(config.retry_backoff_ms),
        })
    }

    pub fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    async fn send_once(&self, key: &str, body: &Value) -> Result<String, InsightError> {
        let resp = self
            .http
            .post(self.url())
            .header("x-goog-api-key", key)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(InsightError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = resp
            .json()
            .await
            .map_err(|e| InsightError::Decode(e.to_string()))?;
        Ok(extract_text(&value).unwrap_or_default())
    }
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, InsightError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| InsightError::MissingApiKey(self.api_key_env.clone()))?;
        let body = request_body(request);

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.send_once(key, &body).await {
                Ok(text) => {
                    debug!(attempt, chars = text.len(), "generateContent ok");
                    return Ok(text);
                }
                Err(e) if e.is_transient() && attempt < self.max_attempts => {
                    warn!("generateContent attempt {attempt} failed: {e}; retrying");
                    tokio::time::sleep(self.backoff * attempt).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// JSON body of a `generateContent` call.
pub fn request_body(request: &GenerationRequest) -> Value {
    let mut config = Map::new();
    if let Some(tokens) = request.max_output_tokens {
        config.insert("maxOutputTokens".into(), json!(tokens));
    }
    if let Some(temperature) = request.temperature {
        config.insert("temperature".into(), json!(temperature));
    }
    if let Some(schema) = &request.json_schema {
        config.insert("responseMimeType".into(), json!("application/json"));
        config.insert("responseSchema".into(), schema.clone());
    }

    let mut body = json!({
        "contents": [{ "role": "user", "parts": [{ "text": request.prompt }] }]
    });
    if !config.is_empty() {
        body["generationConfig"] = Value::Object(config);
    }
    body
}
