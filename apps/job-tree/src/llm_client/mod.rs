//! LLM client, the single point of entry for calls to the local Ollama server.
//!
//! Talks to the non-streaming `POST /api/generate` endpoint. No retries are
//! attempted here; callers decide what a failed call means for their run.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const GENERATE_PATH: &str = "/api/generate";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned an empty completion")]
    EmptyCompletion,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub model: Option<String>,
    /// Ollama names this field `response`; some proxies expose `completion`.
    #[serde(default, alias = "completion")]
    pub response: Option<String>,
    #[serde(default)]
    pub prompt_eval_count: Option<u32>,
    #[serde(default)]
    pub eval_count: Option<u32>,
}

impl GenerateResponse {
    /// The trimmed completion text, if present and non-empty.
    pub fn text(&self) -> Option<&str> {
        self.response
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct OllamaError {
    error: String,
}

/// Thin wrapper over a reqwest client bound to one Ollama server and model.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    base_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(base_url: String, model: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, GENERATE_PATH)
    }

    /// Sends one prompt and returns the full response object.
    pub async fn generate(&self, prompt: &str) -> Result<GenerateResponse, LlmError> {
        let request_body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let parsed = parse_generate_response(status, body)?;

        debug!(
            "LLM call succeeded: model={:?}, prompt_tokens={:?}, completion_tokens={:?}",
            parsed.model, parsed.prompt_eval_count, parsed.eval_count
        );

        Ok(parsed)
    }

    /// Convenience method returning only the completion text.
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.generate(prompt).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyCompletion)
    }
}

/// Maps a raw HTTP status and body onto the generate response or a typed error.
fn parse_generate_response(status: StatusCode, body: String) -> Result<GenerateResponse, LlmError> {
    if !status.is_success() {
        let message = serde_json::from_str::<OllamaError>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        return Err(LlmError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
pub(crate) mod test_server;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_field_is_read() {
        let json = r#"{"model":"deepseek-r1:14b","response":"  hoche.a.b.c.111  ","done":true}"#;
        let parsed: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.text(), Some("hoche.a.b.c.111"));
    }

    #[test]
    fn test_completion_alias_is_accepted() {
        let json = r#"{"completion":"hoche.a.b.c.111"}"#;
        let parsed: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.text(), Some("hoche.a.b.c.111"));
    }

    #[test]
    fn test_missing_or_blank_completion_has_no_text() {
        let missing: GenerateResponse = serde_json::from_str(r#"{"done":true}"#).unwrap();
        assert_eq!(missing.text(), None);
        let blank: GenerateResponse = serde_json::from_str(r#"{"response":"   "}"#).unwrap();
        assert_eq!(blank.text(), None);
    }

    #[test]
    fn test_server_error_uses_ollama_error_message() {
        let err = parse_generate_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"model 'deepseek-r1:14b' not found"}"#.to_string(),
        )
        .unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "model 'deepseek-r1:14b' not found");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_json_error_body_is_kept_verbatim() {
        let err =
            parse_generate_response(StatusCode::NOT_FOUND, "404 page not found".to_string())
                .unwrap_err();
        assert!(matches!(
            err,
            LlmError::Api { status: 404, ref message } if message == "404 page not found"
        ));
    }

    #[test]
    fn test_garbage_success_body_is_parse_error() {
        let err = parse_generate_response(StatusCode::OK, "<html>proxy</html>".to_string())
            .unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
    }

    #[test]
    fn test_success_body_is_parsed() {
        let parsed = parse_generate_response(
            StatusCode::OK,
            r#"{"model":"m","response":"hoche.a.b.c.111","eval_count":7}"#.to_string(),
        )
        .unwrap();
        assert_eq!(parsed.text(), Some("hoche.a.b.c.111"));
        assert_eq!(parsed.eval_count, Some(7));
    }

    #[tokio::test]
    async fn test_generate_posts_non_streaming_request() {
        let (base_url, server) =
            test_server::respond_once("200 OK", r#"{"response":" hoche.a.b.c.111 "}"#).await;
        let client = LlmClient::new(base_url, "llama3:8b".into(), Duration::from_secs(5)).unwrap();

        let text = client.complete("classify me").await.unwrap();
        assert_eq!(text, "hoche.a.b.c.111");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/generate HTTP/1.1"));
        assert!(request.contains(r#""model":"llama3:8b""#));
        assert!(request.contains(r#""stream":false"#));
        assert!(request.contains(r#""prompt":"classify me""#));
    }

    #[tokio::test]
    async fn test_generate_reports_http_status() {
        let (base_url, _server) = test_server::respond_once(
            "500 Internal Server Error",
            r#"{"error":"out of memory"}"#,
        )
        .await;
        let client = LlmClient::new(base_url, "m".into(), Duration::from_secs(5)).unwrap();

        let err = client.generate("p").await.unwrap_err();
        assert!(matches!(
            err,
            LlmError::Api { status: 500, ref message } if message == "out of memory"
        ));
    }

    #[tokio::test]
    async fn test_empty_completion_is_an_error() {
        let (base_url, _server) =
            test_server::respond_once("200 OK", r#"{"response":"","done":true}"#).await;
        let client = LlmClient::new(base_url, "m".into(), Duration::from_secs(5)).unwrap();

        let err = client.complete("p").await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyCompletion));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_http_error() {
        let base_url = test_server::closed_port_url().await;
        let client = LlmClient::new(base_url, "m".into(), Duration::from_secs(5)).unwrap();

        let err = client.generate("p").await.unwrap_err();
        assert!(matches!(err, LlmError::Http(_)));
    }

    #[test]
    fn test_request_body_disables_streaming() {
        let body = GenerateRequest {
            model: "m",
            prompt: "p",
            stream: false,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["stream"], serde_json::Value::Bool(false));
        assert_eq!(value["model"], "m");
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = LlmClient::new(
            "http://127.0.0.1:11434/".into(),
            "m".into(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:11434/api/generate");
        assert_eq!(client.model(), "m");
    }
}
