use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use tubesum_common::{Result, TubesumError};

use crate::llm_trait::LlmClient;
use crate::types::{ErrorBody, ErrorEnvelope, GenerateContentRequest, GenerateRequest, ResponseEnvelope};

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    base_url: String,
    client: Client,
}

impl GeminiClient {
    /// Create new Gemini client
    ///
    /// `timeout` bounds every call, connection and body included.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        info!("Gemini client initialized: {}", base_url);
        Ok(Self { base_url, client })
    }

    fn request_url(&self, model: &str) -> String {
        format!("{}/{}:generateContent", self.base_url, model_path(model))
    }

    /// Single attempt to generate text
    pub async fn generate(&self, request: GenerateRequest) -> Result<String> {
        let url = self.request_url(&request.model);
        let body = GenerateContentRequest::from_prompt(
            &request.prompt,
            request.max_output_tokens,
            request.temperature,
        );

        debug!(
            "Sending generate request to Gemini - Model: {}, Prompt length: {} chars, Max tokens: {}",
            request.model,
            request.prompt.chars().count(),
            request.max_output_tokens
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &request.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TubesumError::external_service(format!("Failed to send request to Gemini: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TubesumError::external_service(format!("Failed to read Gemini response: {}", e)))?;

        if !status.is_success() {
            return Err(TubesumError::external_service(format!(
                "Gemini API error ({}): {}",
                status,
                error_detail(&text)
            )));
        }

        let generated = parse_response(&text)?;
        debug!("Received response from Gemini - Length: {} chars", generated.chars().count());

        Ok(generated)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        GeminiClient::generate(self, request).await
    }
}

/// Resource path for a model id; bare ids live under `models/`
fn model_path(model: &str) -> String {
    let model = model.trim().trim_start_matches('/');
    if model.starts_with("models/") || model.starts_with("tunedModels/") {
        model.to_string()
    } else {
        format!("models/{}", model)
    }
}

/// Provider message from an error body, or the raw body
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => {
            let ErrorBody { code, message, status } = envelope.error;
            match (status, code) {
                (Some(status), _) => format!("{} [{}]", message, status),
                (None, Some(code)) => format!("{} [{}]", message, code),
                (None, None) => message,
            }
        }
        _ if body.trim().is_empty() => "empty response body".to_string(),
        _ => body.trim().to_string(),
    }
}

fn parse_response(body: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| TubesumError::external_service(format!("Malformed Gemini response: {}", e)))?;

    if !value.is_object() {
        return Err(TubesumError::external_service(
            "Unexpected Gemini response shape: expected a JSON object",
        ));
    }

    let envelope: ResponseEnvelope = serde_json::from_value(value)
        .map_err(|e| TubesumError::external_service(format!("Unexpected Gemini response shape: {}", e)))?;

    Ok(envelope.text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_client(server: &MockServer) -> GeminiClient {
        GeminiClient::new(server.uri(), Duration::from_secs(5)).expect("Failed to create test client")
    }

    fn request(model: &str) -> GenerateRequest {
        GenerateRequest {
            api_key: "test-api-key".to_string(),
            model: model.to_string(),
            prompt: "Summarize this".to_string(),
            max_output_tokens: 800,
            temperature: 0.2,
        }
    }

    #[test]
    fn test_model_path() {
        assert_eq!(model_path("gemini-2.5-flash"), "models/gemini-2.5-flash");
        assert_eq!(model_path("models/text-bison-001"), "models/text-bison-001");
        assert_eq!(model_path("tunedModels/mine"), "tunedModels/mine");
    }

    #[test]
    fn test_error_detail() {
        let body = r#"{"error": {"code": 403, "message": "Permission denied", "status": "PERMISSION_DENIED"}}"#;
        assert_eq!(error_detail(body), "Permission denied [PERMISSION_DENIED]");
        assert_eq!(error_detail(r#"{"error": {"code": 429, "message": "Quota exceeded"}}"#), "Quota exceeded [429]");
        assert_eq!(error_detail(r#"{"error": {"message": "Bad"}}"#), "Bad");
        assert_eq!(error_detail("upstream exploded"), "upstream exploded");
        assert_eq!(error_detail(""), "empty response body");
    }

    #[tokio::test]
    async fn test_generate_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-test:generateContent"))
            .and(header("x-goog-api-key", "test-api-key"))
            .and(body_partial_json(json!({
                "contents": [{"parts": [{"text": "Summarize this"}]}],
                "generationConfig": {"maxOutputTokens": 800}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "- point one"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = create_test_client(&server)
            .generate(request("gemini-test"))
            .await
            .unwrap();
        assert_eq!(text, "- point one");
    }

    #[tokio::test]
    async fn test_generate_empty_text_is_ok() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/text-bison-001:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "promptFeedback": {"blockReason": "SAFETY"}
            })))
            .mount(&server)
            .await;

        let text = create_test_client(&server)
            .generate(request("models/text-bison-001"))
            .await
            .unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_generate_http_error_single_attempt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = create_test_client(&server)
            .generate(request("gemini-test"))
            .await
            .unwrap_err();

        assert!(matches!(err, TubesumError::ExternalService(_)));
        let msg = err.to_string();
        assert!(msg.contains("400"));
        assert!(msg.contains("API key not valid."));
    }

    #[tokio::test]
    async fn test_generate_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = create_test_client(&server)
            .generate(request("gemini-test"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Malformed Gemini response"));
    }

    #[tokio::test]
    async fn test_generate_non_object_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["not", "an", "object"])))
            .mount(&server)
            .await;

        let err = create_test_client(&server)
            .generate(request("gemini-test"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Unexpected Gemini response shape"));
    }

    #[tokio::test]
    async fn test_generate_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"candidates": [{"content": {"parts": [{"text": "late"}]}}]}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let client = GeminiClient::new(server.uri(), Duration::from_millis(300)).unwrap();
        let err = client.generate(request("gemini-test")).await.unwrap_err();

        assert!(matches!(err, TubesumError::ExternalService(_)));
        assert!(err.to_string().contains("Failed to send request to Gemini"));
    }

    #[tokio::test]
    async fn test_generate_transport_error() {
        // Nothing listens on the discard port
        let client = GeminiClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = client.generate(request("gemini-test")).await.unwrap_err();
        assert!(matches!(err, TubesumError::ExternalService(_)));
    }
}
