use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;
use url::Url;

use crate::error::{AppError, GeminiError};

/// Single user-turn request body for `generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Part {
    pub text: String,
}

impl GenerateContentRequest {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part { text: text.into() }],
            }],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts, if any.
    pub fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.is_empty()).then_some(text)
    }
}

pub struct GeminiApi;

impl GeminiApi {
    /// One best-effort `generateContent` call. No retry: a failed translation
    /// is reported to the user and they can simply re-ask.
    pub async fn generate(
        client: &reqwest::Client,
        url: Url,
        api_key: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AppError> {
        let resp = client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let bytes = resp.bytes().await?;
            error!(%status, "Gemini API returned an error");
            return match serde_json::from_slice::<GeminiError>(&bytes) {
                Ok(parsed) => Err(AppError::GeminiApi(parsed)),
                Err(_) => Err(AppError::UpstreamStatus(
                    StatusCode::from_u16(status.as_u16())
                        .unwrap_or(StatusCode::BAD_GATEWAY),
                )),
            };
        }

        Ok(resp.json::<GenerateContentResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_text_concatenates_parts() {
        let resp: GenerateContentResponse = serde_json::from_str(
            r#"{
                "candidates": [{
                    "content": { "parts": [{ "text": "SELECT " }, { "text": "1" }] },
                    "finishReason": "STOP"
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(resp.first_text().as_deref(), Some("SELECT 1"));
    }

    #[test]
    fn first_text_is_none_without_candidates() {
        let resp: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.first_text().is_none());
    }
}
