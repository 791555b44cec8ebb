//! Natural-language to SQL translation.
//!
//! The translation step is inherently fuzzy (free text in, hopefully-SQL out),
//! so it lives behind `SqlTranslator`; callers only ever see the extracted
//! statement or an error. A stricter, parser-backed implementation can replace
//! `GeminiTranslator` without touching the orchestrator.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::api::gemini::{GeminiApi, GenerateContentRequest};
use crate::config::Config;
use crate::db::schema::SchemaCatalog;
use crate::error::AppError;

#[async_trait]
pub trait SqlTranslator: Send + Sync {
    /// Translate one question into one SQL statement.
    async fn translate(&self, question: &str) -> Result<String, AppError>;
}

/// Translator backed by the Gemini `generateContent` API.
pub struct GeminiTranslator {
    client: reqwest::Client,
    url: Url,
    api_key: String,
    schema_text: String,
}

impl GeminiTranslator {
    pub fn new(
        client: reqwest::Client,
        cfg: &Config,
        catalog: &SchemaCatalog,
    ) -> Result<Self, AppError> {
        Ok(Self {
            client,
            url: cfg.generate_url()?,
            api_key: cfg.gemini_api_key.clone(),
            schema_text: catalog.prompt_text(),
        })
    }

    fn build_prompt(&self, question: &str) -> String {
        format!(
            "You are a SQL expert. Given the following database schema:\n\n\
             {}\n\
             Write a SQL query to: {}\n\n\
             Return ONLY the SQL query, nothing else. Do not include any \
             explanations or markdown formatting.",
            self.schema_text, question
        )
    }
}

#[async_trait]
impl SqlTranslator for GeminiTranslator {
    async fn translate(&self, question: &str) -> Result<String, AppError> {
        let request = GenerateContentRequest::user_text(self.build_prompt(question));
        let response =
            GeminiApi::generate(&self.client, self.url.clone(), &self.api_key, &request).await?;

        let text = response
            .first_text()
            .ok_or_else(|| AppError::Translation("model response contained no text".to_string()))?;

        let sql = extract_sql(&text);
        if sql.is_empty() {
            return Err(AppError::EmptySql);
        }
        debug!(%sql, "extracted SQL from model response");
        Ok(sql)
    }
}

/// Strip markdown wrapping from a model response to isolate the statement.
///
/// Handles ```sql fences, bare ``` fences (with an optional `sql` language
/// line), and unfenced responses. No grammar check happens here; a statement
/// that only looks like SQL fails later at execution.
pub fn extract_sql(raw: &str) -> String {
    let text = raw.trim();

    if let Some(rest) = text.split_once("```sql").map(|(_, rest)| rest) {
        return rest.split("```").next().unwrap_or("").trim().to_string();
    }

    if let Some(rest) = text.split_once("```").map(|(_, rest)| rest) {
        let inner = rest.split("```").next().unwrap_or("").trim();
        let inner = inner.strip_prefix("sql\n").unwrap_or(inner);
        return inner.trim().to_string();
    }

    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_sql_fence() {
        let raw = "Here you go:\n```sql\nSELECT * FROM customers;\n```";
        assert_eq!(extract_sql(raw), "SELECT * FROM customers;");
    }

    #[test]
    fn extracts_from_bare_fence_with_language_line() {
        let raw = "```\nsql\nSELECT count(*) FROM claims\n```";
        assert_eq!(extract_sql(raw), "SELECT count(*) FROM claims");
    }

    #[test]
    fn passes_through_unfenced_text() {
        assert_eq!(
            extract_sql("  SELECT 1  \n"),
            "SELECT 1"
        );
    }

    #[test]
    fn empty_response_stays_empty() {
        assert_eq!(extract_sql("   "), "");
        assert_eq!(extract_sql("```sql\n```"), "");
    }
}
