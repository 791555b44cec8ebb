use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::AppError;

/// Runtime configuration, resolved once in `main` and passed down explicitly.
///
/// Sources, later wins:
/// 1. built-in defaults
/// 2. `CLAIMSIGHT_*` environment variables (e.g. `CLAIMSIGHT_GEMINI_MODEL`)
/// 3. bare `GEMINI_API_KEY` for the one required credential
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_endpoint: Url,
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: String::new(),
            gemini_model: "gemini-2.5-flash".to_string(),
            gemini_endpoint: Url::parse("https://generativelanguage.googleapis.com")
                .expect("static endpoint URL"),
            database_url: "sqlite:health_insurance.db".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let cfg: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("CLAIMSIGHT_"))
            .merge(Env::raw().only(&["gemini_api_key"]))
            .extract()
            .map_err(|e| AppError::Config(e.to_string()))?;

        if cfg.gemini_api_key.trim().is_empty() {
            return Err(AppError::Config(
                "GEMINI_API_KEY is not set; the translation feature cannot run without it"
                    .to_string(),
            ));
        }
        Ok(cfg)
    }

    /// Full URL for the non-streaming `generateContent` RPC of the configured model.
    pub fn generate_url(&self) -> Result<Url, AppError> {
        let path = format!("v1beta/models/{}:generateContent", self.gemini_model);
        Ok(self.gemini_endpoint.join(&path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_url_targets_configured_model() {
        let cfg = Config {
            gemini_model: "gemini-2.5-flash".to_string(),
            ..Config::default()
        };
        let url = cfg.generate_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn defaults_have_no_api_key() {
        assert!(Config::default().gemini_api_key.is_empty());
    }
}
