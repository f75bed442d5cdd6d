//! Hosted rule advisor
//!
//! Talks to an OpenAI-compatible chat-completions endpoint. Replies are
//! free text; a draft is recovered from the first JSON object in the reply
//! and is still unvalidated when it leaves this module.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use awb_domain::error::{Error, Result};
use awb_domain::ports::{RuleAdvisor, RuleDraft};
use awb_domain::{Rule, Snapshot};

use super::{DRAFT_INSTRUCTIONS, EXPLAIN_INSTRUCTIONS, extract_json_object, snapshot_context};
use crate::config::AdvisorConfig;
use crate::constants::CONTENT_TYPE_JSON;
use crate::error_ext::ErrorContext;

/// Chat-completions rule advisor
///
/// ## Example
///
/// ```rust,no_run
/// use awb_infrastructure::advisor::HttpRuleAdvisor;
/// use reqwest::Client;
/// use std::time::Duration;
///
/// let advisor = HttpRuleAdvisor::new(
///     "https://api.openai.com/v1".to_string(),
///     "gpt-4o-mini".to_string(),
///     "sk-your-api-key".to_string(),
///     Duration::from_secs(20),
///     Client::new(),
/// );
/// assert_eq!(advisor.model(), "gpt-4o-mini");
/// ```
pub struct HttpRuleAdvisor {
    base_url: String,
    model: String,
    api_key: String,
    timeout: Duration,
    http_client: Client,
}

impl HttpRuleAdvisor {
    /// Create an advisor over an existing HTTP client
    pub fn new(
        base_url: String,
        model: String,
        api_key: String,
        timeout: Duration,
        http_client: Client,
    ) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            model,
            api_key: api_key.trim().to_string(),
            timeout,
            http_client,
        }
    }

    /// Create an advisor from configuration
    pub fn from_config(config: &AdvisorConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| Error::configuration("advisor.api_key is not set"))?;
        let http_client = Client::builder()
            .timeout(config.timeout())
            .build()
            .config_context("Failed to build advisor HTTP client")?;
        Ok(Self::new(
            config.base_url.clone(),
            config.model.clone(),
            api_key,
            config.timeout(),
            http_client,
        ))
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// One chat turn; `None` when the reply carries no text
    async fn complete(&self, instructions: &str, prompt: String) -> Result<Option<String>> {
        let payload = serde_json::json!({
            "model": self.model,
            "temperature": 0,
            "messages": [
                {"role": "system", "content": instructions},
                {"role": "user", "content": prompt},
            ],
        });

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .header("Content-Type", CONTENT_TYPE_JSON)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::advisor(format!("Request timed out after {:?}", self.timeout))
                } else {
                    Error::advisor_with_source("HTTP request failed", e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::advisor(format!(
                "Advisor request failed ({}): {body}",
                status.as_u16()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .advisor_context("Invalid advisor response")?;
        Ok(body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string))
    }
}

#[async_trait]
impl RuleAdvisor for HttpRuleAdvisor {
    fn name(&self) -> &str {
        "http"
    }

    async fn draft_rule(&self, request: &str, snapshot: &Snapshot) -> Result<Option<RuleDraft>> {
        let prompt = format!("{}\n\nRequest: {request}", snapshot_context(snapshot));
        let Some(reply) = self.complete(DRAFT_INSTRUCTIONS, prompt).await? else {
            return Ok(None);
        };
        let Some(object) = extract_json_object(&reply) else {
            tracing::warn!(model = %self.model, "advisor reply contained no rule object");
            return Ok(None);
        };
        match serde_json::from_str::<RuleDraft>(object) {
            Ok(draft) => Ok(Some(draft)),
            Err(e) => {
                tracing::warn!(model = %self.model, error = %e, "advisor draft could not be decoded");
                Ok(None)
            }
        }
    }

    async fn explain_rule(&self, rule: &Rule) -> Result<Option<String>> {
        let prompt = serde_json::to_string_pretty(rule)?;
        self.complete(EXPLAIN_INSTRUCTIONS, prompt).await
    }
}
