//! LLM-backed statement analysis over an OpenAI-compatible chat completions API.
//!
//! The model is asked to reply with a JSON document; the reply text is parsed
//! into `AnalysisResult`. Any failure degrades to `AnalysisResult::fallback()`.

use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use spendscope_core::Transaction;
use tracing::{debug, warn};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

const SYSTEM_PROMPT: &str = "You are a financial analyst who specializes in analyzing bank transactions. Provide detailed financial insights and recommendations based on the transaction data provided.";

const RESPONSE_SHAPE: &str = r#"{
  "insights": [List of 4-5 key financial insights based on the data],
  "topSpendingCategory": "The category with highest spending",
  "savingsOpportunities": [
    {
      "amount": estimated savings amount number,
      "description": "Description of how to save this money"
    }
  ],
  "budgetRecommendations": [List of 3-4 specific budget recommendations]
}"#;

const FAILURE_INSIGHT: &str = "Could not generate insights due to an error.";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub top_spending_category: String,
    #[serde(default)]
    pub savings_opportunities: Vec<SavingsOpportunity>,
    #[serde(default)]
    pub budget_recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsOpportunity {
    pub amount: f64,
    pub description: String,
}

impl AnalysisResult {
    /// What callers show when the analysis could not be produced
    pub fn fallback() -> Self {
        Self {
            insights: vec![FAILURE_INSIGHT.to_string()],
            ..Self::default()
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("OpenAI API key is required")]
    MissingApiKey,

    #[error("analysis request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("analysis API error {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("no analysis received from the model")]
    EmptyResponse,

    #[error("failed to parse analysis results: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("failed to encode transactions for analysis: {0}")]
    Encode(#[source] serde_json::Error),
}

/// A completed analysis attempt. `failure` is set when `result` is the fallback.
#[derive(Debug)]
pub struct Analysis {
    pub result: AnalysisResult,
    pub failure: Option<AnalysisError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// User message embedding the full transaction list and the reply shape.
pub fn build_prompt(txns: &[Transaction]) -> Result<String, AnalysisError> {
    let data = serde_json::to_string_pretty(txns).map_err(AnalysisError::Encode)?;
    Ok(format!(
        "Analyze these bank transactions and provide financial insights:\n{data}\n\n\
         Please provide your analysis in the following JSON format:\n{RESPONSE_SHAPE}\n\n\
         Only return the JSON, no other text."
    ))
}

fn build_request(config: &AnalysisConfig, txns: &[Transaction]) -> Result<ChatRequest, AnalysisError> {
    Ok(ChatRequest {
        model: config.model.clone(),
        messages: vec![
            ChatMessage {
                role: "system",
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user",
                content: build_prompt(txns)?,
            },
        ],
        temperature: config.temperature,
    })
}

// Models sometimes wrap JSON in a markdown fence.
fn strip_code_fence(s: &str) -> &str {
    let t = s.trim();
    match t.strip_prefix("```") {
        Some(rest) => {
            let rest = rest.strip_prefix("json").unwrap_or(rest);
            rest.strip_suffix("```").unwrap_or(rest).trim()
        }
        None => t,
    }
}

/// Parse the model's reply text into an `AnalysisResult`.
pub fn parse_analysis_content(content: &str) -> Result<AnalysisResult, AnalysisError> {
    let body = strip_code_fence(content);
    if body.is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }
    serde_json::from_str(body).map_err(|e| {
        debug!(content = %body, "unparseable analysis content");
        AnalysisError::Malformed(e)
    })
}

/// Pull `error.message` out of an API error body, if there is one.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| "Error analyzing transactions".to_string())
}

#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    config: AnalysisConfig,
}

impl AnalysisClient {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Send the transactions for analysis. The key is used for this request only.
    pub async fn analyze(
        &self,
        txns: &[Transaction],
        api_key: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(AnalysisError::MissingApiKey);
        }

        let body = build_request(&self.config, txns)?;
        debug!(model = %self.config.model, count = txns.len(), "requesting analysis");

        let resp = self
            .http
            .post(self.endpoint())
            .header(AUTHORIZATION, format!("Bearer {api_key}"))
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            return Err(AnalysisError::Status {
                status,
                message: api_error_message(&txt),
            });
        }

        let out: ChatResponse = resp.json().await?;
        let content = out
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        parse_analysis_content(&content)
    }

    /// Like `analyze`, but never fails: errors are logged and replaced by the fallback.
    pub async fn analyze_or_fallback(&self, txns: &[Transaction], api_key: &str) -> Analysis {
        match self.analyze(txns, api_key).await {
            Ok(result) => Analysis {
                result,
                failure: None,
            },
            Err(e) => {
                warn!(error = %e, "analysis failed; using fallback");
                Analysis {
                    result: AnalysisResult::fallback(),
                    failure: Some(e),
                }
            }
        }
    }
}
