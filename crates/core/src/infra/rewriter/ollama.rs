use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::prompts;
use super::{RewriteError, Rewriter};
use crate::domain::settings::AppSettings;
use crate::domain::types::ChatReply;

/// Ollama リライターの設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Ollama サーバーのベース URL
    pub base_url: String,
    /// モデル識別子
    pub model: String,
    /// `{user_input}` を含む指示テンプレート
    pub template: String,
    /// タイムアウト秒数
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".into(),
            model: "llama3.1:8b".into(),
            template: prompts::PROPOSAL_TEMPLATE.into(),
            timeout_secs: 60,
        }
    }
}

impl From<&AppSettings> for OllamaConfig {
    fn from(settings: &AppSettings) -> Self {
        Self {
            base_url: settings.ollama_url.clone(),
            model: settings.model.clone(),
            timeout_secs: settings.timeout_secs,
            ..Default::default()
        }
    }
}

/// Ollama `/api/chat` を使用したリライター
pub struct OllamaRewriter {
    client: reqwest::Client,
    config: OllamaConfig,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

impl OllamaRewriter {
    pub fn new(config: OllamaConfig) -> Result<Self, RewriteError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RewriteError::Network(format!("HTTP client build failed: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    /// チャットエンドポイント URL（末尾の `/` は無視する）
    pub fn endpoint(&self) -> String {
        format!("{}/api/chat", self.config.base_url.trim_end_matches('/'))
    }

    fn map_send_error(&self, e: reqwest::Error) -> RewriteError {
        if e.is_timeout() {
            RewriteError::Network(format!(
                "request timed out after {}s: {e}",
                self.config.timeout_secs
            ))
        } else {
            RewriteError::Network(format!("HTTP request failed: {e}"))
        }
    }
}

#[async_trait]
impl Rewriter for OllamaRewriter {
    async fn rewrite(&self, text: &str) -> Result<String, RewriteError> {
        let prompt = prompts::build_prompt(&self.config.template, text);

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            stream: false,
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            log::warn!("Ollama returned {status} for model {}", self.config.model);
            return Err(RewriteError::Transport {
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.map_send_error(e)
            } else {
                RewriteError::Network(format!("Response parse error: {e}"))
            }
        })?;

        let reply = ChatReply::from_json(&body);
        log::debug!("Ollama reply decoded as {reply:?}");

        match reply {
            ChatReply::DirectMessage(text) | ChatReply::ChoiceList(text) => Ok(text),
            ChatReply::Malformed(detail) => {
                Err(RewriteError::Network(format!("Malformed response: {detail}")))
            }
            ChatReply::Unrecognized => Err(RewriteError::Format),
        }
    }

    fn name(&self) -> &str {
        "ollama"
    }
}
