mod noop;
pub mod ollama;
pub mod prompts;

pub use noop::NoopRewriter;
pub use ollama::{OllamaConfig, OllamaRewriter};

use async_trait::async_trait;

use crate::domain::error::{AppError, ErrorCode};

/// リライトエラー（表示文字列化は呼び出し側の責務）
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RewriteError {
    /// 推論サーバーが 200 以外を返した
    #[error("Error: Failed to get response from Ollama.")]
    Transport { status: u16 },
    /// 200 だが既知の応答形式ではない
    #[error("Error: Unexpected response format.")]
    Format,
    /// 接続・タイムアウト・デコードなどの例外的失敗
    #[error("Exception occurred: {0}")]
    Network(String),
}

impl RewriteError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RewriteError::Transport { .. } => ErrorCode::Transport,
            RewriteError::Format => ErrorCode::Format,
            RewriteError::Network(_) => ErrorCode::Network,
        }
    }
}

impl From<RewriteError> for AppError {
    fn from(err: RewriteError) -> Self {
        AppError::new(err.code(), err.to_string(), true)
    }
}

/// リライター trait（推論バックエンドが実装する）
#[async_trait]
pub trait Rewriter: Send + Sync {
    async fn rewrite(&self, text: &str) -> Result<String, RewriteError>;

    fn name(&self) -> &str;
}
