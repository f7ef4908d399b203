use async_trait::async_trait;
use super::{RewriteError, Rewriter};

/// NoopRewriter: テキストをそのまま返す（フォーム・ユースケースのテスト用）
pub struct NoopRewriter;

#[async_trait]
impl Rewriter for NoopRewriter {
    async fn rewrite(&self, text: &str) -> Result<String, RewriteError> {
        Ok(text.to_string())
    }

    fn name(&self) -> &str {
        "noop"
    }
}
