use std::sync::Arc;
use std::time::Instant;

use crate::infra::rewriter::{RewriteError, Rewriter};

/// プロンプトブースター（フォームと JSON API から共有される）
///
/// 呼び出し間で状態を持たない。1 回の呼び出しにつき推論リクエストは 1 回。
pub struct PromptBooster {
    rewriter: Arc<dyn Rewriter>,
}

impl PromptBooster {
    pub fn new(rewriter: Arc<dyn Rewriter>) -> Self {
        Self { rewriter }
    }

    pub fn rewriter_name(&self) -> &str {
        self.rewriter.name()
    }

    /// 入力テキストをリライトし、構造化された結果を返す
    pub async fn boost(&self, text: &str) -> Result<String, RewriteError> {
        let start = Instant::now();
        log::info!(
            "Boosting prompt via {} ({} chars)",
            self.rewriter.name(),
            text.chars().count()
        );

        let result = self.rewriter.rewrite(text).await;
        let elapsed_ms = start.elapsed().as_millis();

        match &result {
            Ok(output) => log::info!(
                "Boost finished in {elapsed_ms}ms ({} chars)",
                output.chars().count()
            ),
            Err(e) => log::error!("Boost failed after {elapsed_ms}ms [{:?}]: {e}", e.code()),
        }

        result
    }

    /// 表示用: 失敗時はエラーの表示文字列を返す
    pub async fn boost_for_display(&self, text: &str) -> String {
        match self.boost(text).await {
            Ok(output) => output,
            Err(e) => e.to_string(),
        }
    }
}
