//! プロンプトテンプレート

pub use crate::domain::types::PLACEHOLDER;

use crate::domain::types::RewriteRequest;

/// 提案書ライター: 曖昧な入力を簡潔で構造化された LLM プロンプトに書き直す
pub const PROPOSAL_TEMPLATE: &str = r#"
You are an expert proposal writer.

The user has written a simple or unclear prompt:
"{user_input}"

Your only task is to rewrite it into a brief, well-structured prompt for LLM.

Do not include assumptions, generic statements, or content not grounded in the provided prompt.

No expansion, no additional context, just a clear and concise prompt.
"#;

/// テンプレートに入力テキストを埋め込んだプロンプトを構築する
pub fn build_prompt(template: &str, text: &str) -> String {
    RewriteRequest::new(text, template).formatted_prompt()
}
