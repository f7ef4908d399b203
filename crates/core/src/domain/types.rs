use serde::{Deserialize, Serialize};
use serde_json::Value;

/// テンプレート内でユーザー入力に置き換えられるプレースホルダ
pub const PLACEHOLDER: &str = "{user_input}";

/// リライト要求（呼び出しごとに生成・破棄される）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRequest {
    pub raw_text: String,
    pub template: String,
}

impl RewriteRequest {
    pub fn new(raw_text: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            template: template.into(),
        }
    }

    /// テンプレートのプレースホルダを入力テキストで置換した最終プロンプト。
    /// 入力テキスト中の波括弧は解釈しない。
    pub fn formatted_prompt(&self) -> String {
        self.template.replace(PLACEHOLDER, &self.raw_text)
    }
}

/// 推論サーバー応答の判別結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatReply {
    /// `{"message": {"content": ...}}`
    DirectMessage(String),
    /// `{"choices": [{"message": {"content": ...}}, ...]}`
    ChoiceList(String),
    /// キーはあるが中身が期待した形ではない（理由付き）
    Malformed(String),
    Unrecognized,
}

impl ChatReply {
    /// JSON 値から応答形式を判別する。
    ///
    /// `message` キーがあれば（null でも）それを優先し、`choices` にはフォールバックしない。
    /// `choices` は空・null・false などの偽値なら無いものとして扱う。
    /// 選んだキーの中身に文字列の `content` が無ければ `Malformed`。
    pub fn from_json(value: &Value) -> Self {
        if let Some(message) = value.get("message") {
            return match content_of(message) {
                Some(text) => ChatReply::DirectMessage(text),
                None => ChatReply::Malformed(format!("'message' has no string 'content': {message}")),
            };
        }

        match value.get("choices").filter(|choices| is_truthy(choices)) {
            None => ChatReply::Unrecognized,
            Some(Value::Array(choices)) => {
                let first = &choices[0];
                match first.get("message").and_then(content_of) {
                    Some(text) => ChatReply::ChoiceList(text),
                    None => ChatReply::Malformed(format!(
                        "'choices[0]' has no string 'message.content': {first}"
                    )),
                }
            }
            Some(other) => ChatReply::Malformed(format!("'choices' is not a list: {other}")),
        }
    }

    /// 取り出せたテキスト（`Malformed` と `Unrecognized` は None）
    pub fn into_text(self) -> Option<String> {
        match self {
            ChatReply::DirectMessage(text) | ChatReply::ChoiceList(text) => Some(text),
            ChatReply::Malformed(_) | ChatReply::Unrecognized => None,
        }
    }
}

fn content_of(message: &Value) -> Option<String> {
    message
        .get("content")
        .and_then(Value::as_str)
        .map(str::to_owned)
}

/// 空・ゼロ・null・false を偽とみなす
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
