use serde::{Deserialize, Serialize};

/// アプリケーション設定（起動時に固定）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Ollama サーバーのベース URL
    pub ollama_url: String,
    /// 使用モデル
    pub model: String,
    /// 推論リクエストのタイムアウト秒数
    pub timeout_secs: u64,
    /// フォームサーバーのバインドアドレス
    pub bind_host: String,
    /// フォームサーバーのポート
    pub port: u16,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            ollama_url: "http://localhost:11434".to_string(),
            model: "llama3.1:8b".to_string(),
            timeout_secs: 60,
            bind_host: "0.0.0.0".to_string(),
            port: 7860,
        }
    }
}

impl AppSettings {
    /// フォームサーバーの待受アドレス
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}
