use serde::{Deserialize, Serialize};

use pb_core::domain::error::AppError;
use pb_core::usecase::booster::PromptBooster;

use crate::page;

pub const CONTENT_HTML: &str = "text/html; charset=utf-8";
pub const CONTENT_JSON: &str = "application/json";
pub const CONTENT_TEXT: &str = "text/plain; charset=utf-8";

/// HTTP 応答（tiny_http への変換前）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    fn html(body: String) -> Self {
        Self {
            status: 200,
            content_type: CONTENT_HTML,
            body,
        }
    }

    fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: CONTENT_TEXT,
            body: body.to_string(),
        }
    }

    fn json<T: Serialize>(status: u16, payload: &T) -> Self {
        match serde_json::to_string(payload) {
            Ok(body) => Self {
                status,
                content_type: CONTENT_JSON,
                body,
            },
            Err(e) => {
                log::error!("Response serialization failed: {e}");
                Self::text(500, "Internal Server Error")
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BoostArgs {
    prompt: String,
}

#[derive(Debug, Serialize)]
pub struct BoostResponse {
    text: String,
}

/// リクエストを振り分けて応答を組み立てる
pub async fn route(booster: &PromptBooster, method: &str, url: &str, body: &str) -> Reply {
    let path = url.split('?').next().unwrap_or(url);

    match (method, path) {
        ("GET", "/") => Reply::html(page::render("", "")),
        ("POST", "/") => submit_form(booster, body).await,
        ("POST", "/api/boost") => boost_api(booster, body).await,
        ("GET", "/health") => Reply::text(200, "OK"),
        _ => {
            log::debug!("No route for {method} {path}");
            Reply::text(404, "Not Found")
        }
    }
}

/// フォーム送信: 結果は常に出力欄に表示する
async fn submit_form(booster: &PromptBooster, body: &str) -> Reply {
    let prompt = form_field(body, "prompt").unwrap_or_default();
    let output = booster.boost_for_display(&prompt).await;
    Reply::html(page::render(&prompt, &output))
}

async fn boost_api(booster: &PromptBooster, body: &str) -> Reply {
    let args: BoostArgs = match serde_json::from_str(body) {
        Ok(args) => args,
        Err(e) => {
            let err = AppError::invalid_input(format!("Invalid request body: {e}"));
            return Reply::json(400, &err);
        }
    };

    match booster.boost(&args.prompt).await {
        Ok(text) => Reply::json(200, &BoostResponse { text }),
        Err(e) => Reply::json(502, &AppError::from(e)),
    }
}

/// `application/x-www-form-urlencoded` 本文から値を取り出す
fn form_field(body: &str, name: &str) -> Option<String> {
    url::form_urlencoded::parse(body.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;

    use pb_core::infra::rewriter::{NoopRewriter, RewriteError, Rewriter};

    struct FailingRewriter(RewriteError);

    #[async_trait]
    impl Rewriter for FailingRewriter {
        async fn rewrite(&self, _text: &str) -> Result<String, RewriteError> {
            Err(self.0.clone())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn noop_booster() -> PromptBooster {
        PromptBooster::new(Arc::new(NoopRewriter))
    }

    fn failing_booster(err: RewriteError) -> PromptBooster {
        PromptBooster::new(Arc::new(FailingRewriter(err)))
    }

    #[tokio::test]
    async fn test_get_form() {
        let reply = route(&noop_booster(), "GET", "/", "").await;
        assert_eq!(reply.status, 200);
        assert_eq!(reply.content_type, CONTENT_HTML);
        assert!(reply.body.contains(page::TITLE));
    }

    #[tokio::test]
    async fn test_get_form_with_query() {
        let reply = route(&noop_booster(), "GET", "/?__theme=light", "").await;
        assert_eq!(reply.status, 200);
    }

    #[tokio::test]
    async fn test_submit_form_shows_output() {
        let reply = route(
            &noop_booster(),
            "POST",
            "/",
            "prompt=write+about+%3Cpumps%3E",
        )
        .await;
        assert_eq!(reply.status, 200);
        assert!(reply
            .body
            .contains(">\nwrite about &lt;pumps&gt;</textarea>\n<button"));
        assert!(reply
            .body
            .contains("readonly>\nwrite about &lt;pumps&gt;</textarea>"));
    }

    #[tokio::test]
    async fn test_submit_form_missing_field() {
        let reply = route(&noop_booster(), "POST", "/", "other=1").await;
        assert_eq!(reply.status, 200);
        assert!(reply.body.contains("readonly>\n</textarea>"));
    }

    #[tokio::test]
    async fn test_submit_form_shows_error_text() {
        let booster = failing_booster(RewriteError::Transport { status: 500 });
        let reply = route(&booster, "POST", "/", "prompt=hi").await;
        assert_eq!(reply.status, 200);
        assert!(reply
            .body
            .contains("Error: Failed to get response from Ollama."));
    }

    #[tokio::test]
    async fn test_api_success() {
        let reply = route(&noop_booster(), "POST", "/api/boost", r#"{"prompt":"abc"}"#).await;
        assert_eq!(reply.status, 200);
        assert_eq!(reply.content_type, CONTENT_JSON);
        let json: serde_json::Value = serde_json::from_str(&reply.body).unwrap();
        assert_eq!(json["text"], "abc");
    }

    #[tokio::test]
    async fn test_api_error_code() {
        let booster = failing_booster(RewriteError::Format);
        let reply = route(&booster, "POST", "/api/boost", r#"{"prompt":"abc"}"#).await;
        assert_eq!(reply.status, 502);
        let json: serde_json::Value = serde_json::from_str(&reply.body).unwrap();
        assert_eq!(json["code"], "E_FORMAT");
        assert_eq!(json["message"], "Error: Unexpected response format.");
    }

    #[tokio::test]
    async fn test_api_invalid_body() {
        let reply = route(&noop_booster(), "POST", "/api/boost", "prompt=abc").await;
        assert_eq!(reply.status, 400);
        let json: serde_json::Value = serde_json::from_str(&reply.body).unwrap();
        assert_eq!(json["code"], "E_INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_health_and_not_found() {
        let reply = route(&noop_booster(), "GET", "/health", "").await;
        assert_eq!(reply, Reply::text(200, "OK"));

        let reply = route(&noop_booster(), "DELETE", "/", "").await;
        assert_eq!(reply.status, 404);
    }

    #[test]
    fn test_form_field_decoding() {
        assert_eq!(
            form_field("a=1&prompt=x%26y+z", "prompt").as_deref(),
            Some("x&y z")
        );
        assert_eq!(form_field("", "prompt"), None);
    }
}
