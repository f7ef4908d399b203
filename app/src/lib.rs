mod page;
mod routes;

use std::io::Read;
use std::sync::Arc;
use std::thread;

use tiny_http::{Header, Request, Response, Server, StatusCode};
use tokio::runtime::Handle;
use tracing_subscriber::EnvFilter;

use pb_core::domain::settings::AppSettings;
use pb_core::infra::rewriter::{OllamaConfig, OllamaRewriter, RewriteError, Rewriter};
use pb_core::usecase::booster::PromptBooster;

/// 起動時エラー
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("failed to create inference client: {0}")]
    Client(#[from] RewriteError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to bind {addr}: {reason}")]
    Bind { addr: String, reason: String },
}

/// ログ出力を初期化する（`RUST_LOG` で上書き可、既定 info）
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("logger already initialized: {e}");
    }
}

/// Ollama リライターを構築する
fn create_rewriter(settings: &AppSettings) -> Result<Arc<dyn Rewriter>, ServeError> {
    let rewriter = OllamaRewriter::new(OllamaConfig::from(settings))?;
    log::info!(
        "Using Ollama rewriter at {} (model {})",
        rewriter.endpoint(),
        settings.model
    );
    Ok(Arc::new(rewriter))
}

pub fn run() -> Result<(), ServeError> {
    init_logging();

    let settings = AppSettings::default();
    let booster = Arc::new(PromptBooster::new(create_rewriter(&settings)?));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let addr = settings.bind_addr();
    let server = Server::http(&addr).map_err(|e| ServeError::Bind {
        addr: addr.clone(),
        reason: e.to_string(),
    })?;
    log::info!("Prompt Booster running on http://{addr}");

    for request in server.incoming_requests() {
        let booster = booster.clone();
        let handle = runtime.handle().clone();
        // 1 リクエスト 1 スレッド。推論呼び出しは完了・タイムアウト・失敗まで待つ
        thread::spawn(move || serve_request(request, &booster, &handle));
    }

    Ok(())
}

/// 本文を読み切ってルーティングし、応答を返す。
/// 本文長はクライアントの Content-Length に従い、ここでは切り詰めない。
fn serve_request(mut request: Request, booster: &PromptBooster, handle: &Handle) {
    let method = request.method().to_string();
    let url = request.url().to_string();

    let mut body = String::with_capacity(request.body_length().unwrap_or(0));
    let reply = match request.as_reader().read_to_string(&mut body) {
        Ok(_) => handle.block_on(routes::route(booster, &method, &url, &body)),
        Err(e) => {
            log::warn!("Failed to read request body for {method} {url}: {e}");
            routes::Reply {
                status: 400,
                content_type: routes::CONTENT_TEXT,
                body: "Bad Request".to_string(),
            }
        }
    };

    log::debug!("{method} {url} -> {}", reply.status);

    let mut response = Response::from_string(reply.body).with_status_code(StatusCode(reply.status));
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes()) {
        response.add_header(header);
    }

    if let Err(e) = request.respond(response) {
        log::error!("Failed to send response for {method} {url}: {e}");
    }
}
