//! Mock transcription service for integration tests
//!
//! Serves the same routes as the real service and records every upload so
//! tests can inspect what went over the wire

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::json;
use tokio_util::sync::CancellationToken;

/// Content types the service accepts for the audio part
const ALLOWED_AUDIO_TYPES: &[&str] = &[
    "audio/mpeg",
    "audio/mp3",
    "audio/wav",
    "audio/x-wav",
    "audio/x-m4a",
    "audio/m4a",
];

/// Transcript returned for every accepted upload
pub const TRANSCRIPT_TEXT: &str = "今天的会议讨论下季度预算";

/// What the mock saw in one multipart upload
#[derive(Debug, Clone, Default)]
pub struct ReceivedUpload {
    /// Name of the multipart field carrying the file
    pub file_field: Option<String>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub audio: Vec<u8>,
    /// Text fields by name
    pub fields: BTreeMap<String, String>,
    pub user_agent: Option<String>,
}

/// Mock transcription service bound to a random local port
pub struct MockService {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    root_count: AtomicU32,
    uploads: Mutex<Vec<ReceivedUpload>>,
    /// Status and body returned instead of a transcript (if set)
    failure: Option<(StatusCode, serde_json::Value)>,
}

impl MockService {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(None).await
    }

    /// Start a mock server that answers every transcription with `status`
    /// and a `{"detail": ...}` body
    pub async fn start_failing(status: StatusCode, detail: &str) -> anyhow::Result<Self> {
        Self::start_inner(Some((status, json!({ "detail": detail })))).await
    }

    async fn start_inner(failure: Option<(StatusCode, serde_json::Value)>) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            root_count: AtomicU32::new(0),
            uploads: Mutex::default(),
            failure,
        });

        let app = Router::new()
            .route("/", routing::get(handle_root))
            .route("/api/v1/transcribe/", routing::post(handle_transcribe))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL to point a client at
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of `GET /` requests received
    pub fn root_count(&self) -> u32 {
        self.state.root_count.load(Ordering::Relaxed)
    }

    /// Uploads received so far, oldest first
    pub fn uploads(&self) -> Vec<ReceivedUpload> {
        self.state.uploads.lock().map(|u| u.clone()).unwrap_or_default()
    }
}

impl Drop for MockService {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

// -- Handlers --

async fn handle_root(State(state): State<Arc<MockState>>) -> Json<serde_json::Value> {
    state.root_count.fetch_add(1, Ordering::Relaxed);

    Json(json!({
        "message": "Welcome to Whisper Transcription API",
        "docs_url": "/docs",
        "redoc_url": "/redoc",
    }))
}

async fn handle_transcribe(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let mut upload = ReceivedUpload {
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        ..ReceivedUpload::default()
    };

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_owned();

        if field.file_name().is_some() {
            upload.file_field = Some(name);
            upload.file_name = field.file_name().map(str::to_owned);
            upload.content_type = field.content_type().map(str::to_owned);
            upload.audio = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        } else {
            let value = field.text().await.unwrap_or_default();
            upload.fields.insert(name, value);
        }
    }

    if let Ok(mut uploads) = state.uploads.lock() {
        uploads.push(upload.clone());
    }

    if let Some((status, body)) = &state.failure {
        return (*status, Json(body.clone())).into_response();
    }

    if upload.file_field.as_deref() != Some("file") {
        let detail = json!([{ "loc": ["body", "file"], "msg": "field required", "type": "value_error.missing" }]);
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "detail": detail }))).into_response();
    }

    let content_type = upload.content_type.clone().unwrap_or_default();
    if !ALLOWED_AUDIO_TYPES.contains(&content_type.as_str()) {
        let detail = format!("不支持的文件类型: {content_type}. 支持的类型: {ALLOWED_AUDIO_TYPES:?}");
        return (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail }))).into_response();
    }

    if upload.fields.get("return_type").map(String::as_str) == Some("text") {
        return Json(json!({ "text": TRANSCRIPT_TEXT })).into_response();
    }

    let detected_scene = match upload.fields.get("scene").map(String::as_str) {
        None | Some("auto") => "会议",
        Some(scene) => scene,
    };

    Json(json!({
        "text": TRANSCRIPT_TEXT,
        "segments": [
            { "id": 0, "start": 0.0, "end": 1.8, "text": "今天的会议" },
            { "id": 1, "start": 1.8, "end": 3.6, "text": "讨论下季度预算" },
        ],
        "processing_time": 0.42,
        "model_type": "original_whisper_small",
        "device": "cpu",
        "language": upload.fields.get("language").cloned().unwrap_or_else(|| "unknown".to_owned()),
        "detected_scene": detected_scene,
        "found_keywords": ["预算"],
        "found_semantics": {},
    }))
    .into_response()
}
