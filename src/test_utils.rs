use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::logging::init_test_logging;
use crate::tool_gateway::ToolGateway;
use crate::unity_bridge_client::UnityBridgeClient;

/// A request the stub bridge received on one of its tool endpoints
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Recorded body is not JSON")
    }
}

#[derive(Clone)]
struct StubState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    ping_status: StatusCode,
    tool_status: StatusCode,
}

/// In-process stand-in for the Unity Editor bridge
///
/// `/ping` answers with `ping_status`. Every other path records the request and echoes the
/// JSON body back (or `{"success": true}` for an empty body) unless `tool_status` is a failure.
pub struct StubUnityBridge {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    task: JoinHandle<()>,
}

impl StubUnityBridge {
    pub async fn start() -> Self {
        Self::start_with(StatusCode::OK, StatusCode::OK).await
    }

    /// Bridge whose tool endpoints all answer with `status`
    pub async fn failing(status: StatusCode) -> Self {
        Self::start_with(StatusCode::OK, status).await
    }

    /// Bridge that is listening but reports an unhealthy ping
    pub async fn unhealthy(status: StatusCode) -> Self {
        Self::start_with(status, StatusCode::OK).await
    }

    async fn start_with(ping_status: StatusCode, tool_status: StatusCode) -> Self {
        init_test_logging();

        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            requests: requests.clone(),
            ping_status,
            tool_status,
        };
        let app = Router::new()
            .route("/ping", get(stub_ping))
            .fallback(stub_tool)
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub Unity bridge");
        let addr = listener.local_addr().expect("Stub bridge has no local address");
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            url: format!("http://{}", addr),
            requests,
            task,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn gateway(&self) -> ToolGateway {
        ToolGateway::with_client(UnityBridgeClient::new(self.url.clone()).unwrap())
    }
}

impl Drop for StubUnityBridge {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn stub_ping(State(state): State<StubState>) -> Response {
    (state.ping_status, Json(json!({ "status": "ok" }))).into_response()
}

async fn stub_tool(State(state): State<StubState>, uri: Uri, body: Bytes) -> Response {
    state.requests.lock().unwrap().push(RecordedRequest {
        path: uri.path().to_string(),
        body: body.to_vec(),
    });

    if !state.tool_status.is_success() {
        return state.tool_status.into_response();
    }
    if body.is_empty() {
        return Json(json!({ "success": true })).into_response();
    }
    match serde_json::from_slice::<Value>(&body) {
        Ok(value) => Json(value).into_response(),
        Err(_) => StatusCode::BAD_REQUEST.into_response(),
    }
}

/// URL on which nothing is listening
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Probe listener has no local address");
    drop(listener);
    format!("http://{}", addr)
}

/// Gateway pointed at a URL on which nothing is listening
pub async fn unreachable_gateway() -> ToolGateway {
    init_test_logging();
    ToolGateway::with_client(UnityBridgeClient::new(unreachable_url().await).unwrap())
}
