//! In-process stand-in for the Unity Editor REST server.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Skill name that answers with a non-JSON body
pub const BROKEN_SKILL: &str = "broken_skill";
/// Skill name that answers after [`SLOW_SKILL_DELAY`]
pub const SLOW_SKILL: &str = "slow_skill";
pub const SLOW_SKILL_DELAY: Duration = Duration::from_millis(1500);
/// Skill name that answers 404 with an error payload
pub const MISSING_SKILL: &str = "missing_skill";

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub skill: String,
    pub body: Value,
}

#[derive(Debug, Clone)]
pub enum HealthMode {
    Ok,
    /// Answers 200 with a status other than "ok"
    Starting,
    /// The first `n` polls report "starting", later ones "ok"
    OkAfter(usize),
    /// Fixed status code and body
    Fixed(StatusCode, String),
}

#[derive(Debug, Clone)]
pub struct MockConfig {
    pub health: HealthMode,
    pub skill_reply: Option<Value>,
    pub skills: Value,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            health: HealthMode::Ok,
            skill_reply: None,
            skills: json!({
                "version": "1.0.0",
                "baseUrl": "http://localhost:8090/",
                "skills": [
                    {
                        "name": "gameobject_create",
                        "description": "Create a new GameObject",
                        "endpoint": "POST /skill/gameobject_create",
                        "parameters": [
                            {"name": "name", "type": "string", "required": true, "defaultValue": null},
                            {"name": "x", "type": "number", "required": false, "defaultValue": "0"}
                        ]
                    },
                    {
                        "name": "scene_get_info",
                        "description": "Get information about the current scene",
                        "endpoint": "POST /skill/scene_get_info",
                        "parameters": []
                    }
                ]
            }),
        }
    }
}

impl MockConfig {
    pub fn with_health(mut self, health: HealthMode) -> Self {
        self.health = health;
        self
    }

    pub fn with_skill_reply(mut self, reply: Value) -> Self {
        self.skill_reply = Some(reply);
        self
    }
}

#[derive(Clone)]
struct MockState {
    config: Arc<MockConfig>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    health_polls: Arc<AtomicUsize>,
}

pub struct MockUnity {
    pub base_url: String,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    health_polls: Arc<AtomicUsize>,
}

impl MockUnity {
    /// Bind to 127.0.0.1:0 and serve on the current runtime.
    pub async fn start(config: MockConfig) -> Self {
        let state = MockState {
            config: Arc::new(config),
            calls: Arc::new(Mutex::new(Vec::new())),
            health_polls: Arc::new(AtomicUsize::new(0)),
        };

        let app = Router::new()
            .route("/health", get(health))
            .route("/skills", get(skills))
            .route("/skill/{name}", post(skill))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind to port 0");
        let port = listener.local_addr().expect("get local addr").port();

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Small yield so the listener is ready.
        tokio::time::sleep(Duration::from_millis(10)).await;

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            calls: state.calls,
            health_polls: state.health_polls,
        }
    }

    /// Serve from a dedicated thread, for tests driving the blocking client.
    pub fn start_in_background(config: MockConfig) -> Self {
        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("mock runtime");
            runtime.block_on(async move {
                let server = MockUnity::start(config).await;
                tx.send(server).expect("hand over mock server");
                std::future::pending::<()>().await;
            });
        });
        rx.recv().expect("mock server started")
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn last_call(&self) -> RecordedCall {
        self.calls().pop().expect("at least one skill call")
    }

    pub fn health_polls(&self) -> usize {
        self.health_polls.load(Ordering::SeqCst)
    }
}

/// A base URL with nothing listening behind it.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind to port 0");
    let port = listener.local_addr().expect("get local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

async fn health(State(state): State<MockState>) -> Response {
    let previous = state.health_polls.fetch_add(1, Ordering::SeqCst);
    let ok = json!({"status": "ok", "service": "UnitySkills", "version": "1.0.0"});
    let starting = json!({"status": "starting"});

    match &state.config.health {
        HealthMode::Ok => axum::Json(ok).into_response(),
        HealthMode::Starting => axum::Json(starting).into_response(),
        HealthMode::OkAfter(n) if previous >= *n => axum::Json(ok).into_response(),
        HealthMode::OkAfter(_) => axum::Json(starting).into_response(),
        HealthMode::Fixed(status, body) => (*status, body.clone()).into_response(),
    }
}

async fn skills(State(state): State<MockState>) -> Response {
    axum::Json(state.config.skills.clone()).into_response()
}

async fn skill(
    State(state): State<MockState>,
    Path(name): Path<String>,
    axum::Json(body): axum::Json<Value>,
) -> Response {
    state.calls.lock().expect("calls lock").push(RecordedCall {
        skill: name.clone(),
        body: body.clone(),
    });

    match name.as_str() {
        BROKEN_SKILL => (StatusCode::OK, "<html>not json</html>").into_response(),
        SLOW_SKILL => {
            tokio::time::sleep(SLOW_SKILL_DELAY).await;
            axum::Json(json!({"status": "ok", "result": null})).into_response()
        }
        MISSING_SKILL => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({"status": "error", "error": format!("Skill not found: {name}")})),
        )
            .into_response(),
        _ => match &state.config.skill_reply {
            Some(reply) => axum::Json(reply.clone()).into_response(),
            None => axum::Json(json!({
                "status": "ok",
                "result": {"skill": name, "params": body}
            }))
            .into_response(),
        },
    }
}
