use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use orchestrator::{ChatRequest, ChatResponse, Orchestrator, OrchestratorError};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const SERVICE_NAME: &str = "NeuroCare Mental Health API";
const DEFAULT_ADDR: &str = "127.0.0.1:8001";

#[derive(Clone)]
struct AppState {
    orchestrator: Arc<Orchestrator>,
}

#[derive(Debug, Serialize)]
struct ServiceInfo {
    message: String,
    endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
struct Endpoints {
    chat: &'static str,
    health: &'static str,
}

#[derive(Debug, Serialize)]
struct Health {
    status: String,
    service: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let addr: SocketAddr = env::var("CARE_API_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;

    let state = AppState {
        orchestrator: Arc::new(Orchestrator::from_env()),
    };

    let app = router(state).layer(cors_layer(env::var("CARE_CORS_ORIGINS").ok().as_deref()));

    info!(%addr, "NeuroCare API listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/chat", post(chat))
        .with_state(state)
}

/// Allow every origin unless a comma-separated list is configured.
fn cors_layer(origins: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let origins: Vec<HeaderValue> = origins
        .unwrap_or("*")
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty() && *origin != "*")
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "NeuroCare API is running. POST to /api/chat to talk.".to_string(),
        endpoints: Endpoints {
            chat: "/api/chat",
            health: "/health",
        },
    })
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}

async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let response = state.orchestrator.handle(payload).await?;
    Ok(Json(response))
}

#[derive(Debug)]
enum ApiError {
    InvalidInput(String),
}

impl From<OrchestratorError> for ApiError {
    fn from(err: OrchestratorError) -> Self {
        match err {
            OrchestratorError::InvalidInput(message) => ApiError::InvalidInput(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidInput(message) => {
                warn!(%message, "Rejected chat request");
                let body = serde_json::json!({
                    "error": {
                        "message": message,
                        "type": "invalid_input"
                    }
                });
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
        }
    }
}
